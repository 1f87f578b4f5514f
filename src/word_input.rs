/// Words the player has tapped so far in word mode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordSequence {
    words: Vec<String>,
}

impl WordSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<S: Into<String>>(&mut self, word: S) {
        self.words.push(word.into());
    }

    /// Drop the last word, if any
    pub fn delete(&mut self) {
        self.words.pop();
    }

    pub fn clear(&mut self) {
        self.words.clear();
    }

    /// Start over with `word` as the only entry
    pub fn replace_with<S: Into<String>>(&mut self, word: S) {
        self.words.clear();
        self.words.push(word.into());
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn sentence(&self) -> String {
        self.words.join(" ")
    }
}
