use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static DATA_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/data");

/// One row of a feedback table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackRecord {
    pub text: String,
    pub image_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum FeedbackKind {
    /// Shown after every fifth correct answer
    Compliments,
    /// Shown after the third wrong attempt on a round
    Encouragements,
}

impl FeedbackKind {
    fn file_name(&self) -> String {
        format!("{self}.csv")
    }
}

fn strip_quotes(field: &str) -> &str {
    let field = field.strip_prefix('"').unwrap_or(field);
    field.strip_suffix('"').unwrap_or(field)
}

/// Parse a `text,imageId` table. The first line is a header.
///
/// Every line stands on its own: quotes never span a line break, and lines
/// with fewer than two fields or that don't parse at all are skipped.
pub fn parse(table: &str) -> Vec<FeedbackRecord> {
    table
        .trim()
        .lines()
        .skip(1)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> Option<FeedbackRecord> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(line.as_bytes());

    match reader.records().next()? {
        Ok(row) if row.len() >= 2 => Some(FeedbackRecord {
            text: strip_quotes(&row[0]).to_string(),
            image_id: strip_quotes(&row[1]).to_string(),
        }),
        Ok(row) => {
            log::debug!("skipping short feedback row {row:?}");
            None
        }
        Err(e) => {
            log::debug!("skipping unreadable feedback row {line:?}: {e}");
            None
        }
    }
}

fn embedded_table(kind: FeedbackKind) -> Vec<FeedbackRecord> {
    match DATA_DIR
        .get_file(kind.file_name())
        .and_then(|f| f.contents_utf8())
    {
        Some(text) => parse(text),
        None => {
            log::warn!("no embedded {kind} table");
            Vec::new()
        }
    }
}

/// Both feedback collections, parsed once
#[derive(Debug, Clone, Default)]
pub struct FeedbackBook {
    compliments: Vec<FeedbackRecord>,
    encouragements: Vec<FeedbackRecord>,
}

impl FeedbackBook {
    pub fn new(compliments: Vec<FeedbackRecord>, encouragements: Vec<FeedbackRecord>) -> Self {
        Self {
            compliments,
            encouragements,
        }
    }

    pub fn from_tables(compliments: &str, encouragements: &str) -> Self {
        Self::new(parse(compliments), parse(encouragements))
    }

    /// The tables shipped inside the binary
    pub fn embedded() -> &'static FeedbackBook {
        static BOOK: OnceLock<FeedbackBook> = OnceLock::new();
        BOOK.get_or_init(|| {
            Self::new(
                embedded_table(FeedbackKind::Compliments),
                embedded_table(FeedbackKind::Encouragements),
            )
        })
    }

    pub fn records(&self, kind: FeedbackKind) -> &[FeedbackRecord] {
        match kind {
            FeedbackKind::Compliments => &self.compliments,
            FeedbackKind::Encouragements => &self.encouragements,
        }
    }

    pub fn pick<R: Rng + ?Sized>(&self, kind: FeedbackKind, rng: &mut R) -> Option<&FeedbackRecord> {
        self.records(kind).choose(rng)
    }
}

/// Resolves an image id to something the front-end can show
pub trait ImageLookup {
    fn image_for(&self, kind: FeedbackKind, image_id: &str) -> Option<PathBuf>;
}

/// No images at all; interstitials show text only
#[derive(Debug, Clone, Copy, Default)]
pub struct NoImages;

impl ImageLookup for NoImages {
    fn image_for(&self, _kind: FeedbackKind, _image_id: &str) -> Option<PathBuf> {
        None
    }
}

/// Looks for `<root>/<kind>/<image_id>.png` on disk
#[derive(Debug, Clone)]
pub struct DirImageLookup {
    root: PathBuf,
}

impl DirImageLookup {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ImageLookup for DirImageLookup {
    fn image_for(&self, kind: FeedbackKind, image_id: &str) -> Option<PathBuf> {
        let path = self
            .root
            .join(kind.to_string())
            .join(format!("{image_id}.png"));
        path.is_file().then_some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::tempdir;

    #[test]
    fn test_parse_quoted_row() {
        let records = parse("header\n\"Goed zo!\",img1");
        assert_eq!(
            records,
            vec![FeedbackRecord {
                text: "Goed zo!".into(),
                image_id: "img1".into()
            }]
        );
    }

    #[test]
    fn test_short_rows_are_dropped() {
        let records = parse("text,imageId\nalleen tekst\nKnap!,03\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text, "Knap!");
        assert_eq!(records[0].image_id, "03");
    }

    #[test]
    fn test_comma_inside_quotes() {
        let records = parse("text,imageId\n\"Rustig, heel rustig\", 07\n\n\"Nog een\",\"08\"");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text, "Rustig, heel rustig");
        assert_eq!(records[0].image_id, "07");
        assert_eq!(records[1].image_id, "08");
    }

    #[test]
    fn test_unbalanced_quote_only_loses_its_own_line() {
        let records = parse("text,imageId\n\"Kapot,01\nGoed zo!,02\nKnap!,03\n");
        assert_eq!(
            records,
            vec![
                FeedbackRecord {
                    text: "Goed zo!".into(),
                    image_id: "02".into()
                },
                FeedbackRecord {
                    text: "Knap!".into(),
                    image_id: "03".into()
                },
            ]
        );
    }

    #[test]
    fn test_indented_quoted_text_keeps_its_comma() {
        let records = parse("text,imageId\n  \"Goed, zo\",01\n");
        assert_eq!(
            records,
            vec![FeedbackRecord {
                text: "Goed, zo".into(),
                image_id: "01".into()
            }]
        );
    }

    #[test]
    fn test_header_only_and_empty() {
        assert!(parse("text,imageId").is_empty());
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_embedded_tables_load() {
        let book = FeedbackBook::embedded();
        assert!(!book.records(FeedbackKind::Compliments).is_empty());
        assert!(!book.records(FeedbackKind::Encouragements).is_empty());
        assert!(book
            .records(FeedbackKind::Encouragements)
            .iter()
            .any(|r| r.text.contains(',')));
    }

    #[test]
    fn test_pick_from_empty_is_none() {
        let book = FeedbackBook::default();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(book.pick(FeedbackKind::Compliments, &mut rng).is_none());
    }

    #[test]
    fn test_dir_image_lookup() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("compliments")).unwrap();
        std::fs::write(dir.path().join("compliments").join("01.png"), b"png").unwrap();

        let lookup = DirImageLookup::new(dir.path());
        assert!(lookup.image_for(FeedbackKind::Compliments, "01").is_some());
        assert!(lookup.image_for(FeedbackKind::Compliments, "02").is_none());
        assert!(lookup.image_for(FeedbackKind::Encouragements, "01").is_none());
    }
}
