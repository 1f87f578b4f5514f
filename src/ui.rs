mod clock_face;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use klokkijken::{
    session::{Interstitial, InterstitialKind, Outcome, Phase},
    Direction, InputMode,
};

use crate::App;
use clock_face::ClockFace;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;
const INTERSTITIAL_WIDTH: u16 = 50;
const INTERSTITIAL_HEIGHT: u16 = 9;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = &self.session;
        let view = session.view();
        let word_pad = (session.direction(), session.input_mode())
            == (Direction::Reading, InputMode::Text);

        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);

        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Min(8),
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(if word_pad { 3 } else { 0 }),
                Constraint::Length(1),
            ])
            .split(area);

        Paragraph::new(Line::from(vec![
            Span::styled(view.player_name, bold_style),
            Span::raw(format!(": {}", view.score)),
        ]))
        .alignment(Alignment::Right)
        .render(chunks[0], buf);

        Paragraph::new(Span::styled(view.prompt, bold_style.fg(Color::Cyan)))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        ClockFace::new(view.face.0, view.face.1).render(chunks[2], buf);

        let answer = match (&view.target_text, &view.input_text) {
            (Some(target), _) => Span::styled(target.clone(), bold_style.fg(Color::Yellow)),
            (None, Some(input)) if input.is_empty() => {
                let placeholder = match session.input_mode() {
                    InputMode::Digital => "--:--",
                    InputMode::Text => "...",
                };
                Span::styled(placeholder, dim_style)
            }
            (None, Some(input)) => Span::styled(input.clone(), bold_style),
            (None, None) => Span::raw(""),
        };
        Paragraph::new(answer)
            .alignment(Alignment::Center)
            .render(chunks[3], buf);

        if let Some(message) = view.feedback {
            let color = match session.round().last_result {
                Some(Outcome::Correct) => Color::Green,
                _ => Color::Red,
            };
            Paragraph::new(Span::styled(message, bold_style.fg(color)))
                .alignment(Alignment::Center)
                .render(chunks[4], buf);
        }

        if word_pad {
            let cursor = self.controls.palette_cursor();
            let words: Vec<Span> = session
                .palette()
                .into_iter()
                .enumerate()
                .flat_map(|(i, word)| {
                    let style = if i == cursor {
                        bold_style.add_modifier(Modifier::REVERSED)
                    } else {
                        Style::default()
                    };
                    [Span::styled(word, style), Span::raw(" ")]
                })
                .collect();
            Paragraph::new(Line::from(words))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(chunks[5], buf);
        }

        Paragraph::new(Span::styled(help_text(self), dim_style.add_modifier(Modifier::ITALIC)))
            .alignment(Alignment::Center)
            .render(chunks[6], buf);

        if let Some(interstitial) = view.interstitial {
            render_interstitial(interstitial, area, buf);
        }
    }
}

fn help_text(app: &App) -> &'static str {
    let session = &app.session;
    match session.phase() {
        Phase::Interstitial(_) => "(spatie) verder / (esc) stoppen",
        Phase::Answered(_) | Phase::Ended => "(esc) stoppen",
        Phase::AwaitingInput => match (session.direction(), session.input_mode()) {
            (Direction::Reading, InputMode::Digital) => {
                "(0-9 :) typen / (enter) nakijken / (backspace) wissen / (esc) stoppen"
            }
            (Direction::Reading, InputMode::Text) => {
                "(pijltjes) kiezen / (spatie) woord / (enter) nakijken / (backspace) wissen / (esc) stoppen"
            }
            (Direction::Setting, _) => {
                "(links/rechts) uren / (op/neer) minuten / (enter) nakijken / (esc) stoppen"
            }
        },
    }
}

fn render_interstitial(interstitial: &Interstitial, area: Rect, buf: &mut Buffer) {
    let rect = centered(area, INTERSTITIAL_WIDTH, INTERSTITIAL_HEIGHT);
    let (title, color) = match interstitial.kind {
        InterstitialKind::Success => ("Hoera!", Color::Green),
        InterstitialKind::Calm => ("Even pauze", Color::Magenta),
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            interstitial.text.as_str(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    if let Some(image) = &interstitial.image {
        lines.push(Line::from(Span::styled(
            image.display().to_string(),
            Style::default().add_modifier(Modifier::DIM),
        )));
    }
    lines.push(Line::from(Span::styled(
        "Druk op spatie om verder te gaan",
        Style::default().add_modifier(Modifier::ITALIC),
    )));

    Clear.render(rect, buf);
    Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(rect, buf);
}

/// `width` x `height` in the middle of `area`, shrunk to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
