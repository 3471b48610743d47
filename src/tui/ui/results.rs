//! Diagnosis results: one card per suggestion, laid out in a grid.
//!
//! Rendering is a pure function of the result slice; display order is input
//! order and nothing is filtered or merged.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::domain::DiagnosisResult;
use crate::tui::styles::ClinicTheme;

pub const RESULTS_HEADING: &str = "Preliminary Diagnostic Suggestions";

const RESULTS_NOTE: &str = "These are preliminary suggestions only. Clinical correlation and professional medical evaluation are essential.";

/// Display model of one diagnosis card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCard {
    pub title: String,
    /// Accuracy with a literal `%` suffix
    pub badge: String,
    pub icd: String,
    pub prof_name: String,
    /// `"<specialistName> (<name>)"` entries
    pub specialists: Vec<String>,
}

impl ResultCard {
    #[must_use]
    pub fn from_result(result: &DiagnosisResult) -> Self {
        Self {
            title: result.issue.name.clone(),
            badge: format!("{}%", result.issue.accuracy),
            icd: result.issue.icd.clone(),
            prof_name: result.issue.prof_name.clone(),
            specialists: result
                .specialisation
                .iter()
                .map(|s| s.display_label())
                .collect(),
        }
    }

    fn lines(&self) -> Vec<Line<'_>> {
        let mut lines = vec![
            Line::from(vec![Span::styled(format!(" {} ", self.badge), ClinicTheme::badge())]),
            Line::from(vec![
                Span::styled("ICD: ", ClinicTheme::label()),
                Span::styled(self.icd.as_str(), ClinicTheme::text()),
            ]),
            Line::from(vec![
                Span::styled("Professional name: ", ClinicTheme::label()),
                Span::styled(self.prof_name.as_str(), ClinicTheme::text()),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Recommended Specialist(s):",
                ClinicTheme::label(),
            )),
        ];

        lines.extend(self.specialists.iter().map(|s| {
            Line::from(vec![
                Span::styled("  + ", ClinicTheme::focused()),
                Span::styled(s.as_str(), ClinicTheme::text_secondary()),
            ])
        }));

        lines
    }

    /// Rows needed to draw the card, borders included.
    #[must_use]
    pub fn height(&self) -> u16 {
        // 5 fixed lines + specialists + 2 border rows
        u16::try_from(self.specialists.len() + 7).unwrap_or(u16::MAX)
    }
}

/// Build the card models for `results`, in order.
#[must_use]
pub fn result_cards(results: &[DiagnosisResult]) -> Vec<ResultCard> {
    results.iter().map(ResultCard::from_result).collect()
}

/// Number of card columns for a given width.
#[must_use]
pub fn grid_columns(width: u16) -> usize {
    match width {
        w if w >= 120 => 3,
        w if w >= 72 => 2,
        _ => 1,
    }
}

/// Number of grid rows `cards` cards take at a given width.
#[must_use]
pub fn grid_rows(cards: usize, width: u16) -> usize {
    cards.div_ceil(grid_columns(width))
}

/// Render the results grid. `scroll` is the number of card rows to skip.
pub fn render_results(f: &mut Frame, area: Rect, results: &[DiagnosisResult], scroll: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Heading
            Constraint::Min(0),    // Grid
            Constraint::Length(2), // Note
        ])
        .split(area);

    let heading = Paragraph::new(Line::from(Span::styled(RESULTS_HEADING, ClinicTheme::title())))
        .alignment(Alignment::Center);
    f.render_widget(heading, chunks[0]);

    render_grid(f, chunks[1], &result_cards(results), scroll);

    let note = Paragraph::new(Line::from(Span::styled(RESULTS_NOTE, ClinicTheme::text_muted())))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(note, chunks[2]);
}

fn render_grid(f: &mut Frame, area: Rect, cards: &[ResultCard], scroll: usize) {
    let columns = grid_columns(area.width);
    let rows: Vec<&[ResultCard]> = cards.chunks(columns).collect();
    let skip = scroll.min(rows.len().saturating_sub(1));

    let bottom = area.y.saturating_add(area.height);
    let mut y = area.y;

    for row in rows.iter().skip(skip) {
        if y >= bottom {
            break;
        }
        let wanted = row.iter().map(ResultCard::height).max().unwrap_or(0);
        let height = wanted.min(bottom - y);
        let row_area = Rect::new(area.x, y, area.width, height);

        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
            .split(row_area);

        for (card, cell) in row.iter().zip(cells.iter()) {
            render_card(f, *cell, card);
        }

        y = y.saturating_add(height);
    }
}

fn render_card(f: &mut Frame, area: Rect, card: &ResultCard) {
    let block = Block::default()
        .title(Span::styled(format!(" {} ", card.title), ClinicTheme::title()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(ClinicTheme::border());

    let body = Paragraph::new(card.lines())
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(body, area);
}

/// Verdict actions shown under the results.
pub fn render_verdict_bar(f: &mut Frame, area: Rect, busy: bool) {
    let line = if busy {
        Line::from(Span::styled("Waiting for diagnosis...", ClinicTheme::text_muted()))
    } else {
        Line::from(vec![
            Span::styled("[Ctrl-V] ", ClinicTheme::key_hint()),
            Span::styled("Valid Diagnosis ✓   ", ClinicTheme::success()),
            Span::styled("[Ctrl-X] ", ClinicTheme::key_hint()),
            Span::styled("Invalid Diagnosis ✗", ClinicTheme::danger()),
        ])
    };

    let bar = Paragraph::new(line).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(ClinicTheme::border()),
    );
    f.render_widget(bar, area);
}
