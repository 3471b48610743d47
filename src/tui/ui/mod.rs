//! UI module: view components for the TUI.

pub mod ack;
pub mod form;
pub mod results;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::ClinicTheme;

pub const APP_TITLE: &str = "Community Health Diagnosis Tool";

pub fn render_header(f: &mut Frame, area: Rect, mock: bool) {
    let mut spans = vec![
        Span::styled(" ", ClinicTheme::text()),
        Span::styled(APP_TITLE, ClinicTheme::title()),
        Span::styled(" │ Patient intake", ClinicTheme::text_secondary()),
    ];
    if mock {
        spans.push(Span::styled(" │ offline demo data", ClinicTheme::danger()));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(ClinicTheme::border()),
    );

    f.render_widget(header, area);
}

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(vec![Span::styled(
            "For professional medical use only. Always confirm with a doctor.",
            ClinicTheme::text_muted(),
        )]),
        Line::from(vec![
            Span::styled("[Tab] ", ClinicTheme::key_hint()),
            Span::styled("Next field  ", ClinicTheme::key_desc()),
            Span::styled("[Ctrl-S] ", ClinicTheme::key_hint()),
            Span::styled("Submit  ", ClinicTheme::key_desc()),
            Span::styled("[Ctrl-R] ", ClinicTheme::key_hint()),
            Span::styled("Reload symptoms  ", ClinicTheme::key_desc()),
            Span::styled("[Ctrl-N] ", ClinicTheme::key_hint()),
            Span::styled("New patient  ", ClinicTheme::key_desc()),
            Span::styled("[Ctrl-Q] ", ClinicTheme::key_hint()),
            Span::styled("Quit", ClinicTheme::key_desc()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(ClinicTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}
