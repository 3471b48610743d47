//! Verdict acknowledgement modal.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::application::Acknowledgement;
use crate::tui::styles::ClinicTheme;

/// Render the acknowledgement centered over `area`.
pub fn render_acknowledgement(f: &mut Frame, area: Rect, ack: &Acknowledgement) {
    let popup = centered(area, 60, 7);

    let (title, message_style) = if ack.saved {
        (" Saved ", ClinicTheme::success())
    } else {
        (" Not saved ", ClinicTheme::danger())
    };

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(ack.message.as_str(), message_style)),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Enter] ", ClinicTheme::key_hint()),
            Span::styled("OK", ClinicTheme::key_desc()),
        ]),
    ];

    let block = Block::default()
        .title(Span::styled(title, ClinicTheme::title()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(ClinicTheme::border_focused())
        .style(ClinicTheme::modal());

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        popup,
    );
}

fn centered(area: Rect, percent_x: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
