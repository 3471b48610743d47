//! Patient and symptom entry form.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::application::DiagnosisForm;
use crate::domain::Gender;
use crate::tui::styles::ClinicTheme;

pub const SUBMIT_LABEL: &str = "Get Preliminary Diagnosis";
pub const SUBMITTING_LABEL: &str = "Submitting...";
pub const NO_SYMPTOMS_FOUND: &str = "No symptoms found";

/// Focused form control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Name,
    Gender,
    Year,
    Symptoms,
    Submit,
}

impl Focus {
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Focus::Name => Focus::Gender,
            Focus::Gender => Focus::Year,
            Focus::Year => Focus::Symptoms,
            Focus::Symptoms => Focus::Submit,
            Focus::Submit => Focus::Name,
        }
    }

    #[must_use]
    pub fn prev(self) -> Self {
        match self {
            Focus::Name => Focus::Submit,
            Focus::Gender => Focus::Name,
            Focus::Year => Focus::Gender,
            Focus::Symptoms => Focus::Year,
            Focus::Submit => Focus::Symptoms,
        }
    }
}

/// Render the diagnosis form.
pub fn render_form(f: &mut Frame, area: Rect, form: &DiagnosisForm, focus: Focus) {
    let banner_height = if form.error().is_some() { 3 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(banner_height), // Error banner
            Constraint::Length(3),             // Patient name
            Constraint::Length(3),             // Gender + year
            Constraint::Min(6),                // Symptoms
            Constraint::Length(3),             // Submit
        ])
        .split(area);

    if let Some(message) = form.error() {
        render_banner(f, chunks[0], message);
    }

    render_text_field(
        f,
        chunks[1],
        "Patient Name",
        form.patient_name(),
        "Full name",
        focus == Focus::Name,
    );

    let row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);
    render_gender(f, row[0], form.gender(), focus == Focus::Gender);
    render_text_field(
        f,
        row[1],
        "Year of Birth",
        form.year_of_birth(),
        "YYYY",
        focus == Focus::Year,
    );

    render_symptoms(f, chunks[3], form, focus == Focus::Symptoms);
    render_submit(f, chunks[4], form, focus == Focus::Submit);
}

fn render_banner(f: &mut Frame, area: Rect, message: &str) {
    let banner = Paragraph::new(Line::from(Span::styled(
        format!(" {message} "),
        ClinicTheme::banner(),
    )))
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(ClinicTheme::danger()),
    );

    f.render_widget(banner, area);
}

fn field_block(label: &str, focused: bool) -> Block<'static> {
    let (border_style, title_style) = if focused {
        (ClinicTheme::border_focused(), ClinicTheme::focused())
    } else {
        (ClinicTheme::border(), ClinicTheme::text_secondary())
    };

    Block::default()
        .title(Line::from(vec![
            Span::styled(format!(" {label} "), title_style),
            Span::styled("* ", ClinicTheme::required()),
        ]))
        .borders(Borders::ALL)
        .border_style(border_style)
}

fn cursor(focused: bool) -> Span<'static> {
    if focused {
        Span::styled("▌", ClinicTheme::focused())
    } else {
        Span::raw("")
    }
}

fn render_text_field(
    f: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    placeholder: &str,
    focused: bool,
) {
    let value = if value.is_empty() {
        Span::styled(placeholder.to_string(), ClinicTheme::text_muted())
    } else {
        Span::styled(value.to_string(), ClinicTheme::text())
    };

    let content = Paragraph::new(Line::from(vec![Span::raw(" "), value, cursor(focused)]))
        .block(field_block(label, focused));

    f.render_widget(content, area);
}

fn render_gender(f: &mut Frame, area: Rect, gender: Gender, focused: bool) {
    let option = |g: Gender| {
        let marker = if g == gender { "(•) " } else { "( ) " };
        let style = if g == gender {
            ClinicTheme::text()
        } else {
            ClinicTheme::text_muted()
        };
        Span::styled(format!("{marker}{}", g.label()), style)
    };

    let content = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        option(Gender::Male),
        Span::raw("   "),
        option(Gender::Female),
    ]))
    .block(field_block("Gender", focused));

    f.render_widget(content, area);
}

fn render_symptoms(f: &mut Frame, area: Rect, form: &DiagnosisForm, focused: bool) {
    let picker = form.picker();
    let block = field_block("Symptoms", focused);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Filter
            Constraint::Min(1),    // Options
            Constraint::Length(2), // Selected
        ])
        .split(inner);

    let filter = Paragraph::new(Line::from(vec![
        Span::styled(" Search: ", ClinicTheme::label()),
        Span::styled(picker.query().to_string(), ClinicTheme::text()),
        cursor(focused),
    ]));
    f.render_widget(filter, chunks[0]);

    let visible = picker.filtered();
    if visible.is_empty() {
        let message = if form.is_catalog_loading() {
            "Loading symptoms..."
        } else {
            NO_SYMPTOMS_FOUND
        };
        f.render_widget(
            Paragraph::new(Span::styled(format!(" {message}"), ClinicTheme::text_muted())),
            chunks[1],
        );
    } else {
        let items: Vec<ListItem> = visible
            .iter()
            .map(|option| {
                let (mark, style) = if picker.is_selected(&option.value) {
                    ("[x] ", ClinicTheme::success())
                } else {
                    ("[ ] ", ClinicTheme::text())
                };
                ListItem::new(Line::from(vec![
                    Span::styled(mark, style),
                    Span::styled(option.label.clone(), style),
                ]))
            })
            .collect();

        let list = List::new(items).highlight_style(if focused {
            ClinicTheme::selected()
        } else {
            ClinicTheme::text()
        });
        let mut state = ListState::default().with_selected(Some(picker.cursor()));
        f.render_stateful_widget(list, chunks[1], &mut state);
    }

    let chips: Vec<Span> = if picker.selected().is_empty() {
        vec![Span::styled(" Nothing selected", ClinicTheme::text_muted())]
    } else {
        std::iter::once(Span::styled(" Selected: ", ClinicTheme::label()))
            .chain(picker.selected().iter().enumerate().map(|(i, option)| {
                let sep = if i == 0 { "" } else { ", " };
                Span::styled(format!("{sep}{}", option.label), ClinicTheme::focused())
            }))
            .collect()
    };
    f.render_widget(
        Paragraph::new(Line::from(chips)).wrap(Wrap { trim: true }),
        chunks[2],
    );
}

fn render_submit(f: &mut Frame, area: Rect, form: &DiagnosisForm, focused: bool) {
    let label = if form.is_loading() {
        SUBMITTING_LABEL
    } else {
        SUBMIT_LABEL
    };

    let border_style = if focused {
        ClinicTheme::border_focused()
    } else {
        ClinicTheme::border()
    };

    let button = Paragraph::new(Line::from(Span::styled(
        format!("  {label}  "),
        ClinicTheme::button(form.can_submit()),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style),
    );

    f.render_widget(button, area);
}
