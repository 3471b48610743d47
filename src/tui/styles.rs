//! Clinic color palette and styles.

use ratatui::style::{Color, Modifier, Style};

/// Clinic theme color palette.
pub struct ClinicTheme;

impl ClinicTheme {
    // === Primary ===

    /// Indigo, used for focus and the accuracy badge
    pub const PRIMARY: Color = Color::Rgb(79, 70, 229); // #4F46E5
    pub const PRIMARY_LIGHT: Color = Color::Rgb(165, 180, 252); // #A5B4FC
    pub const PRIMARY_SOFT: Color = Color::Rgb(224, 231, 255); // #E0E7FF

    // === Semantic ===

    pub const SUCCESS: Color = Color::Rgb(16, 185, 129); // #10B981
    pub const DANGER: Color = Color::Rgb(244, 63, 94); // #F43F5E
    pub const DANGER_SOFT: Color = Color::Rgb(127, 29, 29); // #7F1D1D

    // === Neutrals ===

    pub const BORDER: Color = Color::Rgb(148, 163, 184); // #94A3B8
    pub const TEXT_PRIMARY: Color = Color::Rgb(248, 250, 252); // #F8FAFC
    pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184); // #94A3B8
    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139); // #64748B
    pub const BG_MODAL: Color = Color::Rgb(30, 41, 59); // #1E293B

    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    #[must_use]
    pub fn label() -> Style {
        Style::default()
            .fg(Self::TEXT_SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Required-field marker
    #[must_use]
    pub fn required() -> Style {
        Style::default().fg(Self::DANGER)
    }

    #[must_use]
    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    /// Error banner above the form
    #[must_use]
    pub fn banner() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .bg(Self::DANGER_SOFT)
            .add_modifier(Modifier::BOLD)
    }

    /// Rounded accuracy badge on result cards
    #[must_use]
    pub fn badge() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .bg(Self::PRIMARY_SOFT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::PRIMARY_LIGHT)
    }

    /// Submit button, enabled or greyed out
    #[must_use]
    pub fn button(enabled: bool) -> Style {
        if enabled {
            Self::selected()
        } else {
            Style::default().fg(Self::TEXT_MUTED)
        }
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn modal() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY).bg(Self::BG_MODAL)
    }
}
