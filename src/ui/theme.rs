use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

pub struct Theme;

impl Theme {
    pub const ACCENT_TEAL: Color = Color::Rgb(0x4f, 0xd1, 0xc5);
    pub const ACCENT_AMBER: Color = Color::Rgb(0xf6, 0xc1, 0x77);
    pub const ACCENT_GREEN: Color = Color::Rgb(0x8b, 0xd5, 0x8b);
    pub const TEXT_PRIMARY: Color = Color::White;
    pub const TEXT_SECONDARY: Color = Color::Gray;
    pub const TEXT_MUTED: Color = Color::DarkGray;
    pub const BG_DARK: Color = Color::Black;

    pub fn border_focused() -> Style {
        Style::default().fg(Self::ACCENT_TEAL)
    }

    pub fn border_type() -> BorderType {
        BorderType::Rounded
    }

    pub fn title() -> Style {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    }

    pub fn row() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    pub fn row_selected() -> Style {
        Style::default()
            .fg(Self::BG_DARK)
            .bg(Self::ACCENT_TEAL)
            .add_modifier(Modifier::BOLD)
    }

    pub fn item_checked() -> Style {
        Style::default()
            .fg(Self::TEXT_MUTED)
            .add_modifier(Modifier::CROSSED_OUT)
    }

    pub fn count() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    pub fn placeholder() -> Style {
        Style::default()
            .fg(Self::TEXT_MUTED)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn input_text() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::ACCENT_AMBER)
            .add_modifier(Modifier::BOLD)
    }

    pub fn key_label() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    }

    pub fn spinner() -> Style {
        Style::default().fg(Self::ACCENT_GREEN).bg(Color::DarkGray)
    }
}
