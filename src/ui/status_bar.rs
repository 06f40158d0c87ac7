use crate::app::state::*;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut parts: Vec<Span> = Vec::new();

    if state.in_flight > 0 {
        let frame_idx = (state.tick_count as usize) % SPINNER.len();
        parts.push(Span::styled(format!(" {} ", SPINNER[frame_idx]), Theme::spinner()));
    }

    parts.push(Span::styled(
        format!(" {} ", state.status_line()),
        Theme::status_bar(),
    ));

    let view_name = match state.view() {
        View::List => "LISTS",
        View::Detail(_) => "ITEMS",
    };
    // Pad to fill remaining space
    let used: usize = parts.iter().map(|s| s.width()).sum();
    let remaining = (area.width as usize).saturating_sub(used + view_name.len() + 4);
    parts.push(Span::styled(" ".repeat(remaining), Theme::status_bar()));
    parts.push(Span::styled(
        format!(" [{}] ", view_name),
        Style::default().fg(Theme::ACCENT_TEAL).bg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

/// One-line key reference for the current view and mode.
pub fn render_help(frame: &mut Frame, area: Rect, state: &AppState) {
    let hints: &[(&str, &str)] = match (state.mode, state.view()) {
        (InputMode::NewCollection | InputMode::NewItem, _) => {
            &[("Enter", "Save"), ("Esc", "Cancel")]
        }
        (InputMode::Normal, View::List) => &[
            ("↑↓", "Navigate"),
            ("Enter", "Open"),
            ("n", "New"),
            ("d", "Delete"),
            ("r", "Refresh"),
            ("q", "Quit"),
        ],
        (InputMode::Normal, View::Detail(_)) => &[
            ("↑↓", "Navigate"),
            ("Space", "Toggle"),
            ("a", "Add"),
            ("d", "Delete"),
            ("r", "Reload"),
            ("Esc", "Back"),
        ],
    };

    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, label) in hints {
        spans.push(Span::styled(format!(" {}", key), Theme::key_hint()));
        spans.push(Span::styled(format!(" {} ", label), Theme::key_label()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
