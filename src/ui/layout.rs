use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub title_bar: Rect,
    pub body: Rect,
    pub input_box: Option<Rect>,
    pub help_bar: Rect,
    pub status_bar: Rect,
}

pub fn compute_layout(area: Rect, show_input: bool) -> AppLayout {
    let input_height = if show_input { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),            // Title
            Constraint::Min(3),               // List or detail
            Constraint::Length(input_height), // Prompt
            Constraint::Length(1),            // Key hints
            Constraint::Length(1),            // Status bar
        ])
        .split(area);

    AppLayout {
        title_bar: chunks[0],
        body: chunks[1],
        input_box: show_input.then_some(chunks[2]),
        help_bar: chunks[3],
        status_bar: chunks[4],
    }
}
