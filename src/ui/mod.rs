mod collection_list;
mod input_box;
mod layout;
mod list_detail;
mod status_bar;
mod theme;

use crate::app::state::{AppState, InputMode, View};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use theme::Theme;

pub fn render(frame: &mut Frame, state: &AppState) {
    let app_layout = layout::compute_layout(frame.area(), state.mode != InputMode::Normal);

    let title = Paragraph::new(Span::styled(format!(" {}", state.config.ui.title), Theme::title()));
    frame.render_widget(title, app_layout.title_bar);

    match state.view() {
        View::List => collection_list::render(frame, app_layout.body, state),
        View::Detail(id) => list_detail::render(frame, app_layout.body, state, id),
    }

    if let Some(area) = app_layout.input_box {
        input_box::render(frame, area, state);
    }
    status_bar::render_help(frame, app_layout.help_bar, state);
    status_bar::render(frame, app_layout.status_bar, state);
}
