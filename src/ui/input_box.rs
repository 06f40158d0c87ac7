use crate::app::state::*;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::block::Padding;
use ratatui::widgets::{Block, Borders, Paragraph};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let title = match state.mode {
        InputMode::NewCollection => " New list ",
        InputMode::NewItem => " New item ",
        InputMode::Normal => return,
    };

    let block = Block::default()
        .title(title)
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Theme::border_focused())
        .padding(Padding::horizontal(1));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Prompt chevron + input text
    let line = Line::from(vec![
        Span::styled("❯ ", Style::default().fg(Theme::ACCENT_TEAL)),
        Span::styled(state.input.text.as_str(), Theme::input_text()),
    ]);
    frame.render_widget(Paragraph::new(line), inner);

    if inner.width == 0 || inner.height == 0 {
        return;
    }
    // Chevron "❯ " takes 2 columns
    let prompt_offset = 2u16;
    let column = u16::try_from(state.input.cursor_column()).unwrap_or(u16::MAX);
    let cursor_x = inner
        .x
        .saturating_add(prompt_offset)
        .saturating_add(column);
    frame.set_cursor_position((cursor_x.min(inner.right() - 1), inner.y));
}
