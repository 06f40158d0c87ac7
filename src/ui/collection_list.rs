use crate::app::state::{AppState, Summaries};
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(" Lists ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Theme::border_focused());

    let rows = match &state.summaries {
        Summaries::Unloaded => {
            let p = Paragraph::new(Span::styled(" Loading...", Theme::placeholder())).block(block);
            frame.render_widget(p, area);
            return;
        }
        Summaries::Loaded(rows) if rows.is_empty() => {
            let p = Paragraph::new(Span::styled(
                " No lists yet. Press n to create one.",
                Theme::placeholder(),
            ))
            .block(block);
            frame.render_widget(p, area);
            return;
        }
        Summaries::Loaded(rows) => rows,
    };

    let items: Vec<ListItem> = rows
        .iter()
        .map(|summary| {
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {}", summary.name), Theme::row()),
                Span::styled(format!("  ({})", summary.item_count), Theme::count()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Theme::row_selected());
    let mut list_state = ListState::default().with_selected(Some(state.cursor));
    frame.render_stateful_widget(list, area, &mut list_state);
}
