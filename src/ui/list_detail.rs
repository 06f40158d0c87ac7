use crate::api::ListId;
use crate::app::state::AppState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, id: &ListId) {
    let detail = &state.detail;
    let title = match &detail.list {
        Some(list) => format!(" {} ", list.name),
        None => format!(" List {} ", id),
    };
    let block = Block::default()
        .title(title)
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Theme::border_focused());

    if detail.list.is_none() {
        let p = Paragraph::new(Span::styled(" Loading...", Theme::placeholder())).block(block);
        frame.render_widget(p, area);
        return;
    }

    let items = detail.items();
    if items.is_empty() {
        let p = Paragraph::new(Span::styled(
            " Nothing here yet. Press a to add an item.",
            Theme::placeholder(),
        ))
        .block(block);
        frame.render_widget(p, area);
        return;
    }

    let rows: Vec<ListItem> = items
        .iter()
        .map(|item| {
            let (mark, style) = if item.checked {
                ("[x]", Theme::item_checked())
            } else {
                ("[ ]", Theme::row())
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {} ", mark), Theme::count()),
                Span::styled(item.label.clone(), style),
            ]))
        })
        .collect();

    let list = List::new(rows)
        .block(block)
        .highlight_style(Theme::row_selected());
    let mut list_state = ListState::default().with_selected(Some(detail.cursor));
    frame.render_stateful_widget(list, area, &mut list_state);
}
