use crate::app::action::Action;
use crate::app::controller::{self, Intent};
use crate::app::event::AppEvent;
use crate::app::state::*;
use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub fn handle_event(state: &mut AppState, event: AppEvent) -> Vec<Action> {
    match event {
        AppEvent::Terminal(cevent) => {
            state.dirty = true;
            handle_terminal(state, cevent)
        }
        AppEvent::SummariesLoaded { ticket, result } => {
            state.request_settled();
            controller::summaries_loaded(state, ticket, result);
            vec![]
        }
        AppEvent::CollectionMutated { mutation, result } => {
            state.request_settled();
            controller::collection_mutated(state, mutation, result)
        }
        AppEvent::ListLoaded { id, result } => {
            state.request_settled();
            state.detail.list_loaded(id, result);
            vec![]
        }
        AppEvent::ItemMutated {
            list_id,
            mutation,
            result,
        } => {
            state.request_settled();
            state.detail.item_mutated(list_id, mutation, result)
        }
        AppEvent::Tick => {
            handle_tick(state);
            vec![]
        }
    }
}

fn handle_tick(state: &mut AppState) {
    state.tick_count = state.tick_count.wrapping_add(1);
    // Only the loading spinner animates
    if state.in_flight > 0 {
        state.dirty = true;
    }
}

fn handle_terminal(state: &mut AppState, event: CEvent) -> Vec<Action> {
    match event {
        CEvent::Key(key) if key.kind != KeyEventKind::Release => handle_key(state, key),
        _ => vec![],
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![Action::Quit];
    }

    if state.mode != InputMode::Normal {
        return handle_input_key(state, key);
    }

    if matches!(state.view(), View::Detail(_)) {
        handle_detail_key(state, key)
    } else {
        handle_list_key(state, key)
    }
}

fn handle_list_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Char('q') => vec![Action::Quit],
        KeyCode::Up | KeyCode::Char('k') => {
            state.move_cursor_up();
            vec![]
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.move_cursor_down();
            vec![]
        }
        KeyCode::Enter => {
            let Some(id) = state.highlighted_summary().map(|s| s.id.clone()) else {
                return vec![];
            };
            let mut actions = controller::dispatch(state, Intent::Select { id: id.clone() });
            actions.extend(state.detail.open(id));
            actions
        }
        KeyCode::Char('n') => {
            state.begin_input(InputMode::NewCollection);
            vec![]
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            match state.highlighted_summary().map(|s| s.id.clone()) {
                Some(id) => controller::dispatch(state, Intent::Delete { id }),
                None => vec![],
            }
        }
        KeyCode::Char('r') => controller::dispatch(state, Intent::Refresh),
        _ => vec![],
    }
}

fn handle_detail_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Char('q') => vec![Action::Quit],
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => {
            state.detail.close();
            controller::dispatch(state, Intent::Back)
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.detail.move_up();
            vec![]
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.detail.move_down();
            vec![]
        }
        KeyCode::Char(' ') => state.detail.toggle_selected(),
        KeyCode::Char('a') => {
            state.begin_input(InputMode::NewItem);
            vec![]
        }
        KeyCode::Char('d') | KeyCode::Delete => state.detail.delete_selected(),
        KeyCode::Char('r') => state.detail.reload(),
        _ => vec![],
    }
}

fn handle_input_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Esc => {
            state.cancel_input();
            vec![]
        }
        KeyCode::Enter => {
            let text = state.input.take_text();
            let mode = std::mem::replace(&mut state.mode, InputMode::Normal);
            match mode {
                InputMode::NewCollection => {
                    controller::dispatch(state, Intent::Create { name: text })
                }
                InputMode::NewItem => state.detail.add_item(text),
                InputMode::Normal => vec![],
            }
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.input.delete_word_back();
            vec![]
        }
        KeyCode::Char(c) => {
            state.input.insert_char(c);
            vec![]
        }
        KeyCode::Backspace => {
            state.input.delete_back();
            vec![]
        }
        KeyCode::Delete => {
            state.input.delete_forward();
            vec![]
        }
        KeyCode::Left => {
            state.input.move_left();
            vec![]
        }
        KeyCode::Right => {
            state.input.move_right();
            vec![]
        }
        KeyCode::Home => {
            state.input.move_home();
            vec![]
        }
        KeyCode::End => {
            state.input.move_end();
            vec![]
        }
        _ => vec![],
    }
}
