use crate::api::{ListId, ListSummary};
use crate::app::detail::DetailState;
use crate::app::event::RefreshTicket;
use crate::config::AppConfig;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use unicode_width::UnicodeWidthStr;

/// The collection summary list as last seen from the server.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Summaries {
    #[default]
    Unloaded,
    Loaded(Vec<ListSummary>),
}

impl Summaries {
    pub fn as_slice(&self) -> Option<&[ListSummary]> {
        match self {
            Summaries::Unloaded => None,
            Summaries::Loaded(rows) => Some(rows),
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().map_or(0, <[_]>::len)
    }

    pub fn get(&self, index: usize) -> Option<&ListSummary> {
        self.as_slice().and_then(|rows| rows.get(index))
    }
}

/// Which screen is showing. Derived from the selection, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View<'a> {
    List,
    Detail(&'a ListId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    NewCollection,
    NewItem,
}

/// Issues refresh tickets and remembers the newest one applied.
#[derive(Debug, Default)]
pub struct RefreshTracker {
    next: u64,
    latest_applied: Option<RefreshTicket>,
}

impl RefreshTracker {
    pub fn issue(&mut self) -> RefreshTicket {
        self.next += 1;
        RefreshTicket(self.next)
    }

    /// Without `discard_stale` every response is applied, so the last one to
    /// arrive wins regardless of issue order.
    pub fn should_apply(&self, ticket: RefreshTicket, discard_stale: bool) -> bool {
        !discard_stale || self.latest_applied.map_or(true, |latest| ticket > latest)
    }

    pub fn mark_applied(&mut self, ticket: RefreshTicket) {
        self.latest_applied = Some(self.latest_applied.map_or(ticket, |t| t.max(ticket)));
    }
}

/// Single-line prompt editor. `cursor` is a byte offset that always sits on
/// a char boundary of `text`.
#[derive(Debug, Default)]
pub struct InputState {
    pub text: String,
    pub cursor: usize,
}

impl InputState {
    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i)
    }

    fn next_boundary(&self) -> usize {
        self.text[self.cursor..]
            .chars()
            .next()
            .map_or(self.cursor, |c| self.cursor + c.len_utf8())
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn delete_back(&mut self) {
        let start = self.prev_boundary();
        self.text.replace_range(start..self.cursor, "");
        self.cursor = start;
    }

    pub fn delete_forward(&mut self) {
        let end = self.next_boundary();
        self.text.replace_range(self.cursor..end, "");
    }

    pub fn move_left(&mut self) {
        self.cursor = self.prev_boundary();
    }

    pub fn move_right(&mut self) {
        self.cursor = self.next_boundary();
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Drop the word before the cursor plus any whitespace trailing it.
    pub fn delete_word_back(&mut self) {
        let head = self.text[..self.cursor].trim_end();
        let start = head
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map_or(0, |(i, c)| i + c.len_utf8());
        self.text.replace_range(start..self.cursor, "");
        self.cursor = start;
    }

    /// Terminal columns between the start of the text and the cursor.
    pub fn cursor_column(&self) -> usize {
        self.text[..self.cursor].width()
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Hand over the typed text and leave the editor empty.
    pub fn take_text(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }
}

pub struct AppState {
    pub config: AppConfig,
    pub summaries: Summaries,
    pub selected: Option<ListId>,
    /// Highlighted row in the list view.
    pub cursor: usize,
    pub detail: DetailState,
    pub input: InputState,
    pub mode: InputMode,
    pub refresh: RefreshTracker,
    pub initialized: bool,
    pub in_flight: usize,
    pub last_refreshed: Option<DateTime<Local>>,
    pub tick_count: u64,
    pub should_quit: bool,
    pub dirty: bool,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            summaries: Summaries::Unloaded,
            selected: None,
            cursor: 0,
            detail: DetailState::default(),
            input: InputState::default(),
            mode: InputMode::Normal,
            refresh: RefreshTracker::default(),
            initialized: false,
            in_flight: 0,
            last_refreshed: None,
            tick_count: 0,
            should_quit: false,
            dirty: true,
        }
    }

    pub fn view(&self) -> View<'_> {
        match &self.selected {
            None => View::List,
            Some(id) => View::Detail(id),
        }
    }

    pub fn highlighted_summary(&self) -> Option<&ListSummary> {
        self.summaries.get(self.cursor)
    }

    pub fn move_cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
        self.dirty = true;
    }

    pub fn move_cursor_down(&mut self) {
        if self.cursor + 1 < self.summaries.len() {
            self.cursor += 1;
        }
        self.dirty = true;
    }

    /// Keep the list cursor on a real row after the summaries change size.
    pub fn clamp_cursor(&mut self) {
        let len = self.summaries.len();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }

    pub fn request_started(&mut self) {
        self.in_flight += 1;
        self.dirty = true;
    }

    pub fn request_settled(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.dirty = true;
    }

    pub fn begin_input(&mut self, mode: InputMode) {
        self.input.clear();
        self.mode = mode;
        self.dirty = true;
    }

    pub fn cancel_input(&mut self) {
        self.input.clear();
        self.mode = InputMode::Normal;
        self.dirty = true;
    }

    pub fn status_line(&self) -> String {
        let mut s = match &self.summaries {
            Summaries::Unloaded => "Lists: loading".to_string(),
            Summaries::Loaded(rows) => format!("Lists: {}", rows.len()),
        };
        if let Some(at) = self.last_refreshed {
            s.push_str(" | Refreshed ");
            s.push_str(&format_timestamp(&at, &self.config.ui.timestamp_format));
        }
        if self.in_flight > 0 {
            s.push_str(&format!(" | Pending: {}", self.in_flight));
        }
        s
    }
}

/// A malformed user format falls back to `%H:%M:%S` instead of panicking.
fn format_timestamp(at: &DateTime<Local>, fmt: &str) -> String {
    if StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error)) {
        return at.format("%H:%M:%S").to_string();
    }
    at.format(fmt).to_string()
}
