//! # SearchBox Component
//!
//! Single-line text input for the directory search.
//!
//! The buffer keeps the text as typed; the lower-casing happens in
//! `FilterState`. Every edit emits `SearchEvent::Changed` so the directory
//! re-filters on each keystroke, with no debouncing.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::theme::Theme;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;

const PLACEHOLDER: &str = "Search for a country...";

#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    Changed(String),
}

/// Text input for the search query.
///
/// # Props
///
/// - `theme`: current theme (from App state)
///
/// # State
///
/// - `buffer`: current text
/// - `cursor`: byte offset into `buffer`
pub struct SearchBox {
    pub buffer: String,
    pub theme: Theme,
    cursor: usize,
}

impl SearchBox {
    pub fn new(initial: &str, theme: Theme) -> Self {
        Self {
            buffer: initial.to_string(),
            theme,
            cursor: initial.len(),
        }
    }

    pub fn clear(&mut self) -> Option<SearchEvent> {
        if self.buffer.is_empty() {
            return None;
        }
        self.buffer.clear();
        self.cursor = 0;
        Some(SearchEvent::Changed(String::new()))
    }

    fn changed(&self) -> Option<SearchEvent> {
        Some(SearchEvent::Changed(self.buffer.clone()))
    }

    fn prev_boundary(&self) -> usize {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.buffer.len())
    }
}

impl Component for SearchBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let palette = Palette::for_theme(self.theme);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(palette.value())
            .title(" Search ");

        let content = if self.buffer.is_empty() {
            Line::from(Span::styled(PLACEHOLDER, palette.value()))
        } else {
            Line::from(Span::raw(self.buffer.as_str()))
        };

        frame.render_widget(
            Paragraph::new(content).block(block).style(palette.surface()),
            area,
        );

        let cursor_x = area.x + 1 + self.buffer[..self.cursor].width() as u16;
        let max_x = area.x + area.width.saturating_sub(2);
        frame.set_cursor_position((cursor_x.min(max_x), area.y + 1));
    }
}

impl EventHandler for SearchBox {
    type Event = SearchEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                self.changed()
            }
            TuiEvent::Paste(text) => {
                // Single line: newlines become spaces
                let text = text.replace(['\r', '\n'], " ");
                self.buffer.insert_str(self.cursor, &text);
                self.cursor += text.len();
                self.changed()
            }
            TuiEvent::Backspace => {
                if self.cursor == 0 {
                    return None;
                }
                let prev = self.prev_boundary();
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                self.changed()
            }
            TuiEvent::CursorLeft => {
                self.cursor = self.prev_boundary();
                None
            }
            TuiEvent::CursorRight => {
                self.cursor = self.next_boundary();
                None
            }
            _ => None,
        }
    }
}
