//! # CountryGrid Component
//!
//! Scrollable grid of country cards for the directory view.
//!
//! `CountryGrid` is a transient component (created each frame) that wraps
//! `&'a mut CountryGridState` (persistent state) and the filtered slice of
//! countries (props). Rendering updates the cached column count and
//! viewport height so keyboard navigation between frames moves by whole
//! rows.

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::countries::Country;
use crate::tui::component::Component;
use crate::tui::components::country_card::{CARD_HEIGHT, CARD_SLOT_HEIGHT, CountryCard, MIN_CARD_WIDTH};
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;

/// Selection and scroll state for the grid. Persisted in `TuiState`.
pub struct CountryGridState {
    pub scroll_state: ScrollViewState,
    /// Index into the filtered list.
    pub selected: usize,
    /// Columns at the last render.
    pub columns: usize,
    /// Viewport height at the last render.
    pub viewport_height: u16,
}

impl Default for CountryGridState {
    fn default() -> Self {
        Self::new()
    }
}

impl CountryGridState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            selected: 0,
            columns: 1,
            viewport_height: 0,
        }
    }

    /// Back to the first card (used whenever the filtered set changes).
    pub fn reset(&mut self) {
        self.selected = 0;
        self.scroll_state.scroll_to_top();
    }

    fn rows_per_page(&self) -> usize {
        (self.viewport_height / CARD_SLOT_HEIGHT).max(1) as usize
    }

    /// Moves the selection for a navigation event. `count` is the number of
    /// cards currently shown. Returns true if the event was consumed.
    pub fn navigate(&mut self, event: &TuiEvent, count: usize) -> bool {
        if count == 0 {
            self.selected = 0;
            return false;
        }
        let cols = self.columns.max(1);
        let last = count - 1;
        let current = self.selected.min(last);
        self.selected = match event {
            TuiEvent::CursorLeft => current.saturating_sub(1),
            TuiEvent::CursorRight => (current + 1).min(last),
            TuiEvent::CursorUp => current.checked_sub(cols).unwrap_or(current),
            TuiEvent::CursorDown => {
                if current + cols <= last {
                    current + cols
                } else {
                    current
                }
            }
            TuiEvent::PageUp => current.saturating_sub(cols * self.rows_per_page()),
            TuiEvent::PageDown => (current + cols * self.rows_per_page()).min(last),
            _ => return false,
        };
        self.scroll_to_selected();
        true
    }

    /// Scroll so the selected card's row is fully visible.
    pub fn scroll_to_selected(&mut self) {
        let row = (self.selected / self.columns.max(1)) as u16;
        let top = row * CARD_SLOT_HEIGHT;
        let bottom = top + CARD_HEIGHT;
        let offset_y = self.scroll_state.offset().y;

        if top < offset_y {
            self.scroll_state.set_offset(Position { x: 0, y: top });
        } else if bottom > offset_y + self.viewport_height {
            let new_y = bottom.saturating_sub(self.viewport_height);
            self.scroll_state.set_offset(Position { x: 0, y: new_y });
        }
    }
}

/// Number of card columns that fit in `width`.
pub fn columns_for_width(width: u16) -> usize {
    (width / MIN_CARD_WIDTH).max(1) as usize
}

pub struct CountryGrid<'a> {
    pub state: &'a mut CountryGridState,
    pub countries: &'a [&'a Country],
    pub palette: Palette,
}

impl<'a> CountryGrid<'a> {
    pub fn new(state: &'a mut CountryGridState, countries: &'a [&'a Country], palette: Palette) -> Self {
        Self {
            state,
            countries,
            palette,
        }
    }
}

impl<'a> Component for CountryGrid<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.countries.is_empty() {
            let empty = Paragraph::new("No countries match your search.")
                .style(self.palette.value())
                .alignment(Alignment::Center);
            frame.render_widget(empty, area);
            return;
        }

        let content_width = area.width.saturating_sub(1); // -1 for scrollbar
        let columns = columns_for_width(content_width);
        let cell_width = content_width / columns as u16;
        let rows = self.countries.len().div_ceil(columns) as u16;
        let total_height = rows * CARD_SLOT_HEIGHT;

        self.state.columns = columns;
        self.state.viewport_height = area.height;
        self.state.selected = self.state.selected.min(self.countries.len() - 1);

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let bg = Paragraph::new("").style(self.palette.page());
        scroll_view.render_widget(bg, scroll_view.area());

        for (index, country) in self.countries.iter().enumerate() {
            let col = (index % columns) as u16;
            let row = (index / columns) as u16;
            let rect = Rect::new(
                col * cell_width,
                row * CARD_SLOT_HEIGHT,
                cell_width.saturating_sub(1),
                CARD_HEIGHT,
            );
            let card = CountryCard::new(country, index == self.state.selected, self.palette);
            scroll_view.render_widget(card.widget(rect.width), rect);
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::theme::Theme;
    use crate::test_support::sample_directory;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn state_with(columns: usize, viewport_height: u16) -> CountryGridState {
        let mut state = CountryGridState::new();
        state.columns = columns;
        state.viewport_height = viewport_height;
        state
    }

    #[test]
    fn test_columns_for_width() {
        assert_eq!(columns_for_width(10), 1);
        assert_eq!(columns_for_width(MIN_CARD_WIDTH * 3 + 5), 3);
    }

    #[test]
    fn test_left_right_are_clamped() {
        let mut state = state_with(3, 30);
        state.navigate(&TuiEvent::CursorLeft, 5);
        assert_eq!(state.selected, 0);
        for _ in 0..10 {
            state.navigate(&TuiEvent::CursorRight, 5);
        }
        assert_eq!(state.selected, 4);
    }

    #[test]
    fn test_up_down_move_by_row() {
        let mut state = state_with(3, 30);
        state.navigate(&TuiEvent::CursorDown, 8);
        assert_eq!(state.selected, 3);
        state.navigate(&TuiEvent::CursorDown, 8);
        assert_eq!(state.selected, 6);
        // No card below 6 in the last row of 8
        state.navigate(&TuiEvent::CursorDown, 8);
        assert_eq!(state.selected, 6);
        state.navigate(&TuiEvent::CursorUp, 8);
        assert_eq!(state.selected, 3);
    }

    #[test]
    fn test_navigation_with_no_cards() {
        let mut state = state_with(3, 30);
        state.selected = 4;
        assert!(!state.navigate(&TuiEvent::CursorDown, 0));
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_scroll_follows_selection() {
        let mut state = state_with(1, CARD_SLOT_HEIGHT * 2);
        for _ in 0..4 {
            state.navigate(&TuiEvent::CursorDown, 9);
        }
        assert_eq!(state.selected, 4);
        let offset = state.scroll_state.offset().y;
        assert!(offset > 0);
        assert!(4 * CARD_SLOT_HEIGHT >= offset);

        state.navigate(&TuiEvent::PageUp, 9);
        assert_eq!(state.selected, 2);
    }

    #[test]
    fn test_render_grid() {
        let backend = TestBackend::new(90, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let all = sample_directory();
        let countries: Vec<&Country> = all.iter().collect();
        let mut state = CountryGridState::new();
        terminal
            .draw(|f| {
                CountryGrid::new(&mut state, &countries, Palette::for_theme(Theme::Light))
                    .render(f, f.area())
            })
            .unwrap();
        assert_eq!(state.columns, 3);
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("France"));
        assert!(text.contains("Germany"));
    }

    #[test]
    fn test_render_empty_grid() {
        let backend = TestBackend::new(60, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let countries: Vec<&Country> = Vec::new();
        let mut state = CountryGridState::new();
        terminal
            .draw(|f| {
                CountryGrid::new(&mut state, &countries, Palette::for_theme(Theme::Dark))
                    .render(f, f.area())
            })
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("No countries match"));
    }
}
