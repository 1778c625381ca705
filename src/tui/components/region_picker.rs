//! # Region Picker Component
//!
//! Overlay for the region selector. Opened with Tab from the directory.
//! The first entry clears the selection ("All regions").
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `RegionPickerState` lives in `TuiState`
//! - `RegionPicker` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding};

use crate::core::filter::Region;
use crate::core::theme::Theme;
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;

/// Label for the "no region" entry, as in the original selector.
pub const ALL_REGIONS: &str = "Filter by Region";

/// Choices in display order: `None` first, then every region.
fn choices() -> Vec<Option<Region>> {
    std::iter::once(None)
        .chain(Region::ALL.into_iter().map(Some))
        .collect()
}

pub fn choice_label(choice: Option<Region>) -> String {
    match choice {
        None => ALL_REGIONS.to_string(),
        Some(region) => region.to_string(),
    }
}

/// Persistent state for the region picker overlay.
pub struct RegionPickerState {
    choices: Vec<Option<Region>>,
    pub selected: usize,
    pub list_state: ListState,
}

impl RegionPickerState {
    /// Opens the picker with `current` highlighted.
    pub fn new(current: Option<Region>) -> Self {
        let choices = choices();
        let selected = choices.iter().position(|c| *c == current).unwrap_or(0);
        let mut list_state = ListState::default();
        list_state.select(Some(selected));
        Self {
            choices,
            selected,
            list_state,
        }
    }

    /// Handle a key event, returning a RegionPickerEvent if the overlay should act.
    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<RegionPickerEvent> {
        match event {
            TuiEvent::Escape | TuiEvent::Tab => Some(RegionPickerEvent::Dismiss),
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::CursorDown => {
                self.selected = (self.selected + 1).min(self.choices.len() - 1);
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::Submit => self
                .choices
                .get(self.selected)
                .map(|choice| RegionPickerEvent::Select(*choice)),
            _ => None,
        }
    }
}

/// Events emitted by the region picker.
#[derive(Debug, PartialEq)]
pub enum RegionPickerEvent {
    Select(Option<Region>),
    Dismiss,
}

/// Transient render wrapper for the region picker overlay.
pub struct RegionPicker<'a> {
    state: &'a mut RegionPickerState,
    current: Option<Region>,
    theme: Theme,
}

impl<'a> RegionPicker<'a> {
    pub fn new(state: &'a mut RegionPickerState, current: Option<Region>, theme: Theme) -> Self {
        Self {
            state,
            current,
            theme,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let palette = Palette::for_theme(self.theme);
        let height = self.state.choices.len() as u16 + 2;
        let overlay = centered_rect(32, height, area);

        // Clear underlying content
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(palette.value())
            .title(" Region ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Enter Select  Esc Back ").centered())
            .padding(Padding::horizontal(1))
            .style(palette.surface());

        let items: Vec<ListItem> = self
            .state
            .choices
            .iter()
            .enumerate()
            .map(|(i, choice)| {
                let marker = if *choice == self.current { " *" } else { "" };
                let style = if i == self.state.selected {
                    palette.selected().add_modifier(Modifier::BOLD)
                } else {
                    palette.surface()
                };
                ListItem::new(format!("{}{}", choice_label(*choice), marker)).style(style)
            })
            .collect();

        frame.render_stateful_widget(List::new(items).block(block), overlay, &mut self.state.list_state);
    }
}

/// A rect of fixed size centered in `outer` (clamped to fit).
fn centered_rect(width: u16, height: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(outer.height)),
        Constraint::Fill(1),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width.min(outer.width)),
        Constraint::Fill(1),
    ])
    .areas(center_v);
    center
}
