//! # CountryDetail Component
//!
//! The detail view: one of four phases (loading, error, not found, ready).
//!
//! When ready it shows every field of the record, then the border countries
//! as chips. The chips are selectable with ←/→ (or Tab) and Enter opens the
//! selected neighbour, which re-parameterizes the view with a new name.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `DetailPanelState` lives in `TuiState`
//! - `CountryDetailView` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect, Size};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};
use unicode_width::UnicodeWidthStr;

use crate::core::format::format_population;
use crate::core::state::{DetailPhase, DetailState};
use crate::countries::CountryDetail;
use crate::tui::component::Component;
use crate::tui::components::loading::Loading;
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;

/// Left margin for the detail content.
const MARGIN: u16 = 2;

/// Persistent state for the detail view.
#[derive(Default)]
pub struct DetailPanelState {
    pub scroll_state: ScrollViewState,
    pub selected_border: Option<usize>,
}

impl DetailPanelState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key event. `border_count` is the number of border chips
    /// currently shown (0 unless the view is ready).
    pub fn handle_event(&mut self, event: &TuiEvent, border_count: usize) -> Option<DetailEvent> {
        match event {
            TuiEvent::Escape | TuiEvent::Backspace => Some(DetailEvent::Back),
            TuiEvent::CursorRight | TuiEvent::Tab if border_count > 0 => {
                self.selected_border = Some(match self.selected_border {
                    Some(i) => (i + 1) % border_count,
                    None => 0,
                });
                None
            }
            TuiEvent::CursorLeft if border_count > 0 => {
                self.selected_border = Some(match self.selected_border {
                    Some(0) | None => border_count - 1,
                    Some(i) => i - 1,
                });
                None
            }
            TuiEvent::Submit => self
                .selected_border
                .filter(|i| *i < border_count)
                .map(DetailEvent::OpenBorder),
            TuiEvent::CursorUp => {
                self.scroll_state.scroll_up();
                None
            }
            TuiEvent::CursorDown => {
                self.scroll_state.scroll_down();
                None
            }
            TuiEvent::PageUp => {
                self.scroll_state.scroll_page_up();
                None
            }
            TuiEvent::PageDown => {
                self.scroll_state.scroll_page_down();
                None
            }
            _ => None,
        }
    }
}

/// Events emitted by the detail view.
#[derive(Debug, PartialEq)]
pub enum DetailEvent {
    Back,
    /// Index into the border list.
    OpenBorder(usize),
}

/// Transient render wrapper for the detail view.
pub struct CountryDetailView<'a> {
    state: &'a mut DetailPanelState,
    detail: &'a DetailState,
    palette: Palette,
    spinner_frame: usize,
}

impl<'a> CountryDetailView<'a> {
    pub fn new(
        state: &'a mut DetailPanelState,
        detail: &'a DetailState,
        palette: Palette,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            detail,
            palette,
            spinner_frame,
        }
    }

    fn render_message(&self, frame: &mut Frame, area: Rect, text: String, is_error: bool) {
        let style = if is_error {
            self.palette.error()
        } else {
            self.palette.label()
        };
        let [_, middle, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(3),
            Constraint::Fill(1),
        ])
        .areas(area);
        let lines = vec![
            Line::from(Span::styled(text, style)),
            Line::from(""),
            Line::from(Span::styled("Esc to go back", self.palette.value())),
        ];
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            middle,
        );
    }

    fn render_ready(&mut self, frame: &mut Frame, area: Rect, detail: &CountryDetail) {
        let content_width = area.width.saturating_sub(1 + MARGIN);
        let lines = detail_lines(detail, content_width, self.state.selected_border, self.palette);
        let total_height = lines.len() as u16;

        let mut scroll_view = ScrollView::new(Size::new(area.width.saturating_sub(1), total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(
            Paragraph::new(lines).style(self.palette.page()),
            Rect::new(MARGIN, 0, content_width, total_height),
        );

        // Never scroll past the end
        let max_y = total_height.saturating_sub(area.height);
        let offset = self.state.scroll_state.offset();
        if offset.y > max_y {
            self.state.scroll_state.set_offset(Position { x: 0, y: max_y });
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

impl<'a> Component for CountryDetailView<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let detail = self.detail;
        match &detail.phase {
            DetailPhase::Loading => {
                Loading::new("Loading", self.spinner_frame, self.palette).render(frame, area)
            }
            DetailPhase::Failed(message) => {
                self.render_message(frame, area, message.clone(), true)
            }
            DetailPhase::NotFound(_) => {
                self.render_message(frame, area, "Country not found".to_string(), false)
            }
            DetailPhase::Ready(detail) => self.render_ready(frame, area, detail),
        }
    }
}

/// Lays out the ready view as plain lines. Long values wrap with a hanging
/// indent; border chips flow onto as many lines as `width` requires.
pub fn detail_lines(
    detail: &CountryDetail,
    width: u16,
    selected_border: Option<usize>,
    palette: Palette,
) -> Vec<Line<'static>> {
    let country = &detail.country;
    let width = width.max(10) as usize;
    let mut lines = vec![
        Line::from(Span::styled(" ← Back (Esc) ", palette.surface())),
        Line::from(""),
        Line::from(Span::styled(
            country.common_name().to_string(),
            palette.label().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    let fields: [(&str, String); 5] = [
        ("Native Name", country.native_name().to_string()),
        ("Population", format_population(country.population)),
        ("Region", country.region.clone()),
        ("Sub Region", country.subregion().to_string()),
        ("Capital", country.first_capital().to_string()),
    ];
    let more: [(&str, String); 3] = [
        ("Top Level Domain", country.first_tld().to_string()),
        ("Currencies", country.currency_names()),
        ("Languages", country.language_names()),
    ];
    for (label, value) in fields {
        push_field(&mut lines, label, &value, width, palette);
    }
    lines.push(Line::from(""));
    for (label, value) in more {
        push_field(&mut lines, label, &value, width, palette);
    }
    if !country.flags.png.is_empty() {
        push_field(&mut lines, "Flag", &country.flags.png, width, palette);
    }
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("Border Countries:", palette.label())));
    if detail.border_names.is_empty() {
        lines.push(Line::from(Span::styled("No border countries", palette.value())));
    } else {
        lines.extend(chip_lines(&detail.border_names, width, selected_border, palette));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "←/→ select a neighbour, Enter to open it",
            palette.value(),
        )));
    }
    lines
}

fn push_field(lines: &mut Vec<Line<'static>>, label: &str, value: &str, width: usize, palette: Palette) {
    let text = format!("{label}: {value}");
    let options = textwrap::Options::new(width).subsequent_indent("  ");
    for (i, part) in textwrap::wrap(&text, options).into_iter().enumerate() {
        let part = part.into_owned();
        if i == 0 {
            let (head, tail) = part.split_at(part.find(": ").map(|p| p + 2).unwrap_or(0));
            lines.push(Line::from(vec![
                Span::styled(head.to_string(), palette.label()),
                Span::styled(tail.to_string(), palette.value()),
            ]));
        } else {
            lines.push(Line::from(Span::styled(part, palette.value())));
        }
    }
}

fn chip_lines(
    names: &[String],
    width: usize,
    selected: Option<usize>,
    palette: Palette,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut used = 0usize;

    for (i, name) in names.iter().enumerate() {
        let chip = format!(" {name} ");
        let chip_width = chip.width();
        if used > 0 && used + chip_width > width {
            lines.push(Line::from(std::mem::take(&mut current)));
            used = 0;
        }
        let style = if selected == Some(i) {
            palette.selected().add_modifier(Modifier::BOLD)
        } else {
            palette.surface()
        };
        current.push(Span::styled(chip, style));
        current.push(Span::raw(" "));
        used += chip_width + 1;
    }
    if !current.is_empty() {
        lines.push(Line::from(current));
    }
    lines
}
