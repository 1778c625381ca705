//! # TitleBar Component
//!
//! Top bar: the app title on the left, the status message in the middle and
//! the dark-mode toggle on the right.
//!
//! Stateless: all three props come from `App`, and the bar renders exactly
//! what it is given. The moon is hollow in light mode and filled in dark
//! mode; the label always reads "Dark Mode", like a checkbox.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::theme::Theme;
use crate::tui::component::Component;
use crate::tui::palette::Palette;

pub const TITLE: &str = "Where in the world?";

pub struct TitleBar {
    pub theme: Theme,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(theme: Theme, status_message: String) -> Self {
        Self {
            theme,
            status_message,
        }
    }

    fn toggle_text(&self) -> &'static str {
        if self.theme.is_dark() {
            "● Dark Mode (Ctrl+T)"
        } else {
            "○ Dark Mode (Ctrl+T)"
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let palette = Palette::for_theme(self.theme);
        let toggle = self.toggle_text();

        let [title_area, status_area, toggle_area] = Layout::horizontal([
            Constraint::Length(TITLE.len() as u16 + 2),
            Constraint::Min(0),
            Constraint::Length(toggle.chars().count() as u16 + 1),
        ])
        .areas(area);

        frame.render_widget(Paragraph::new("").style(palette.surface()), area);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!(" {TITLE}"),
                palette.label().add_modifier(Modifier::BOLD),
            )))
            .style(palette.surface()),
            title_area,
        );
        if !self.status_message.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    format!("| {}", self.status_message),
                    palette.value(),
                )))
                .style(palette.surface()),
                status_area,
            );
        }
        frame.render_widget(
            Paragraph::new(Line::from(toggle).right_aligned()).style(palette.surface()),
            toggle_area,
        );
    }
}
