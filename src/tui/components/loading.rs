//! # Loading Component
//!
//! Centered spinner with a label, shown while a view waits on the network.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;
use crate::tui::palette::Palette;

const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct Loading<'a> {
    pub label: &'a str,
    pub frame_index: usize,
    pub palette: Palette,
}

impl<'a> Loading<'a> {
    pub fn new(label: &'a str, frame_index: usize, palette: Palette) -> Self {
        Self {
            label,
            frame_index,
            palette,
        }
    }

    fn spinner(&self) -> &'static str {
        SPINNER[self.frame_index % SPINNER.len()]
    }
}

impl<'a> Component for Loading<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [line_area] = Layout::vertical([Constraint::Length(1)])
            .flex(Flex::Center)
            .areas(area);

        let line = Line::from(vec![
            Span::styled(self.spinner(), self.palette.label()),
            Span::raw(" "),
            Span::styled(self.label, self.palette.label()),
        ]);
        frame.render_widget(
            Paragraph::new(line).alignment(Alignment::Center),
            line_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::theme::Theme;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_spinner_wraps() {
        let palette = Palette::for_theme(Theme::Light);
        assert_eq!(Loading::new("", 0, palette).spinner(), "⠋");
        assert_eq!(Loading::new("", SPINNER.len() + 1, palette).spinner(), "⠙");
    }

    #[test]
    fn test_renders_label() {
        let backend = TestBackend::new(30, 5);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| Loading::new("Loading", 3, Palette::for_theme(Theme::Dark)).render(f, f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Loading"));
    }
}
