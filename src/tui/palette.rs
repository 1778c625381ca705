//! Colors for each theme.
//!
//! Dark mode uses the site's blues (VeryDarkBlue page, DarkBlue surfaces);
//! light mode uses VeryLightGray with white surfaces.

use ratatui::style::{Color, Modifier, Style};

use crate::core::theme::Theme;

const DARK_BLUE: Color = Color::Rgb(43, 57, 69); // hsl(209, 23%, 22%)
const VERY_DARK_BLUE: Color = Color::Rgb(32, 44, 55); // hsl(207, 26%, 17%)
const VERY_DARK_BLUE_TEXT: Color = Color::Rgb(17, 21, 23); // hsl(200, 15%, 8%)
const DARK_GRAY: Color = Color::Rgb(133, 133, 133); // hsl(0, 0%, 52%)
const VERY_LIGHT_GRAY: Color = Color::Rgb(250, 250, 250); // hsl(0, 0%, 98%)
const WHITE: Color = Color::Rgb(255, 255, 255);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Page background
    pub background: Color,
    /// Cards, header, inputs
    pub surface: Color,
    pub text: Color,
    /// Field values and hints
    pub muted: Color,
    /// Selection highlight
    pub accent: Color,
    pub error: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                background: VERY_LIGHT_GRAY,
                surface: WHITE,
                text: VERY_DARK_BLUE_TEXT,
                muted: DARK_GRAY,
                accent: Color::Rgb(2, 132, 199), // sky-600
                error: Color::Rgb(239, 68, 68),
            },
            Theme::Dark => Self {
                background: VERY_DARK_BLUE,
                surface: DARK_BLUE,
                text: WHITE,
                muted: DARK_GRAY,
                accent: Color::Rgb(13, 148, 136), // teal-600
                error: Color::Rgb(239, 68, 68),
            },
        }
    }

    pub fn page(&self) -> Style {
        Style::default().bg(self.background).fg(self.text)
    }

    pub fn surface(&self) -> Style {
        Style::default().bg(self.surface).fg(self.text)
    }

    pub fn label(&self) -> Style {
        Style::default().fg(self.text).add_modifier(Modifier::BOLD)
    }

    pub fn value(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn selected(&self) -> Style {
        Style::default().bg(self.accent).fg(WHITE)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.error)
    }
}
