use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::format::format_population;
use crate::countries::Country;
use crate::tui::palette::Palette;

/// Rendered card height: border + three field lines + border.
pub const CARD_HEIGHT: u16 = 5;
/// Vertical space a card occupies in the grid, including the gap below it.
pub const CARD_SLOT_HEIGHT: u16 = CARD_HEIGHT + 1;
/// Narrowest column the grid will lay out.
pub const MIN_CARD_WIDTH: u16 = 28;

/// A stateless directory card: name as the title, then population, region
/// and capital.
pub struct CountryCard<'a> {
    pub country: &'a Country,
    pub is_selected: bool,
    pub palette: Palette,
}

impl<'a> CountryCard<'a> {
    pub fn new(country: &'a Country, is_selected: bool, palette: Palette) -> Self {
        Self {
            country,
            is_selected,
            palette,
        }
    }

    /// Builds the card widget for a slot `width` columns wide.
    pub fn widget(&self, width: u16) -> Paragraph<'a> {
        let title_width = width.saturating_sub(4) as usize;
        let title = truncate_to_width(self.country.common_name(), title_width);

        let (style, border_style) = if self.is_selected {
            (
                self.palette.surface(),
                self.palette.selected().add_modifier(Modifier::BOLD),
            )
        } else {
            (self.palette.surface(), self.palette.value())
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Span::styled(
                format!(" {title} "),
                self.palette.label().add_modifier(Modifier::BOLD),
            ))
            .padding(Padding::horizontal(1));

        let lines = vec![
            field_line("Population", format_population(self.country.population), self.palette),
            field_line("Region", self.country.region.clone(), self.palette),
            field_line("Capital", self.country.first_capital().to_string(), self.palette),
        ];

        Paragraph::new(lines).block(block).style(style)
    }
}

fn field_line(label: &'static str, value: String, palette: Palette) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), palette.label()),
        Span::styled(value, palette.value()),
    ])
}

/// Truncate to `max_width` display columns, adding "…" if anything was cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
