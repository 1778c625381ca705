use crate::core::filter::Region;
use crate::core::state::{App, DirectoryPhase, View};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{CountryDetailView, CountryGrid, Loading, RegionPicker, TitleBar};
use crate::tui::components::region_picker::choice_label;
use crate::tui::palette::Palette;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

const DIRECTORY_HELP: &str =
    " Type to search · Tab region · Arrows move · Enter open · Ctrl+T theme · Ctrl+R reload · Ctrl+C quit";
const DETAIL_HELP: &str = " Esc back · ←/→ borders · Enter open · ↑/↓ scroll · Ctrl+T theme · Ctrl+C quit";

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    let palette = Palette::for_theme(app.theme);
    frame.render_widget(Block::default().style(palette.page()), frame.area());

    let [title_area, main_area, help_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame.area());

    TitleBar::new(app.theme, app.status_message.clone()).render(frame, title_area);

    let help = match app.view {
        View::Directory => {
            draw_directory(frame, main_area, app, tui, palette, spinner_frame);
            DIRECTORY_HELP
        }
        View::Detail => {
            draw_detail(frame, main_area, app, tui, palette, spinner_frame);
            DETAIL_HELP
        }
    };
    frame.render_widget(
        Paragraph::new(Span::styled(help, palette.value())).style(palette.surface()),
        help_area,
    );

    // Overlay last so it sits on top
    if let Some(picker) = tui.region_picker.as_mut() {
        RegionPicker::new(picker, app.filter.region, app.theme).render(frame, frame.area());
    }
}

fn draw_directory(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    tui: &mut TuiState,
    palette: Palette,
    spinner_frame: usize,
) {
    use Constraint::{Length, Min};

    let [_, toolbar_area, _, content_area] =
        Layout::vertical([Length(1), Length(3), Length(1), Min(0)]).areas(inset(area));
    let [search_area, _, region_area] =
        Layout::horizontal([Min(20), Length(2), Length(30)]).areas(toolbar_area);

    tui.search_box.theme = app.theme;
    tui.search_box.render(frame, search_area);
    draw_region_button(frame, region_area, app.filter.region, palette);

    match &app.directory {
        DirectoryPhase::Loading => {
            Loading::new("Loading countries", spinner_frame, palette).render(frame, content_area)
        }
        DirectoryPhase::Failed(message) => draw_error(frame, content_area, message, palette),
        DirectoryPhase::Ready(_) => {
            let visible = app.visible_countries();
            CountryGrid::new(&mut tui.grid, &visible, palette).render(frame, content_area);
        }
    }
}

fn draw_region_button(frame: &mut Frame, area: Rect, region: Option<Region>, palette: Palette) {
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(palette.value())
        .title_bottom(Line::from(" Tab ").right_aligned())
        .style(palette.surface());
    let text = Line::from(vec![
        Span::styled(format!(" {}", choice_label(region)), palette.label()),
        Span::styled(" ▾", palette.value()),
    ]);
    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn draw_detail(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    tui: &mut TuiState,
    palette: Palette,
    spinner_frame: usize,
) {
    let Some(detail) = &app.detail else {
        return;
    };
    let [_, content_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inset(area));
    CountryDetailView::new(&mut tui.detail, detail, palette, spinner_frame)
        .render(frame, content_area);
}

fn draw_error(frame: &mut Frame, area: Rect, message: &str, palette: Palette) {
    let lines = vec![
        Line::from(Span::styled(message.to_string(), palette.error())),
        Line::from(""),
        Line::from(Span::styled("Ctrl+R to retry", palette.value())),
    ];
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(4),
        Constraint::Fill(1),
    ])
    .areas(area);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        middle,
    );
}

/// Horizontal page margin.
fn inset(area: Rect) -> Rect {
    let margin = if area.width > 60 { 2 } else { 0 };
    Rect {
        x: area.x + margin,
        width: area.width.saturating_sub(margin * 2),
        ..area
    }
}
