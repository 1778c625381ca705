//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard events into core::Action values and performs the
//! Effects that `update` returns by spawning tokio tasks.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Loading**: draws every ~80ms so the spinner animates.
//! - **Idle**: sleeps up to 500ms, only redraws on events, resize or a
//!   result arriving from a background task.
//!
//! ## Key Routing
//!
//! Ctrl+C, Ctrl+T and Ctrl+R work everywhere. The region overlay, when
//! open, takes every other key. Otherwise keys go to the current view:
//! printable input edits the search box, arrows move the card selection
//! (Left/Right fall back to the search cursor while no card is shown).

mod component;
mod components;
mod event;
mod palette;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use tokio::task::AbortHandle;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, DetailPhase, View};
use crate::core::theme::Theme;
use crate::countries::lookup;
use crate::countries::{CountrySource, RestCountriesSource};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    CountryGridState, DetailEvent, DetailPanelState, RegionPickerEvent, RegionPickerState,
    SearchBox, SearchEvent,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Persistent component states
    pub search_box: SearchBox,
    pub grid: CountryGridState,
    pub detail: DetailPanelState,
    // Region overlay (None = hidden)
    pub region_picker: Option<RegionPickerState>,
}

impl TuiState {
    pub fn new(initial_query: &str, theme: Theme) -> Self {
        Self {
            search_box: SearchBox::new(initial_query, theme),
            grid: CountryGridState::new(),
            detail: DetailPanelState::new(),
            region_picker: None,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,                        // Cursor sits in the search box
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste);
    }
}

/// In-flight fetch tasks, one slot per view.
#[derive(Default)]
struct Tasks {
    directory: Option<AbortHandle>,
    detail: Option<AbortHandle>,
}

impl Tasks {
    fn abort_detail(&mut self) {
        if let Some(handle) = self.detail.take() {
            debug!("Aborting in-flight detail request");
            handle.abort();
        }
    }

    fn abort_directory(&mut self) {
        if let Some(handle) = self.directory.take() {
            debug!("Aborting in-flight directory request");
            handle.abort();
        }
    }
}

/// Build the country source from the resolved config.
pub fn build_source(config: &ResolvedConfig) -> Arc<dyn CountrySource> {
    Arc::new(RestCountriesSource::new(
        Some(config.base_url.clone()),
        config.timeout,
    ))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let source = build_source(&config);
    info!("Using {} at {}", source.name(), config.base_url);

    let mut app = App::from_config(&config);
    let mut tui = TuiState::new(&config.initial_query, app.theme);

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut tasks = Tasks::default();

    let effect = update(&mut app, Action::LoadDirectory);
    perform(effect, &source, &tx, &mut tasks);
    if let Some(name) = &config.open_country {
        let effect = update(&mut app, Action::OpenDetail(name.clone()));
        perform(effect, &source, &tx, &mut tasks);
    }

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        let animating = app.is_loading();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let effect = handle_event(&mut app, &mut tui, &mut tasks, event);
            if effect == Effect::Quit {
                break 'main;
            }
            perform(effect, &source, &tx, &mut tasks);
        }

        // Handle background task actions (fetch results)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action_label(&action));
            let resets_grid = matches!(action, Action::DirectoryLoaded { .. });
            let effect = update(&mut app, action);
            if resets_grid {
                tui.grid.reset();
            }
            if effect == Effect::Quit {
                break 'main;
            }
            perform(effect, &source, &tx, &mut tasks);
        }
    }

    tasks.abort_directory();
    tasks.abort_detail();
    ratatui::restore();
    info!("Exited cleanly");
    Ok(())
}

/// Short description of an action for the log; results can be large.
fn action_label(action: &Action) -> String {
    match action {
        Action::DirectoryLoaded { ticket, result } => format!(
            "DirectoryLoaded(seq={}, ok={})",
            ticket.seq,
            result.is_ok()
        ),
        Action::DetailLoaded { ticket, result } => format!(
            "DetailLoaded({:?}, seq={}, ok={})",
            ticket.param,
            ticket.seq,
            result.is_ok()
        ),
        other => format!("{other:?}"),
    }
}

/// Routes one key event. Returns the Effect of any Action it dispatched.
fn handle_event(app: &mut App, tui: &mut TuiState, tasks: &mut Tasks, event: TuiEvent) -> Effect {
    match event {
        // Resize just needs a redraw (already flagged by the caller)
        TuiEvent::Resize => return Effect::None,
        TuiEvent::ForceQuit => return update(app, Action::Quit),
        TuiEvent::ToggleTheme => return update(app, Action::ToggleTheme),
        TuiEvent::Reload => return reload(app, tui, tasks),
        _ => {}
    }

    // When the region overlay is open, route all events to it
    if let Some(picker) = tui.region_picker.as_mut() {
        let Some(picker_event) = picker.handle_event(&event) else {
            return Effect::None;
        };
        tui.region_picker = None;
        return match picker_event {
            RegionPickerEvent::Select(region) => {
                tui.grid.reset();
                update(app, Action::SetRegion(region))
            }
            RegionPickerEvent::Dismiss => Effect::None,
        };
    }

    match app.view {
        View::Directory => handle_directory_event(app, tui, event),
        View::Detail => handle_detail_event(app, tui, tasks, event),
    }
}

fn handle_directory_event(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
    let visible = app.visible_countries().len();

    match event {
        TuiEvent::Tab => {
            tui.region_picker = Some(RegionPickerState::new(app.filter.region));
            Effect::None
        }
        // Esc clears a non-empty search first, then quits
        TuiEvent::Escape => match tui.search_box.clear() {
            Some(SearchEvent::Changed(query)) => {
                tui.grid.reset();
                update(app, Action::SetQuery(query))
            }
            None => update(app, Action::Quit),
        },
        TuiEvent::Submit => {
            let name = app
                .visible_countries()
                .get(tui.grid.selected)
                .map(|country| country.common_name().to_string());
            match name {
                Some(name) => {
                    tui.detail = DetailPanelState::new();
                    update(app, Action::OpenDetail(name))
                }
                None => Effect::None,
            }
        }
        TuiEvent::CursorLeft | TuiEvent::CursorRight if visible == 0 => {
            tui.search_box.handle_event(&event);
            Effect::None
        }
        TuiEvent::CursorUp
        | TuiEvent::CursorDown
        | TuiEvent::CursorLeft
        | TuiEvent::CursorRight
        | TuiEvent::PageUp
        | TuiEvent::PageDown => {
            tui.grid.navigate(&event, visible);
            Effect::None
        }
        _ => match tui.search_box.handle_event(&event) {
            Some(SearchEvent::Changed(query)) => {
                tui.grid.reset();
                update(app, Action::SetQuery(query))
            }
            None => Effect::None,
        },
    }
}

fn handle_detail_event(app: &mut App, tui: &mut TuiState, tasks: &mut Tasks, event: TuiEvent) -> Effect {
    let borders: Vec<String> = match app.detail.as_ref().map(|d| &d.phase) {
        Some(DetailPhase::Ready(detail)) => detail.border_names.clone(),
        _ => Vec::new(),
    };

    match tui.detail.handle_event(&event, borders.len()) {
        Some(DetailEvent::Back) => {
            tasks.abort_detail();
            update(app, Action::Back)
        }
        Some(DetailEvent::OpenBorder(index)) => match borders.get(index) {
            Some(name) => {
                tasks.abort_detail();
                tui.detail = DetailPanelState::new();
                update(app, Action::OpenDetail(name.clone()))
            }
            None => Effect::None,
        },
        None => Effect::None,
    }
}

/// Ctrl+R: refetch whatever the current view shows.
fn reload(app: &mut App, tui: &mut TuiState, tasks: &mut Tasks) -> Effect {
    match app.view {
        View::Directory => {
            tasks.abort_directory();
            tui.grid.reset();
            update(app, Action::LoadDirectory)
        }
        View::Detail => match app.detail.as_ref().map(|d| d.name.clone()) {
            Some(name) => {
                tasks.abort_detail();
                tui.detail = DetailPanelState::new();
                update(app, Action::OpenDetail(name))
            }
            None => Effect::None,
        },
    }
}

/// Performs an Effect by spawning the matching fetch task.
fn perform(
    effect: Effect,
    source: &Arc<dyn CountrySource>,
    tx: &mpsc::Sender<Action>,
    tasks: &mut Tasks,
) {
    match effect {
        Effect::None | Effect::Quit => {}
        Effect::FetchDirectory(ticket) => {
            tasks.abort_directory();
            let source = Arc::clone(source);
            let tx = tx.clone();
            info!("Spawning directory fetch (seq={})", ticket.seq);
            let handle = tokio::spawn(async move {
                let result = lookup::load_directory(source.as_ref()).await;
                if tx.send(Action::DirectoryLoaded { ticket, result }).is_err() {
                    warn!("Directory result dropped: event loop has exited");
                }
            });
            tasks.directory = Some(handle.abort_handle());
        }
        Effect::FetchDetail(ticket) => {
            tasks.abort_detail();
            let source = Arc::clone(source);
            let tx = tx.clone();
            info!("Spawning detail fetch for {:?} (seq={})", ticket.param, ticket.seq);
            let handle = tokio::spawn(async move {
                let result = lookup::load_detail(source.as_ref(), &ticket.param).await;
                if tx.send(Action::DetailLoaded { ticket, result }).is_err() {
                    warn!("Detail result dropped: event loop has exited");
                }
            });
            tasks.detail = Some(handle.abort_handle());
        }
        Effect::ResolveBorders { ticket, country } => {
            tasks.abort_detail();
            let source = Arc::clone(source);
            let tx = tx.clone();
            info!("Spawning border lookup for {:?} (seq={})", ticket.param, ticket.seq);
            let handle = tokio::spawn(async move {
                let detail = lookup::with_borders(source.as_ref(), country).await;
                if tx
                    .send(Action::DetailLoaded {
                        ticket,
                        result: Ok(detail),
                    })
                    .is_err()
                {
                    warn!("Border result dropped: event loop has exited");
                }
            });
            tasks.detail = Some(handle.abort_handle());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::Region;
    use crate::core::state::DirectoryPhase;
    use crate::test_support::{sample_directory, test_app};

    fn loaded() -> (App, TuiState, Tasks) {
        let mut app = test_app();
        let Effect::FetchDirectory(ticket) = update(&mut app, Action::LoadDirectory) else {
            panic!("expected a directory fetch");
        };
        update(
            &mut app,
            Action::DirectoryLoaded {
                ticket,
                result: Ok(sample_directory()),
            },
        );
        let tui = TuiState::new("", app.theme);
        (app, tui, Tasks::default())
    }

    fn press(app: &mut App, tui: &mut TuiState, tasks: &mut Tasks, events: &[TuiEvent]) -> Effect {
        let mut last = Effect::None;
        for event in events {
            last = handle_event(app, tui, tasks, event.clone());
        }
        last
    }

    #[test]
    fn test_typing_filters_directory() {
        let (mut app, mut tui, mut tasks) = loaded();
        press(
            &mut app,
            &mut tui,
            &mut tasks,
            &[TuiEvent::InputChar('p'), TuiEvent::InputChar('e')],
        );
        let names: Vec<&str> = app.visible_countries().iter().map(|c| c.common_name()).collect();
        assert_eq!(names, vec!["Peru"]);
    }

    #[test]
    fn test_escape_clears_search_then_quits() {
        let (mut app, mut tui, mut tasks) = loaded();
        press(&mut app, &mut tui, &mut tasks, &[TuiEvent::InputChar('x')]);
        assert_eq!(app.visible_countries().len(), 0);
        assert_eq!(press(&mut app, &mut tui, &mut tasks, &[TuiEvent::Escape]), Effect::None);
        assert_eq!(app.visible_countries().len(), sample_directory().len());
        assert_eq!(press(&mut app, &mut tui, &mut tasks, &[TuiEvent::Escape]), Effect::Quit);
    }

    #[test]
    fn test_region_picker_selects_region() {
        let (mut app, mut tui, mut tasks) = loaded();
        press(
            &mut app,
            &mut tui,
            &mut tasks,
            &[TuiEvent::Tab, TuiEvent::CursorDown, TuiEvent::CursorDown, TuiEvent::Submit],
        );
        assert!(tui.region_picker.is_none());
        assert_eq!(app.filter.region, Some(Region::Americas));
        assert_eq!(app.visible_countries().len(), 2);
    }

    #[test]
    fn test_picker_swallows_typing() {
        let (mut app, mut tui, mut tasks) = loaded();
        press(&mut app, &mut tui, &mut tasks, &[TuiEvent::Tab, TuiEvent::InputChar('z')]);
        assert!(tui.region_picker.is_some());
        assert!(tui.search_box.buffer.is_empty());
    }

    #[test]
    fn test_enter_opens_selected_card() {
        let (mut app, mut tui, mut tasks) = loaded();
        let effect = press(
            &mut app,
            &mut tui,
            &mut tasks,
            &[TuiEvent::CursorRight, TuiEvent::Submit],
        );
        let Effect::FetchDetail(ticket) = effect else {
            panic!("expected a detail fetch, got {effect:?}");
        };
        assert_eq!(ticket.param, "Germany");
        assert_eq!(app.view, View::Detail);
    }

    #[test]
    fn test_enter_with_no_cards_does_nothing() {
        let (mut app, mut tui, mut tasks) = loaded();
        let effect = press(
            &mut app,
            &mut tui,
            &mut tasks,
            &[TuiEvent::InputChar('q'), TuiEvent::Submit],
        );
        assert_eq!(effect, Effect::None);
        assert_eq!(app.view, View::Directory);
    }

    #[test]
    fn test_escape_in_detail_goes_back() {
        let (mut app, mut tui, mut tasks) = loaded();
        update(&mut app, Action::OpenDetail("Peru".into()));
        assert_eq!(press(&mut app, &mut tui, &mut tasks, &[TuiEvent::Escape]), Effect::None);
        assert_eq!(app.view, View::Directory);
        assert!(app.detail.is_none());
    }

    #[test]
    fn test_reload_directory() {
        let (mut app, mut tui, mut tasks) = loaded();
        let effect = press(&mut app, &mut tui, &mut tasks, &[TuiEvent::Reload]);
        assert!(matches!(effect, Effect::FetchDirectory(_)));
        assert_eq!(app.directory, DirectoryPhase::Loading);
    }

    #[test]
    fn test_reload_detail_reopens_same_name() {
        let (mut app, mut tui, mut tasks) = loaded();
        update(&mut app, Action::OpenDetail("Peru".into()));
        let Effect::FetchDetail(ticket) = press(&mut app, &mut tui, &mut tasks, &[TuiEvent::Reload])
        else {
            panic!("expected a detail fetch");
        };
        assert_eq!(ticket.param, "Peru");
    }

    #[test]
    fn test_theme_toggle_works_in_any_view() {
        let (mut app, mut tui, mut tasks) = loaded();
        press(&mut app, &mut tui, &mut tasks, &[TuiEvent::ToggleTheme]);
        assert_eq!(app.theme, Theme::Dark);
        update(&mut app, Action::OpenDetail("Peru".into()));
        press(&mut app, &mut tui, &mut tasks, &[TuiEvent::ToggleTheme]);
        assert_eq!(app.theme, Theme::Light);
    }
}
