//! # Actions
//!
//! Everything that can happen in wherein becomes an `Action`.
//! User presses Enter on a card? That's `Action::OpenDetail(name)`.
//! The API responds? That's `Action::DetailLoaded { ticket, result }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing any I/O the adapter must
//! perform. No side effects here. I/O happens elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Every fetch effect carries a `RequestTicket`. Results come back with the
//! same ticket and are dropped if the view has since moved on.

use log::{debug, info, warn};

use crate::core::filter::Region;
use crate::core::state::{
    App, DetailPhase, DetailState, DirectoryPhase, RequestTicket, View,
};
use crate::countries::{Country, CountryDetail, SourceError};

#[derive(Debug)]
pub enum Action {
    /// (Re)load the directory collection.
    LoadDirectory,
    DirectoryLoaded {
        ticket: RequestTicket,
        result: Result<Vec<Country>, SourceError>,
    },
    SetQuery(String),
    SetRegion(Option<Region>),
    /// Open the detail view for a country name.
    OpenDetail(String),
    DetailLoaded {
        ticket: RequestTicket,
        result: Result<CountryDetail, SourceError>,
    },
    /// Leave the detail view.
    Back,
    ToggleTheme,
    Quit,
}

/// I/O requested by `update`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    FetchDirectory(RequestTicket),
    /// Name lookup followed by border resolution.
    FetchDetail(RequestTicket),
    /// Border resolution only; the record is already known.
    ResolveBorders {
        ticket: RequestTicket,
        country: Country,
    },
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::LoadDirectory => {
            let ticket = app.issue_ticket("");
            app.directory = DirectoryPhase::Loading;
            app.directory_ticket = Some(ticket.clone());
            app.status_message = String::from("Loading countries...");
            Effect::FetchDirectory(ticket)
        }

        Action::DirectoryLoaded { ticket, result } => {
            if app.directory_ticket.as_ref() != Some(&ticket) {
                debug!("Discarding stale directory result (seq={})", ticket.seq);
                return Effect::None;
            }
            app.directory_ticket = None;
            match result {
                Ok(countries) => {
                    info!("Directory ready: {} countries", countries.len());
                    app.cache.fill(&countries);
                    app.status_message = format!("{} countries", countries.len());
                    app.directory = DirectoryPhase::Ready(countries);
                }
                Err(e) => {
                    warn!("Directory load failed: {}", e);
                    app.status_message = String::from("Load failed");
                    app.directory = DirectoryPhase::Failed(format!("Failed to load countries: {e}"));
                }
            }
            Effect::None
        }

        Action::SetQuery(query) => {
            app.filter.set_query(&query);
            Effect::None
        }

        Action::SetRegion(region) => {
            app.filter.set_region(region);
            app.status_message = match region {
                Some(r) => format!("Region: {r}"),
                None => String::from("All regions"),
            };
            Effect::None
        }

        Action::OpenDetail(name) => {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Effect::None;
            }

            let ticket = app.issue_ticket(&name);
            info!("Opening detail for {:?} (seq={})", name, ticket.seq);
            app.view = View::Detail;
            app.detail = Some(DetailState {
                name: name.clone(),
                phase: DetailPhase::Loading,
            });
            app.detail_ticket = Some(ticket.clone());
            app.status_message = format!("Loading {name}...");

            let cached = app
                .reuse_directory_records
                .then(|| app.cache.get(&name).cloned())
                .flatten();
            match cached {
                Some(country) => {
                    debug!("Serving {:?} from directory cache", name);
                    Effect::ResolveBorders { ticket, country }
                }
                None => Effect::FetchDetail(ticket),
            }
        }

        Action::DetailLoaded { ticket, result } => {
            if app.detail_ticket.as_ref() != Some(&ticket) {
                debug!(
                    "Discarding stale detail result for {:?} (seq={})",
                    ticket.param, ticket.seq
                );
                return Effect::None;
            }
            app.detail_ticket = None;

            let phase = match result {
                Ok(detail) => {
                    app.status_message = detail.country.common_name().to_string();
                    DetailPhase::Ready(detail)
                }
                Err(SourceError::NotFound(name)) => {
                    app.status_message = String::from("Country not found");
                    DetailPhase::NotFound(name)
                }
                Err(e) => {
                    warn!("Detail load for {:?} failed: {}", ticket.param, e);
                    app.status_message = String::from("Load failed");
                    DetailPhase::Failed(e.to_string())
                }
            };
            app.detail = Some(DetailState {
                name: ticket.param,
                phase,
            });
            Effect::None
        }

        Action::Back => {
            app.view = View::Directory;
            app.detail = None;
            app.detail_ticket = None;
            app.status_message = match app.directory_len() {
                Some(n) => format!("{n} countries"),
                None => String::new(),
            };
            Effect::None
        }

        Action::ToggleTheme => {
            app.theme = app.theme.toggled();
            app.status_message = app.theme.label().to_string();
            Effect::None
        }

        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::theme::Theme;
    use crate::countries::CountryDetail;
    use crate::test_support::{country, sample_directory, test_app};

    fn loaded_app() -> App {
        let mut app = test_app();
        let Effect::FetchDirectory(ticket) = update(&mut app, Action::LoadDirectory) else {
            panic!("expected FetchDirectory");
        };
        update(
            &mut app,
            Action::DirectoryLoaded {
                ticket,
                result: Ok(sample_directory()),
            },
        );
        app
    }

    fn open(app: &mut App, name: &str) -> RequestTicket {
        match update(app, Action::OpenDetail(name.to_string())) {
            Effect::FetchDetail(ticket) => ticket,
            other => panic!("expected FetchDetail, got {other:?}"),
        }
    }

    fn detail_of(name: &str) -> CountryDetail {
        CountryDetail {
            country: country(name, "Europe", &[]),
            border_names: Vec::new(),
        }
    }

    #[test]
    fn test_directory_load_success() {
        let app = loaded_app();
        assert_eq!(app.directory_len(), Some(9));
        assert_eq!(app.cache.len(), 9);
        assert!(!app.is_loading());
        assert_eq!(app.status_message, "9 countries");
    }

    #[test]
    fn test_directory_load_failure_shows_message() {
        let mut app = test_app();
        let Effect::FetchDirectory(ticket) = update(&mut app, Action::LoadDirectory) else {
            panic!("expected FetchDirectory");
        };
        update(
            &mut app,
            Action::DirectoryLoaded {
                ticket,
                result: Err(SourceError::Network("connection refused".into())),
            },
        );
        assert_eq!(
            app.directory,
            DirectoryPhase::Failed(
                "Failed to load countries: network error: connection refused".into()
            )
        );
    }

    #[test]
    fn test_stale_directory_result_is_dropped() {
        let mut app = test_app();
        let Effect::FetchDirectory(first) = update(&mut app, Action::LoadDirectory) else {
            panic!("expected FetchDirectory");
        };
        let Effect::FetchDirectory(second) = update(&mut app, Action::LoadDirectory) else {
            panic!("expected FetchDirectory");
        };
        update(
            &mut app,
            Action::DirectoryLoaded {
                ticket: first,
                result: Ok(vec![country("Chad", "Africa", &[])]),
            },
        );
        assert_eq!(app.directory, DirectoryPhase::Loading);

        update(
            &mut app,
            Action::DirectoryLoaded {
                ticket: second,
                result: Ok(sample_directory()),
            },
        );
        assert_eq!(app.directory_len(), Some(9));
    }

    #[test]
    fn test_query_and_region_narrow_the_view() {
        let mut app = loaded_app();
        update(&mut app, Action::SetRegion(Some(Region::Europe)));
        assert_eq!(app.visible_countries().len(), 4);
        update(&mut app, Action::SetQuery("SPA".into()));
        let names: Vec<_> = app.visible_countries().iter().map(|c| c.common_name()).collect();
        assert_eq!(names, vec!["Spain"]);
        update(&mut app, Action::SetRegion(None));
        update(&mut app, Action::SetQuery(String::new()));
        assert_eq!(app.visible_countries().len(), 9);
    }

    #[test]
    fn test_open_detail_enters_loading() {
        let mut app = loaded_app();
        let ticket = open(&mut app, "France");
        assert_eq!(ticket.param, "France");
        assert_eq!(app.view, View::Detail);
        assert!(app.is_loading());
        assert_eq!(
            app.detail,
            Some(DetailState {
                name: "France".into(),
                phase: DetailPhase::Loading
            })
        );
    }

    #[test]
    fn test_open_detail_ignores_blank_name() {
        let mut app = loaded_app();
        assert_eq!(update(&mut app, Action::OpenDetail("   ".into())), Effect::None);
        assert_eq!(app.view, View::Directory);
    }

    #[test]
    fn test_detail_ready() {
        let mut app = loaded_app();
        let ticket = open(&mut app, "France");
        update(
            &mut app,
            Action::DetailLoaded {
                ticket,
                result: Ok(detail_of("France")),
            },
        );
        assert!(matches!(
            app.detail.as_ref().map(|d| &d.phase),
            Some(DetailPhase::Ready(d)) if d.country.common_name() == "France"
        ));
        assert!(!app.is_loading());
    }

    #[test]
    fn test_detail_not_found_and_failure_are_distinct() {
        let mut app = loaded_app();
        let ticket = open(&mut app, "Atlantis");
        update(
            &mut app,
            Action::DetailLoaded {
                ticket,
                result: Err(SourceError::NotFound("Atlantis".into())),
            },
        );
        assert_eq!(
            app.detail.as_ref().map(|d| d.phase.clone()),
            Some(DetailPhase::NotFound("Atlantis".into()))
        );

        let ticket = open(&mut app, "France");
        update(
            &mut app,
            Action::DetailLoaded {
                ticket,
                result: Err(SourceError::Network("timed out".into())),
            },
        );
        assert_eq!(
            app.detail.as_ref().map(|d| d.phase.clone()),
            Some(DetailPhase::Failed("network error: timed out".into()))
        );
    }

    #[test]
    fn test_superseded_detail_result_is_dropped() {
        let mut app = loaded_app();
        let stale = open(&mut app, "France");
        let current = open(&mut app, "Spain");

        // France answers late; it must not overwrite the Spain view
        update(
            &mut app,
            Action::DetailLoaded {
                ticket: stale,
                result: Ok(detail_of("France")),
            },
        );
        assert_eq!(app.detail.as_ref().map(|d| d.name.as_str()), Some("Spain"));
        assert!(app.is_loading());

        update(
            &mut app,
            Action::DetailLoaded {
                ticket: current,
                result: Ok(detail_of("Spain")),
            },
        );
        assert!(matches!(
            app.detail.as_ref().map(|d| &d.phase),
            Some(DetailPhase::Ready(d)) if d.country.common_name() == "Spain"
        ));
    }

    #[test]
    fn test_result_after_back_is_dropped() {
        let mut app = loaded_app();
        let ticket = open(&mut app, "France");
        update(&mut app, Action::Back);
        update(
            &mut app,
            Action::DetailLoaded {
                ticket,
                result: Ok(detail_of("France")),
            },
        );
        assert_eq!(app.view, View::Directory);
        assert!(app.detail.is_none());
    }

    #[test]
    fn test_same_name_reopened_gets_new_ticket() {
        let mut app = loaded_app();
        let first = open(&mut app, "France");
        update(&mut app, Action::Back);
        let second = open(&mut app, "France");
        assert_ne!(first, second);
        update(
            &mut app,
            Action::DetailLoaded {
                ticket: first,
                result: Ok(detail_of("France")),
            },
        );
        assert!(app.is_loading());
    }

    #[test]
    fn test_cache_hit_skips_name_lookup() {
        let mut app = loaded_app();
        app.reuse_directory_records = true;
        match update(&mut app, Action::OpenDetail("spain".into())) {
            Effect::ResolveBorders { ticket, country } => {
                assert_eq!(ticket.param, "spain");
                assert_eq!(country.common_name(), "Spain");
            }
            other => panic!("expected ResolveBorders, got {other:?}"),
        }
    }

    #[test]
    fn test_cache_miss_falls_back_to_lookup() {
        let mut app = loaded_app();
        app.reuse_directory_records = true;
        assert!(matches!(
            update(&mut app, Action::OpenDetail("Atlantis".into())),
            Effect::FetchDetail(_)
        ));
    }

    #[test]
    fn test_cache_ignored_when_disabled() {
        let mut app = loaded_app();
        assert!(matches!(
            update(&mut app, Action::OpenDetail("Spain".into())),
            Effect::FetchDetail(_)
        ));
    }

    #[test]
    fn test_theme_is_shared_across_views() {
        let mut app = loaded_app();
        update(&mut app, Action::ToggleTheme);
        assert_eq!(app.theme, Theme::Dark);
        open(&mut app, "France");
        assert_eq!(app.theme, Theme::Dark);
        update(&mut app, Action::Back);
        assert_eq!(app.theme, Theme::Dark);
        update(&mut app, Action::ToggleTheme);
        assert_eq!(app.theme, Theme::Light);
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
