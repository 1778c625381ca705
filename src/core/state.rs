//! # Application State
//!
//! Core business state for wherein. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── theme: Theme                    // session-wide, shared by both views
//! ├── view: View                      // Directory or Detail
//! ├── directory: DirectoryPhase       // Loading / Failed / Ready(collection)
//! ├── filter: FilterState             // query + region
//! ├── detail: Option<DetailState>     // present while the detail view is open
//! ├── cache: CountryCache             // filled by directory loads
//! ├── status_message: String          // status bar text
//! └── directory_ticket / detail_ticket  // the request each view is waiting on
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use crate::core::cache::CountryCache;
use crate::core::config::ResolvedConfig;
use crate::core::filter::{self, FilterState};
use crate::core::theme::Theme;
use crate::countries::{Country, CountryDetail};

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Directory,
    Detail,
}

/// Tags a request with the parameter that started it.
///
/// A result is only applied if its ticket still equals the one the view is
/// waiting on; anything else is a superseded request and gets dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    pub seq: u64,
    pub param: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DirectoryPhase {
    Loading,
    Failed(String),
    Ready(Vec<Country>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailPhase {
    Loading,
    Failed(String),
    NotFound(String),
    Ready(CountryDetail),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailState {
    /// The name parameter this view was opened with.
    pub name: String,
    pub phase: DetailPhase,
}

pub struct App {
    pub theme: Theme,
    pub view: View,
    pub directory: DirectoryPhase,
    pub filter: FilterState,
    pub detail: Option<DetailState>,
    pub cache: CountryCache,
    /// Serve detail lookups from `cache` when possible.
    pub reuse_directory_records: bool,
    pub status_message: String,
    pub(crate) directory_ticket: Option<RequestTicket>,
    pub(crate) detail_ticket: Option<RequestTicket>,
    next_seq: u64,
}

impl App {
    pub fn new(theme: Theme, reuse_directory_records: bool) -> Self {
        Self {
            theme,
            view: View::Directory,
            directory: DirectoryPhase::Loading,
            filter: FilterState::default(),
            detail: None,
            cache: CountryCache::new(),
            reuse_directory_records,
            status_message: String::from("Where in the world?"),
            directory_ticket: None,
            detail_ticket: None,
            next_seq: 0,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        let mut app = Self::new(config.theme, config.reuse_directory_records);
        app.filter = FilterState::new(&config.initial_query, config.default_region);
        app
    }

    /// Hands out a fresh ticket for `param`.
    pub(crate) fn issue_ticket(&mut self, param: &str) -> RequestTicket {
        self.next_seq += 1;
        RequestTicket {
            seq: self.next_seq,
            param: param.to_string(),
        }
    }

    /// The filtered directory, or nothing while it is not loaded.
    pub fn visible_countries(&self) -> Vec<&Country> {
        match &self.directory {
            DirectoryPhase::Ready(all) => filter::apply(all, &self.filter),
            _ => Vec::new(),
        }
    }

    /// Size of the full collection, if loaded.
    pub fn directory_len(&self) -> Option<usize> {
        match &self.directory {
            DirectoryPhase::Ready(all) => Some(all.len()),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        match self.view {
            View::Directory => self.directory == DirectoryPhase::Loading,
            View::Detail => matches!(
                self.detail,
                Some(DetailState {
                    phase: DetailPhase::Loading,
                    ..
                })
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::Region;
    use crate::test_support::{sample_directory, test_app};

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.view, View::Directory);
        assert_eq!(app.directory, DirectoryPhase::Loading);
        assert_eq!(app.theme, Theme::Light);
        assert!(app.detail.is_none());
        assert!(app.is_loading());
        assert!(app.visible_countries().is_empty());
    }

    #[test]
    fn test_tickets_are_unique() {
        let mut app = test_app();
        let a = app.issue_ticket("France");
        let b = app.issue_ticket("France");
        assert_ne!(a, b);
        assert_eq!(a.param, b.param);
    }

    #[test]
    fn test_visible_countries_applies_filter() {
        let mut app = test_app();
        app.directory = DirectoryPhase::Ready(sample_directory());
        app.filter.set_region(Some(Region::Americas));
        let names: Vec<_> = app
            .visible_countries()
            .iter()
            .map(|c| c.common_name())
            .collect();
        assert_eq!(names, vec!["Peru", "Brazil"]);
        assert_eq!(app.directory_len(), Some(9));
    }
}
