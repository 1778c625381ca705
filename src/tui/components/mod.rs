//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Simple display components that receive all data as parameters:
//! - `TitleBar`: Top bar with the app title, status and dark-mode toggle
//! - `CountryCard`: One directory card
//! - `Loading`: Centered spinner
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `SearchBox`: Free-text search field
//! - `RegionPicker`: Region selector overlay
//! - `CountryGrid`: Scrollable card grid with keyboard selection
//! - `CountryDetailView`: Detail page with selectable border chips
//!
//! ### Props-Based Data Flow
//!
//! Components receive external data as "props" (function parameters), not by
//! directly accessing global state. `App` is read in `ui.rs` and handed down.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs             (this file)
//! ├── title_bar.rs       (Top bar)
//! ├── search_box.rs      (Search input)
//! ├── region_picker.rs   (Region overlay)
//! ├── country_card.rs    (Single card)
//! ├── country_grid.rs    (Directory grid)
//! ├── country_detail.rs  (Detail page)
//! └── loading.rs         (Spinner)
//! ```

pub mod country_card;
pub mod country_detail;
pub mod country_grid;
pub mod loading;
pub mod region_picker;
pub mod search_box;
mod title_bar;

pub use country_detail::{CountryDetailView, DetailEvent, DetailPanelState};
pub use country_grid::{CountryGrid, CountryGridState};
pub use loading::Loading;
pub use region_picker::{RegionPicker, RegionPickerEvent, RegionPickerState};
pub use search_box::{SearchBox, SearchEvent};
pub use title_bar::TitleBar;
