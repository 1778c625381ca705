//! # Core Application Logic
//!
//! This module contains wherein's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                    ┌───────────┴───────────┐
//!                    ▼                       ▼
//!             ┌────────────┐          ┌────────────┐
//!             │    TUI     │          │ countries  │
//!             │  Adapter   │          │ (REST API) │
//!             │ (ratatui)  │          │            │
//!             └────────────┘          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct — all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`filter`]: Search and region filtering over the directory
//! - [`format`]: Population formatting
//! - [`theme`]: The session-wide light/dark theme
//! - [`cache`]: Directory records keyed by name
//! - [`config`]: Layered configuration

pub mod action;
pub mod cache;
pub mod config;
pub mod filter;
pub mod format;
pub mod state;
pub mod theme;
