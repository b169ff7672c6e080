// Copyright 2026 the Songsearch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Platform-independent controller for a song recommendation search page.
//!
//! The page has a search box with autocomplete, a recommendations panel that
//! shows server-rendered results, and a GPU toggle forwarded to the backend.
//! `songsearch_core` holds all of the page's behavior; a backend crate binds
//! it to a real document.
//!
//! # Architecture
//!
//! ```text
//!   DOM event (keydown, input, focusout, change, resize)
//!       │
//!       ▼
//!   SearchController ──► DomPort writes
//!       │
//!       ▼
//!   take_commands() ──► Fetch / Schedule ──► backend (fetch, setTimeout)
//!                                                 │
//!       ┌─────────────────────────────────────────┘
//!       ▼
//!   on_response() / on_timer() ──► DomPort writes
//! ```
//!
//! **[`controller`]**: [`SearchController`], the event handlers.
//!
//! **[`port`]**: The [`DomPort`] trait backends implement over the page.
//!
//! **[`request`]**: URL construction, [`Command`]s, and the
//! latest-request-wins token scheme.
//!
//! **[`state`]**: [`UiState`], the controller's transient page state.
//!
//! **[`config`]**: [`ControllerConfig`] presets and `data-*` overrides.
//!
//! **[`markup`]**: Fixed markup and label text.
//!
//! **[`error`]**: [`FetchError`] and [`BindError`].
//!
//! # Logging
//!
//! Diagnostics go through the [`log`] facade. The backend decides where they
//! end up (the browser backend routes them to the console).

pub mod config;
pub mod controller;
pub mod error;
pub mod markup;
pub mod port;
pub mod request;
pub mod state;

pub use config::{AutocompleteFormat, ControllerConfig, ElementIds, SearchEndpoint};
pub use controller::SearchController;
pub use error::{BindError, FetchError};
pub use port::DomPort;
pub use request::{Command, FetchRequest, RequestKind, RequestToken, Timer};
pub use state::{RecommendationsPanel, Suggestions, UiState};
