// Copyright 2026 the Songsearch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transient page state owned by the controller.
//!
//! Nothing here outlives a page load. The search box text is deliberately
//! absent: the user edits it directly, so the DOM stays its source of truth.

use crate::request::Channel;

/// What the suggestions panel currently shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Suggestions {
    /// Nothing.
    #[default]
    Empty,
    /// Client-rendered entries, in server order.
    Items(Vec<String>),
    /// Server-rendered markup.
    Markup(String),
}

impl Suggestions {
    /// Returns `true` if the panel shows nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Items(items) => items.is_empty(),
            Self::Markup(html) => html.is_empty(),
        }
    }
}

/// What the recommendations panel currently shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RecommendationsPanel {
    /// The icon-and-hint resting block (also the page's initial markup).
    #[default]
    EmptyState,
    /// The "Finding your recommendations..." placeholder.
    Searching,
    /// A server response.
    Rendered,
    /// Mid fade-out; resets to [`EmptyState`](Self::EmptyState) when the
    /// transition ends.
    FadingOut,
}

/// Controller-owned UI state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UiState {
    /// Mirrors the GPU toggle; updated on every change event.
    pub gpu_enabled: bool,
    /// Suggestions panel contents.
    pub suggestions: Suggestions,
    /// Recommendations panel contents.
    pub recommendations: RecommendationsPanel,
    /// Latest-request-wins channel for autocomplete.
    pub autocomplete: Channel,
    /// Latest-request-wins channel for submitted queries and clears.
    pub search: Channel,
    /// Number of requests issued this page load.
    pub requests_issued: u64,
}
