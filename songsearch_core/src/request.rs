// Copyright 2026 the Songsearch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outbound requests, timers, and the latest-request-wins token scheme.
//!
//! Every request belongs to a [`Channel`]. Starting a request, or clearing
//! what the channel displays, advances the channel's current [`RequestToken`].
//! A response is applied only while its token is still current, so a slow
//! response for an old prefix can never overwrite a newer one.

use core::time::Duration;

use crate::config::SearchEndpoint;
use crate::error::FetchError;

/// Identifies one request (or one clear) on a [`Channel`].
///
/// Tokens are monotonic per channel and never reused within a page load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(pub u64);

/// What a request is for, which decides how its body is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// `GET /autocomplete`.
    Autocomplete,
    /// `GET /recommendations` or `GET /searchSong`.
    Search(SearchEndpoint),
}

/// A GET request the backend should issue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    /// Token to hand back with the response.
    pub token: RequestToken,
    /// What the response will be used for.
    pub kind: RequestKind,
    /// Path and percent-encoded query string, relative to the page origin.
    pub url: String,
}

/// Timers the controller arms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Timer {
    /// Clear suggestions unless the search box has regained focus.
    FocusOutClear,
    /// End the fade-out and restore the empty state, unless a query was
    /// submitted after the clear that armed it.
    ResetRecommendations(RequestToken),
}

/// Work the controller asks its backend to perform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Issue an HTTP GET.
    Fetch(FetchRequest),
    /// Call [`on_timer`](crate::SearchController::on_timer) after `delay`.
    Schedule {
        /// Which timer fires.
        timer: Timer,
        /// How long to wait.
        delay: Duration,
    },
}

/// A request channel with a monotonic current token.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Channel {
    current: u64,
}

impl Channel {
    /// Invalidates everything in flight and returns the new current token.
    pub fn advance(&mut self) -> RequestToken {
        self.current += 1;
        RequestToken(self.current)
    }

    /// The token a response must carry to be applied.
    #[must_use]
    pub fn current(&self) -> RequestToken {
        RequestToken(self.current)
    }

    /// Returns `true` if `token` is still the latest on this channel.
    #[must_use]
    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.current
    }
}

/// `GET /autocomplete?prefix=<prefix>`.
#[must_use]
pub fn autocomplete_url(prefix: &str) -> String {
    format!("/autocomplete?prefix={}", urlencoding::encode(prefix))
}

/// Builds the search URL for `endpoint`.
///
/// `gpu_enabled` is appended only when `Some`, and only for
/// [`SearchEndpoint::Recommendations`]; `/searchSong` never took it.
#[must_use]
pub fn search_url(
    endpoint: SearchEndpoint,
    query: &str,
    from_autocomplete: bool,
    gpu_enabled: Option<bool>,
) -> String {
    let mut url = format!(
        "{}?query={}&fromAutocomplete={from_autocomplete}",
        endpoint.path(),
        urlencoding::encode(query),
    );
    if let (SearchEndpoint::Recommendations, Some(gpu)) = (endpoint, gpu_enabled) {
        url.push_str(&format!("&gpuEnabled={gpu}"));
    }
    url
}

/// Parses an autocomplete body in the [`Json`] format: an array of strings.
///
/// [`Json`]: crate::config::AutocompleteFormat::Json
pub fn parse_suggestions(body: &str) -> Result<Vec<String>, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Body(e.to_string()))
}

/// Parses a `/searchSong` body. Its shape is not interpreted, only logged.
pub fn parse_search_song(body: &str) -> Result<serde_json::Value, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Body(e.to_string()))
}
