// Copyright 2026 the Songsearch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controller configuration and page-level overrides.
//!
//! [`ControllerConfig`] has two presets. [`deployed`](ControllerConfig::deployed)
//! is the current page: `/recommendations`, GPU flag, searching placeholder,
//! structured autocomplete. [`legacy`](ControllerConfig::legacy) is the older
//! `/searchSong` page that only logs results. A page can adjust either preset
//! through `data-*` attributes, see [`ControllerConfig::with_overrides`].

use core::time::Duration;

use log::warn;

/// How the `/autocomplete` response body is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AutocompleteFormat {
    /// A JSON array of strings, rendered by the backend one item per entry.
    Json,
    /// Server-rendered markup, injected verbatim.
    Html,
}

/// Which endpoint a submitted query goes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchEndpoint {
    /// `GET /recommendations`; the HTML body replaces the recommendations panel.
    Recommendations,
    /// `GET /searchSong`; the JSON body is logged and the page is not touched.
    SearchSong,
}

impl SearchEndpoint {
    /// The request path for this endpoint.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Recommendations => "/recommendations",
            Self::SearchSong => "/searchSong",
        }
    }
}

/// Element ids the controller binds to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElementIds {
    /// The search text box.
    pub search_input: &'static str,
    /// The autocomplete suggestions panel.
    pub suggestions: &'static str,
    /// The recommendations panel.
    pub recommendations: &'static str,
    /// The GPU checkbox. Its label is found through `label[for=...]`.
    pub gpu_toggle: &'static str,
}

impl ElementIds {
    /// The ids used by the shipped page template.
    pub const DEFAULT: Self = Self {
        search_input: "searchInput",
        suggestions: "suggestionsContainer",
        recommendations: "recommendations",
        gpu_toggle: "gpuToggle",
    };
}

impl Default for ElementIds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Configuration for the [`SearchController`](crate::SearchController).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControllerConfig {
    /// Added to the search box width to size the suggestions panel, in px.
    pub suggestions_margin_px: f64,
    /// How long after focus loss the suggestions are cleared. Must outlast a
    /// suggestion click, which fires focus-out before its own handler.
    pub focus_out_delay: Duration,
    /// Length of the recommendations fade-out transition.
    pub fade_out_delay: Duration,
    /// Show "Finding your recommendations..." while a query is in flight.
    pub show_searching_placeholder: bool,
    /// Append `gpuEnabled=<bool>` to submitted queries.
    pub send_gpu_flag: bool,
    /// Shape of the autocomplete response.
    pub autocomplete_format: AutocompleteFormat,
    /// Where submitted queries are sent.
    pub search_endpoint: SearchEndpoint,
    /// DOM element ids.
    pub elements: ElementIds,
}

impl ControllerConfig {
    /// The current page.
    #[must_use]
    pub const fn deployed() -> Self {
        Self {
            suggestions_margin_px: 48.0,
            focus_out_delay: Duration::from_millis(200),
            fade_out_delay: Duration::from_millis(300),
            show_searching_placeholder: true,
            send_gpu_flag: true,
            autocomplete_format: AutocompleteFormat::Json,
            search_endpoint: SearchEndpoint::Recommendations,
            elements: ElementIds::DEFAULT,
        }
    }

    /// The earlier page that sent queries to `/searchSong`.
    #[must_use]
    pub const fn legacy() -> Self {
        Self {
            suggestions_margin_px: 48.0,
            focus_out_delay: Duration::from_millis(100),
            fade_out_delay: Duration::from_millis(300),
            show_searching_placeholder: false,
            send_gpu_flag: false,
            autocomplete_format: AutocompleteFormat::Html,
            search_endpoint: SearchEndpoint::SearchSong,
            elements: ElementIds::DEFAULT,
        }
    }

    /// Applies `data-*` attribute overrides read through `lookup`.
    ///
    /// Recognized attributes:
    ///
    /// | attribute                    | values                          |
    /// |------------------------------|---------------------------------|
    /// | `data-autocomplete-format`   | `json`, `html`                  |
    /// | `data-search-endpoint`       | `recommendations`, `searchSong` |
    /// | `data-searching-placeholder` | `true`, `false`                 |
    /// | `data-gpu-flag`              | `true`, `false`                 |
    /// | `data-focus-out-delay-ms`    | integer milliseconds            |
    /// | `data-fade-out-delay-ms`     | integer milliseconds            |
    ///
    /// Malformed values are logged and ignored.
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup("data-autocomplete-format") {
            match v.trim() {
                "json" => self.autocomplete_format = AutocompleteFormat::Json,
                "html" => self.autocomplete_format = AutocompleteFormat::Html,
                other => warn!("ignoring data-autocomplete-format={other:?}"),
            }
        }
        if let Some(v) = lookup("data-search-endpoint") {
            match v.trim() {
                "recommendations" => self.search_endpoint = SearchEndpoint::Recommendations,
                "searchSong" => self.search_endpoint = SearchEndpoint::SearchSong,
                other => warn!("ignoring data-search-endpoint={other:?}"),
            }
        }
        if let Some(flag) = parse_flag(&lookup, "data-searching-placeholder") {
            self.show_searching_placeholder = flag;
        }
        if let Some(flag) = parse_flag(&lookup, "data-gpu-flag") {
            self.send_gpu_flag = flag;
        }
        if let Some(delay) = parse_millis(&lookup, "data-focus-out-delay-ms") {
            self.focus_out_delay = delay;
        }
        if let Some(delay) = parse_millis(&lookup, "data-fade-out-delay-ms") {
            self.fade_out_delay = delay;
        }
        self
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::deployed()
    }
}

fn parse_flag(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<bool> {
    let raw = lookup(name)?;
    match raw.trim().parse() {
        Ok(flag) => Some(flag),
        Err(_) => {
            warn!("ignoring {name}={raw:?}: expected true or false");
            None
        }
    }
}

fn parse_millis(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<Duration> {
    let raw = lookup(name)?;
    match raw.trim().parse::<u64>() {
        Ok(ms) => Some(Duration::from_millis(ms)),
        Err(_) => {
            warn!("ignoring {name}={raw:?}: expected milliseconds");
            None
        }
    }
}
