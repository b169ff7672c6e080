// Copyright 2026 the Songsearch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The search page controller.
//!
//! [`SearchController`] turns page events into DOM writes and [`Command`]s.
//! It performs no I/O itself: the backend drains commands after every call,
//! performs them, and feeds the outcome back through
//! [`on_response`](SearchController::on_response) and
//! [`on_timer`](SearchController::on_timer).

use log::{debug, error, info};

use crate::config::{AutocompleteFormat, ControllerConfig, SearchEndpoint};
use crate::error::FetchError;
use crate::markup::{EMPTY_STATE_HTML, SEARCHING_HTML, gpu_label};
use crate::port::DomPort;
use crate::request::{
    Command, FetchRequest, RequestKind, RequestToken, Timer, autocomplete_url, parse_search_song,
    parse_suggestions, search_url,
};
use crate::state::{RecommendationsPanel, Suggestions, UiState};

/// Event-driven controller for the search page.
///
/// Each request cycle goes idle → awaiting response → rendered. Overlapping
/// cycles are resolved latest-wins per channel (see [`crate::request`]).
#[derive(Debug)]
pub struct SearchController<D> {
    dom: D,
    config: ControllerConfig,
    state: UiState,
    commands: Vec<Command>,
}

impl<D: DomPort> SearchController<D> {
    /// Creates a controller over `dom`.
    ///
    /// The GPU label is synchronized with the toggle immediately, since the
    /// browser may have restored the checkbox from a previous visit.
    pub fn new(mut dom: D, config: ControllerConfig) -> Self {
        let gpu_enabled = dom.gpu_checked();
        dom.set_gpu_label(gpu_label(gpu_enabled));
        Self {
            dom,
            config,
            state: UiState {
                gpu_enabled,
                ..UiState::default()
            },
            commands: Vec::new(),
        }
    }

    /// Returns the DOM port.
    #[must_use]
    pub fn dom(&self) -> &D {
        &self.dom
    }

    /// Returns the DOM port mutably.
    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    /// Returns the controller's UI state.
    #[must_use]
    pub fn state(&self) -> &UiState {
        &self.state
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Removes and returns all commands queued since the last call.
    pub fn take_commands(&mut self) -> Vec<Command> {
        core::mem::take(&mut self.commands)
    }

    /// Sizes the suggestions panel to the search box plus the fixed margin.
    ///
    /// Call on page load and on every viewport resize.
    pub fn adjust_suggestions_width(&mut self) {
        let width = self.dom.search_box_width() + self.config.suggestions_margin_px;
        self.dom.set_suggestions_width(width);
    }

    /// Handles Enter in the search box. The caller suppresses the default
    /// form submission.
    pub fn on_enter_key(&mut self, input_value: &str) {
        if input_value.trim().is_empty() {
            return;
        }
        self.submit_query(input_value, false);
    }

    /// Handles the search box losing focus.
    ///
    /// Clearing is deferred: a click on a suggestion blurs the box before its
    /// own handler runs, and must get to read the panel first.
    pub fn on_focus_out(&mut self) {
        self.commands.push(Command::Schedule {
            timer: Timer::FocusOutClear,
            delay: self.config.focus_out_delay,
        });
    }

    /// Handles a change of the GPU toggle.
    pub fn on_gpu_toggle_change(&mut self, checked: bool) {
        self.state.gpu_enabled = checked;
        self.dom.set_gpu_label(gpu_label(checked));
    }

    /// Handles an edit of the search box by fetching suggestions for its
    /// current text.
    pub fn on_input(&mut self) {
        let prefix = self.dom.input_value();
        self.fetch_suggestions(&prefix);
    }

    /// Submits `song_query` to the configured search endpoint.
    ///
    /// Does nothing for an empty or whitespace-only query. The query itself is
    /// sent untrimmed.
    pub fn submit_query(&mut self, song_query: &str, from_autocomplete: bool) {
        if song_query.trim().is_empty() {
            debug!("ignoring empty query");
            return;
        }

        let endpoint = self.config.search_endpoint;
        let gpu_enabled = self.dom.gpu_checked();
        self.state.gpu_enabled = gpu_enabled;
        let url = search_url(
            endpoint,
            song_query,
            from_autocomplete,
            self.config.send_gpu_flag.then_some(gpu_enabled),
        );
        info!("searching for {song_query:?} (fromAutocomplete={from_autocomplete})");

        let token = match endpoint {
            SearchEndpoint::Recommendations => {
                let token = self.state.search.advance();
                if self.state.recommendations == RecommendationsPanel::FadingOut {
                    // The pending reset is now stale; end the transition here.
                    self.dom.set_recommendations_fading(false);
                    self.state.recommendations = RecommendationsPanel::Rendered;
                }
                if self.config.show_searching_placeholder {
                    self.dom.set_recommendations_html(SEARCHING_HTML);
                    self.state.recommendations = RecommendationsPanel::Searching;
                }
                token
            }
            // Results are only logged, so there is nothing to supersede.
            SearchEndpoint::SearchSong => self.state.search.current(),
        };

        self.fetch(token, RequestKind::Search(endpoint), url);
    }

    /// Requests suggestions for `prefix`, or clears them if it is empty.
    pub fn fetch_suggestions(&mut self, prefix: &str) {
        if prefix.is_empty() {
            self.clear_suggestions();
            return;
        }
        let token = self.state.autocomplete.advance();
        self.fetch(token, RequestKind::Autocomplete, autocomplete_url(prefix));
    }

    /// Puts `text` in the search box and submits it as an autocomplete pick.
    pub fn select_suggestion(&mut self, text: &str) {
        self.dom.set_input_value(text);
        self.clear_suggestions();
        self.submit_query(text, true);
    }

    /// Empties the suggestions panel and drops any autocomplete response
    /// still in flight.
    pub fn clear_suggestions(&mut self) {
        self.state.autocomplete.advance();
        self.state.suggestions = Suggestions::Empty;
        self.dom.set_suggestions_html("");
    }

    /// Fades the recommendations panel out, then restores its empty state.
    ///
    /// The search box is emptied immediately. Responses to queries submitted
    /// before the clear are discarded.
    pub fn clear_recommendations(&mut self) {
        let token = self.state.search.advance();
        self.dom.set_recommendations_fading(true);
        self.state.recommendations = RecommendationsPanel::FadingOut;
        self.dom.set_input_value("");
        self.commands.push(Command::Schedule {
            timer: Timer::ResetRecommendations(token),
            delay: self.config.fade_out_delay,
        });
    }

    /// Handles a timer armed by an earlier [`Command::Schedule`].
    pub fn on_timer(&mut self, timer: Timer) {
        match timer {
            Timer::FocusOutClear => {
                if self.dom.input_has_focus() {
                    debug!("search box refocused; keeping suggestions");
                    return;
                }
                self.clear_suggestions();
            }
            Timer::ResetRecommendations(token) => {
                if !self.state.search.is_current(token) {
                    debug!("query submitted during fade-out; skipping reset");
                    return;
                }
                self.dom.set_recommendations_html(EMPTY_STATE_HTML);
                self.dom.set_recommendations_fading(false);
                self.state.recommendations = RecommendationsPanel::EmptyState;
            }
        }
    }

    /// Handles the outcome of a request issued by [`Command::Fetch`].
    ///
    /// Failures are logged and leave the page untouched.
    pub fn on_response(
        &mut self,
        kind: RequestKind,
        token: RequestToken,
        result: Result<String, FetchError>,
    ) {
        match kind {
            RequestKind::Autocomplete => self.apply_suggestions(token, result),
            RequestKind::Search(SearchEndpoint::Recommendations) => {
                if !self.state.search.is_current(token) {
                    debug!("discarding superseded recommendations response {token:?}");
                    return;
                }
                match result {
                    Ok(html) => {
                        self.dom.set_recommendations_html(&html);
                        self.state.recommendations = RecommendationsPanel::Rendered;
                    }
                    Err(e) => error!("Error searching song: {e}"),
                }
            }
            RequestKind::Search(SearchEndpoint::SearchSong) => {
                match result.and_then(|body| parse_search_song(&body)) {
                    Ok(value) => info!("search results: {value}"),
                    Err(e) => error!("Error searching song: {e}"),
                }
            }
        }
    }

    fn apply_suggestions(&mut self, token: RequestToken, result: Result<String, FetchError>) {
        if !self.state.autocomplete.is_current(token) {
            debug!("discarding stale autocomplete response {token:?}");
            return;
        }
        let body = match result {
            Ok(body) => body,
            Err(e) => {
                error!("Error fetching autocomplete suggestions: {e}");
                return;
            }
        };
        match self.config.autocomplete_format {
            AutocompleteFormat::Json => match parse_suggestions(&body) {
                Ok(items) => {
                    self.dom.set_suggestion_items(&items);
                    self.state.suggestions = if items.is_empty() {
                        Suggestions::Empty
                    } else {
                        Suggestions::Items(items)
                    };
                }
                Err(e) => error!("Error fetching autocomplete suggestions: {e}"),
            },
            AutocompleteFormat::Html => {
                self.dom.set_suggestions_html(&body);
                self.state.suggestions = Suggestions::Markup(body);
            }
        }
    }

    fn fetch(&mut self, token: RequestToken, kind: RequestKind, url: String) {
        debug!("GET {url}");
        self.state.requests_issued += 1;
        self.commands.push(Command::Fetch(FetchRequest { token, kind, url }));
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use super::*;
    use crate::markup::FADE_OUT_CLASS;

    #[derive(Debug, Default)]
    struct FakeDom {
        box_width: f64,
        suggestions_width: Option<f64>,
        value: String,
        focused: bool,
        gpu: bool,
        gpu_label: String,
        suggestions_html: String,
        suggestion_items: Vec<String>,
        recommendations_html: String,
        classes: Vec<&'static str>,
    }

    impl DomPort for FakeDom {
        fn search_box_width(&self) -> f64 {
            self.box_width
        }
        fn set_suggestions_width(&mut self, px: f64) {
            self.suggestions_width = Some(px);
        }
        fn input_value(&self) -> String {
            self.value.clone()
        }
        fn set_input_value(&mut self, value: &str) {
            self.value = value.to_owned();
        }
        fn input_has_focus(&self) -> bool {
            self.focused
        }
        fn gpu_checked(&self) -> bool {
            self.gpu
        }
        fn set_gpu_label(&mut self, text: &str) {
            self.gpu_label = text.to_owned();
        }
        fn set_suggestions_html(&mut self, html: &str) {
            self.suggestions_html = html.to_owned();
            self.suggestion_items.clear();
        }
        fn set_suggestion_items(&mut self, items: &[String]) {
            self.suggestions_html.clear();
            self.suggestion_items = items.to_vec();
        }
        fn set_recommendations_html(&mut self, html: &str) {
            self.recommendations_html = html.to_owned();
        }
        fn set_recommendations_fading(&mut self, fading: bool) {
            self.classes.retain(|c| *c != FADE_OUT_CLASS);
            if fading {
                self.classes.push(FADE_OUT_CLASS);
            }
        }
    }

    fn controller() -> SearchController<FakeDom> {
        SearchController::new(FakeDom::default(), ControllerConfig::deployed())
    }

    fn only_fetch(commands: Vec<Command>) -> FetchRequest {
        match commands.as_slice() {
            [Command::Fetch(req)] => req.clone(),
            other => panic!("expected exactly one fetch, got {other:?}"),
        }
    }

    fn only_timer(commands: Vec<Command>) -> (Timer, Duration) {
        match commands.as_slice() {
            [Command::Schedule { timer, delay }] => (*timer, *delay),
            other => panic!("expected exactly one timer, got {other:?}"),
        }
    }

    #[test]
    fn suggestions_width_tracks_search_box() {
        let mut c = controller();
        c.dom_mut().box_width = 312.0;
        c.adjust_suggestions_width();
        assert_eq!(c.dom().suggestions_width, Some(360.0));

        c.dom_mut().box_width = 200.5;
        c.adjust_suggestions_width();
        assert_eq!(c.dom().suggestions_width, Some(248.5));
    }

    #[test]
    fn enter_submits_recommendations_request() {
        let mut c = controller();
        c.on_enter_key("Forever Young by BLACKPINK");

        let req = only_fetch(c.take_commands());
        assert_eq!(
            req.url,
            "/recommendations?query=Forever%20Young%20by%20BLACKPINK&fromAutocomplete=false&gpuEnabled=false"
        );
        assert_eq!(req.kind, RequestKind::Search(SearchEndpoint::Recommendations));
        assert_eq!(c.dom().recommendations_html, SEARCHING_HTML);
        assert_eq!(c.state().recommendations, RecommendationsPanel::Searching);

        c.on_response(req.kind, req.token, Ok("<ol><li>Kill This Love</li></ol>".into()));
        assert_eq!(c.dom().recommendations_html, "<ol><li>Kill This Love</li></ol>");
        assert_eq!(c.state().recommendations, RecommendationsPanel::Rendered);
    }

    #[test]
    fn blank_queries_issue_nothing() {
        let mut c = controller();
        for blank in ["", " ", "\t\n", "   "] {
            c.on_enter_key(blank);
            c.submit_query(blank, true);
        }
        assert!(c.take_commands().is_empty(), "no request for blank input");
        assert_eq!(c.state().requests_issued, 0);
        assert_eq!(c.dom().recommendations_html, "", "panel untouched");
    }

    #[test]
    fn gpu_toggle_updates_label_and_next_query() {
        let mut c = controller();
        assert_eq!(c.dom().gpu_label, "GPU Disabled");

        c.dom_mut().gpu = true;
        c.on_gpu_toggle_change(true);
        assert_eq!(c.dom().gpu_label, "GPU Enabled");
        assert!(c.state().gpu_enabled, "state mirrors toggle");

        c.submit_query("Hype Boy", false);
        let req = only_fetch(c.take_commands());
        assert!(req.url.ends_with("&gpuEnabled=true"), "{}", req.url);

        c.dom_mut().gpu = false;
        c.on_gpu_toggle_change(false);
        assert_eq!(c.dom().gpu_label, "GPU Disabled");
        assert!(c.take_commands().is_empty(), "toggling issues no request");
    }

    #[test]
    fn label_follows_restored_toggle_on_startup() {
        let dom = FakeDom {
            gpu: true,
            ..FakeDom::default()
        };
        let c = SearchController::new(dom, ControllerConfig::deployed());
        assert_eq!(c.dom().gpu_label, "GPU Enabled");
        assert!(c.state().gpu_enabled, "state seeded from toggle");
    }

    #[test]
    fn selecting_a_suggestion_fills_box_and_submits() {
        let mut c = controller();
        c.dom_mut().value = "forev".into();
        c.on_input();
        let ac = only_fetch(c.take_commands());
        c.on_response(ac.kind, ac.token, Ok(r#"["Forever Young by BLACKPINK"]"#.into()));
        assert_eq!(c.dom().suggestion_items, ["Forever Young by BLACKPINK"]);

        c.select_suggestion("Forever Young by BLACKPINK");

        assert_eq!(c.dom().value, "Forever Young by BLACKPINK");
        assert!(c.dom().suggestion_items.is_empty(), "suggestions cleared");
        assert!(c.state().suggestions.is_empty(), "state cleared");
        let req = only_fetch(c.take_commands());
        assert!(req.url.contains("&fromAutocomplete=true"), "{}", req.url);
        assert!(
            req.url.starts_with("/recommendations?query=Forever%20Young%20by%20BLACKPINK&"),
            "{}",
            req.url
        );
    }

    #[test]
    fn focus_out_clears_suggestions_after_delay() {
        let mut c = controller();
        c.dom_mut().value = "hey".into();
        c.on_input();
        let ac = only_fetch(c.take_commands());
        c.on_response(ac.kind, ac.token, Ok(r#"["Hey Jude by The Beatles"]"#.into()));

        c.on_focus_out();
        let (timer, delay) = only_timer(c.take_commands());
        assert_eq!(timer, Timer::FocusOutClear);
        assert_eq!(delay, Duration::from_millis(200));
        assert_eq!(c.dom().suggestion_items.len(), 1, "not cleared before delay");

        c.on_timer(timer);
        assert!(c.dom().suggestion_items.is_empty(), "cleared after delay");
        assert_eq!(c.state().suggestions, Suggestions::Empty);
    }

    #[test]
    fn refocus_within_delay_keeps_suggestions() {
        let mut c = controller();
        c.dom_mut().value = "hey".into();
        c.on_input();
        let ac = only_fetch(c.take_commands());
        c.on_response(ac.kind, ac.token, Ok(r#"["Hey Jude by The Beatles"]"#.into()));

        c.on_focus_out();
        let (timer, _) = only_timer(c.take_commands());
        c.dom_mut().focused = true;
        c.on_timer(timer);

        assert_eq!(c.dom().suggestion_items, ["Hey Jude by The Beatles"]);
    }

    #[test]
    fn clear_recommendations_fades_then_resets() {
        let mut c = controller();
        c.dom_mut().value = "Ditto".into();
        c.dom_mut().recommendations_html = "<ol>results</ol>".into();

        c.clear_recommendations();
        assert_eq!(c.dom().value, "", "search box emptied immediately");
        assert_eq!(c.dom().classes, [FADE_OUT_CLASS]);
        assert_eq!(c.dom().recommendations_html, "<ol>results</ol>", "content kept during fade");

        let (timer, delay) = only_timer(c.take_commands());
        assert_eq!(delay, Duration::from_millis(300));
        c.on_timer(timer);
        assert_eq!(c.dom().recommendations_html, EMPTY_STATE_HTML);
        assert!(c.dom().classes.is_empty(), "fade class removed");
        assert_eq!(c.state().recommendations, RecommendationsPanel::EmptyState);
    }

    #[test]
    fn clearing_twice_is_idempotent() {
        let mut c = controller();
        c.clear_recommendations();
        c.clear_recommendations();
        for command in c.take_commands() {
            match command {
                Command::Schedule { timer, .. } => c.on_timer(timer),
                Command::Fetch(req) => panic!("unexpected fetch {req:?}"),
            }
        }
        assert_eq!(c.dom().value, "");
        assert_eq!(c.dom().recommendations_html, EMPTY_STATE_HTML);
        assert!(c.dom().classes.is_empty(), "fade class removed");
    }

    #[test]
    fn stale_autocomplete_responses_are_discarded() {
        let mut c = controller();
        c.fetch_suggestions("f");
        let first = only_fetch(c.take_commands());
        c.fetch_suggestions("fo");
        let second = only_fetch(c.take_commands());
        assert_eq!(second.url, "/autocomplete?prefix=fo");

        // Responses arrive out of order.
        c.on_response(second.kind, second.token, Ok(r#"["Forever"]"#.into()));
        c.on_response(first.kind, first.token, Ok(r#"["Fame", "Forever"]"#.into()));

        assert_eq!(c.dom().suggestion_items, ["Forever"]);
        assert_eq!(c.state().suggestions, Suggestions::Items(vec!["Forever".into()]));
    }

    #[test]
    fn emptied_box_clears_and_drops_in_flight_suggestions() {
        let mut c = controller();
        c.fetch_suggestions("f");
        let pending = only_fetch(c.take_commands());

        c.fetch_suggestions("");
        assert!(c.take_commands().is_empty(), "no request for empty prefix");
        c.on_response(pending.kind, pending.token, Ok(r#"["Fame"]"#.into()));

        assert!(c.dom().suggestion_items.is_empty(), "late response ignored");
        assert!(c.state().suggestions.is_empty(), "state stays empty");
    }

    #[test]
    fn failures_leave_panels_untouched() {
        let mut c = controller();
        c.fetch_suggestions("hy");
        let ac = only_fetch(c.take_commands());
        c.on_response(ac.kind, ac.token, Ok(r#"["Hype Boy"]"#.into()));

        c.fetch_suggestions("hyp");
        let ac = only_fetch(c.take_commands());
        c.on_response(ac.kind, ac.token, Err(FetchError::Status(500)));
        assert_eq!(c.dom().suggestion_items, ["Hype Boy"]);

        c.fetch_suggestions("hype");
        let ac = only_fetch(c.take_commands());
        c.on_response(ac.kind, ac.token, Ok("<html>oops</html>".into()));
        assert_eq!(c.dom().suggestion_items, ["Hype Boy"], "bad JSON ignored");

        c.submit_query("Hype Boy", true);
        let req = only_fetch(c.take_commands());
        c.on_response(req.kind, req.token, Err(FetchError::Network("offline".into())));
        assert_eq!(c.dom().recommendations_html, SEARCHING_HTML);
    }

    #[test]
    fn responses_after_clear_are_discarded() {
        let mut c = controller();
        c.submit_query("Attention", false);
        let req = only_fetch(c.take_commands());

        c.clear_recommendations();
        let (timer, _) = only_timer(c.take_commands());
        c.on_timer(timer);
        c.on_response(req.kind, req.token, Ok("<ol>late</ol>".into()));

        assert_eq!(c.dom().recommendations_html, EMPTY_STATE_HTML);
    }

    #[test]
    fn query_during_fade_cancels_reset() {
        let mut c = controller();
        c.clear_recommendations();
        let (timer, _) = only_timer(c.take_commands());

        c.submit_query("OMG", false);
        let req = only_fetch(c.take_commands());
        assert!(c.dom().classes.is_empty(), "fade ended by new query");

        c.on_timer(timer);
        assert_eq!(c.dom().recommendations_html, SEARCHING_HTML, "reset skipped");

        c.on_response(req.kind, req.token, Ok("<ol>OMG</ol>".into()));
        assert_eq!(c.dom().recommendations_html, "<ol>OMG</ol>");
    }

    #[test]
    fn legacy_page_logs_search_results_only() {
        let mut c = SearchController::new(FakeDom::default(), ControllerConfig::legacy());
        c.dom_mut().recommendations_html = "<p>before</p>".into();

        c.on_enter_key("Hey Jude");
        let req = only_fetch(c.take_commands());
        assert_eq!(req.url, "/searchSong?query=Hey%20Jude&fromAutocomplete=false");
        assert_eq!(c.dom().recommendations_html, "<p>before</p>", "no placeholder");

        c.on_response(req.kind, req.token, Ok(r#"{"songs": []}"#.into()));
        assert_eq!(c.dom().recommendations_html, "<p>before</p>", "body only logged");
    }

    #[test]
    fn html_autocomplete_is_injected_verbatim() {
        let config = ControllerConfig {
            autocomplete_format: AutocompleteFormat::Html,
            ..ControllerConfig::deployed()
        };
        let mut c = SearchController::new(FakeDom::default(), config);
        let markup = r#"<div class="suggestion-item" onclick="selectSuggestion('Ditto')">Ditto</div>"#;

        c.fetch_suggestions("dit");
        let ac = only_fetch(c.take_commands());
        c.on_response(ac.kind, ac.token, Ok(markup.into()));

        assert_eq!(c.dom().suggestions_html, markup);
        assert_eq!(c.state().suggestions, Suggestions::Markup(markup.into()));
    }

    #[test]
    fn placeholder_can_be_disabled() {
        let config = ControllerConfig {
            show_searching_placeholder: false,
            ..ControllerConfig::deployed()
        };
        let mut c = SearchController::new(FakeDom::default(), config);
        c.submit_query("Super Shy", false);
        let _ = only_fetch(c.take_commands());
        assert_eq!(c.dom().recommendations_html, "", "no placeholder written");
    }
}
