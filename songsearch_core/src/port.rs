// Copyright 2026 the Songsearch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for page integrations.
//!
//! The controller never touches a document directly. A backend provides:
//!
//! - **DOM access**: implements [`DomPort`] over the page's elements (or an
//!   in-memory stand-in for tests).
//! - **Requests and timers**: drains [`Command`]s from the controller with
//!   [`take_commands`], performs them, and reports back through
//!   [`on_response`] and [`on_timer`]. This is platform-specific (the browser
//!   uses `fetch` and `setTimeout`) and is not abstracted by a trait.
//!
//! [`Command`]: crate::request::Command
//! [`take_commands`]: crate::SearchController::take_commands
//! [`on_response`]: crate::SearchController::on_response
//! [`on_timer`]: crate::SearchController::on_timer

/// Reads and writes the handful of page elements the controller owns.
///
/// Implementations are expected to be thin: no logic beyond translating each
/// call into the corresponding DOM read or write.
pub trait DomPort {
    /// Rendered width of the search box, in CSS pixels.
    fn search_box_width(&self) -> f64;

    /// Sets the suggestions panel width, in CSS pixels.
    fn set_suggestions_width(&mut self, px: f64);

    /// Current text in the search box.
    fn input_value(&self) -> String;

    /// Replaces the text in the search box.
    fn set_input_value(&mut self, value: &str);

    /// Whether the search box currently has keyboard focus.
    fn input_has_focus(&self) -> bool;

    /// Whether the GPU toggle is checked.
    fn gpu_checked(&self) -> bool;

    /// Sets the text of the GPU toggle's label.
    fn set_gpu_label(&mut self, text: &str);

    /// Replaces the suggestions panel with server-rendered markup.
    fn set_suggestions_html(&mut self, html: &str);

    /// Replaces the suggestions panel with one selectable entry per item.
    ///
    /// An empty slice clears the panel.
    fn set_suggestion_items(&mut self, items: &[String]);

    /// Replaces the recommendations panel with `html`.
    fn set_recommendations_html(&mut self, html: &str);

    /// Starts (`true`) or ends (`false`) the recommendations fade-out
    /// transition.
    fn set_recommendations_fading(&mut self, fading: bool);
}
