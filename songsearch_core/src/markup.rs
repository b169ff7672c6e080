// Copyright 2026 the Songsearch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed markup and label text the controller writes into the page.

/// Shown in the recommendations panel while a query is in flight.
pub const SEARCHING_HTML: &str =
    r#"<div class="default-text-header">Finding your recommendations...</div>"#;

/// The recommendations panel's resting content: a music-note icon, a header
/// and a hint.
pub const EMPTY_STATE_HTML: &str = r#"
<svg class="mb-3" xmlns="http://www.w3.org/2000/svg" height="72" viewBox="0 -960 960 960" width="72" fill="white">
    <path d="M400-120q-66 0-113-47t-47-113q0-66 47-113t113-47q23 0 42.5 5.5T480-418v-422h240v160H560v400q0 66-47 113t-113 47Z"/>
</svg>
<div class="default-text-header">Similar songs will appear here for you</div>
<div class="default-text-footer">Get started by searching for a song you like.</div>
"#;

/// CSS class toggled on the recommendations panel during the clear transition.
pub const FADE_OUT_CLASS: &str = "fade-out";

/// CSS class of a client-rendered suggestion entry.
pub const SUGGESTION_ITEM_CLASS: &str = "suggestion-item";

/// Attribute on a client-rendered suggestion entry holding its full text.
pub const SUGGESTION_DATA_ATTR: &str = "data-suggestion";

/// Label text for the GPU toggle in the given state.
#[must_use]
pub const fn gpu_label(enabled: bool) -> &'static str {
    if enabled { "GPU Enabled" } else { "GPU Disabled" }
}
