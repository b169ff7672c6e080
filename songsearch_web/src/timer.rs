// Copyright 2026 the Songsearch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot `setTimeout` timers.

use core::time::Duration;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

// Global binding instead of `web_sys::Window::set_timeout_*`, so arming a
// timer does not need to fetch and unwrap the Window first.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "setTimeout")]
    fn set_timeout(callback: &JsValue, millis: i32) -> i32;
}

/// Runs `f` once after `delay`.
///
/// Timers are never cancelled; callers decide on firing whether the work is
/// still wanted.
pub(crate) fn after(delay: Duration, f: impl FnOnce() + 'static) {
    let callback = Closure::once_into_js(f);
    let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
    set_timeout(&callback, millis);
}
