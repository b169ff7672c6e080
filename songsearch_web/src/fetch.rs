// Copyright 2026 the Songsearch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! HTTP GET through the browser `fetch` API.

use songsearch_core::FetchError;
use wasm_bindgen::{JsCast as _, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

/// Fetches `url` and returns the response body as text.
///
/// No headers, credentials, timeout, or retry. A non-2xx status is an error.
pub(crate) async fn get_text(url: &str) -> Result<String, FetchError> {
    let window = web_sys::window().ok_or_else(|| FetchError::Network("no window".into()))?;

    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| FetchError::Network(describe(&e)))?;
    let response: Response = response
        .dyn_into()
        .map_err(|e| FetchError::Body(describe(&e)))?;
    if !response.ok() {
        return Err(FetchError::Status(response.status()));
    }

    let text = response.text().map_err(|e| FetchError::Body(describe(&e)))?;
    JsFuture::from(text)
        .await
        .map_err(|e| FetchError::Body(describe(&e)))?
        .as_string()
        .ok_or_else(|| FetchError::Body("body is not text".into()))
}

/// Best-effort message for a thrown JS value.
fn describe(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
