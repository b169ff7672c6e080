// Copyright 2026 the Songsearch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types shared by the controller and its backends.

use thiserror::Error;

/// Why a single HTTP request produced no usable body.
///
/// Every variant is terminal for that request: the controller logs it and
/// leaves the page as it was. There is no retry.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced a response (offline, CORS, aborted).
    #[error("network error: {0}")]
    Network(String),
    /// The server answered with a non-2xx status.
    #[error("server returned HTTP {0}")]
    Status(u16),
    /// The body could not be read or did not have the expected shape.
    #[error("unreadable response body: {0}")]
    Body(String),
}

/// A violation of the page's DOM contract, detected once at startup.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BindError {
    /// There is no `window.document` to bind against.
    #[error("no document available")]
    NoDocument,
    /// A required element id is missing from the page.
    #[error("element not found: #{0}")]
    ElementNotFound(&'static str),
    /// An element exists but is not the kind of element the controller needs.
    #[error("element #{id} is not an {expected}")]
    WrongElementType {
        /// The offending element id.
        id: &'static str,
        /// The expected element interface, e.g. `HTMLInputElement`.
        expected: &'static str,
    },
}
