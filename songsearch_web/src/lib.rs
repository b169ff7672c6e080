// Copyright 2026 the Songsearch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser backend for songsearch.
//!
//! This crate binds [`SearchController`] to a live page:
//!
//! - [`WebDom`]: [`DomPort`] over the page's elements
//! - `fetch`: performs [`Command::Fetch`] with the browser `fetch` API
//! - `setTimeout`: performs [`Command::Schedule`]
//! - event listeners for `load`, `resize`, `keydown`, `input`, `focusout`,
//!   `change`, and suggestion clicks
//!
//! [`start`] runs when the module is instantiated. It installs the console
//! logger and panic hook, then mounts on the page once the document has been
//! parsed. `selectSuggestion` and `clearRecommendations` are exported for
//! inline handlers in server-rendered markup.
//!
//! Build with: `wasm-pack build --target web songsearch_web`

#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

mod dom;
mod fetch;
mod timer;

pub use dom::WebDom;
pub use songsearch_core::DomPort;

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, error, info, warn};
use songsearch_core::markup::SUGGESTION_DATA_ATTR;
use songsearch_core::{BindError, Command, ControllerConfig, SearchController};
use thiserror::Error;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, KeyboardEvent};

type App = Rc<RefCell<SearchController<WebDom>>>;

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

/// Why the page could not be wired up.
#[derive(Debug, Error)]
pub enum MountError {
    /// The DOM contract is not met.
    #[error(transparent)]
    Bind(#[from] BindError),
    /// Registering an event listener threw.
    #[error("could not register {event} listener: {message}")]
    Listener {
        /// The event name.
        event: &'static str,
        /// What the browser reported.
        message: String,
    },
}

/// Module entry point.
///
/// A page that does not meet the DOM contract is left inert; the reason is
/// logged once.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn start() {
    console_error_panic_hook::set_once();
    // The embedding page may already have installed a logger.
    let _ = console_log::init_with_level(log::Level::Debug);

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        error!("{}", BindError::NoDocument);
        return;
    };

    if document.ready_state() == "loading" {
        let doc = document.clone();
        let on_ready = Closure::once_into_js(move || mount_or_log(&doc));
        if let Err(e) =
            document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
        {
            error!("could not wait for DOMContentLoaded: {e:?}");
        }
    } else {
        mount_or_log(&document);
    }
}

fn mount_or_log(document: &Document) {
    match mount(document, ControllerConfig::deployed()) {
        Ok(_) => info!("search page ready"),
        Err(e) => error!("search page not wired: {e}"),
    }
}

/// Binds a controller to `document` and registers its event listeners.
///
/// `config` may be adjusted by `data-*` attributes on the recommendations
/// panel; see [`ControllerConfig::with_overrides`]. The mounted controller
/// becomes the target of the `selectSuggestion` and `clearRecommendations`
/// exports, replacing any earlier one.
pub fn mount(document: &Document, config: ControllerConfig) -> Result<App, MountError> {
    let dom = WebDom::bind(document, &config.elements)?;
    let config = config.with_overrides(|name| dom.recommendations().get_attribute(name));
    debug!("mounting with {config:?}");

    let app: App = Rc::new(RefCell::new(SearchController::new(dom, config)));
    bind_events(&app)?;
    handle(&app, SearchController::adjust_suggestions_width);
    APP.with(|slot| *slot.borrow_mut() = Some(Rc::clone(&app)));
    Ok(app)
}

fn bind_events(app: &App) -> Result<(), MountError> {
    let (search_input, suggestions, gpu_toggle) = {
        let c = app.borrow();
        (
            c.dom().search_input().clone(),
            c.dom().suggestions().clone(),
            c.dom().gpu_toggle().clone(),
        )
    };
    let window = web_sys::window().ok_or(BindError::NoDocument)?;

    // Layout settles on `load`; `resize` covers everything after.
    for event in ["load", "resize"] {
        let a = Rc::clone(app);
        listen(&window, event, move |_: Event| {
            handle(&a, SearchController::adjust_suggestions_width);
        })?;
    }

    let a = Rc::clone(app);
    listen(&search_input, "keydown", move |event: KeyboardEvent| {
        if event.key() != "Enter" {
            return;
        }
        event.prevent_default();
        handle(&a, |c| {
            let value = c.dom().input_value();
            c.on_enter_key(&value);
        });
    })?;

    let a = Rc::clone(app);
    listen(&search_input, "input", move |_: Event| {
        handle(&a, SearchController::on_input);
    })?;

    let a = Rc::clone(app);
    listen(&search_input, "focusout", move |_: Event| {
        handle(&a, SearchController::on_focus_out);
    })?;

    let a = Rc::clone(app);
    let toggle = gpu_toggle.clone();
    listen(&gpu_toggle, "change", move |_: Event| {
        let checked = toggle.checked();
        handle(&a, |c| c.on_gpu_toggle_change(checked));
    })?;

    // Client-rendered entries carry their text in a data attribute; markup
    // from the server wires its own handlers through `selectSuggestion`.
    let a = Rc::clone(app);
    listen(&suggestions, "click", move |event: Event| {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        let Ok(Some(entry)) = target.closest(&format!("[{SUGGESTION_DATA_ATTR}]")) else {
            return;
        };
        if let Some(text) = entry.get_attribute(SUGGESTION_DATA_ATTR) {
            handle(&a, |c| c.select_suggestion(&text));
        }
    })?;

    Ok(())
}

fn listen<E>(
    target: &EventTarget,
    event: &'static str,
    f: impl FnMut(E) + 'static,
) -> Result<(), MountError>
where
    E: wasm_bindgen::convert::FromWasmAbi + 'static,
{
    let cb = Closure::wrap(Box::new(f) as Box<dyn FnMut(E)>);
    target
        .add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
        .map_err(|e| MountError::Listener {
            event,
            message: format!("{e:?}"),
        })?;
    cb.forget();
    Ok(())
}

/// Runs `f` on the controller, then performs whatever it queued.
///
/// The borrow ends before any command runs, so callbacks can re-enter.
fn handle(app: &App, f: impl FnOnce(&mut SearchController<WebDom>)) {
    let commands = {
        let mut c = app.borrow_mut();
        f(&mut c);
        c.take_commands()
    };
    dispatch(app, commands);
}

/// Performs queued commands. Completions feed back into the controller and
/// dispatch whatever they queue in turn.
fn dispatch(app: &App, commands: Vec<Command>) {
    for command in commands {
        match command {
            Command::Fetch(request) => {
                let a = Rc::clone(app);
                wasm_bindgen_futures::spawn_local(async move {
                    let result = fetch::get_text(&request.url).await;
                    let next = {
                        let mut c = a.borrow_mut();
                        c.on_response(request.kind, request.token, result);
                        c.take_commands()
                    };
                    dispatch(&a, next);
                });
            }
            Command::Schedule { timer, delay } => {
                let a = Rc::clone(app);
                timer::after(delay, move || {
                    let next = {
                        let mut c = a.borrow_mut();
                        c.on_timer(timer);
                        c.take_commands()
                    };
                    dispatch(&a, next);
                });
            }
        }
    }
}

fn with_app(f: impl FnOnce(&App)) {
    match APP.with(|slot| slot.borrow().clone()) {
        Some(app) => f(&app),
        None => warn!("search page is not mounted"),
    }
}

/// Selects a suggestion by its text, as if it had been clicked.
#[wasm_bindgen(js_name = selectSuggestion)]
pub fn select_suggestion(text: &str) {
    with_app(|app| handle(app, |c| c.select_suggestion(text)));
}

/// Fades out the recommendations and restores the empty state.
#[wasm_bindgen(js_name = clearRecommendations)]
pub fn clear_recommendations() {
    with_app(|app| handle(app, SearchController::clear_recommendations));
}
