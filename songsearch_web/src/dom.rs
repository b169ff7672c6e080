// Copyright 2026 the Songsearch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`DomPort`] over the live page.

use log::warn;
use songsearch_core::markup::{FADE_OUT_CLASS, SUGGESTION_DATA_ATTR, SUGGESTION_ITEM_CLASS};
use songsearch_core::{BindError, DomPort, ElementIds};
use wasm_bindgen::JsCast as _;
use web_sys::{Document, HtmlElement, HtmlInputElement};

/// The page elements the controller reads and writes.
///
/// Built once by [`bind`](Self::bind); every later access goes through the
/// held handles, so a missing element is reported at startup rather than on
/// first use.
#[derive(Debug)]
pub struct WebDom {
    search_input: HtmlInputElement,
    suggestions: HtmlElement,
    recommendations: HtmlElement,
    gpu_toggle: HtmlInputElement,
    gpu_label: Option<HtmlElement>,
}

impl WebDom {
    /// Looks up every element in `ids`.
    ///
    /// The GPU label is optional; without one, label updates are dropped.
    pub fn bind(document: &Document, ids: &ElementIds) -> Result<Self, BindError> {
        let gpu_label = document
            .query_selector(&format!("label[for=\"{}\"]", ids.gpu_toggle))
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        if gpu_label.is_none() {
            warn!("no label for #{}; GPU state will not be shown", ids.gpu_toggle);
        }

        Ok(Self {
            search_input: input_by_id(document, ids.search_input)?,
            suggestions: element_by_id(document, ids.suggestions)?,
            recommendations: element_by_id(document, ids.recommendations)?,
            gpu_toggle: input_by_id(document, ids.gpu_toggle)?,
            gpu_label,
        })
    }

    /// The search text box.
    #[must_use]
    pub fn search_input(&self) -> &HtmlInputElement {
        &self.search_input
    }

    /// The suggestions panel.
    #[must_use]
    pub fn suggestions(&self) -> &HtmlElement {
        &self.suggestions
    }

    /// The recommendations panel.
    #[must_use]
    pub fn recommendations(&self) -> &HtmlElement {
        &self.recommendations
    }

    /// The GPU checkbox.
    #[must_use]
    pub fn gpu_toggle(&self) -> &HtmlInputElement {
        &self.gpu_toggle
    }
}

impl DomPort for WebDom {
    fn search_box_width(&self) -> f64 {
        f64::from(self.search_input.offset_width())
    }

    fn set_suggestions_width(&mut self, px: f64) {
        let _ = self
            .suggestions
            .style()
            .set_property("width", &format!("{px}px"));
    }

    fn input_value(&self) -> String {
        self.search_input.value()
    }

    fn set_input_value(&mut self, value: &str) {
        self.search_input.set_value(value);
    }

    fn input_has_focus(&self) -> bool {
        self.search_input.matches(":focus").unwrap_or(false)
    }

    fn gpu_checked(&self) -> bool {
        self.gpu_toggle.checked()
    }

    fn set_gpu_label(&mut self, text: &str) {
        if let Some(label) = &self.gpu_label {
            label.set_text_content(Some(text));
        }
    }

    fn set_suggestions_html(&mut self, html: &str) {
        self.suggestions.set_inner_html(html);
    }

    fn set_suggestion_items(&mut self, items: &[String]) {
        self.suggestions.set_inner_html("");
        let Some(doc) = self.suggestions.owner_document() else {
            return;
        };
        for item in items {
            let Ok(el) = doc.create_element("div") else {
                warn!("could not create suggestion entry for {item:?}");
                continue;
            };
            el.set_class_name(SUGGESTION_ITEM_CLASS);
            let _ = el.set_attribute(SUGGESTION_DATA_ATTR, item);
            // Text, not markup: suggestion titles are untrusted.
            el.set_text_content(Some(item));
            let _ = self.suggestions.append_child(&el);
        }
    }

    fn set_recommendations_html(&mut self, html: &str) {
        self.recommendations.set_inner_html(html);
    }

    fn set_recommendations_fading(&mut self, fading: bool) {
        let classes = self.recommendations.class_list();
        let _ = if fading {
            classes.add_1(FADE_OUT_CLASS)
        } else {
            classes.remove_1(FADE_OUT_CLASS)
        };
    }
}

fn element_by_id(doc: &Document, id: &'static str) -> Result<HtmlElement, BindError> {
    doc.get_element_by_id(id)
        .ok_or(BindError::ElementNotFound(id))?
        .dyn_into()
        .map_err(|_| BindError::WrongElementType {
            id,
            expected: "HTMLElement",
        })
}

fn input_by_id(doc: &Document, id: &'static str) -> Result<HtmlInputElement, BindError> {
    doc.get_element_by_id(id)
        .ok_or(BindError::ElementNotFound(id))?
        .dyn_into()
        .map_err(|_| BindError::WrongElementType {
            id,
            expected: "HTMLInputElement",
        })
}
