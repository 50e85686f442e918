//! The live DOM as a [`TextSurface`].
//!
//! Only text under `.doc-body` hosts is searched: those are filled through
//! `RawHtml` and never diffed by Yew, so splitting their text nodes is safe.

use std::ops::Range;

use bilingual_reader_shared::{
    highlight::{TextSpan, Wrapped},
    Lang, TextSurface,
};
use tracing::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, Node, NodeList, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, Text,
};

const HOST_SELECTOR: &str = ".doc-body";
const MARKER_TAG: &str = "mark";
const MARKER_CLASS: &str = "search-hit";
const MARKER_SELECTOR: &str = "mark.search-hit";
const ACTIVE_CLASS: &str = "active";
/// `NodeFilter.SHOW_TEXT`
const SHOW_TEXT: u32 = 0x4;

pub struct DomSurface {
    scope: Option<Element>,
}

impl DomSurface {
    pub fn new(scope: Option<Element>) -> Self {
        Self {
            scope,
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn elements(list: NodeList) -> Vec<Element> {
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn hosts(&self) -> Vec<Element> {
        self.scope
            .as_ref()
            .and_then(|scope| scope.query_selector_all(HOST_SELECTOR).ok())
            .map(Self::elements)
            .unwrap_or_default()
    }

    fn host_lang(host: &Element) -> Option<Lang> {
        host.closest("[data-lang]")
            .ok()
            .flatten()
            .and_then(|tagged| tagged.get_attribute("data-lang"))
            .and_then(|code| Lang::from_code(&code))
    }

    fn collect_text(
        document: &Document,
        host: &Element,
        lang: Option<Lang>,
        out: &mut Vec<TextSpan<Text>>,
    ) -> Result<(), JsValue> {
        let walker = document.create_tree_walker_with_what_to_show(host, SHOW_TEXT)?;
        while let Some(node) = walker.next_node()? {
            let Ok(text) = node.dyn_into::<Text>() else {
                continue;
            };
            let in_marker = text
                .parent_element()
                .and_then(|parent| parent.closest(MARKER_SELECTOR).ok().flatten())
                .is_some();
            out.push(TextSpan {
                node: text,
                lang,
                in_marker,
            });
        }
        Ok(())
    }

    fn split(node: &Text, range: Range<usize>) -> Result<Wrapped<Text, Element>, JsValue> {
        let data = node.data();
        let start = utf16_offset(&data, range.start);
        let end = utf16_offset(&data, range.end);
        let total = node.length();

        let hit = if start > 0 {
            node.split_text(start)?
        } else {
            node.clone()
        };
        let rest = if end < total {
            Some(hit.split_text(end - start)?)
        } else {
            None
        };

        let document = Self::document().ok_or_else(|| JsValue::from_str("no document"))?;
        let parent = hit.parent_node().ok_or_else(|| JsValue::from_str("detached text node"))?;
        let marker = document.create_element(MARKER_TAG)?;
        marker.set_class_name(MARKER_CLASS);
        parent.replace_child(&marker, &hit)?;
        marker.append_child(&hit)?;

        Ok(Wrapped {
            marker,
            rest,
        })
    }

    fn restore(marker: &Element) -> Result<(), JsValue> {
        let Some(parent) = marker.parent_node() else {
            return Ok(());
        };
        let document = Self::document().ok_or_else(|| JsValue::from_str("no document"))?;
        let text = document.create_text_node(&marker.text_content().unwrap_or_default());
        parent.replace_child(&text, marker)?;
        parent.normalize();
        Ok(())
    }
}

/// UTF-16 code unit offset of the `chars`-th scalar value in `data`.
fn utf16_offset(data: &str, chars: usize) -> u32 {
    let units: usize = data.chars().take(chars).map(char::len_utf16).sum();
    u32::try_from(units).unwrap_or(u32::MAX)
}

impl TextSurface for DomSurface {
    type Marker = Element;
    type Text = Text;

    fn text_spans(&self) -> Vec<TextSpan<Text>> {
        let Some(document) = Self::document() else {
            return Vec::new();
        };
        let mut spans = Vec::new();
        for host in self.hosts() {
            let lang = Self::host_lang(&host);
            if let Err(err) = Self::collect_text(&document, &host, lang, &mut spans) {
                debug!(?err, "text walk aborted");
            }
        }
        spans
    }

    fn text(&self, node: &Text) -> String {
        node.data()
    }

    fn wrap(&mut self, node: &Text, range: Range<usize>) -> Option<Wrapped<Text, Element>> {
        Self::split(node, range)
            .map_err(|err| debug!(?err, "could not wrap match"))
            .ok()
    }

    fn markers(&self) -> Vec<Element> {
        self.scope
            .as_ref()
            .and_then(|scope| scope.query_selector_all(MARKER_SELECTOR).ok())
            .map(Self::elements)
            .unwrap_or_default()
    }

    fn unwrap_marker(&mut self, marker: &Element) {
        if let Err(err) = Self::restore(marker) {
            debug!(?err, "could not unwrap marker");
        }
    }

    fn set_active(&mut self, marker: &Element, active: bool) {
        if let Err(err) = marker.class_list().toggle_with_force(ACTIVE_CLASS, active) {
            debug!(?err, "could not toggle active marker");
        }
    }

    fn scroll_into_view(&mut self, marker: &Element) {
        let options = ScrollIntoViewOptions::new();
        options.set_block(ScrollLogicalPosition::Center);
        options.set_behavior(ScrollBehavior::Smooth);
        marker.scroll_into_view_with_scroll_into_view_options(&options);
    }
}

impl From<Option<Node>> for DomSurface {
    fn from(scope: Option<Node>) -> Self {
        Self::new(scope.and_then(|node| node.dyn_into::<Element>().ok()))
    }
}
