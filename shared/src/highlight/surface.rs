use std::ops::Range;

use crate::locale::Lang;

/// One text node as seen by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan<T> {
    pub node: T,
    /// Language tag of the nearest tagged ancestor, if any.
    pub lang: Option<Lang>,
    /// Whether the node already sits inside a match marker.
    pub in_marker: bool,
}

impl<T> TextSpan<T> {
    pub fn visible_in(&self, lang: Lang) -> bool {
        !self.in_marker && self.lang.map_or(true, |tag| tag == lang)
    }
}

/// Result of wrapping part of a text node in a marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Wrapped<T, M> {
    pub marker: M,
    /// Text after the marker, if the match did not end the node.
    pub rest: Option<T>,
}

/// An ordered tree of text the highlight engine can decorate.
///
/// `wrap` and `unwrap_marker` must be exact inverses: unwrapping every marker
/// restores the concatenated text content byte for byte. Ranges are in
/// Unicode scalar values, relative to the node passed in.
pub trait TextSurface {
    type Text: Clone;
    type Marker: Clone;

    /// Text nodes under the content scope, in document order.
    fn text_spans(&self) -> Vec<TextSpan<Self::Text>>;

    fn text(&self, node: &Self::Text) -> String;

    /// Split `node` into prefix, marker and suffix. `None` when the host
    /// could not perform the split; the node is then left untouched.
    fn wrap(
        &mut self,
        node: &Self::Text,
        range: Range<usize>,
    ) -> Option<Wrapped<Self::Text, Self::Marker>>;

    /// Every marker currently under the content scope, in document order.
    fn markers(&self) -> Vec<Self::Marker>;

    /// Replace the marker with its text, merging it back into its neighbours.
    fn unwrap_marker(&mut self, marker: &Self::Marker);

    fn set_active(&mut self, marker: &Self::Marker, active: bool);

    fn scroll_into_view(&mut self, marker: &Self::Marker);
}
