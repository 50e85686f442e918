use std::ops::Range;

use super::surface::{TextSpan, TextSurface, Wrapped};
use crate::locale::Lang;

/// Handle into a [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
enum NodeKind {
    Text(String),
    Element {
        lang: Option<Lang>,
        marker: bool,
        active: bool,
        children: Vec<NodeId>,
    },
}

#[derive(Debug)]
struct Node {
    parent: Option<NodeId>,
    kind: NodeKind,
}

/// Arena-backed text tree mirroring the DOM operations the browser surface
/// performs. Detached nodes stay in the arena but are unreachable.
#[derive(Debug)]
pub struct MemoryDocument {
    nodes: Vec<Node>,
    scrolled: Vec<NodeId>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                kind: NodeKind::Element {
                    lang: None,
                    marker: false,
                    active: false,
                    children: Vec::new(),
                },
            }],
            scrolled: Vec::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn push_element(&mut self, parent: NodeId, lang: Option<Lang>) -> NodeId {
        self.append(
            parent,
            NodeKind::Element {
                lang,
                marker: false,
                active: false,
                children: Vec::new(),
            },
        )
    }

    pub fn push_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.append(parent, NodeKind::Text(text.to_string()))
    }

    /// Drop every child of `parent`, as replacing an element's inner HTML does.
    pub fn clear_children(&mut self, parent: NodeId) {
        let removed = match &mut self.nodes[parent.0].kind {
            NodeKind::Element {
                children, ..
            } => std::mem::take(children),
            NodeKind::Text(_) => return,
        };
        for child in removed {
            self.nodes[child.0].parent = None;
        }
    }

    /// Concatenated text of every reachable text node.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(self.root(), &mut out);
        out
    }

    pub fn marker_text(&self, marker: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(marker, &mut out);
        out
    }

    pub fn is_active(&self, marker: NodeId) -> bool {
        matches!(
            self.nodes[marker.0].kind,
            NodeKind::Element {
                active: true, ..
            }
        )
    }

    pub fn active_markers(&self) -> Vec<NodeId> {
        self.markers().into_iter().filter(|m| self.is_active(*m)).collect()
    }

    pub fn last_scrolled(&self) -> Option<NodeId> {
        self.scrolled.last().copied()
    }

    fn append(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = self.alloc(Some(parent), kind);
        if let NodeKind::Element {
            children, ..
        } = &mut self.nodes[parent.0].kind
        {
            children.push(id);
        }
        id
    }

    fn alloc(&mut self, parent: Option<NodeId>, kind: NodeKind) -> NodeId {
        self.nodes.push(Node {
            parent,
            kind,
        });
        NodeId(self.nodes.len() - 1)
    }

    fn children(&self, id: NodeId) -> &[NodeId] {
        match &self.nodes[id.0].kind {
            NodeKind::Element {
                children, ..
            } => children,
            NodeKind::Text(_) => &[],
        }
    }

    fn children_mut(&mut self, id: NodeId) -> Option<&mut Vec<NodeId>> {
        match &mut self.nodes[id.0].kind {
            NodeKind::Element {
                children, ..
            } => Some(children),
            NodeKind::Text(_) => None,
        }
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match &self.nodes[id.0].kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Element {
                children, ..
            } => {
                for child in children {
                    self.collect_text(*child, out);
                }
            },
        }
    }

    fn walk_spans(
        &self,
        id: NodeId,
        lang: Option<Lang>,
        in_marker: bool,
        out: &mut Vec<TextSpan<NodeId>>,
    ) {
        match &self.nodes[id.0].kind {
            NodeKind::Text(_) => out.push(TextSpan {
                node: id,
                lang,
                in_marker,
            }),
            NodeKind::Element {
                lang: tag,
                marker,
                children,
                ..
            } => {
                let lang = tag.or(lang);
                for child in children {
                    self.walk_spans(*child, lang, in_marker || *marker, out);
                }
            },
        }
    }

    fn walk_markers(&self, id: NodeId, out: &mut Vec<NodeId>) {
        if let NodeKind::Element {
            marker,
            children,
            ..
        } = &self.nodes[id.0].kind
        {
            if *marker {
                out.push(id);
            }
            for child in children {
                self.walk_markers(*child, out);
            }
        }
    }

    /// Merge adjacent text children and drop empty ones.
    fn normalize(&mut self, parent: NodeId) {
        let children = self.children(parent).to_vec();
        let mut kept: Vec<NodeId> = Vec::with_capacity(children.len());
        for child in children {
            let text = match &self.nodes[child.0].kind {
                NodeKind::Text(text) => Some(text.clone()),
                NodeKind::Element {
                    ..
                } => None,
            };
            match text {
                Some(text) if text.is_empty() => self.nodes[child.0].parent = None,
                Some(text) => {
                    let merged = kept.last().copied().and_then(|prev| {
                        match &mut self.nodes[prev.0].kind {
                            NodeKind::Text(prev_text) => {
                                prev_text.push_str(&text);
                                Some(())
                            },
                            NodeKind::Element {
                                ..
                            } => None,
                        }
                    });
                    if merged.is_some() {
                        self.nodes[child.0].parent = None;
                    } else {
                        kept.push(child);
                    }
                },
                None => kept.push(child),
            }
        }
        if let Some(slot) = self.children_mut(parent) {
            *slot = kept;
        }
    }
}

impl TextSurface for MemoryDocument {
    type Marker = NodeId;
    type Text = NodeId;

    fn text_spans(&self) -> Vec<TextSpan<NodeId>> {
        let mut out = Vec::new();
        self.walk_spans(self.root(), None, false, &mut out);
        out
    }

    fn text(&self, node: &NodeId) -> String {
        match &self.nodes[node.0].kind {
            NodeKind::Text(text) => text.clone(),
            NodeKind::Element {
                ..
            } => String::new(),
        }
    }

    fn wrap(&mut self, node: &NodeId, range: Range<usize>) -> Option<Wrapped<NodeId, NodeId>> {
        let chars: Vec<char> = match &self.nodes[node.0].kind {
            NodeKind::Text(text) => text.chars().collect(),
            NodeKind::Element {
                ..
            } => return None,
        };
        if range.start >= range.end || range.end > chars.len() {
            return None;
        }
        let parent = self.nodes[node.0].parent?;
        let pos = self.children(parent).iter().position(|c| c == node)?;

        let prefix: String = chars[..range.start].iter().collect();
        let hit: String = chars[range.clone()].iter().collect();
        let suffix: String = chars[range.end..].iter().collect();

        self.nodes[node.0].kind = NodeKind::Text(prefix);
        let marker = self.alloc(
            Some(parent),
            NodeKind::Element {
                lang: None,
                marker: true,
                active: false,
                children: Vec::new(),
            },
        );
        self.append(marker, NodeKind::Text(hit));

        let rest = if suffix.is_empty() {
            None
        } else {
            Some(self.alloc(Some(parent), NodeKind::Text(suffix)))
        };

        let siblings = self.children_mut(parent)?;
        siblings.insert(pos + 1, marker);
        if let Some(rest) = rest {
            siblings.insert(pos + 2, rest);
        }

        Some(Wrapped {
            marker,
            rest,
        })
    }

    fn markers(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.walk_markers(self.root(), &mut out);
        out
    }

    fn unwrap_marker(&mut self, marker: &NodeId) {
        let Some(parent) = self.nodes[marker.0].parent else {
            return;
        };
        let inner = self.children(*marker).to_vec();
        for child in &inner {
            self.nodes[child.0].parent = Some(parent);
        }
        self.nodes[marker.0].parent = None;
        if let Some(siblings) = self.children_mut(parent) {
            if let Some(pos) = siblings.iter().position(|c| c == marker) {
                siblings.remove(pos);
                for (offset, child) in inner.into_iter().enumerate() {
                    siblings.insert(pos + offset, child);
                }
            }
        }
        self.normalize(parent);
    }

    fn set_active(&mut self, marker: &NodeId, value: bool) {
        if let NodeKind::Element {
            active, ..
        } = &mut self.nodes[marker.0].kind
        {
            *active = value;
        }
    }

    fn scroll_into_view(&mut self, marker: &NodeId) {
        self.scrolled.push(*marker);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_splits_into_prefix_marker_suffix() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let text = doc.push_text(root, "héllo wörld");

        let wrapped = doc.wrap(&text, 6..11).unwrap();
        assert_eq!(doc.marker_text(wrapped.marker), "wörld");
        assert!(wrapped.rest.is_none());
        assert_eq!(doc.text(&text), "héllo ");
        assert_eq!(doc.text_content(), "héllo wörld");
    }

    #[test]
    fn unwrap_merges_text_back() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let text = doc.push_text(root, "abcabc");
        let first = doc.wrap(&text, 0..3).unwrap();
        doc.unwrap_marker(&first.marker);

        let spans = doc.text_spans();
        assert_eq!(spans.len(), 1);
        assert_eq!(doc.text(&spans[0].node), "abcabc");
    }

    #[test]
    fn spans_inherit_nearest_language_tag() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let en = doc.push_element(root, Some(Lang::En));
        let inner = doc.push_element(en, Some(Lang::Zh));
        doc.push_text(inner, "inner");
        doc.push_text(en, "outer");

        let langs: Vec<_> = doc.text_spans().into_iter().map(|s| s.lang).collect();
        assert_eq!(langs, vec![Some(Lang::Zh), Some(Lang::En)]);
    }

    #[test]
    fn out_of_range_wrap_is_refused() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let text = doc.push_text(root, "abc");
        assert!(doc.wrap(&text, 2..5).is_none());
        assert!(doc.wrap(&text, 1..1).is_none());
        assert_eq!(doc.text_content(), "abc");
    }
}
