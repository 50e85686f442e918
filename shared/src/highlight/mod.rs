//! In-page text search with cyclable, addressable match markers.
//!
//! The engine never touches a UI tree directly; it drives a [`TextSurface`].
//! `clear` runs before every search and on every language switch or view
//! transition, so markers never outlive the content they were made for.

mod memory;
mod surface;

use std::ops::Range;

use tracing::{debug, warn};

pub use memory::{MemoryDocument, NodeId};
pub use surface::{TextSpan, TextSurface, Wrapped};

use crate::{
    i18n::{fill_two, messages},
    locale::Lang,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HighlightPhase {
    #[default]
    Idle,
    Searching,
    HasMatches,
    NoMatches,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// What every engine operation reports back for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchReport {
    pub phase: HighlightPhase,
    pub count: usize,
    pub active: Option<usize>,
}

impl SearchReport {
    /// Status line text; empty while idle.
    pub fn status(&self, lang: Lang) -> String {
        let t = messages(lang);
        match (self.phase, self.active) {
            (HighlightPhase::HasMatches, Some(idx)) => {
                fill_two(t.match_status_template, idx + 1, self.count)
            },
            (HighlightPhase::NoMatches, _) => t.no_matches.to_string(),
            _ => String::new(),
        }
    }
}

/// Matches of the last search, in document order, with one active.
#[derive(Debug)]
pub struct HighlightEngine<M> {
    matches: Vec<M>,
    active: Option<usize>,
    phase: HighlightPhase,
}

impl<M> Default for HighlightEngine<M> {
    fn default() -> Self {
        Self {
            matches: Vec::new(),
            active: None,
            phase: HighlightPhase::Idle,
        }
    }
}

impl<M: Clone> HighlightEngine<M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&self) -> SearchReport {
        SearchReport {
            phase: self.phase,
            count: self.matches.len(),
            active: self.active,
        }
    }

    pub fn phase(&self) -> HighlightPhase {
        self.phase
    }

    pub fn matches(&self) -> &[M] {
        &self.matches
    }

    /// Mark every case-insensitive occurrence of `query` in the text visible
    /// for `lang`, then activate the first one.
    pub fn search<S>(&mut self, surface: &mut S, query: &str, lang: Lang) -> SearchReport
    where
        S: TextSurface<Marker = M>,
    {
        self.clear(surface);

        let needle: Vec<char> = query.trim().chars().map(fold_char).collect();
        if needle.is_empty() {
            return self.report();
        }

        self.phase = HighlightPhase::Searching;
        for span in surface.text_spans() {
            if !span.visible_in(lang) {
                continue;
            }
            let text = surface.text(&span.node);
            let ranges = find_matches(&text, &needle);
            self.wrap_all(surface, span.node, &ranges);
        }

        debug!(query = query.trim(), count = self.matches.len(), %lang, "search finished");
        if self.matches.is_empty() {
            self.phase = HighlightPhase::NoMatches;
        } else {
            self.phase = HighlightPhase::HasMatches;
            self.activate(surface, 0);
        }
        self.report()
    }

    /// Move the active match one step with wraparound in both directions.
    pub fn advance<S>(&mut self, surface: &mut S, direction: Direction) -> SearchReport
    where
        S: TextSurface<Marker = M>,
    {
        let count = self.matches.len();
        if self.phase != HighlightPhase::HasMatches || count == 0 {
            return self.report();
        }

        let next = match (self.active, direction) {
            (None, _) => 0,
            (Some(current), Direction::Forward) => (current + 1) % count,
            (Some(current), Direction::Backward) => (current + count - 1) % count,
        };
        self.activate(surface, next);
        self.report()
    }

    /// Unwrap every marker on the surface and forget all matches.
    pub fn clear<S>(&mut self, surface: &mut S) -> SearchReport
    where
        S: TextSurface<Marker = M>,
    {
        for marker in surface.markers() {
            surface.unwrap_marker(&marker);
        }
        self.matches.clear();
        self.active = None;
        self.phase = HighlightPhase::Idle;
        self.report()
    }

    /// Drop match bookkeeping without touching a surface, for when the
    /// content the markers lived in has been replaced wholesale.
    pub fn forget(&mut self) -> SearchReport {
        self.matches.clear();
        self.active = None;
        self.phase = HighlightPhase::Idle;
        self.report()
    }

    fn wrap_all<S>(&mut self, surface: &mut S, node: S::Text, ranges: &[Range<usize>])
    where
        S: TextSurface<Marker = M>,
    {
        let mut current = node;
        let mut consumed = 0;
        for range in ranges {
            let local = range.start - consumed..range.end - consumed;
            let Some(wrapped) = surface.wrap(&current, local) else {
                warn!(start = range.start, "surface refused to wrap match; skipping rest of node");
                return;
            };
            self.matches.push(wrapped.marker);
            match wrapped.rest {
                Some(rest) => {
                    current = rest;
                    consumed = range.end;
                },
                None => return,
            }
        }
    }

    fn activate<S>(&mut self, surface: &mut S, idx: usize)
    where
        S: TextSurface<Marker = M>,
    {
        if let Some(prev) = self.active.and_then(|i| self.matches.get(i)) {
            surface.set_active(prev, false);
        }
        if let Some(next) = self.matches.get(idx) {
            surface.set_active(next, true);
            surface.scroll_into_view(next);
            self.active = Some(idx);
        }
    }
}

fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Non-overlapping occurrences of `needle` in `haystack`, as char ranges.
/// `needle` must already be folded.
fn find_matches(haystack: &str, needle: &[char]) -> Vec<Range<usize>> {
    let hay: Vec<char> = haystack.chars().map(fold_char).collect();
    let n = needle.len();
    let mut out = Vec::new();
    if n == 0 {
        return out;
    }
    let mut i = 0;
    while i + n <= hay.len() {
        if hay[i..i + n] == *needle {
            out.push(i..i + n);
            i += n;
        } else {
            i += 1;
        }
    }
    out
}
