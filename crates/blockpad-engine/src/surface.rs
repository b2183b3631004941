//! Boundary between the logical document and the native editable surface.
//!
//! The surface owns the live rendered content and the native caret; the
//! engine only ever sees it through [`EditSurface`]. The contract replaces
//! ancestor tree-walking with a logical block boundary: each rendered block
//! is a single addressable unit holding exactly one text node (its content),
//! so the block owning a native node is a direct lookup, and a character
//! offset within that node is a logical offset modulo clamping.
//!
//! Reverse placement is best effort. The target block can vanish between
//! mutation and reconciliation (it was just deleted), in which case
//! [`EditSurface::place_caret`] reports failure and callers move on.

use crate::editing::{Caret, Document, Selection};

/// A selection as the native surface reports it: two endpoints of
/// (opaque node reference, char offset within that node's text).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSelection<N> {
    pub anchor: (N, usize),
    pub focus: (N, usize),
}

/// The editable surface as seen from the engine.
pub trait EditSurface {
    /// Opaque reference to a rendered node, as produced by the native
    /// selection API.
    type Node: Clone;

    /// Current native selection, if any exists and lies inside the
    /// editable region.
    fn raw_selection(&self) -> Option<RawSelection<Self::Node>>;

    /// Index of the rendered block that `node` belongs to. `None` when the
    /// node is outside the editable region; the renderer's single-unit
    /// contract makes this a lookup, not a tree walk.
    fn owning_block(&self, node: &Self::Node) -> Option<usize>;

    /// Ask the surface to place its caret at a logical coordinate.
    /// Returns false when the target block no longer exists; callers must
    /// not assume placement succeeds.
    fn place_caret(&mut self, caret: Caret) -> bool;

    /// Return keyboard focus to the editable region. Needed after
    /// interacting with controls that live outside it.
    fn focus(&mut self);
}

/// The caret locator: resolve the surface's opaque selection into logical
/// coordinates against the current document.
///
/// Offsets are clamped to the owning block's content length - the rendered
/// text node may carry presentation-only characters (a non-breaking-space
/// suffix after a trailing space) that logical offsets never address.
/// Returns `None` for selection shapes the surface cannot attribute to a
/// block; callers treat that as "no selection" rather than an error.
pub fn locate_selection<S: EditSurface>(surface: &S, doc: &Document) -> Option<Selection> {
    let raw = surface.raw_selection()?;
    let anchor_block = surface.owning_block(&raw.anchor.0)?;
    let focus_block = surface.owning_block(&raw.focus.0)?;

    let anchor = Caret::new(anchor_block, raw.anchor.1).clamped(doc);
    let focus = Caret::new(focus_block, raw.focus.1).clamped(doc);
    Some(Selection::new(anchor, focus))
}

/// Reference surface with no real rendering behind it: blocks are just
/// their rendered content lengths. Implements the block boundary contract
/// exactly, which makes it the fixture for locator and reconciler tests
/// and the executable statement of what a real surface must honor.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    block_lens: Vec<usize>,
    raw: Option<RawSelection<usize>>,
    caret: Option<Caret>,
    focus_count: usize,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-render: replace the surface content with the document's current
    /// blocks. Invalidates the native caret, exactly like replacing
    /// rendered content does on a real surface.
    pub fn render(&mut self, doc: &Document) {
        self.block_lens = doc.blocks().iter().map(|b| b.len()).collect();
        self.caret = None;
    }

    /// Simulate the user placing a selection: node references are block
    /// indices, offsets are raw text-node offsets.
    pub fn select(&mut self, anchor: (usize, usize), focus: (usize, usize)) {
        self.raw = Some(RawSelection { anchor, focus });
    }

    pub fn caret(&self) -> Option<Caret> {
        self.caret
    }

    pub fn focus_count(&self) -> usize {
        self.focus_count
    }
}

impl EditSurface for HeadlessSurface {
    type Node = usize;

    fn raw_selection(&self) -> Option<RawSelection<usize>> {
        self.raw.clone()
    }

    fn owning_block(&self, node: &usize) -> Option<usize> {
        (*node < self.block_lens.len()).then_some(*node)
    }

    fn place_caret(&mut self, caret: Caret) -> bool {
        match self.block_lens.get(caret.block) {
            Some(&len) if caret.offset <= len => {
                self.caret = Some(caret);
                self.raw = Some(RawSelection {
                    anchor: (caret.block, caret.offset),
                    focus: (caret.block, caret.offset),
                });
                true
            }
            _ => false,
        }
    }

    fn focus(&mut self) {
        self.focus_count += 1;
    }
}
