use serde::{Deserialize, Serialize};

use crate::editing::Document;

/// A logical coordinate: (block index, char offset into that block's
/// content). Independent of rendering; `offset` ranges from 0 to the
/// block's char length inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Caret {
    pub block: usize,
    pub offset: usize,
}

impl Caret {
    pub fn new(block: usize, offset: usize) -> Self {
        Self { block, offset }
    }

    /// Clamp to a coordinate that exists in `doc`. Block index clamps to
    /// the last block, offset to that block's length. Used when a surface
    /// reports a selection against a stale render.
    pub fn clamped(self, doc: &Document) -> Self {
        let block = self.block.min(doc.blocks().len().saturating_sub(1));
        let offset = match doc.block_len(block) {
            Some(len) => self.offset.min(len),
            None => 0,
        };
        Self { block, offset }
    }
}

/// A transient logical selection: anchor is where the selection started,
/// focus is where it currently ends. Either order is possible (the user may
/// select backwards); structural operations always run on the normalized
/// `(start, end)` pair, `start <= end` by (block, offset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub anchor: Caret,
    pub focus: Caret,
}

impl Selection {
    pub fn new(anchor: Caret, focus: Caret) -> Self {
        Self { anchor, focus }
    }

    /// A collapsed selection: a simple caret, no range.
    pub fn collapsed(block: usize, offset: usize) -> Self {
        let caret = Caret::new(block, offset);
        Self {
            anchor: caret,
            focus: caret,
        }
    }

    pub fn caret(caret: Caret) -> Self {
        Self {
            anchor: caret,
            focus: caret,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// Ordered endpoints, `start <= end`.
    pub fn normalized(&self) -> (Caret, Caret) {
        if self.anchor <= self.focus {
            (self.anchor, self.focus)
        } else {
            (self.focus, self.anchor)
        }
    }

    /// Both endpoints clamped into `doc`.
    pub fn clamped(&self, doc: &Document) -> Self {
        Self {
            anchor: self.anchor.clamped(doc),
            focus: self.focus.clamped(doc),
        }
    }
}
