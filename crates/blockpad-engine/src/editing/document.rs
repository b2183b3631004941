use serde::{Deserialize, Serialize};

use crate::editing::{Cmd, Patch, Selection};

/// Block kinds, closed set. The kind selects default presentation only;
/// every kind accepts the same content and styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    Heading,
    Subheading,
    #[default]
    Body,
    ListItem,
}

impl BlockKind {
    /// Stable name used by serialization and by external kind-selector UIs.
    pub fn name(&self) -> &'static str {
        match self {
            BlockKind::Heading => "heading",
            BlockKind::Subheading => "subheading",
            BlockKind::Body => "body",
            BlockKind::ListItem => "list-item",
        }
    }

    /// Inverse of [`BlockKind::name`]. Unknown names yield `None` so callers
    /// can ignore malformed selector values instead of failing.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "heading" => Some(BlockKind::Heading),
            "subheading" => Some(BlockKind::Subheading),
            "body" => Some(BlockKind::Body),
            "list-item" => Some(BlockKind::ListItem),
            _ => None,
        }
    }
}

/// Inline style flags applied uniformly to a block's entire content.
/// There is no per-character run styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InlineStyle {
    Bold,
    Italic,
    Underline,
}

/// Set of inline styles on one block. Toggle-based: applying the same style
/// twice returns the set to its previous state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleSet(Vec<InlineStyle>);

impl StyleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, style: InlineStyle) -> bool {
        self.0.contains(&style)
    }

    /// Add `style` if absent, remove it if present.
    pub fn toggle(&mut self, style: InlineStyle) {
        if let Some(pos) = self.0.iter().position(|&s| s == style) {
            self.0.remove(pos);
        } else {
            self.0.push(style);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = InlineStyle> + '_ {
        self.0.iter().copied()
    }
}

/// One structural unit of the document: a typed run of styled text.
///
/// Empty content is valid and renderable (a blank line). Content never
/// contains `\n` or `\r`; line breaks exist only as block boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub kind: BlockKind,
    pub content: String,
    #[serde(default, skip_serializing_if = "StyleSet::is_empty")]
    pub styles: StyleSet,
}

impl Block {
    /// Fresh empty body block, the default unit materialized wherever a
    /// block is needed but missing.
    pub fn empty_body() -> Self {
        Self {
            kind: BlockKind::Body,
            content: String::new(),
            styles: StyleSet::new(),
        }
    }

    pub fn body(content: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Body,
            content: content.into(),
            styles: StyleSet::new(),
        }
    }

    /// Content length in characters. All logical offsets are char offsets,
    /// since that is what the native surface reports for text nodes.
    pub fn len(&self) -> usize {
        self.content.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// The block document: an ordered, contiguous sequence of blocks.
///
/// This is the single source of truth for document content and structure.
/// It is mutated exclusively through [`Document::apply`]; renderers and
/// surfaces only ever read it. Invariants held across every operation:
///
/// - block indices are contiguous from 0 (at least one block always exists)
/// - no block content contains an embedded line break
/// - the version counter increments exactly once per applied command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub(crate) blocks: Vec<Block>,
    pub(crate) version: u64,
}

impl Document {
    /// An empty document behaves as a single empty body block from the
    /// moment editing starts.
    pub fn new() -> Self {
        Self {
            blocks: vec![Block::empty_body()],
            version: 0,
        }
    }

    /// Build a document from pre-made blocks, restoring the invariants a
    /// caller may not have honored: an empty list gains one empty body
    /// block, and embedded line breaks split their block.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        let mut normalized = Vec::with_capacity(blocks.len());
        for block in blocks {
            if block.content.contains(['\n', '\r']) {
                for piece in block.content.split(['\n', '\r']) {
                    normalized.push(Block {
                        kind: block.kind,
                        content: piece.to_string(),
                        styles: block.styles.clone(),
                    });
                }
            } else {
                normalized.push(block);
            }
        }
        if normalized.is_empty() {
            normalized.push(Block::empty_body());
        }
        Self {
            blocks: normalized,
            version: 0,
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Content length in chars of the block at `index`, if it exists.
    pub fn block_len(&self, index: usize) -> Option<usize> {
        self.blocks.get(index).map(Block::len)
    }

    /// Apply an edit command against the given logical selection.
    ///
    /// Returns a [`Patch`] carrying the intended next caret coordinate and
    /// the kind of edit that was applied, for the selection reconciler.
    /// Commands never fail: stale block indices materialize empty body
    /// blocks, and intents that cannot apply (e.g. delete-backward at the
    /// very start of the document) leave the document unchanged with the
    /// caret unmoved. The version increments either way, once per command.
    pub fn apply(&mut self, cmd: Cmd, selection: &Selection) -> Patch {
        crate::editing::commands::apply_command(self, cmd, selection)
    }

    /// Guarded block access: if `index` does not exist (stale caret state
    /// can reference a block that was just removed), empty body blocks are
    /// materialized up to and including `index` rather than failing the
    /// edit. Materialization appends, so indices stay contiguous.
    pub(crate) fn block_mut_or_materialize(&mut self, index: usize) -> &mut Block {
        while self.blocks.len() <= index {
            self.blocks.push(Block::empty_body());
        }
        &mut self.blocks[index]
    }

    /// A document never renders as zero blocks; removing the last one
    /// leaves a single empty body block behind.
    pub(crate) fn ensure_non_empty(&mut self) {
        if self.blocks.is_empty() {
            self.blocks.push(Block::empty_body());
        }
    }

    pub(crate) fn debug_check_invariants(&self) {
        debug_assert!(!self.blocks.is_empty(), "document must keep one block");
        for (i, block) in self.blocks.iter().enumerate() {
            debug_assert!(
                !block.content.contains(['\n', '\r']),
                "block {i} contains an embedded line break"
            );
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a char offset into a byte offset within `s`, clamping past-end
/// offsets to the end of the string.
pub(crate) fn byte_offset(s: &str, char_offset: usize) -> usize {
    s.char_indices()
        .nth(char_offset)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}
