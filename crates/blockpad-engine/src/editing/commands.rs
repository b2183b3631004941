use crate::editing::document::byte_offset;
use crate::editing::{Block, BlockKind, Caret, Document, EditKind, InlineStyle, Patch, Selection};

/// Raw edit intents routed into the document. Each is applied against the
/// current logical selection; the structural outcome (splice, split, merge,
/// block removal) is decided here, never by the surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// Insert characters at the caret, replacing the selected range first
    /// if the selection is not collapsed. Line-break characters in `text`
    /// route to the split operation; block content never stores them.
    InsertText { text: String },
    /// Split the caret's block in two. The split-off remainder becomes a
    /// fresh body block (kind and styles reset).
    InsertLineBreak,
    /// Backspace. At offset 0 this merges into (or removes into) the
    /// previous block.
    DeleteBackward,
    /// Forward delete. At end-of-block this absorbs the next block.
    DeleteForward,
    /// Change the caret block's kind. Content and styles unaffected.
    SetKind { kind: BlockKind },
    /// Toggle one inline style flag on the caret's block.
    ToggleStyle { style: InlineStyle },
}

/// Apply one command. See [`Document::apply`] for the contract.
pub(crate) fn apply_command(doc: &mut Document, cmd: Cmd, selection: &Selection) -> Patch {
    // Materialize stale block references before clamping, so an index that
    // no longer exists lands on a real empty block instead of silently
    // collapsing onto the end of the document.
    let (raw_start, raw_end) = selection.normalized();
    doc.block_mut_or_materialize(raw_start.block.max(raw_end.block));
    let (start, end) = selection.clamped(doc).normalized();

    let (caret, kind) = match cmd {
        Cmd::InsertText { text } => apply_insert(doc, &text, start, end),
        Cmd::InsertLineBreak => {
            let caret = remove_range(doc, start, end);
            (split_at(doc, caret), EditKind::LineBreak)
        }
        Cmd::DeleteBackward => apply_delete_backward(doc, start, end),
        Cmd::DeleteForward => apply_delete_forward(doc, start, end),
        Cmd::SetKind { kind } => {
            doc.blocks[start.block].kind = kind;
            (start, EditKind::StyleChange)
        }
        Cmd::ToggleStyle { style } => {
            doc.blocks[start.block].styles.toggle(style);
            (start, EditKind::StyleChange)
        }
    };

    doc.ensure_non_empty();
    doc.version += 1;
    doc.debug_check_invariants();

    Patch {
        caret: caret.clamped(doc),
        kind,
        version: doc.version,
    }
}

/// Insert `text` over the (possibly collapsed) range. Embedded line breaks
/// become block splits, so the text is inserted segment by segment.
fn apply_insert(doc: &mut Document, text: &str, start: Caret, end: Caret) -> (Caret, EditKind) {
    let mut caret = remove_range(doc, start, end);
    let segments = split_on_line_breaks(text);

    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            caret = split_at(doc, caret);
        }
        if !segment.is_empty() {
            caret = insert_at(doc, caret, segment);
        }
    }

    // Text ending in a line break leaves the caret at the start of the new
    // block; the reconciler treats that like a plain split.
    let ends_with_break = segments.len() > 1 && segments.last().is_some_and(|s| s.is_empty());
    let kind = if ends_with_break {
        EditKind::LineBreak
    } else {
        EditKind::Insert
    };
    (caret, kind)
}

fn apply_delete_backward(doc: &mut Document, start: Caret, end: Caret) -> (Caret, EditKind) {
    if start != end {
        return (remove_range(doc, start, end), EditKind::DeleteBackward);
    }

    let Caret { block, offset } = start;
    let caret = if offset == 0 {
        if block == 0 {
            // Start of document: nothing before the caret, document unchanged
            start
        } else if doc.blocks[block].is_empty() {
            // Empty block: remove it outright, no merge. The previous
            // block's length is untouched, so the caret lands at its end.
            doc.blocks.remove(block);
            Caret::new(block - 1, doc.blocks[block - 1].len())
        } else {
            // Merge into the previous block. The caret belongs at the seam,
            // which is the previous block's length *before* the merge.
            let pre_merge_len = doc.blocks[block - 1].len();
            let absorbed = doc.blocks.remove(block);
            doc.blocks[block - 1].content.push_str(&absorbed.content);
            Caret::new(block - 1, pre_merge_len)
        }
    } else {
        remove_char(&mut doc.blocks[block], offset - 1);
        Caret::new(block, offset - 1)
    };
    (caret, EditKind::DeleteBackward)
}

fn apply_delete_forward(doc: &mut Document, start: Caret, end: Caret) -> (Caret, EditKind) {
    if start != end {
        return (remove_range(doc, start, end), EditKind::DeleteForward);
    }

    let Caret { block, offset } = start;
    if offset >= doc.blocks[block].len() {
        if block + 1 < doc.blocks.len() {
            // Absorb the next block; caret stays put at the seam
            let absorbed = doc.blocks.remove(block + 1);
            doc.blocks[block].content.push_str(&absorbed.content);
        }
        // End of last block: nothing after the caret, document unchanged
    } else {
        remove_char(&mut doc.blocks[block], offset);
    }
    (start, EditKind::DeleteForward)
}

/// Delete the normalized range `[start, end)`, returning the caret at the
/// collapse point. Cross-block ranges keep the start block, which absorbs
/// whatever trails `end` in the end block; every block in between, and the
/// end block itself, is removed.
fn remove_range(doc: &mut Document, start: Caret, end: Caret) -> Caret {
    if start == end {
        return start;
    }

    if start.block == end.block {
        let block = &mut doc.blocks[start.block];
        let from = byte_offset(&block.content, start.offset);
        let to = byte_offset(&block.content, end.offset);
        block.content.replace_range(from..to, "");
    } else {
        let tail = {
            let end_block = &doc.blocks[end.block];
            end_block.content[byte_offset(&end_block.content, end.offset)..].to_string()
        };
        let start_block = &mut doc.blocks[start.block];
        start_block
            .content
            .truncate(byte_offset(&start_block.content, start.offset));
        start_block.content.push_str(&tail);
        doc.blocks.drain(start.block + 1..=end.block);
    }
    start
}

/// Split the block at `caret` in two; the remainder becomes a fresh body
/// block inserted immediately after. Returns the caret at the start of the
/// new block.
fn split_at(doc: &mut Document, caret: Caret) -> Caret {
    let block = doc.block_mut_or_materialize(caret.block);
    let at = byte_offset(&block.content, caret.offset);
    let tail = block.content.split_off(at);
    doc.blocks.insert(caret.block + 1, Block::body(tail));
    Caret::new(caret.block + 1, 0)
}

/// Splice `text` (known line-break free) into the block at `caret`.
fn insert_at(doc: &mut Document, caret: Caret, text: &str) -> Caret {
    let block = doc.block_mut_or_materialize(caret.block);
    let at = byte_offset(&block.content, caret.offset);
    block.content.insert_str(at, text);
    Caret::new(caret.block, caret.offset + text.chars().count())
}

/// Remove the single char at `char_index` from the block's content.
fn remove_char(block: &mut Block, char_index: usize) {
    let from = byte_offset(&block.content, char_index);
    let to = byte_offset(&block.content, char_index + 1);
    block.content.replace_range(from..to, "");
}

/// Segment text on `\r\n`, `\n` or `\r`, each break counting once.
fn split_on_line_breaks(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .split('\n')
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::StyleSet;
    use pretty_assertions::assert_eq;

    fn doc(contents: &[&str]) -> Document {
        Document::from_blocks(contents.iter().map(|c| Block::body(*c)).collect())
    }

    fn contents(doc: &Document) -> Vec<&str> {
        doc.blocks().iter().map(|b| b.content.as_str()).collect()
    }

    // ============ InsertText: collapsed caret ============

    #[test]
    fn test_insert_at_collapsed_caret() {
        let mut d = doc(&["helo"]);

        let patch = d.apply(
            Cmd::InsertText { text: "l".into() },
            &Selection::collapsed(0, 2),
        );

        assert_eq!(contents(&d), vec!["hello"]);
        assert_eq!(patch.caret, Caret::new(0, 3));
        assert_eq!(patch.kind, EditKind::Insert);
        assert_eq!(patch.version, 1);
    }

    #[test]
    fn test_insert_multiple_chars_advances_caret_by_char_count() {
        let mut d = doc(&["ab"]);

        let patch = d.apply(
            Cmd::InsertText { text: "héllo".into() },
            &Selection::collapsed(0, 1),
        );

        assert_eq!(contents(&d), vec!["ahéllob"]);
        assert_eq!(patch.caret, Caret::new(0, 6));
    }

    #[test]
    fn test_insert_empty_text_is_noop_but_bumps_version() {
        let mut d = doc(&["ab"]);

        let patch = d.apply(
            Cmd::InsertText { text: String::new() },
            &Selection::collapsed(0, 1),
        );

        assert_eq!(contents(&d), vec!["ab"]);
        assert_eq!(patch.caret, Caret::new(0, 1));
        assert_eq!(d.version(), 1);
    }

    // ============ InsertText: same-block range ============

    #[test]
    fn test_insert_over_same_block_range_replaces_it() {
        let mut d = doc(&["abcdef"]);

        let patch = d.apply(
            Cmd::InsertText { text: "X".into() },
            &Selection::new(Caret::new(0, 1), Caret::new(0, 4)),
        );

        assert_eq!(contents(&d), vec!["aXef"]);
        assert_eq!(patch.caret, Caret::new(0, 2));
    }

    #[test]
    fn test_insert_over_reversed_range_normalizes_first() {
        let mut d = doc(&["abcdef"]);

        // Focus before anchor: the user selected right-to-left
        let patch = d.apply(
            Cmd::InsertText { text: "X".into() },
            &Selection::new(Caret::new(0, 4), Caret::new(0, 1)),
        );

        assert_eq!(contents(&d), vec!["aXef"]);
        assert_eq!(patch.caret, Caret::new(0, 2));
    }

    // ============ InsertText: cross-block range ============

    #[test]
    fn test_insert_over_cross_block_range() {
        let mut d = doc(&["abc", "def"]);

        let patch = d.apply(
            Cmd::InsertText { text: "X".into() },
            &Selection::new(Caret::new(0, 1), Caret::new(1, 2)),
        );

        assert_eq!(contents(&d), vec!["aXf"]);
        assert_eq!(patch.caret, Caret::new(0, 2));
    }

    #[test]
    fn test_insert_over_cross_block_range_drops_intermediate_blocks() {
        let mut d = doc(&["abc", "middle", "also gone", "def"]);

        let patch = d.apply(
            Cmd::InsertText { text: "-".into() },
            &Selection::new(Caret::new(0, 2), Caret::new(3, 1)),
        );

        assert_eq!(contents(&d), vec!["ab-ef"]);
        assert_eq!(patch.caret, Caret::new(0, 3));
    }

    #[test]
    fn test_insert_over_range_ending_at_block_end_keeps_no_tail() {
        let mut d = doc(&["abc", "def"]);

        let patch = d.apply(
            Cmd::InsertText { text: "X".into() },
            &Selection::new(Caret::new(0, 1), Caret::new(1, 3)),
        );

        assert_eq!(contents(&d), vec!["aX"]);
        assert_eq!(patch.caret, Caret::new(0, 2));
    }

    // ============ InsertText: embedded line breaks ============

    #[test]
    fn test_insert_text_with_line_break_splits_block() {
        let mut d = doc(&["ab"]);

        let patch = d.apply(
            Cmd::InsertText {
                text: "x\ny".into(),
            },
            &Selection::collapsed(0, 1),
        );

        assert_eq!(contents(&d), vec!["ax", "yb"]);
        assert_eq!(patch.caret, Caret::new(1, 1));
        assert_eq!(patch.kind, EditKind::Insert);
    }

    #[test]
    fn test_insert_lone_newline_acts_as_line_break() {
        let mut d = doc(&["ab"]);

        let patch = d.apply(
            Cmd::InsertText { text: "\n".into() },
            &Selection::collapsed(0, 1),
        );

        assert_eq!(contents(&d), vec!["a", "b"]);
        assert_eq!(patch.caret, Caret::new(1, 0));
        assert_eq!(patch.kind, EditKind::LineBreak);
    }

    #[test]
    fn test_insert_crlf_counts_as_one_break() {
        let mut d = doc(&["ab"]);

        let _ = d.apply(
            Cmd::InsertText {
                text: "x\r\ny".into(),
            },
            &Selection::collapsed(0, 2),
        );

        assert_eq!(contents(&d), vec!["abx", "y"]);
    }

    // ============ InsertLineBreak ============

    #[test]
    fn test_line_break_splits_at_caret() {
        let mut d = doc(&["hello"]);

        let patch = d.apply(Cmd::InsertLineBreak, &Selection::collapsed(0, 2));

        assert_eq!(contents(&d), vec!["he", "llo"]);
        assert_eq!(patch.caret, Caret::new(1, 0));
        assert_eq!(patch.kind, EditKind::LineBreak);
    }

    #[test]
    fn test_line_break_at_block_end_creates_empty_block() {
        let mut d = doc(&["hello"]);

        let patch = d.apply(Cmd::InsertLineBreak, &Selection::collapsed(0, 5));

        assert_eq!(contents(&d), vec!["hello", ""]);
        assert_eq!(patch.caret, Caret::new(1, 0));
    }

    #[test]
    fn test_line_break_resets_kind_and_styles_on_new_block() {
        let mut d = Document::from_blocks(vec![Block {
            kind: BlockKind::Heading,
            content: "title text".into(),
            styles: {
                let mut s = StyleSet::new();
                s.toggle(InlineStyle::Bold);
                s
            },
        }]);

        d.apply(Cmd::InsertLineBreak, &Selection::collapsed(0, 5));

        assert_eq!(d.blocks()[0].kind, BlockKind::Heading);
        assert!(d.blocks()[0].styles.contains(InlineStyle::Bold));
        assert_eq!(d.blocks()[1].kind, BlockKind::Body);
        assert!(d.blocks()[1].styles.is_empty());
        assert_eq!(d.blocks()[1].content, " text");
    }

    #[test]
    fn test_line_break_over_range_deletes_range_first() {
        let mut d = doc(&["abcdef"]);

        let patch = d.apply(
            Cmd::InsertLineBreak,
            &Selection::new(Caret::new(0, 2), Caret::new(0, 4)),
        );

        assert_eq!(contents(&d), vec!["ab", "ef"]);
        assert_eq!(patch.caret, Caret::new(1, 0));
    }

    // ============ DeleteBackward ============

    #[test]
    fn test_delete_backward_mid_block() {
        let mut d = doc(&["hello"]);

        let patch = d.apply(Cmd::DeleteBackward, &Selection::collapsed(0, 3));

        assert_eq!(contents(&d), vec!["helo"]);
        assert_eq!(patch.caret, Caret::new(0, 2));
        assert_eq!(patch.kind, EditKind::DeleteBackward);
    }

    #[test]
    fn test_delete_backward_at_document_start_is_noop() {
        let mut d = doc(&["hello"]);

        let patch = d.apply(Cmd::DeleteBackward, &Selection::collapsed(0, 0));

        assert_eq!(contents(&d), vec!["hello"]);
        assert_eq!(patch.caret, Caret::new(0, 0));
    }

    #[test]
    fn test_delete_backward_on_empty_block_removes_it() {
        let mut d = doc(&["ab", ""]);

        let patch = d.apply(Cmd::DeleteBackward, &Selection::collapsed(1, 0));

        assert_eq!(contents(&d), vec!["ab"]);
        assert_eq!(patch.caret, Caret::new(0, 2));
    }

    #[test]
    fn test_delete_backward_merges_into_previous_block() {
        let mut d = doc(&["ab", "cd"]);

        let patch = d.apply(Cmd::DeleteBackward, &Selection::collapsed(1, 0));

        assert_eq!(contents(&d), vec!["abcd"]);
        // Caret sits at the seam: the previous block's pre-merge length
        assert_eq!(patch.caret, Caret::new(0, 2));
    }

    #[test]
    fn test_delete_backward_merge_keeps_previous_kind() {
        let mut d = Document::from_blocks(vec![
            Block {
                kind: BlockKind::Heading,
                content: "head".into(),
                styles: StyleSet::new(),
            },
            Block::body("tail"),
        ]);

        d.apply(Cmd::DeleteBackward, &Selection::collapsed(1, 0));

        assert_eq!(d.blocks().len(), 1);
        assert_eq!(d.blocks()[0].kind, BlockKind::Heading);
        assert_eq!(d.blocks()[0].content, "headtail");
    }

    #[test]
    fn test_delete_backward_over_range_deletes_range() {
        let mut d = doc(&["abc", "def"]);

        let patch = d.apply(
            Cmd::DeleteBackward,
            &Selection::new(Caret::new(0, 2), Caret::new(1, 1)),
        );

        assert_eq!(contents(&d), vec!["abef"]);
        assert_eq!(patch.caret, Caret::new(0, 2));
    }

    // ============ DeleteForward ============

    #[test]
    fn test_delete_forward_mid_block() {
        let mut d = doc(&["hello"]);

        let patch = d.apply(Cmd::DeleteForward, &Selection::collapsed(0, 1));

        assert_eq!(contents(&d), vec!["hllo"]);
        assert_eq!(patch.caret, Caret::new(0, 1));
        assert_eq!(patch.kind, EditKind::DeleteForward);
    }

    #[test]
    fn test_delete_forward_at_block_end_absorbs_next() {
        let mut d = doc(&["ab", "cd"]);

        let patch = d.apply(Cmd::DeleteForward, &Selection::collapsed(0, 2));

        assert_eq!(contents(&d), vec!["abcd"]);
        assert_eq!(patch.caret, Caret::new(0, 2));
    }

    #[test]
    fn test_delete_forward_at_document_end_is_noop() {
        let mut d = doc(&["ab"]);

        let patch = d.apply(Cmd::DeleteForward, &Selection::collapsed(0, 2));

        assert_eq!(contents(&d), vec!["ab"]);
        assert_eq!(patch.caret, Caret::new(0, 2));
    }

    #[test]
    fn test_delete_forward_absorbing_empty_next_block() {
        let mut d = doc(&["ab", ""]);

        let _ = d.apply(Cmd::DeleteForward, &Selection::collapsed(0, 2));

        assert_eq!(contents(&d), vec!["ab"]);
    }

    // ============ SetKind / ToggleStyle ============

    #[test]
    fn test_set_kind_changes_only_kind() {
        let mut d = doc(&["text"]);

        let patch = d.apply(
            Cmd::SetKind {
                kind: BlockKind::Subheading,
            },
            &Selection::collapsed(0, 2),
        );

        assert_eq!(d.blocks()[0].kind, BlockKind::Subheading);
        assert_eq!(d.blocks()[0].content, "text");
        assert_eq!(patch.caret, Caret::new(0, 2));
        assert_eq!(patch.kind, EditKind::StyleChange);
    }

    #[test]
    fn test_toggle_style_twice_restores_set() {
        let mut d = doc(&["text"]);

        d.apply(
            Cmd::ToggleStyle {
                style: InlineStyle::Bold,
            },
            &Selection::collapsed(0, 0),
        );
        assert!(d.blocks()[0].styles.contains(InlineStyle::Bold));

        d.apply(
            Cmd::ToggleStyle {
                style: InlineStyle::Bold,
            },
            &Selection::collapsed(0, 0),
        );
        assert!(d.blocks()[0].styles.is_empty());
    }

    #[test]
    fn test_toggle_style_applies_to_selection_start_block() {
        let mut d = doc(&["one", "two"]);

        d.apply(
            Cmd::ToggleStyle {
                style: InlineStyle::Italic,
            },
            &Selection::new(Caret::new(1, 1), Caret::new(0, 2)),
        );

        assert!(d.blocks()[0].styles.contains(InlineStyle::Italic));
        assert!(d.blocks()[1].styles.is_empty());
    }

    // ============ Stale selection handling ============

    #[test]
    fn test_stale_block_index_materializes_body_block() {
        let mut d = doc(&["ab"]);

        let patch = d.apply(
            Cmd::InsertText { text: "x".into() },
            &Selection::collapsed(2, 0),
        );

        assert_eq!(contents(&d), vec!["ab", "", "x"]);
        assert_eq!(patch.caret, Caret::new(2, 1));
    }

    #[test]
    fn test_stale_offset_clamps_to_block_end() {
        let mut d = doc(&["ab"]);

        let patch = d.apply(
            Cmd::InsertText { text: "x".into() },
            &Selection::collapsed(0, 99),
        );

        assert_eq!(contents(&d), vec!["abx"]);
        assert_eq!(patch.caret, Caret::new(0, 3));
    }

    #[test]
    fn test_delete_never_leaves_zero_blocks() {
        let mut d = doc(&["a"]);

        d.apply(
            Cmd::DeleteBackward,
            &Selection::new(Caret::new(0, 0), Caret::new(0, 1)),
        );

        assert_eq!(contents(&d), vec![""]);
        assert_eq!(d.blocks().len(), 1);
    }

    // ============ Split/merge inverse ============

    #[test]
    fn test_split_then_merge_restores_content() {
        let mut d = doc(&["hello world"]);

        let split = d.apply(Cmd::InsertLineBreak, &Selection::collapsed(0, 5));
        assert_eq!(contents(&d), vec!["hello", " world"]);

        let merged = d.apply(Cmd::DeleteBackward, &Selection::caret(split.caret));

        assert_eq!(contents(&d), vec!["hello world"]);
        assert_eq!(merged.caret, Caret::new(0, 5));
    }
}
