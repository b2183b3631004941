//! Block renderer: pure mapping from blocks to the HTML fragments the
//! editable surface displays.
//!
//! The output honors the surface contract the engine's caret locator
//! relies on: every block renders as one `<div data-block="i">` root whose
//! content is a single text node. Kinds and styles become CSS classes only
//! (the list marker is a `::before` pseudo-element), so nothing ever
//! splits a block's text across multiple nodes.

use blockpad_engine::{Block, BlockKind, InlineStyle};

/// Render one block to its fragment. Two presentation quirks keep caret
/// offset arithmetic honest:
///
/// - a trailing space gets a `&nbsp;` suffix, because editable HTML
///   collapses trailing whitespace and would silently shorten the text node
/// - empty content renders as `<br>`, so the empty block keeps height and
///   stays clickable
pub fn block_fragment(index: usize, block: &Block) -> String {
    let mut classes = String::from("block");
    classes.push(' ');
    classes.push_str(kind_class(block.kind));
    for style in block.styles.iter() {
        classes.push(' ');
        classes.push_str(style_class(style));
    }

    let content = if block.content.is_empty() {
        "<br>".to_string()
    } else {
        let escaped = html_escape::encode_text(&block.content).into_owned();
        if block.content.ends_with(' ') {
            format!("{escaped}&nbsp;")
        } else {
            escaped
        }
    };

    format!("<div class=\"{classes}\" data-block=\"{index}\">{content}</div>")
}

/// Render the whole document surface: one addressable unit per block.
pub fn render_surface(blocks: &[Block]) -> String {
    blocks
        .iter()
        .enumerate()
        .map(|(i, block)| block_fragment(i, block))
        .collect()
}

fn kind_class(kind: BlockKind) -> &'static str {
    match kind {
        BlockKind::Heading => "block-heading",
        BlockKind::Subheading => "block-subheading",
        BlockKind::Body => "block-body",
        BlockKind::ListItem => "block-list-item",
    }
}

fn style_class(style: InlineStyle) -> &'static str {
    match style {
        InlineStyle::Bold => "style-bold",
        InlineStyle::Italic => "style-italic",
        InlineStyle::Underline => "style-underline",
    }
}
