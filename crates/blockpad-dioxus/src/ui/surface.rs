//! DOM-backed implementation of the engine's surface boundary.
//!
//! The rendered surface tags every block root with `data-block`, so the
//! JS side resolves a native selection endpoint by walking from the
//! anchor/focus node up to the nearest tagged root and reporting its index
//! - from the engine's point of view, owning a block is then a direct
//! lookup. Caret placement and refocusing are fire-and-forget scripts;
//! selection probing is async and handled by the app before it routes an
//! edit.

use blockpad_engine::{Caret, EditSurface, RawSelection};
use dioxus::prelude::*;

/// Escape a string so it's safe to embed inside a JS string literal
/// (double-quoted).
pub fn js_string_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c < '\x20' => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// JS that replaces the surface's rendered content.
pub fn set_surface_html_js(surface_id: &str, html: &str) -> String {
    format!(
        r#"(function() {{
            var el = document.getElementById({id_js});
            if (!el) return;
            el.innerHTML = {html_js};
        }})();"#,
        id_js = js_string_escape(surface_id),
        html_js = js_string_escape(html),
    )
}

/// JS that reports the current selection as
/// `[anchorBlock, anchorOffset, focusBlock, focusOffset]`, with -1 blocks
/// when an endpoint lies outside any tagged block root.
pub fn probe_selection_js(surface_id: &str) -> String {
    format!(
        r#"(function() {{
            var resolve = function(node) {{
                while (node && node.id !== {id_js}) {{
                    if (node.dataset && node.dataset.block !== undefined) {{
                        return parseInt(node.dataset.block, 10);
                    }}
                    node = node.parentNode;
                }}
                return -1;
            }};
            var sel = window.getSelection();
            if (!sel || sel.rangeCount === 0) {{ dioxus.send([-1, 0, -1, 0]); return; }}
            dioxus.send([
                resolve(sel.anchorNode), sel.anchorOffset,
                resolve(sel.focusNode), sel.focusOffset
            ]);
        }})();"#,
        id_js = js_string_escape(surface_id),
    )
}

fn place_caret_js(surface_id: &str, caret: Caret) -> String {
    format!(
        r#"(function() {{
            var root = document.getElementById({id_js});
            var el = root && root.querySelector('[data-block="{block}"]');
            if (!el) return;
            var range = document.createRange();
            var node = el.firstChild;
            if (node && node.nodeType === Node.TEXT_NODE) {{
                range.setStart(node, Math.min({offset}, node.length));
            }} else {{
                range.setStart(el, 0);
            }}
            range.collapse(true);
            var sel = window.getSelection();
            sel.removeAllRanges();
            sel.addRange(range);
        }})();"#,
        id_js = js_string_escape(surface_id),
        block = caret.block,
        offset = caret.offset,
    )
}

fn focus_js(surface_id: &str) -> String {
    format!(
        r#"(function() {{
            var el = document.getElementById({id_js});
            if (el) el.focus();
        }})();"#,
        id_js = js_string_escape(surface_id),
    )
}

/// The live editable region. Holds the last probed raw selection and the
/// block count of the last render, which is all the engine needs to
/// resolve and place carets; the DOM itself stays on the JS side.
#[derive(Debug, Clone, PartialEq)]
pub struct WebSurface {
    surface_id: &'static str,
    block_count: usize,
    raw: Option<RawSelection<usize>>,
}

impl WebSurface {
    pub fn new(surface_id: &'static str) -> Self {
        Self {
            surface_id,
            block_count: 0,
            raw: None,
        }
    }

    /// Record the block count of the render that just went out; placement
    /// against blocks that no longer exist fails instead of running JS.
    pub fn set_block_count(&mut self, count: usize) {
        self.block_count = count;
    }

    /// Store a probed selection. Node references arrive as the block
    /// indices the probe script resolved.
    pub fn set_raw(&mut self, anchor: (usize, usize), focus: (usize, usize)) {
        self.raw = Some(RawSelection { anchor, focus });
    }

    pub fn clear_raw(&mut self) {
        self.raw = None;
    }
}

impl EditSurface for WebSurface {
    type Node = usize;

    fn raw_selection(&self) -> Option<RawSelection<usize>> {
        self.raw.clone()
    }

    fn owning_block(&self, node: &usize) -> Option<usize> {
        (*node < self.block_count).then_some(*node)
    }

    fn place_caret(&mut self, caret: Caret) -> bool {
        if caret.block >= self.block_count {
            log::debug!(
                "caret placement skipped: block {} not in last render ({} blocks)",
                caret.block,
                self.block_count
            );
            return false;
        }
        document::eval(&place_caret_js(self.surface_id, caret));
        // Keep the logical view of the native selection in step
        self.raw = Some(RawSelection {
            anchor: (caret.block, caret.offset),
            focus: (caret.block, caret.offset),
        });
        true
    }

    fn focus(&mut self) {
        document::eval(&focus_js(self.surface_id));
    }
}
