use blockpad_engine::{
    BlockKind, Cmd, Document, InlineStyle, Patch, Selection, locate_selection, reconcile,
};
use dioxus::prelude::*;

use crate::render::render_surface;
use crate::ui::surface::{WebSurface, probe_selection_js, set_surface_html_js};

const BLOCKPAD_CSS: &str = include_str!("../assets/blockpad.css");

/// DOM id of the editable region. All surface scripts key off this id.
pub const SURFACE_ID: &str = "blockpad-surface";

#[component]
pub fn App(initial_kind: BlockKind) -> Element {
    let mut doc = use_signal(move || {
        let mut doc = Document::new();
        if initial_kind != BlockKind::Body {
            doc.apply(
                Cmd::SetKind { kind: initial_kind },
                &Selection::collapsed(0, 0),
            );
        }
        doc
    });
    let mut selection = use_signal(|| Selection::collapsed(0, 0));
    let mut surface = use_signal(|| WebSurface::new(SURFACE_ID));
    let mut pending = use_signal(|| None::<Patch>);
    let mut render_version = use_signal(|| 0u64);

    // Probe the native selection and fold it back into the logical one.
    // Endpoints outside the surface leave the logical selection as-is.
    let mut refresh_selection = move || {
        spawn(async move {
            let mut eval = document::eval(&probe_selection_js(SURFACE_ID));
            let Ok(probed) = eval.recv::<Vec<i64>>().await else {
                return;
            };
            let [anchor_block, anchor_offset, focus_block, focus_offset] = probed[..] else {
                return;
            };
            if anchor_block < 0 || focus_block < 0 {
                surface.write().clear_raw();
                return;
            }
            surface.write().set_raw(
                (anchor_block as usize, anchor_offset.max(0) as usize),
                (focus_block as usize, focus_offset.max(0) as usize),
            );
            let located = locate_selection(&*surface.read(), &doc.peek());
            if let Some(sel) = located {
                selection.set(sel);
            }
        });
    };

    // Single path for every edit: apply against the last known selection,
    // collapse the selection onto the returned caret, and queue the patch
    // for reconciliation after the next render.
    let mut route = move |cmd: Cmd| {
        let sel = *selection.peek();
        let patch = doc.write().apply(cmd, &sel);
        selection.set(Selection::caret(patch.caret));
        pending.set(Some(patch));
        render_version += 1;
    };

    // Re-render the surface whenever an edit lands. The version counter is
    // the sole reactive dependency; document reads happen inside the task
    // so intermediate writes don't retrigger the effect.
    use_effect(move || {
        let _version = render_version();
        spawn(async move {
            let html = {
                let doc = doc.peek();
                surface.write().set_block_count(doc.blocks().len());
                render_surface(doc.blocks())
            };
            let _ = document::eval(&set_surface_html_js(SURFACE_ID, &html)).await;
            if let Some(patch) = pending.write().take() {
                reconcile(&mut *surface.write(), &patch);
            }
        });
    });

    let current_kind = {
        let doc = doc.read();
        let sel = selection.read();
        doc.blocks()
            .get(sel.focus.block)
            .map(|block| block.kind)
            .unwrap_or(BlockKind::Body)
    };

    rsx! {
        style { {BLOCKPAD_CSS} }
        div {
            class: "app-container",
            super::components::Toolbar {
                current_kind,
                on_set_kind: move |kind: BlockKind| route(Cmd::SetKind { kind }),
                on_toggle_style: move |style: InlineStyle| route(Cmd::ToggleStyle { style }),
            }
            div {
                id: SURFACE_ID,
                class: "surface",
                contenteditable: "true",
                spellcheck: "false",
                onkeydown: move |evt: KeyboardEvent| {
                    let mods = evt.modifiers();
                    if mods.ctrl() || mods.meta() || mods.alt() {
                        return;
                    }
                    match evt.key() {
                        Key::Enter => {
                            evt.prevent_default();
                            route(Cmd::InsertLineBreak);
                        }
                        Key::Backspace => {
                            evt.prevent_default();
                            route(Cmd::DeleteBackward);
                        }
                        Key::Delete => {
                            evt.prevent_default();
                            route(Cmd::DeleteForward);
                        }
                        Key::Character(text) => {
                            evt.prevent_default();
                            route(Cmd::InsertText { text });
                        }
                        _ => {}
                    }
                },
                onkeyup: move |evt: KeyboardEvent| {
                    // Caret movement keys change the native selection without
                    // going through the edit path.
                    if matches!(
                        evt.key(),
                        Key::ArrowUp
                            | Key::ArrowDown
                            | Key::ArrowLeft
                            | Key::ArrowRight
                            | Key::Home
                            | Key::End
                    ) {
                        refresh_selection();
                    }
                },
                onmouseup: move |_| refresh_selection(),
                onfocusin: move |_| refresh_selection(),
            }
        }
    }
}
