use blockpad_engine::{BlockKind, InlineStyle};
use dioxus::prelude::*;

/// Block kind selector plus inline style toggles for the caret block.
#[component]
pub fn Toolbar(
    current_kind: BlockKind,
    on_set_kind: Callback<BlockKind>,
    on_toggle_style: Callback<InlineStyle>,
) -> Element {
    rsx! {
        div {
            class: "toolbar",
            select {
                class: "toolbar-kind",
                value: current_kind.name(),
                onchange: move |evt: FormEvent| {
                    if let Some(kind) = BlockKind::from_name(&evt.value()) {
                        on_set_kind.call(kind);
                    }
                },
                option { value: "heading", "Heading" }
                option { value: "subheading", "Subheading" }
                option { value: "body", "Body" }
                option { value: "list-item", "List item" }
            }
            button {
                class: "toolbar-style toolbar-bold",
                onclick: move |_| on_toggle_style.call(InlineStyle::Bold),
                "B"
            }
            button {
                class: "toolbar-style toolbar-italic",
                onclick: move |_| on_toggle_style.call(InlineStyle::Italic),
                "I"
            }
            button {
                class: "toolbar-style toolbar-underline",
                onclick: move |_| on_toggle_style.call(InlineStyle::Underline),
                "U"
            }
        }
    }
}
