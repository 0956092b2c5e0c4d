use dioxus::prelude::*;

#[component]
pub fn BottomSheet(
    open: bool,
    #[props(default = "Menu".to_string())] title: String,
    on_close: EventHandler<()>,
    children: Element,
) -> Element {
    if !open {
        return rsx! {};
    }

    rsx! {
        div {
            class: "sheet-dim",
            onclick: move |_| on_close.call(()),
        }
        div {
            class: "bottom-sheet",
            role: "dialog",
            onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
            div { class: "sheet-header",
                h2 { "{title}" }
                button {
                    class: "secondary close",
                    aria_label: "Close",
                    onclick: move |_| on_close.call(()),
                    "×"
                }
            }
            div { class: "sheet-body", {children} }
        }
    }
}
