use dioxus::prelude::*;

/// Host element for the Kakao map plus the controls drawn over it.
#[component]
pub fn MapView(
    container_id: &'static str,
    show_search_here: bool,
    status: Option<String>,
    on_search_here: EventHandler<()>,
) -> Element {
    rsx! {
        section { class: "map-area",
            div { id: container_id, class: "map-container" }
            if show_search_here {
                button {
                    class: "search-here",
                    onclick: move |_| on_search_here.call(()),
                    "Search this area"
                }
            }
            if let Some(text) = status {
                div { class: "map-status", "{text}" }
            }
        }
    }
}
