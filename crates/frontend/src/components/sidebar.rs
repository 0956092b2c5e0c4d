use calocheck_shared::filter::{FilterState, Nutrient, Side, CATEGORIES};
use dioxus::prelude::*;

use crate::components::range_field::RangeField;

/// Button text only; a new search replaces one still in flight.
fn search_label(searching: bool) -> &'static str {
    if searching {
        "Searching…"
    } else {
        "Search"
    }
}

/// Filter form. Edits go to `draft`; nothing is sent until Search is pressed.
#[component]
pub fn Sidebar(draft: Signal<FilterState>, searching: bool, on_search: EventHandler<()>) -> Element {
    let current = draft.read().clone();

    rsx! {
        aside { class: "sidebar",
            div { class: "panel",
                h3 { "Category" }
                for (key, name) in CATEGORIES {
                    label { class: "checkbox",
                        input {
                            r#type: "checkbox",
                            checked: current.is_category_active(key),
                            onchange: move |_| draft.write().toggle_category(key),
                        }
                        "{name}"
                    }
                }
            }

            div { class: "panel",
                h3 { "Nutrition" }
                for nutrient in Nutrient::ALL {
                    RangeField {
                        key: "{nutrient.key()}",
                        nutrient: nutrient,
                        min: current.bound(nutrient, Side::Min).to_string(),
                        max: current.bound(nutrient, Side::Max).to_string(),
                        on_change: move |(side, value): (Side, String)| {
                            draft.write().set_bound(nutrient, side, &value);
                        },
                    }
                }
            }

            button {
                class: "search",
                onclick: move |_| on_search.call(()),
                "{search_label(searching)}"
            }
        }
    }
}
