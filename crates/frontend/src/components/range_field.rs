use calocheck_shared::filter::{Nutrient, Side};
use dioxus::prelude::*;

/// Min/max pair for one nutrient. Values are passed through as typed.
#[component]
pub fn RangeField(
    nutrient: Nutrient,
    min: String,
    max: String,
    on_change: EventHandler<(Side, String)>,
) -> Element {
    let unit = match nutrient {
        Nutrient::Calories => "kcal",
        _ => "g",
    };

    rsx! {
        div { class: "range-field",
            label { "{nutrient.label()} ({unit})" }
            div { class: "range-inputs",
                input {
                    r#type: "text",
                    inputmode: "numeric",
                    placeholder: "min",
                    value: "{min}",
                    oninput: move |evt: Event<FormData>| on_change.call((Side::Min, evt.value())),
                }
                span { "–" }
                input {
                    r#type: "text",
                    inputmode: "numeric",
                    placeholder: "max",
                    value: "{max}",
                    oninput: move |evt: Event<FormData>| on_change.call((Side::Max, evt.value())),
                }
            }
        }
    }
}
