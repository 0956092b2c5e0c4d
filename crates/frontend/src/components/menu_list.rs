use calocheck_shared::concern::Phase;
use calocheck_shared::models::Menu;
use dioxus::prelude::*;

fn kcal(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.0} kcal"),
        None => "- kcal".to_string(),
    }
}

fn grams(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.1}g"),
        None => "-".to_string(),
    }
}

#[component]
pub fn MenuList(menus: Vec<Menu>, phase: Phase) -> Element {
    rsx! {
        if phase.is_loading() {
            p { class: "sheet-status", "Loading menus…" }
        }
        if let Some(msg) = phase.error() {
            p { class: "sheet-status error", "{msg}" }
        }
        if menus.is_empty() && phase == Phase::Ready {
            p { class: "sheet-status", "No menus match these filters." }
        }
        ul { class: "menu-list",
            for menu in menus {
                li { key: "{menu.id}", class: "menu-item",
                    if let Some(src) = &menu.image_url {
                        img { src: "{src}", alt: "{menu.name}" }
                    }
                    div { class: "menu-info",
                        strong { "{menu.name}" }
                        span { class: "kcal", "{kcal(menu.calories)}" }
                        div { class: "macros",
                            span { "P {grams(menu.protein)}" }
                            span { "F {grams(menu.fat)}" }
                            span { "C {grams(menu.carb)}" }
                        }
                    }
                }
            }
        }
    }
}
