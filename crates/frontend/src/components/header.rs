use dioxus::prelude::*;

/// Placeholder targets; the locator is the only page.
const NAV_LINKS: [(&str, &str); 3] = [("Home", "#"), ("Brands", "#"), ("Stores", "#")];
const ACTIVE_LINK: &str = "Stores";

#[component]
pub fn Header() -> Element {
    rsx! {
        header { class: "header",
            h1 { class: "logo", "CaloCheck" }
            nav { class: "nav",
                for (label, href) in NAV_LINKS {
                    a { href: "{href}", class: if label == ACTIVE_LINK { "active" } else { "" }, "{label}" }
                }
            }
            button { class: "secondary login", "Login" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_links_stay_on_page() {
        assert!(NAV_LINKS.iter().all(|(_, href)| *href == "#"));
        assert!(NAV_LINKS.iter().any(|(label, _)| *label == ACTIVE_LINK));
    }
}
