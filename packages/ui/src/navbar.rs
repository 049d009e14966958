use dioxus::prelude::*;

use crate::activity_log_panel::ActivityLogToggle;
use crate::views::BusyIndicator;

/// Top bar: app title, the links passed as children, then the busy
/// indicator and the activity log toggle.
#[component]
pub fn Navbar(title: String, children: Element) -> Element {
    rsx! {
        header {
            class: "navbar",
            span { class: "navbar-title", "{title}" }
            nav { class: "navbar-links", {children} }
            div {
                class: "navbar-status",
                BusyIndicator {}
                ActivityLogToggle {}
            }
        }
    }
}
