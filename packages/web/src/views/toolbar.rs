use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant};

use crate::Route;

/// Page heading plus the links that open each modal over the list.
#[component]
pub fn Toolbar(title: String, new: Route, update: Route, delete: Route, bulk: Route) -> Element {
    rsx! {
        div {
            class: "page-header",
            h1 { "{title}" }
            div {
                class: "toolbar",
                Link {
                    to: new,
                    Button { variant: ButtonVariant::Primary, "New" }
                }
                Link {
                    to: update,
                    Button { variant: ButtonVariant::Outline, "Update" }
                }
                Link {
                    to: delete,
                    Button { variant: ButtonVariant::Destructive, "Delete" }
                }
                Link {
                    to: bulk,
                    Button { variant: ButtonVariant::Secondary, "Bulk create" }
                }
            }
        }
    }
}
