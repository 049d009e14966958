use dioxus::prelude::*;
use ui::icons::{FaCartShopping, FaMobileScreen, FaUsers};
use ui::{ActivityLogPanel, Icon, Navbar};

use crate::Route;

/// Navbar and activity log around every page.
#[component]
pub fn Shell() -> Element {
    rsx! {
        Navbar {
            title: "Phone Shop Admin",
            Link {
                to: Route::Phones {},
                active_class: "active",
                Icon { icon: FaMobileScreen, width: 14, height: 14 }
                "Phones"
            }
            Link {
                to: Route::Users {},
                active_class: "active",
                Icon { icon: FaUsers, width: 14, height: 14 }
                "Users"
            }
            Link {
                to: Route::Orders {},
                active_class: "active",
                Icon { icon: FaCartShopping, width: 14, height: 14 }
                "Orders"
            }
        }

        main {
            class: "page",
            Outlet::<Route> {}
        }

        ActivityLogPanel {}
    }
}

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        div {
            class: "empty-state",
            h1 { "Page not found" }
            p { "Nothing lives at /{path}." }
            Link { to: Route::Phones {}, "Back to phones" }
        }
    }
}
