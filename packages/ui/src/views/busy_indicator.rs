use dioxus::prelude::*;

use crate::console::use_console;
use crate::icons::FaSpinner;
use crate::Icon;

/// Spinner shown while any list fetch or mutation is outstanding.
#[component]
pub fn BusyIndicator() -> Element {
    let console = use_console();

    if !console.is_busy() {
        return rsx! {};
    }

    rsx! {
        span {
            class: "busy-indicator",
            title: "Working…",
            Icon { icon: FaSpinner, width: 14, height: 14 }
            " Loading"
        }
    }
}
