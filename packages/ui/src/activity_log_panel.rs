use dioxus::prelude::*;

use crate::activity_log::{use_activity_log, Activity, Severity};
use crate::views::form_modal::capitalize;

const ACTIVITY_LOG_CSS: Asset = asset!("/assets/activity_log.css");

/// Requests sent from the console, newest first, with a chip per entity kind
/// to narrow the list. Rejected requests list the server's field messages.
#[component]
pub fn ActivityLogPanel() -> Element {
    let mut log = use_activity_log();

    let (visible, focus, chips, entries, empty) = {
        let state = log.read();
        let chips: Vec<(&'static str, String, usize)> = state
            .nouns()
            .into_iter()
            .map(|noun| (noun, format!("{}s", capitalize(noun)), state.failures(Some(noun))))
            .collect();
        (state.visible, state.focus, chips, state.shown(), state.is_empty())
    };
    if !visible {
        return rsx! {};
    }

    rsx! {
        document::Stylesheet { href: ACTIVITY_LOG_CSS }

        aside {
            class: "requests-panel",
            header {
                class: "requests-header",
                strong { "Requests" }
                nav {
                    class: "requests-chips",
                    button {
                        class: if focus.is_none() { "chip chip--active" } else { "chip" },
                        onclick: move |_| log.write().focus = None,
                        "All"
                    }
                    for (noun, label, failed) in chips {
                        button {
                            key: "{noun}",
                            class: if focus == Some(noun) { "chip chip--active" } else { "chip" },
                            onclick: move |_| log.write().focus = Some(noun),
                            "{label}"
                            if failed > 0 {
                                span { class: "chip-failures", "{failed}" }
                            }
                        }
                    }
                }
                button {
                    class: "requests-action",
                    disabled: empty,
                    onclick: move |_| log.write().clear(),
                    "Clear"
                }
                button {
                    class: "requests-action",
                    title: "Hide",
                    onclick: move |_| log.write().visible = false,
                    "✕"
                }
            }
            ol {
                class: "requests-list",
                if entries.is_empty() {
                    li { class: "requests-empty", "No requests sent yet." }
                }
                for (index, activity) in entries.into_iter().enumerate() {
                    RequestRow { key: "{index}", activity }
                }
            }
        }
    }
}

#[component]
fn RequestRow(activity: Activity) -> Element {
    let state = match activity.severity() {
        Severity::Done => "request request--done",
        Severity::Rejected => "request request--rejected",
        Severity::Failed => "request request--failed",
    };
    let fields = activity.field_errors();
    let summary = activity.summary();

    rsx! {
        li {
            class: state,
            span { class: "request-time", "{activity.time}" }
            span { class: "request-noun", "{activity.noun}" }
            span { class: "request-summary", "{summary}" }
            if !fields.is_empty() {
                ul {
                    class: "request-fields",
                    for (field, message) in fields {
                        li { key: "{field}", code { "{field}" } " {message}" }
                    }
                }
            }
        }
    }
}

/// Navbar button that opens the panel. Turns red while any request in the log
/// has failed.
#[component]
pub fn ActivityLogToggle() -> Element {
    let mut log = use_activity_log();
    let (count, failed) = {
        let state = log.read();
        (state.len(), state.failures(None))
    };

    rsx! {
        button {
            class: if failed > 0 { "requests-toggle requests-toggle--failed" } else { "requests-toggle" },
            title: "Requests sent to the API",
            onclick: move |_| {
                let visible = log.peek().visible;
                log.write().visible = !visible;
            },
            if failed > 0 {
                "Requests ({failed} failed)"
            } else if count > 0 {
                "Requests ({count})"
            } else {
                "Requests"
            }
        }
    }
}
