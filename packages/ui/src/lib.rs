//! Shared UI for the admin console: the console context, list views, and the
//! create / update / delete / bulk modals for phones, users and orders.

use dioxus::prelude::*;

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod views;

pub const CONSOLE_CSS: Asset = asset!("/assets/console.css");

mod console;
pub use console::{use_console, Console, ConsoleProvider};

mod navbar;
pub use navbar::Navbar;

pub mod activity_log;
pub use activity_log::{
    record_activity, use_activity_log, Activity, ActivityLog, Affected, Operation, Severity,
};

mod activity_log_panel;
pub use activity_log_panel::{ActivityLogPanel, ActivityLogToggle};
