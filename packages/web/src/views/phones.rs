//! `/phones` keeps the list mounted; each sub-route opens a modal over it.

use dioxus::prelude::*;
use store::FormMode;
use ui::views::{PhoneBulkModal, PhoneListView, PhoneModal};

use super::Toolbar;
use crate::Route;

#[component]
pub fn PhonesPage() -> Element {
    rsx! {
        Toolbar {
            title: "Phones",
            new: Route::PhoneCreate {},
            update: Route::PhoneUpdate {},
            delete: Route::PhoneDelete {},
            bulk: Route::PhoneBulk {},
        }
        PhoneListView {}
        Outlet::<Route> {}
    }
}

#[component]
pub fn Phones() -> Element {
    rsx! {}
}

fn use_close() -> EventHandler<()> {
    let nav = use_navigator();
    EventHandler::new(move |_: ()| {
        nav.push(Route::Phones {});
    })
}

#[component]
pub fn PhoneCreate() -> Element {
    let on_close = use_close();
    rsx! { PhoneModal { mode: FormMode::Create, on_close } }
}

#[component]
pub fn PhoneUpdate() -> Element {
    let on_close = use_close();
    rsx! { PhoneModal { mode: FormMode::update(), on_close } }
}

#[component]
pub fn PhoneDelete() -> Element {
    let on_close = use_close();
    rsx! { PhoneModal { mode: FormMode::delete(), on_close } }
}

#[component]
pub fn PhoneBulk() -> Element {
    let on_close = use_close();
    rsx! { PhoneBulkModal { on_close } }
}
