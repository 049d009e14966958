use dioxus::prelude::*;
use store::FormMode;
use ui::views::{OrderBulkModal, OrderListView, OrderModal};

use super::Toolbar;
use crate::Route;

#[component]
pub fn OrdersPage() -> Element {
    rsx! {
        Toolbar {
            title: "Orders",
            new: Route::OrderCreate {},
            update: Route::OrderUpdate {},
            delete: Route::OrderDelete {},
            bulk: Route::OrderBulk {},
        }
        OrderListView {}
        Outlet::<Route> {}
    }
}

#[component]
pub fn Orders() -> Element {
    rsx! {}
}

fn use_close() -> EventHandler<()> {
    let nav = use_navigator();
    EventHandler::new(move |_: ()| {
        nav.push(Route::Orders {});
    })
}

#[component]
pub fn OrderCreate() -> Element {
    let on_close = use_close();
    rsx! { OrderModal { mode: FormMode::Create, on_close } }
}

#[component]
pub fn OrderUpdate() -> Element {
    let on_close = use_close();
    rsx! { OrderModal { mode: FormMode::update(), on_close } }
}

#[component]
pub fn OrderDelete() -> Element {
    let on_close = use_close();
    rsx! { OrderModal { mode: FormMode::delete(), on_close } }
}

#[component]
pub fn OrderBulk() -> Element {
    let on_close = use_close();
    rsx! { OrderBulkModal { on_close } }
}
