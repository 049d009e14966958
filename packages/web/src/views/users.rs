use dioxus::prelude::*;
use store::{FormMode, Id};
use ui::views::{UserBulkModal, UserCardsView, UserDetailView, UserModal};

use super::Toolbar;
use crate::Route;

#[component]
pub fn UsersPage() -> Element {
    let nav = use_navigator();

    rsx! {
        Toolbar {
            title: "Users",
            new: Route::UserCreate {},
            update: Route::UserUpdate {},
            delete: Route::UserDelete {},
            bulk: Route::UserBulk {},
        }
        UserCardsView {
            on_open: move |id: Id| {
                nav.push(Route::UserDetail { id });
            },
        }
        Outlet::<Route> {}
    }
}

#[component]
pub fn Users() -> Element {
    rsx! {}
}

/// One user's page, reached by clicking a card.
#[component]
pub fn UserDetail(id: Id) -> Element {
    rsx! {
        Link { to: Route::Users {}, "← All users" }
        UserDetailView { id }
    }
}

fn use_close() -> EventHandler<()> {
    let nav = use_navigator();
    EventHandler::new(move |_: ()| {
        nav.push(Route::Users {});
    })
}

#[component]
pub fn UserCreate() -> Element {
    let on_close = use_close();
    rsx! { UserModal { mode: FormMode::Create, on_close } }
}

#[component]
pub fn UserUpdate() -> Element {
    let on_close = use_close();
    rsx! { UserModal { mode: FormMode::update(), on_close } }
}

#[component]
pub fn UserDelete() -> Element {
    let on_close = use_close();
    rsx! { UserModal { mode: FormMode::delete(), on_close } }
}

#[component]
pub fn UserBulk() -> Element {
    let on_close = use_close();
    rsx! { UserBulkModal { on_close } }
}
