use dioxus::prelude::*;

use store::{ConsoleConfig, Id};
use ui::ConsoleProvider;
use views::{
    NotFound, OrderBulk, OrderCreate, OrderDelete, OrderUpdate, Orders, OrdersPage, PhoneBulk,
    PhoneCreate, PhoneDelete, PhoneUpdate, Phones, PhonesPage, Shell, UserBulk, UserCreate,
    UserDelete, UserDetail, UserUpdate, Users, UsersPage,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
        #[route("/")]
        Root {},
        #[nest("/phones")]
            #[layout(PhonesPage)]
                #[route("/")]
                Phones {},
                #[route("/new")]
                PhoneCreate {},
                #[route("/update")]
                PhoneUpdate {},
                #[route("/delete")]
                PhoneDelete {},
                #[route("/bulk")]
                PhoneBulk {},
            #[end_layout]
        #[end_nest]
        #[nest("/users")]
            #[layout(UsersPage)]
                #[route("/")]
                Users {},
                #[route("/new")]
                UserCreate {},
                #[route("/update")]
                UserUpdate {},
                #[route("/delete")]
                UserDelete {},
                #[route("/bulk")]
                UserBulk {},
            #[end_layout]
            #[route("/:id")]
            UserDetail { id: Id },
        #[end_nest]
        #[nest("/orders")]
            #[layout(OrdersPage)]
                #[route("/")]
                Orders {},
                #[route("/new")]
                OrderCreate {},
                #[route("/update")]
                OrderUpdate {},
                #[route("/delete")]
                OrderDelete {},
                #[route("/bulk")]
                OrderBulk {},
            #[end_layout]
        #[end_nest]
        #[route("/:..segments")]
        NotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

/// Bundled `console.toml`, with the API base URL overridable at build time.
fn load_config() -> ConsoleConfig {
    let config = match ConsoleConfig::from_toml(include_str!("../console.toml")) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Invalid {}, using defaults: {}", ConsoleConfig::filename(), e);
            ConsoleConfig::default()
        }
    };
    match option_env!("CONSOLE_API_BASE_URL") {
        Some(base_url) => config.with_base_url(base_url),
        None => config,
    }
}

#[component]
fn App() -> Element {
    let config = use_hook(load_config);

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: ui::CONSOLE_CSS }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        ConsoleProvider {
            config,
            Router::<Route> {}
        }
    }
}

/// Redirect `/` to `/phones`
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    nav.replace(Route::Phones {});
    rsx! {}
}
