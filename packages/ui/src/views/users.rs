use api::{ApiError, Users};
use dioxus::prelude::*;
use store::filter::{parse_bound, parse_date};
use store::models::format_amount;
use store::{BulkCreate, FormMode, FormState, Id, User, UserFilter, UserSchema};

use super::bulk_modal::{bulk_body, submit_bulk};
use super::form_modal::{form_body, modal_title, submit_form, ChoiceOptions};
use super::{ModalOverlay, PageControls};
use crate::activity_log::use_activity_log;
use crate::components::{Button, ButtonVariant, Input, Label};
use crate::console::{use_console, Console};

/// Raw text of the user filter panel.
#[derive(Clone, Debug, Default, PartialEq)]
struct UserFilterInput {
    username: String,
    min_total: String,
    max_total: String,
    min_orders: String,
    max_orders: String,
    from: String,
    to: String,
}

impl UserFilterInput {
    fn to_filter(&self) -> UserFilter {
        UserFilter {
            username: self.username.clone(),
            min_order_total: parse_bound(&self.min_total),
            max_order_total: parse_bound(&self.max_total),
            min_orders: parse_bound(&self.min_orders),
            max_orders: parse_bound(&self.max_orders),
            ordered_from: parse_date(&self.from),
            ordered_to: parse_date(&self.to),
        }
    }
}

fn total_spent(user: &User) -> f64 {
    user.orders.iter().map(|o| o.total_amount).sum()
}

/// Collapsible filter panel, user cards and page controls. Clicking a card
/// calls `on_open` with the user's id.
#[component]
pub fn UserCardsView(on_open: EventHandler<Id>) -> Element {
    let mut console = use_console();
    let mut input = use_signal(UserFilterInput::default);
    let mut show_filters = use_signal(|| false);

    let _loader = use_resource(move || async move {
        console.refresh_users().await;
    });

    let search = move |_: MouseEvent| {
        let filter = input.read().to_filter();
        console.users.write().apply_filters(&filter);
        console.user_filter.set(filter);
    };

    let reset = move |_: MouseEvent| {
        input.set(UserFilterInput::default());
        console.user_filter.set(UserFilter::default());
        console.users.write().reset_filters();
    };

    let store = console.users.read();
    let users = store.page_items().to_vec();
    let (page, page_count, page_size) = (store.page(), store.page_count(), store.page_size());
    let (total, loaded) = (store.filtered().len(), !store.is_empty());
    drop(store);
    let current = input();

    rsx! {
        section {
            class: "list-view",
            div {
                class: "filter-panel",
                Button {
                    variant: ButtonVariant::Ghost,
                    onclick: move |_: MouseEvent| show_filters.set(!show_filters()),
                    if show_filters() { "▾ Filters" } else { "▸ Filters" }
                }
                if show_filters() {
                    div {
                        class: "filter-grid",
                        div {
                            class: "field",
                            Label { html_for: "user-filter-name", "Username" }
                            Input {
                                id: "user-filter-name",
                                value: current.username.clone(),
                                oninput: move |evt: FormEvent| input.write().username = evt.value(),
                            }
                        }
                        div {
                            class: "field",
                            Label { html_for: "user-filter-min-total", "Order total from" }
                            Input {
                                id: "user-filter-min-total",
                                r#type: "number",
                                value: current.min_total.clone(),
                                oninput: move |evt: FormEvent| input.write().min_total = evt.value(),
                            }
                        }
                        div {
                            class: "field",
                            Label { html_for: "user-filter-max-total", "Order total to" }
                            Input {
                                id: "user-filter-max-total",
                                r#type: "number",
                                value: current.max_total.clone(),
                                oninput: move |evt: FormEvent| input.write().max_total = evt.value(),
                            }
                        }
                        div {
                            class: "field",
                            Label { html_for: "user-filter-min-orders", "Orders from" }
                            Input {
                                id: "user-filter-min-orders",
                                r#type: "number",
                                value: current.min_orders.clone(),
                                oninput: move |evt: FormEvent| input.write().min_orders = evt.value(),
                            }
                        }
                        div {
                            class: "field",
                            Label { html_for: "user-filter-max-orders", "Orders to" }
                            Input {
                                id: "user-filter-max-orders",
                                r#type: "number",
                                value: current.max_orders.clone(),
                                oninput: move |evt: FormEvent| input.write().max_orders = evt.value(),
                            }
                        }
                        div {
                            class: "field",
                            Label { html_for: "user-filter-from", "Ordered on or after" }
                            Input {
                                id: "user-filter-from",
                                r#type: "date",
                                value: current.from.clone(),
                                oninput: move |evt: FormEvent| input.write().from = evt.value(),
                            }
                        }
                        div {
                            class: "field",
                            Label { html_for: "user-filter-to", "Ordered on or before" }
                            Input {
                                id: "user-filter-to",
                                r#type: "date",
                                value: current.to.clone(),
                                oninput: move |evt: FormEvent| input.write().to = evt.value(),
                            }
                        }
                        div {
                            class: "filter-actions",
                            Button { onclick: search, "Search" }
                            Button { variant: ButtonVariant::Outline, onclick: reset, "Reset" }
                        }
                    }
                }
            }

            if users.is_empty() {
                p {
                    class: "empty-state",
                    if loaded { "No users match these filters." } else { "No users yet." }
                }
            } else {
                div {
                    class: "card-grid",
                    for user in users {
                        button {
                            key: "{user.id}",
                            class: "user-card",
                            onclick: move |_| on_open.call(user.id),
                            h3 { "{user.username}" }
                            p { class: "muted", "#{user.id}" }
                            p {
                                "{user.order_count()} orders · {format_amount(total_spent(&user))}"
                            }
                        }
                    }
                }
            }

            PageControls {
                page,
                page_count,
                page_size,
                total,
                on_page: move |page| console.users.write().set_page(page),
                on_page_size: move |size| console.users.write().set_page_size(size),
            }
        }
    }
}

/// One user fetched by id, with every order and the phones in it.
#[component]
pub fn UserDetailView(id: Id) -> Element {
    let console = use_console();

    let user = use_resource(use_reactive!(|(id,)| async move {
        let gateway = console.gateway::<Users>();
        console.track(gateway.get(id)).await
    }));

    let content = match &*user.read() {
        None => rsx! { p { class: "empty-state", "Loading user…" } },
        Some(Err(ApiError::NotFound(_))) => rsx! {
            p { class: "form-notice", "User {id} was not found." }
        },
        Some(Err(e)) => rsx! {
            p { class: "form-notice", "Could not load user {id}: {e.message()}" }
        },
        Some(Ok(user)) => user_detail(user),
    };

    rsx! {
        section { class: "detail-view", {content} }
    }
}

fn user_detail(user: &User) -> Element {
    let spent = format_amount(total_spent(user));

    rsx! {
        header {
            class: "detail-header",
            h2 { "{user.username}" }
            p { class: "muted", "#{user.id} · {user.order_count()} orders · {spent}" }
        }
        if user.orders.is_empty() {
            p { class: "empty-state", "This user has no orders." }
        }
        for order in user.orders.iter() {
            article {
                key: "{order.id}",
                class: "order-card",
                header {
                    class: "order-card-header",
                    strong { "Order #{order.id}" }
                    span {
                        class: "muted",
                        {order.order_date.map(|d| d.to_string()).unwrap_or_else(|| "undated".to_string())}
                    }
                    span { class: "numeric", "{format_amount(order.total_amount)}" }
                }
                ul {
                    for phone in order.phones.iter() {
                        li {
                            key: "{phone.id}",
                            "{phone.label()} · {format_amount(phone.price)}"
                        }
                    }
                }
            }
        }
    }
}

/// Users embed their orders, so a user change reloads orders as well.
async fn after_user_change(console: Console) {
    console.refresh_orders().await;
}

#[component]
pub fn UserModal(mode: FormMode, on_close: EventHandler<()>) -> Element {
    let console = use_console();
    let log = use_activity_log();
    let form = use_signal(|| FormState::<UserSchema>::new(mode));

    let on_submit = EventHandler::new(move |_: ()| {
        spawn(async move {
            if submit_form::<UserSchema, Users>(form, console, log).await {
                after_user_change(console).await;
                on_close.call(());
            }
        });
    });

    let targets = console.users.read().raw().to_vec();

    rsx! {
        ModalOverlay {
            title: modal_title(mode, "user"),
            on_close,
            {form_body(form, targets, ChoiceOptions::new(), on_submit, on_close)}
        }
    }
}

#[component]
pub fn UserBulkModal(on_close: EventHandler<()>) -> Element {
    let console = use_console();
    let log = use_activity_log();
    let bulk = use_signal(BulkCreate::<UserSchema>::new);

    let on_submit = EventHandler::new(move |_: ()| {
        spawn(async move {
            if submit_bulk::<UserSchema, Users>(bulk, console, log).await {
                after_user_change(console).await;
                on_close.call(());
            }
        });
    });

    rsx! {
        ModalOverlay {
            title: "Bulk create users",
            wide: true,
            on_close,
            {bulk_body(bulk, ChoiceOptions::new(), on_submit, on_close)}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::filter::Filter;

    #[test]
    fn test_filter_input_parses_bounds() {
        let input = UserFilterInput {
            username: "an".to_string(),
            min_total: "100".to_string(),
            max_orders: "3".to_string(),
            from: "2024-01-01".to_string(),
            to: "not a date".to_string(),
            ..Default::default()
        };
        let filter = input.to_filter();
        assert_eq!(filter.min_order_total, Some(100.0));
        assert_eq!(filter.max_orders, Some(3));
        assert_eq!(filter.ordered_from, parse_date("2024-01-01"));
        assert_eq!(filter.ordered_to, None);
        assert!(!filter.is_empty());
        assert!(UserFilterInput::default().to_filter().is_empty());
    }
}
