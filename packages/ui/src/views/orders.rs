use std::collections::BTreeSet;

use api::Orders;
use dioxus::prelude::*;
use store::filter::{parse_bound, parse_date, usernames};
use store::models::format_amount;
use store::{BulkCreate, FormMode, FormState, Id, OrderFilter, OrderSchema, Phone, User};

use super::bulk_modal::{bulk_body, submit_bulk};
use super::form_modal::{form_body, modal_title, submit_form, ChoiceOption, ChoiceOptions};
use super::{ModalOverlay, PageControls};
use crate::activity_log::use_activity_log;
use crate::components::{Button, ButtonVariant, Input};
use crate::console::{use_console, Console};

/// Filter bar and order table. Each row expands to show its phones.
#[component]
pub fn OrderListView() -> Element {
    let mut console = use_console();
    let mut username = use_signal(String::new);
    let mut min_total = use_signal(String::new);
    let mut max_total = use_signal(String::new);
    let mut from = use_signal(String::new);
    let mut to = use_signal(String::new);
    let mut expanded = use_signal(BTreeSet::<Id>::new);

    let _loader = use_resource(move || async move {
        console.refresh_orders().await;
    });

    let search = move |_: MouseEvent| {
        let filter = OrderFilter {
            username: username(),
            min_total: parse_bound(&min_total()),
            max_total: parse_bound(&max_total()),
            ordered_from: parse_date(&from()),
            ordered_to: parse_date(&to()),
            ..Default::default()
        }
        .with_users(console.users.read().raw());
        console.orders.write().apply_filters(&filter);
        console.order_filter.set(filter);
    };

    let reset = move |_: MouseEvent| {
        for mut field in [username, min_total, max_total, from, to] {
            field.set(String::new());
        }
        console.order_filter.set(OrderFilter::default());
        console.orders.write().reset_filters();
    };

    let names = usernames(console.users.read().raw());
    let store = console.orders.read();
    let orders = store.page_items().to_vec();
    let (page, page_count, page_size) = (store.page(), store.page_count(), store.page_size());
    let (total, loaded) = (store.filtered().len(), !store.is_empty());
    drop(store);
    let open = expanded();

    rsx! {
        section {
            class: "list-view",
            div {
                class: "filter-bar",
                Input { placeholder: "Username", value: username(), oninput: move |evt: FormEvent| username.set(evt.value()) }
                Input { r#type: "number", placeholder: "Min total", value: min_total(), oninput: move |evt: FormEvent| min_total.set(evt.value()) }
                Input { r#type: "number", placeholder: "Max total", value: max_total(), oninput: move |evt: FormEvent| max_total.set(evt.value()) }
                Input { r#type: "date", value: from(), oninput: move |evt: FormEvent| from.set(evt.value()) }
                Input { r#type: "date", value: to(), oninput: move |evt: FormEvent| to.set(evt.value()) }
                Button { onclick: search, "Search" }
                Button { variant: ButtonVariant::Outline, onclick: reset, "Reset" }
            }

            if orders.is_empty() {
                p {
                    class: "empty-state",
                    if loaded { "No orders match these filters." } else { "No orders yet." }
                }
            } else {
                table {
                    class: "data-table",
                    thead {
                        tr {
                            th {}
                            th { "ID" }
                            th { "User" }
                            th { "Date" }
                            th { class: "numeric", "Total" }
                        }
                    }
                    tbody {
                        for order in orders {
                            tr {
                                key: "{order.id}",
                                class: "expandable",
                                onclick: move |_| {
                                    let mut set = expanded.write();
                                    if !set.remove(&order.id) {
                                        set.insert(order.id);
                                    }
                                },
                                td { if open.contains(&order.id) { "▾" } else { "▸" } }
                                td { "{order.id}" }
                                td { {names.get(&order.user_id).cloned().unwrap_or_else(|| format!("user {}", order.user_id))} }
                                td { {order.order_date.map(|d| d.to_string()).unwrap_or_default()} }
                                td { class: "numeric", "{format_amount(order.total_amount)}" }
                            }
                            if open.contains(&order.id) {
                                tr {
                                    key: "{order.id}-phones",
                                    class: "expanded-row",
                                    td {}
                                    td {
                                        colspan: 4,
                                        if order.phones.is_empty() {
                                            span { class: "muted", "No phones." }
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
                    }
                }
            }

            PageControls {
                page,
                page_count,
                page_size,
                total,
                on_page: move |page| console.orders.write().set_page(page),
                on_page_size: move |size| console.orders.write().set_page_size(size),
            }
        }
    }
}

/// User and phone choices for order forms.
fn order_options(users: &[User], phones: &[Phone]) -> ChoiceOptions {
    ChoiceOptions::from([
        (
            "userId",
            users
                .iter()
                .map(|u| ChoiceOption::new(u.id, u.username.clone()))
                .collect(),
        ),
        (
            "smartphoneIds",
            phones
                .iter()
                .map(|p| {
                    ChoiceOption::new(p.id, format!("{} · {}", p.label(), format_amount(p.price)))
                })
                .collect(),
        ),
    ])
}

/// Order forms pick from users and phones; load whichever is still empty.
fn use_order_choices(console: Console) -> ChoiceOptions {
    let _loader = use_resource(move || async move {
        if console.phones.peek().is_empty() {
            console.refresh_phones().await;
        }
        if console.users.peek().is_empty() {
            console.refresh_users().await;
        }
    });
    order_options(console.users.read().raw(), console.phones.read().raw())
}

#[component]
pub fn OrderModal(mode: FormMode, on_close: EventHandler<()>) -> Element {
    let console = use_console();
    let log = use_activity_log();
    let form = use_signal(|| FormState::<OrderSchema>::new(mode));
    let options = use_order_choices(console);

    let on_submit = EventHandler::new(move |_: ()| {
        spawn(async move {
            if submit_form::<OrderSchema, Orders>(form, console, log).await {
                console.refresh_orders().await;
                on_close.call(());
            }
        });
    });

    let targets = console.orders.read().raw().to_vec();

    rsx! {
        ModalOverlay {
            title: modal_title(mode, "order"),
            on_close,
            {form_body(form, targets, options, on_submit, on_close)}
        }
    }
}

#[component]
pub fn OrderBulkModal(on_close: EventHandler<()>) -> Element {
    let console = use_console();
    let log = use_activity_log();
    let bulk = use_signal(BulkCreate::<OrderSchema>::new);
    let options = use_order_choices(console);

    let on_submit = EventHandler::new(move |_: ()| {
        spawn(async move {
            if submit_bulk::<OrderSchema, Orders>(bulk, console, log).await {
                console.refresh_orders().await;
                on_close.call(());
            }
        });
    });

    rsx! {
        ModalOverlay {
            title: "Bulk create orders",
            wide: true,
            on_close,
            {bulk_body(bulk, options, on_submit, on_close)}
        }
    }
}
