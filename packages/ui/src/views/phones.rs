use api::Phones;
use dioxus::prelude::*;
use store::filter::parse_bound;
use store::models::format_amount;
use store::{BulkCreate, FormMode, FormState, PhoneFilter, PhoneSchema};

use super::bulk_modal::{bulk_body, submit_bulk};
use super::form_modal::{form_body, modal_title, submit_form, ChoiceOptions};
use super::{ModalOverlay, PageControls};
use crate::activity_log::use_activity_log;
use crate::components::{Button, ButtonVariant, Input};
use crate::console::use_console;

/// Filter bar, phone table and page controls.
#[component]
pub fn PhoneListView() -> Element {
    let mut console = use_console();
    let mut brand = use_signal(String::new);
    let mut model = use_signal(String::new);
    let mut min_price = use_signal(String::new);
    let mut max_price = use_signal(String::new);

    let _loader = use_resource(move || async move {
        console.refresh_phones().await;
    });

    let search = move |_: MouseEvent| {
        let filter = PhoneFilter {
            brand: brand(),
            model: model(),
            min_price: parse_bound(&min_price()),
            max_price: parse_bound(&max_price()),
        };
        console.phones.write().apply_filters(&filter);
        console.phone_filter.set(filter);
    };

    let reset = move |_: MouseEvent| {
        brand.set(String::new());
        model.set(String::new());
        min_price.set(String::new());
        max_price.set(String::new());
        console.phone_filter.set(PhoneFilter::default());
        console.phones.write().reset_filters();
    };

    let store = console.phones.read();
    let items = store.page_items().to_vec();
    let (page, page_count, page_size) = (store.page(), store.page_count(), store.page_size());
    let (total, loaded) = (store.filtered().len(), !store.is_empty());
    drop(store);

    rsx! {
        section {
            class: "list-view",
            div {
                class: "filter-bar",
                Input { placeholder: "Brand", value: brand(), oninput: move |evt: FormEvent| brand.set(evt.value()) }
                Input { placeholder: "Model", value: model(), oninput: move |evt: FormEvent| model.set(evt.value()) }
                Input { r#type: "number", placeholder: "Min price", value: min_price(), oninput: move |evt: FormEvent| min_price.set(evt.value()) }
                Input { r#type: "number", placeholder: "Max price", value: max_price(), oninput: move |evt: FormEvent| max_price.set(evt.value()) }
                Button { onclick: search, "Search" }
                Button { variant: ButtonVariant::Outline, onclick: reset, "Reset" }
            }

            if items.is_empty() {
                p {
                    class: "empty-state",
                    if loaded { "No phones match these filters." } else { "No phones yet." }
                }
            } else {
                table {
                    class: "data-table",
                    thead {
                        tr {
                            th { "ID" }
                            th { "Brand" }
                            th { "Model" }
                            th { class: "numeric", "Price" }
                        }
                    }
                    tbody {
                        for phone in items {
                            tr {
                                key: "{phone.id}",
                                td { "{phone.id}" }
                                td { "{phone.brand}" }
                                td { "{phone.model}" }
                                td { class: "numeric", "{format_amount(phone.price)}" }
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
                on_page: move |page| console.phones.write().set_page(page),
                on_page_size: move |size| console.phones.write().set_page_size(size),
            }
        }
    }
}

/// Create, update or delete one phone. `on_close` runs on cancel and after a
/// successful change, once the collections have been reloaded.
#[component]
pub fn PhoneModal(mode: FormMode, on_close: EventHandler<()>) -> Element {
    let console = use_console();
    let log = use_activity_log();
    let form = use_signal(|| FormState::<PhoneSchema>::new(mode));

    let on_submit = EventHandler::new(move |_: ()| {
        spawn(async move {
            if submit_form::<PhoneSchema, Phones>(form, console, log).await {
                console.refresh_all().await;
                on_close.call(());
            }
        });
    });

    let targets = console.phones.read().raw().to_vec();

    rsx! {
        ModalOverlay {
            title: modal_title(mode, "phone"),
            on_close,
            {form_body(form, targets, ChoiceOptions::new(), on_submit, on_close)}
        }
    }
}

#[component]
pub fn PhoneBulkModal(on_close: EventHandler<()>) -> Element {
    let console = use_console();
    let log = use_activity_log();
    let bulk = use_signal(BulkCreate::<PhoneSchema>::new);

    let on_submit = EventHandler::new(move |_: ()| {
        spawn(async move {
            if submit_bulk::<PhoneSchema, Phones>(bulk, console, log).await {
                console.refresh_phones().await;
                on_close.call(());
            }
        });
    });

    rsx! {
        ModalOverlay {
            title: "Bulk create phones",
            wide: true,
            on_close,
            {bulk_body(bulk, ChoiceOptions::new(), on_submit, on_close)}
        }
    }
}
