use dioxus::prelude::*;
use store::PageSize;

/// Previous / next buttons, "page X of Y" and a page size selector.
#[component]
pub fn PageControls(
    page: usize,
    page_count: usize,
    page_size: PageSize,
    total: usize,
    on_page: EventHandler<usize>,
    on_page_size: EventHandler<PageSize>,
) -> Element {
    let last = page_count.max(1);

    rsx! {
        nav {
            class: "page-controls",
            button {
                class: "button button--ghost",
                disabled: page <= 1,
                onclick: move |_| on_page.call(page - 1),
                "‹ Prev"
            }
            span { class: "page-controls-position", "Page {page} of {last}" }
            button {
                class: "button button--ghost",
                disabled: page >= last,
                onclick: move |_| on_page.call(page + 1),
                "Next ›"
            }
            span { class: "page-controls-total", "{total} total" }
            label {
                class: "page-controls-size",
                "Per page "
                select {
                    value: "{page_size.get()}",
                    onchange: move |evt| {
                        let parsed = evt.value().parse::<usize>().ok();
                        if let Some(size) = parsed.and_then(|n| PageSize::try_from(n).ok()) {
                            on_page_size.call(size);
                        }
                    },
                    for size in PageSize::ALL {
                        option {
                            value: "{size.get()}",
                            selected: size == page_size,
                            "{size.get()}"
                        }
                    }
                }
            }
        }
    }
}
