//! # Console context
//!
//! [`ConsoleProvider`] owns one [`CollectionStore`] per entity kind, the filter
//! each list last applied and a counter of requests in flight. Views reach it
//! with [`use_console`].
//!
//! The `refresh_*` methods are the only way a collection changes: they fetch
//! the full list and replace the store, then re-apply the list's current
//! filter. Forms call them after a successful mutation, so the reload always
//! starts after the mutation response has arrived.
//!
//! Every gateway shares the console's [`HttpTransport`], and with it one
//! reqwest client and its connection pool.
//!
//! Async helpers read signals with `peek` so a `use_resource` that calls them
//! does not re-run when filters change.

use std::future::Future;

use api::{Gateway, HttpTransport, Orders, Phones, Resource, Users};
use dioxus::prelude::*;
use store::{
    CollectionStore, ConsoleConfig, Filter, Order, OrderFilter, Phone, PhoneFilter, User,
    UserFilter,
};

use crate::activity_log::ActivityLog;

#[derive(Clone, Copy)]
pub struct Console {
    pub config: Signal<ConsoleConfig>,
    pub phones: Signal<CollectionStore<Phone>>,
    pub users: Signal<CollectionStore<User>>,
    pub orders: Signal<CollectionStore<Order>>,
    pub phone_filter: Signal<PhoneFilter>,
    pub user_filter: Signal<UserFilter>,
    pub order_filter: Signal<OrderFilter>,
    transport: Signal<HttpTransport>,
    in_flight: Signal<usize>,
}

impl Console {
    fn new(config: ConsoleConfig) -> Self {
        let page_size = config.view.page_size;
        let transport = HttpTransport::new(config.api.base_url.clone());
        Self {
            config: Signal::new(config),
            phones: Signal::new(CollectionStore::new(page_size)),
            users: Signal::new(CollectionStore::new(page_size)),
            orders: Signal::new(CollectionStore::new(page_size)),
            phone_filter: Signal::new(PhoneFilter::default()),
            user_filter: Signal::new(UserFilter::default()),
            order_filter: Signal::new(OrderFilter::default()),
            transport: Signal::new(transport),
            in_flight: Signal::new(0),
        }
    }

    /// A gateway for `R` against the configured API.
    pub fn gateway<R: Resource>(&self) -> Gateway<R> {
        gateway_over(&self.transport.peek())
    }

    pub fn is_busy(&self) -> bool {
        (self.in_flight)() > 0
    }

    /// Await `work`, counting it as in flight for the busy indicator.
    pub async fn track<F: Future>(mut self, work: F) -> F::Output {
        *self.in_flight.write() += 1;
        let output = work.await;
        let mut in_flight = self.in_flight.write();
        *in_flight = in_flight.saturating_sub(1);
        output
    }

    pub async fn refresh_phones(mut self) {
        let items = self.track(self.gateway::<Phones>().fetch_all()).await;
        let filter = self.phone_filter.peek().clone();
        reload(&mut self.phones.write(), items, &filter);
    }

    pub async fn refresh_users(mut self) {
        let items = self.track(self.gateway::<Users>().fetch_all()).await;
        let filter = self.user_filter.peek().clone();
        reload(&mut self.users.write(), items, &filter);
    }

    /// Users are reloaded first: the order filter looks usernames up in them.
    pub async fn refresh_orders(mut self) {
        self.refresh_users().await;
        let items = self.track(self.gateway::<Orders>().fetch_all()).await;
        let filter = self
            .order_filter
            .peek()
            .clone()
            .with_users(self.users.peek().raw());
        reload(&mut self.orders.write(), items, &filter);
    }

    /// Orders carry users' order lists and phones, so a change to either
    /// reloads everything that shows them.
    pub async fn refresh_all(self) {
        self.refresh_phones().await;
        self.refresh_orders().await;
    }
}

/// Clones share the transport's reqwest client.
fn gateway_over<R: Resource>(transport: &HttpTransport) -> Gateway<R> {
    Gateway::new(transport.clone())
}

pub(crate) fn reload<T: Clone, F: Filter<T>>(store: &mut CollectionStore<T>, items: Vec<T>, filter: &F) {
    store.replace(items);
    if !filter.is_empty() {
        store.apply_filters(filter);
    }
}

pub fn use_console() -> Console {
    use_context::<Console>()
}

/// Provides the [`Console`] and the activity log to everything below it.
#[component]
pub fn ConsoleProvider(config: ConsoleConfig, children: Element) -> Element {
    use_context_provider(|| Console::new(config));
    use_context_provider(|| Signal::new(ActivityLog::default()));

    rsx! {
        {children}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::PageSize;

    fn phone(id: i64, brand: &str) -> Phone {
        Phone {
            id,
            brand: brand.to_string(),
            model: "M".to_string(),
            price: 10.0,
        }
    }

    #[test]
    fn test_gateways_share_one_transport() {
        let transport = HttpTransport::new("http://api.test");
        let phones: Gateway<Phones> = gateway_over(&transport);
        let orders: Gateway<Orders> = gateway_over(&transport);
        assert_eq!(phones.transport().base_url(), "http://api.test");
        assert_eq!(orders.transport().base_url(), transport.base_url());
    }

    #[test]
    fn test_reload_keeps_active_filter() {
        let mut store = CollectionStore::new(PageSize::Five);
        let filter = PhoneFilter {
            brand: "acme".to_string(),
            ..Default::default()
        };
        reload(
            &mut store,
            vec![phone(1, "Acme"), phone(2, "Globex"), phone(3, "Acme")],
            &filter,
        );
        assert_eq!(store.raw().len(), 3);
        assert_eq!(store.filtered().len(), 2);

        reload(&mut store, vec![phone(4, "Globex")], &PhoneFilter::default());
        assert_eq!(store.filtered().len(), 1);
    }
}
