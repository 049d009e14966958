//! # Collection Store
//!
//! Holds the last full list fetch for one entity type together with the filtered
//! view derived from it and the paginator that slices that view.
//!
//! The raw items are only ever replaced wholesale by [`CollectionStore::replace`]
//! after a fetch; filtering never touches them. Anything that changes the
//! filtered view (a new fetch, new filters, a reset) or the page size puts the
//! view back on page 1.

use crate::filter::Filter;
use crate::models::{Id, Identified};
use crate::paginator::{PageSize, Paginator};

#[derive(Clone, Debug, PartialEq)]
pub struct CollectionStore<T> {
    raw: Vec<T>,
    filtered: Vec<T>,
    paginator: Paginator,
}

impl<T> Default for CollectionStore<T> {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}

impl<T: Clone> CollectionStore<T> {
    /// Replace the whole collection with a fresh fetch. Filters are dropped.
    pub fn replace(&mut self, items: Vec<T>) {
        self.filtered = items.clone();
        self.raw = items;
        self.paginator.reset();
    }

    /// Re-derive the filtered view from the raw items.
    pub fn apply_filters<F: Filter<T>>(&mut self, filter: &F) {
        self.filtered = self
            .raw
            .iter()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect();
        self.paginator.reset();
    }

    pub fn reset_filters(&mut self) {
        self.filtered = self.raw.clone();
        self.paginator.reset();
    }
}

impl<T> CollectionStore<T> {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            raw: Vec::new(),
            filtered: Vec::new(),
            paginator: Paginator::new(page_size),
        }
    }

    pub fn raw(&self) -> &[T] {
        &self.raw
    }

    pub fn filtered(&self) -> &[T] {
        &self.filtered
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn page(&self) -> usize {
        self.paginator.page()
    }

    pub fn page_size(&self) -> PageSize {
        self.paginator.page_size()
    }

    pub fn page_count(&self) -> usize {
        self.paginator.page_count(self.filtered.len())
    }

    pub fn page_items(&self) -> &[T] {
        self.paginator.slice(&self.filtered)
    }

    pub fn set_page(&mut self, page: usize) {
        self.paginator.set_page(page, self.filtered.len());
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.paginator.set_page_size(page_size);
    }
}

impl<T: Identified> CollectionStore<T> {
    /// Look an entity up in the raw collection.
    pub fn find(&self, id: Id) -> Option<&T> {
        self.raw.iter().find(|item| item.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::PhoneFilter;
    use crate::models::Phone;

    fn catalog() -> Vec<Phone> {
        (1..=12)
            .map(|id| Phone {
                id,
                brand: if id <= 7 { "Acme" } else { "Globex" }.to_string(),
                model: format!("M{id}"),
                price: 100.0 * id as f64,
            })
            .collect()
    }

    fn acme() -> PhoneFilter {
        PhoneFilter {
            brand: "Acme".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_filter_then_paginate() {
        let mut store = CollectionStore::new(PageSize::Five);
        store.replace(catalog());
        store.apply_filters(&acme());

        assert_eq!(store.raw().len(), 12);
        assert_eq!(store.filtered().len(), 7);
        assert_eq!(store.page_count(), 2);
        assert_eq!(store.page_items().len(), 5);
        store.set_page(2);
        assert_eq!(store.page_items().len(), 2);
        assert_eq!(store.page_items()[1].id, 7);
    }

    #[test]
    fn test_apply_filters_is_pure() {
        let mut store = CollectionStore::default();
        store.replace(catalog());
        store.apply_filters(&acme());
        let first = store.filtered().to_vec();
        store.apply_filters(&acme());
        assert_eq!(store.filtered(), first.as_slice());
        assert_eq!(store.raw(), catalog().as_slice());
    }

    #[test]
    fn test_reset_filters_restores_raw() {
        let mut store = CollectionStore::default();
        store.replace(catalog());
        store.apply_filters(&PhoneFilter {
            min_price: Some(10_000.0),
            ..Default::default()
        });
        assert!(store.filtered().is_empty());
        store.reset_filters();
        assert_eq!(store.filtered(), store.raw());
    }

    #[test]
    fn test_filter_and_page_size_reset_page() {
        let mut store = CollectionStore::new(PageSize::Five);
        store.replace(catalog());
        store.set_page(3);
        assert_eq!(store.page(), 3);
        store.apply_filters(&PhoneFilter::default());
        assert_eq!(store.page(), 1);

        store.set_page(2);
        store.set_page_size(PageSize::Ten);
        assert_eq!(store.page(), 1);
        assert_eq!(store.page_size(), PageSize::Ten);

        store.set_page(2);
        store.reset_filters();
        assert_eq!(store.page(), 1);
    }

    #[test]
    fn test_replace_drops_filters() {
        let mut store = CollectionStore::default();
        store.replace(catalog());
        store.apply_filters(&acme());
        store.replace(catalog()[..3].to_vec());
        assert_eq!(store.filtered().len(), 3);
        assert_eq!(store.page(), 1);
    }

    #[test]
    fn test_find() {
        let mut store = CollectionStore::default();
        store.replace(catalog());
        assert_eq!(store.find(9).map(|p| p.model.as_str()), Some("M9"));
        assert!(store.find(99).is_none());
    }
}
