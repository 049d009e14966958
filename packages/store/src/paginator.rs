//! Client-side pagination over an already-filtered slice.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The page sizes offered by list views.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum PageSize {
    #[default]
    Five,
    Ten,
    TwentyFive,
    Fifty,
}

#[derive(Debug, Error, PartialEq)]
#[error("unsupported page size {0}; expected one of 5, 10, 25, 50")]
pub struct PageSizeError(pub usize);

impl PageSize {
    pub const ALL: [PageSize; 4] = [
        PageSize::Five,
        PageSize::Ten,
        PageSize::TwentyFive,
        PageSize::Fifty,
    ];

    pub fn get(self) -> usize {
        match self {
            PageSize::Five => 5,
            PageSize::Ten => 10,
            PageSize::TwentyFive => 25,
            PageSize::Fifty => 50,
        }
    }
}

impl TryFrom<usize> for PageSize {
    type Error = PageSizeError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        PageSize::ALL
            .into_iter()
            .find(|size| size.get() == value)
            .ok_or(PageSizeError(value))
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

/// Current page (1-based) and page size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Paginator {
    page: usize,
    page_size: PageSize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}

impl Paginator {
    pub fn new(page_size: PageSize) -> Self {
        Self { page: 1, page_size }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// `ceil(len / size)`; zero for an empty view.
    pub fn page_count(&self, len: usize) -> usize {
        len.div_ceil(self.page_size.get())
    }

    /// Move to `page`, clamped to the pages that exist for `len` items.
    pub fn set_page(&mut self, page: usize, len: usize) {
        self.page = page.clamp(1, self.page_count(len).max(1));
    }

    /// Changing the page size always returns to the first page.
    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.page = 1;
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// The items on the current page. Empty when the page is past the end.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let size = self.page_size.get();
        let start = (self.page - 1).saturating_mul(size).min(items.len());
        let end = start.saturating_add(size).min(items.len());
        &items[start..end]
    }
}
