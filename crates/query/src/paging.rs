//! Page windows over filtered and sorted collections.

use crate::error::QueryError;

/// One materialized page together with its paging metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct PagedList<T> {
    items: Vec<T>,
    current_page: u32,
    page_size: u32,
    total_count: u64,
    total_pages: u64,
}

impl<T> PagedList<T> {
    /// Cut page `page_number` (1-based) of `page_size` items out of `source`.
    ///
    /// `total_count` covers the whole source. Page numbers past the end give
    /// an empty page rather than an error.
    pub fn create(source: Vec<T>, page_number: u32, page_size: u32) -> Result<Self, QueryError> {
        if page_number == 0 {
            return Err(QueryError::InvalidPageNumber);
        }
        if page_size == 0 {
            return Err(QueryError::InvalidPageSize);
        }

        let total_count = source.len() as u64;
        let skip = (page_number as usize - 1).saturating_mul(page_size as usize);
        let items = source
            .into_iter()
            .skip(skip)
            .take(page_size as usize)
            .collect();

        Ok(Self {
            items,
            current_page: page_number,
            page_size,
            total_count,
            total_pages: total_count.div_ceil(u64::from(page_size)),
        })
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn total_pages(&self) -> u64 {
        self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.current_page) < self.total_pages
    }

    /// Convert the items, keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedList<U> {
        PagedList {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            page_size: self.page_size,
            total_count: self.total_count,
            total_pages: self.total_pages,
        }
    }
}

impl<T> IntoIterator for PagedList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a PagedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
