use serde::Serialize;

use crate::domain::task::errors::PaginationError;

/// Validated page window. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    pub const DEFAULT_PAGE: u32 = 1;
    pub const DEFAULT_SIZE: u32 = 10;
    pub const MAX_SIZE: u32 = 100;

    /// # Errors
    /// * `PageOutOfRange` - `page` is 0
    /// * `SizeOutOfRange` - `size` is 0 or above 100
    pub fn new(page: u32, size: u32) -> Result<Self, PaginationError> {
        if page < 1 {
            return Err(PaginationError::PageOutOfRange(page));
        }
        if size < 1 || size > Self::MAX_SIZE {
            return Err(PaginationError::SizeOutOfRange {
                max: Self::MAX_SIZE,
                actual: size,
            });
        }
        Ok(Self { page, size })
    }

    /// Apply defaults for omitted values before validating.
    pub fn from_query(page: Option<u32>, size: Option<u32>) -> Result<Self, PaginationError> {
        Self::new(
            page.unwrap_or(Self::DEFAULT_PAGE),
            size.unwrap_or(Self::DEFAULT_SIZE),
        )
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Rows to skip.
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.size)
    }

    /// Rows to take.
    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            size: Self::DEFAULT_SIZE,
        }
    }
}

/// One page of results with navigation metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub size: u32,
    pub pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        let size = u64::from(request.size());
        let pages = total.div_ceil(size);
        let page = request.page();

        Self {
            items,
            total,
            page,
            size: request.size(),
            pages,
            has_next: u64::from(page) < pages,
            has_prev: page > 1,
        }
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            size: self.size,
            pages: self.pages,
            has_next: self.has_next,
            has_prev: self.has_prev,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let request = PageRequest::from_query(None, None).unwrap();
        assert_eq!(request, PageRequest::default());
        assert_eq!(request.offset(), 0);
        assert_eq!(request.limit(), 10);
    }

    #[test]
    fn test_bounds() {
        assert_eq!(
            PageRequest::new(0, 10),
            Err(PaginationError::PageOutOfRange(0))
        );
        assert!(PageRequest::new(1, 0).is_err());
        assert!(PageRequest::new(1, 100).is_ok());
        assert!(PageRequest::new(1, 101).is_err());
    }

    #[test]
    fn test_offset() {
        let request = PageRequest::new(3, 10).unwrap();
        assert_eq!(request.offset(), 20);
    }

    #[test]
    fn test_first_page_of_25() {
        let page = Page::new(vec![0; 10], 25, PageRequest::new(1, 10).unwrap());
        assert_eq!(page.pages, 3);
        assert!(page.has_next);
        assert!(!page.has_prev);
    }

    #[test]
    fn test_last_page_of_25() {
        let page = Page::new(vec![0; 5], 25, PageRequest::new(3, 10).unwrap());
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.total, 25);
        assert_eq!(page.pages, 3);
        assert!(!page.has_next);
        assert!(page.has_prev);
    }

    #[test]
    fn test_empty_result() {
        let page: Page<u8> = Page::new(vec![], 0, PageRequest::default());
        assert_eq!(page.pages, 0);
        assert!(!page.has_next);
        assert!(!page.has_prev);
    }

    #[test]
    fn test_map_keeps_metadata() {
        let page = Page::new(vec![1, 2], 12, PageRequest::new(2, 10).unwrap());
        let mapped = page.map(|n| n * 10);
        assert_eq!(mapped.items, vec![10, 20]);
        assert_eq!(mapped.pages, 2);
        assert!(mapped.has_prev);
    }
}
