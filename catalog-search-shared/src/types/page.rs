//! Paginated result types for search operations.

use serde::{Deserialize, Serialize};

/// One page of typed search results.
///
/// `page_num` and `page_size` echo what the caller requested; `total` is the
/// engine-reported count of all matching documents, which may be greater than
/// the number of returned results due to pagination.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    /// The requested page number.
    pub page_num: u32,

    /// The requested page size.
    pub page_size: u32,

    /// Total number of matching documents.
    pub total: u64,

    /// The materialized documents for this page.
    pub data: Vec<T>,
}

impl<T> Page<T> {
    /// Create a new page.
    pub fn new(page_num: u32, page_size: u32, total: u64, data: Vec<T>) -> Self {
        Self {
            page_num,
            page_size,
            total,
            data,
        }
    }

    /// Create an empty page for the given request.
    pub fn empty(page_num: u32, page_size: u32) -> Self {
        Self {
            page_num,
            page_size,
            total: 0,
            data: Vec::new(),
        }
    }

    /// Returns true if there are no results on this page.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of results on this page.
    pub fn len(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_empty() {
        let page: Page<String> = Page::empty(2, 10);
        assert!(page.is_empty());
        assert_eq!(page.len(), 0);
        assert_eq!(page.page_num, 2);
        assert_eq!(page.page_size, 10);
        assert_eq!(page.total, 0);
    }

    #[test]
    fn test_page_new() {
        let page = Page::new(0, 5, 12, vec!["a".to_string(), "b".to_string()]);
        assert!(!page.is_empty());
        assert_eq!(page.len(), 2);
        assert_eq!(page.total, 12);
    }

    #[test]
    fn test_serialization() {
        let page = Page::new(1, 2, 7, vec![3_i64, 4]);

        let json = serde_json::to_string(&page).unwrap();
        let deserialized: Page<i64> = serde_json::from_str(&json).unwrap();

        assert_eq!(page, deserialized);
    }
}
