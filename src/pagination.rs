//! Pagination

use serde::Deserialize;

/// Pagination block returned alongside paged listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Current page, starting at 1.
    #[serde(alias = "page")]
    pub current_page: u32,

    /// Number of pages.
    #[serde(alias = "pages")]
    pub total_pages: u32,

    /// Number of items across all pages.
    #[serde(default, alias = "total", alias = "totalItems", alias = "totalProducts")]
    pub total_items: u64,
}

impl Pagination {
    /// A single page holding `items` items.
    #[must_use]
    pub fn single_page(items: u64) -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            total_items: items,
        }
    }

    /// Whether a previous page exists.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Whether a next page exists.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn reads_short_field_names() -> TestResult {
        let pagination: Pagination =
            serde_json::from_str(r#"{"page": 2, "pages": 5, "total": 48}"#)?;

        assert_eq!(pagination.current_page, 2);
        assert!(pagination.has_previous());
        assert!(pagination.has_next());

        Ok(())
    }

    #[test]
    fn last_page_has_no_next() {
        let pagination = Pagination {
            current_page: 3,
            total_pages: 3,
            total_items: 30,
        };

        assert!(!pagination.has_next());
    }
}
