use serde::{Deserialize, Serialize};

use crate::constants::MAX_PAGE_SIZE;
use crate::error::{TodoError, TodoResult};

/// A page of items plus the size of the whole filtered set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub total_count: i64,
    pub page_number: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

impl<T> PagedResult<T> {
    pub fn new(items: Vec<T>, total_count: i64, page_number: u32, page_size: u32) -> Self {
        let total_pages = total_pages(total_count, page_size);
        Self {
            items,
            total_count,
            page_number,
            page_size,
            total_pages,
            has_previous_page: page_number > 1,
            has_next_page: page_number < total_pages,
        }
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> PagedResult<U> {
        PagedResult {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page_number: self.page_number,
            page_size: self.page_size,
            total_pages: self.total_pages,
            has_previous_page: self.has_previous_page,
            has_next_page: self.has_next_page,
        }
    }
}

/// `ceil(total_count / page_size)`, zero for an empty set
pub fn total_pages(total_count: i64, page_size: u32) -> u32 {
    if total_count <= 0 || page_size == 0 {
        return 0;
    }
    let size = i64::from(page_size);
    u32::try_from((total_count + size - 1) / size).unwrap_or(u32::MAX)
}

/// 1-based page coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page_number: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub fn new(page_number: u32, page_size: u32) -> Self {
        Self {
            page_number,
            page_size,
        }
    }

    /// Both coordinates must be at least 1
    pub fn validate(&self) -> TodoResult<()> {
        if self.page_number < 1 {
            return Err(TodoError::validation("pageNumber must be at least 1"));
        }
        if self.page_size < 1 {
            return Err(TodoError::validation("pageSize must be at least 1"));
        }
        Ok(())
    }

    /// [`validate`](Self::validate) plus the API's page size ceiling
    pub fn validate_bounded(&self) -> TodoResult<()> {
        self.validate()?;
        if self.page_size > MAX_PAGE_SIZE {
            return Err(TodoError::validation(format!(
                "pageSize must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        Ok(())
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page_number.saturating_sub(1)) * i64::from(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }

    /// Apply skip/take to an already ordered, fully materialized set
    pub fn slice<T>(&self, items: Vec<T>) -> PagedResult<T> {
        let total_count = items.len() as i64;
        let skip = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let page: Vec<T> = items
            .into_iter()
            .skip(skip)
            .take(self.page_size as usize)
            .collect();
        PagedResult::new(page, total_count, self.page_number, self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 10, 0)]
    #[case(1, 10, 1)]
    #[case(10, 10, 1)]
    #[case(11, 10, 2)]
    #[case(95, 20, 5)]
    fn test_total_pages(#[case] count: i64, #[case] size: u32, #[case] expected: u32) {
        assert_eq!(total_pages(count, size), expected);
    }

    #[test]
    fn test_navigation_flags() {
        let first: PagedResult<i32> = PagedResult::new(vec![1, 2], 5, 1, 2);
        assert!(!first.has_previous_page);
        assert!(first.has_next_page);

        let last: PagedResult<i32> = PagedResult::new(vec![5], 5, 3, 2);
        assert!(last.has_previous_page);
        assert!(!last.has_next_page);

        let empty: PagedResult<i32> = PagedResult::new(Vec::new(), 0, 1, 10);
        assert_eq!(empty.total_pages, 0);
        assert!(!empty.has_next_page);
    }

    #[test]
    fn test_slice_skips_and_takes() {
        let page = PageRequest::new(2, 3).slice((1..=8).collect::<Vec<_>>());
        assert_eq!(page.items, vec![4, 5, 6]);
        assert_eq!(page.total_count, 8);
        assert_eq!(page.total_pages, 3);

        let beyond = PageRequest::new(9, 3).slice((1..=8).collect::<Vec<_>>());
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.total_count, 8);
    }

    #[rstest]
    #[case(0, 10)]
    #[case(1, 0)]
    fn test_invalid_coordinates(#[case] number: u32, #[case] size: u32) {
        assert!(PageRequest::new(number, size).validate().is_err());
    }

    #[test]
    fn test_bounded_rejects_oversized_pages() {
        assert!(PageRequest::new(1, 100).validate_bounded().is_ok());
        assert!(PageRequest::new(1, 101).validate_bounded().is_err());
        assert!(PageRequest::new(1, 101).validate().is_ok());
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(PagedResult::new(vec!["a"], 1, 1, 10)).unwrap();
        assert_eq!(value["totalCount"], 1);
        assert_eq!(value["hasPreviousPage"], false);
        assert_eq!(value["totalPages"], 1);
    }
}
