//! Fixed-size slicing of ordered lists into 1-based pages.
use serde::Serialize;

/// Default number of items per page, matching the GitHub REST API default.
pub const DEFAULT_PAGE_SIZE: u8 = 30;

/// One page of items plus whether another page follows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub has_next: bool,
}

/// Return page `page_index` (1-based) of `list` using `page_size` items per
/// page. Index 0 is treated as 1 and a zero page size yields an empty page.
pub fn paginate<T: Clone>(
    list: &[T],
    page_size: usize,
    page_index: usize,
) -> Page<T> {
    if page_size == 0 {
        return Page {
            items: vec![],
            has_next: false,
        };
    }

    let start = page_index.saturating_sub(1).saturating_mul(page_size);
    let end = start.saturating_add(page_size).min(list.len());

    let items = if start < list.len() {
        list[start..end].to_vec()
    } else {
        vec![]
    };

    Page {
        items,
        has_next: end < list.len(),
    }
}
