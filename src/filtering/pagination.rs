use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Zero-based page index plus page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewWindow {
    pub page: usize,
    pub size: usize,
}

impl Default for ViewWindow {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// The slice of the match set to show, and the page it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSlice {
    pub range: Range<usize>,
    /// Page actually shown; zero when the requested page overshot
    pub page: usize,
}

impl ViewWindow {
    #[must_use]
    pub const fn new(page: usize, size: usize) -> Self {
        Self { page, size }
    }

    /// Slice `[page*size, min(page*size+size, total))`.
    ///
    /// When that range is empty the window falls back to page zero and
    /// `[0, min(size, total))`.
    #[must_use]
    pub fn slice(&self, total: usize) -> PageSlice {
        let start = self.page.saturating_mul(self.size);
        let end = start.saturating_add(self.size).min(total);
        if start >= end {
            PageSlice {
                range: 0..self.size.min(total),
                page: 0,
            }
        } else {
            PageSlice {
                range: start..end,
                page: self.page,
            }
        }
    }

    /// Number of pages needed for `total` items
    #[must_use]
    pub fn page_count(&self, total: usize) -> usize {
        if self.size == 0 {
            0
        } else {
            total.div_ceil(self.size)
        }
    }
}

/// Sanitize resource name by removing control characters
fn sanitize_resource_name(name: &str) -> String {
    name.chars().filter(|c| !c.is_control()).collect()
}

/// Build a `Content-Range`-style label such as `weapons 0-19/45`.
///
/// # Arguments
///
/// * `range` - The half-open range of items shown.
/// * `total_count` - The total number of matching items.
/// * `resource_name` - The name of the collection being paginated.
#[must_use]
pub fn content_range(range: &Range<usize>, total_count: usize, resource_name: &str) -> String {
    let safe_name = sanitize_resource_name(resource_name);
    if range.is_empty() {
        return format!("{safe_name} */{total_count}");
    }
    let last = range.end - 1;
    format!("{safe_name} {}-{last}/{total_count}", range.start)
}
