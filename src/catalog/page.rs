//! Fixed-size pagination over an already sorted list.

/// Products shown per catalog page.
pub const PAGE_SIZE: usize = 12;

/// Number of pages needed for `len` items. Never less than one.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Returns the slice for a 1-based page number along with the page count.
///
/// Page 0 is read as page 1. A page past the end yields an empty slice; callers reset to
/// page 1 when the result set shrinks.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> (&[T], usize) {
    let page_size = page_size.max(1);
    let pages = total_pages(items.len(), page_size);

    let start = (page.max(1) - 1).saturating_mul(page_size);
    if start >= items.len() {
        return (&[], pages);
    }

    let end = start.saturating_add(page_size).min(items.len());
    (&items[start..end], pages)
}
