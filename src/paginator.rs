/// One page of an ordered sequence, with the clamped request that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

impl<T> Page<'_, T> {
    /// Index of the first item of this page within the whole sequence.
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.page_size
    }
}

/// Slices page `page` (1-based) of `items`.
///
/// Never fails: the page size is clamped to `[1, len]` (1 when empty) and
/// the page number to `[1, total_pages]` (1 when there are no pages).
pub fn paginate<T>(items: &[T], page_size: i64, page: i64) -> Page<'_, T> {
    let len = items.len();
    let page_size = clamp_page_size(page_size, len);
    let total_pages = len.div_ceil(page_size);
    let page = clamp_page(page, total_pages);

    let start = ((page - 1) * page_size).min(len);
    let end = (start + page_size).min(len);
    Page {
        items: &items[start..end],
        page,
        page_size,
        total_pages,
    }
}

fn clamp_page_size(requested: i64, len: usize) -> usize {
    if len == 0 {
        return 1;
    }
    usize::try_from(requested).unwrap_or(0).clamp(1, len)
}

fn clamp_page(requested: i64, total_pages: usize) -> usize {
    usize::try_from(requested)
        .unwrap_or(0)
        .clamp(1, total_pages.max(1))
}
