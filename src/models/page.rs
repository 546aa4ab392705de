/// One page of records plus pagination metadata, as returned by the directory.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total_count: u64,
    pub total_pages: u32,
}

impl<T: Clone> Page<T> {
    /// Slice `all` into page `page` (1-indexed). A page past the end yields
    /// no items; callers validate the number before asking.
    pub fn slice(all: &[T], page: u32, per_page: u32) -> Self {
        let per_page = per_page.max(1);
        let total_count = all.len() as u64;
        let total_pages = all.len().div_ceil(per_page as usize) as u32;
        let start = (page.saturating_sub(1) as usize).saturating_mul(per_page as usize);
        let items = all.iter().skip(start).take(per_page as usize).cloned().collect();
        Page { items, page, per_page, total_count, total_pages }
    }
}
