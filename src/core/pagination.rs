use serde::{Deserialize, Serialize};

pub const PAGE_SIZES: [u32; 4] = [5, 10, 20, 50];
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Filters rendered as query string pairs. Only set fields are emitted.
pub trait QueryParams {
    fn query_pairs(&self) -> Vec<(&'static str, String)>;
}

impl QueryParams for () {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

/// Pushes `value` under `key` when it holds non-blank text.
pub fn push_text(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: &Option<String>) {
    if let Some(v) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        pairs.push((key, v.to_string()));
    }
}

pub fn push_value<T: ToString>(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: &Option<T>) {
    if let Some(v) = value {
        pairs.push((key, v.to_string()));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    pub fn query_pairs(&self) -> [(&'static str, String); 2] {
        [("page", self.page.to_string()), ("size", self.size.to_string())]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total_pages: u32,
    pub total_elements: u64,
    pub size: u32,
    pub number: u32,
}

/// One page of a backend listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: PageMeta,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.page.number + 1 < self.page.total_pages
    }
}

/// Pagination state of a list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    size: u32,
    total_pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    pub fn new(size: u32) -> Self {
        Self {
            page: 0,
            size: size.max(1),
            total_pages: 0,
        }
    }

    pub fn request(&self) -> PageRequest {
        PageRequest::new(self.page, self.size)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn go_to(&mut self, page: u32) {
        self.page = page.min(self.total_pages.saturating_sub(1));
    }

    pub fn next(&mut self) {
        self.go_to(self.page.saturating_add(1));
    }

    pub fn previous(&mut self) {
        self.go_to(self.page.saturating_sub(1));
    }

    /// Changing the page size always returns to the first page.
    pub fn set_size(&mut self, size: u32) {
        self.size = size.max(1);
        self.page = 0;
    }

    pub fn update_from(&mut self, meta: &PageMeta) {
        self.total_pages = meta.total_pages;
        self.page = meta.number.min(meta.total_pages.saturating_sub(1));
        if meta.size > 0 {
            self.size = meta.size;
        }
    }

    /// An empty result still reads as one page.
    pub fn label(&self) -> String {
        format!(
            "Página {} de {}",
            self.page + 1,
            self.total_pages.max(1)
        )
    }
}
