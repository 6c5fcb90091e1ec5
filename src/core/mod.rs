pub mod document;
pub mod export;
pub mod masks;
pub mod pagination;

pub use document::{normalize_and_validate, DocumentCheck, DocumentInput, DocumentKind, Verdict};
pub use pagination::{Page, PageMeta, PageRequest, Pagination, QueryParams};
