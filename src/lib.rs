pub mod api;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use api::{ApiClient, CrudResource, Session};
pub use config::AdminConfig;
pub use core::{normalize_and_validate, DocumentCheck, DocumentInput, Verdict};
pub use domain::ports::ConfigProvider;
pub use utils::error::{AdminError, Result};
