/// Connection settings the HTTP client needs, whatever their source.
pub trait ConfigProvider: Send + Sync {
    fn api_url(&self) -> &str;
    fn auth_url(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn default_page_size(&self) -> u32;
}
