use crate::core::pagination::{DEFAULT_PAGE_SIZE, PAGE_SIZES};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{AdminError, Result};
use crate::utils::validation::{validate_one_of, validate_range, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_AUTH_URL: &str = "http://localhost:8081/api";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub auth_url: String,
    pub timeout_seconds: u64,
    pub page_size: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AdminConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AdminError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AdminError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AdminError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn with_overrides(mut self, api_url: Option<String>, auth_url: Option<String>) -> Self {
        if let Some(url) = api_url {
            tracing::debug!("API URL overridden to {}", url);
            self.api.base_url = url;
        }
        if let Some(url) = auth_url {
            tracing::debug!("Auth URL overridden to {}", url);
            self.api.auth_url = url;
        }
        self
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_url("api.base_url", &self.api.base_url)?;
        validate_url("api.auth_url", &self.api.auth_url)?;
        validate_range("api.timeout_seconds", self.api.timeout_seconds, 1, 300)?;
        validate_one_of("api.page_size", self.api.page_size, &PAGE_SIZES)?;

        let levels = ["trace", "debug", "info", "warn", "error"];
        if !levels.contains(&self.logging.level.as_str()) {
            return Err(AdminError::InvalidConfigValueError {
                field: "logging.level".to_string(),
                value: self.logging.level.clone(),
                reason: format!("Valid levels: {}", levels.join(", ")),
            });
        }

        Ok(())
    }
}

impl ConfigProvider for AdminConfig {
    fn api_url(&self) -> &str {
        &self.api.base_url
    }

    fn auth_url(&self) -> &str {
        &self.api.auth_url
    }

    fn timeout_seconds(&self) -> u64 {
        self.api.timeout_seconds
    }

    fn default_page_size(&self) -> u32 {
        self.api.page_size
    }
}

impl Validate for AdminConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[api]
base_url = "https://erp.exemplo.com.br/api"
auth_url = "https://auth.exemplo.com.br/api"
timeout_seconds = 10
page_size = 20

[logging]
level = "debug"
json = true
"#;

        let config = AdminConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api_url(), "https://erp.exemplo.com.br/api");
        assert_eq!(config.default_page_size(), 20);
        assert!(config.logging.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = AdminConfig::from_toml_str("").unwrap();
        assert_eq!(config, AdminConfig::default());
        assert_eq!(config.api_url(), DEFAULT_API_URL);
        assert_eq!(config.timeout_seconds(), DEFAULT_TIMEOUT_SECONDS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("INSUMOS_TEST_API_URL", "https://api.teste.com/api");

        let config = AdminConfig::from_toml_str(
            r#"
[api]
base_url = "${INSUMOS_TEST_API_URL}"
"#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://api.teste.com/api");

        std::env::remove_var("INSUMOS_TEST_API_URL");
    }

    #[test]
    fn test_unresolved_variable_fails_validation() {
        let config = AdminConfig::from_toml_str(
            r#"
[api]
base_url = "${INSUMOS_VARIAVEL_INEXISTENTE}"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation() {
        let mut config = AdminConfig::default();
        config.api.page_size = 15;
        assert!(config.validate().is_err());

        let mut config = AdminConfig::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());

        let config = AdminConfig::default()
            .with_overrides(Some("http://10.0.0.2:8080/api".to_string()), None);
        assert_eq!(config.api_url(), "http://10.0.0.2:8080/api");
        assert_eq!(config.auth_url(), DEFAULT_AUTH_URL);
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[api]\nbase_url = \"http://estoque.local/api\"\n")
            .unwrap();

        let config = AdminConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.api.base_url, "http://estoque.local/api");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AdminConfig::from_toml_str("[api\nbase_url = 1").unwrap_err();
        assert!(matches!(err, AdminError::ConfigError { .. }));
    }
}
