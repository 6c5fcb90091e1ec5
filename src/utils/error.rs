use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned by the backend, either alone or inside an array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub code: u16,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub cause: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct PartialErrorResponse {
    code: Option<u16>,
    #[serde(rename = "type")]
    kind: Option<String>,
    message: Option<String>,
    cause: Option<String>,
}

impl PartialErrorResponse {
    fn complete(self, status: u16) -> ApiErrorResponse {
        ApiErrorResponse {
            code: self.code.unwrap_or(status),
            kind: self.kind.unwrap_or_else(|| "DESCONHECIDO".to_string()),
            message: self.message.unwrap_or_else(|| "Erro inesperado".to_string()),
            cause: self.cause,
        }
    }
}

impl ApiErrorResponse {
    /// Parses an error body; unknown shapes fall back to a single generic entry.
    pub fn parse_body(status: u16, body: &str) -> Vec<ApiErrorResponse> {
        if let Ok(items) = serde_json::from_str::<Vec<PartialErrorResponse>>(body) {
            if !items.is_empty() {
                return items.into_iter().map(|e| e.complete(status)).collect();
            }
        }

        let single = serde_json::from_str::<PartialErrorResponse>(body).unwrap_or_default();
        vec![single.complete(status)]
    }
}

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error on '{field}': {message}")]
    ValidationError { field: String, message: String },

    #[error("Not authenticated or session rejected by the server")]
    Unauthorized,

    #[error("Session expired, log in again")]
    SessionExpired,

    #[error("API responded with status {status}: {}", summarize(.errors))]
    ApiError {
        status: u16,
        errors: Vec<ApiErrorResponse>,
    },

    #[error("Export error: {message}")]
    ExportError { message: String },
}

fn summarize(errors: &[ApiErrorResponse]) -> String {
    errors
        .iter()
        .map(|e| format!("[{}] {}", e.kind, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Authentication,
    Configuration,
    Validation,
    Remote,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AdminError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AdminError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AdminError::HttpError(_) | AdminError::UrlError(_) => ErrorCategory::Network,
            AdminError::Unauthorized | AdminError::SessionExpired => ErrorCategory::Authentication,
            AdminError::ConfigError { .. }
            | AdminError::InvalidConfigValueError { .. }
            | AdminError::MissingConfigError { .. } => ErrorCategory::Configuration,
            AdminError::ValidationError { .. } => ErrorCategory::Validation,
            AdminError::ApiError { .. } | AdminError::SerializationError(_) => {
                ErrorCategory::Remote
            }
            AdminError::IoError(_) | AdminError::CsvError(_) | AdminError::ExportError { .. } => {
                ErrorCategory::Io
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AdminError::ValidationError { .. } | AdminError::ExportError { .. } => {
                ErrorSeverity::Low
            }
            AdminError::HttpError(_)
            | AdminError::Unauthorized
            | AdminError::SessionExpired => ErrorSeverity::Medium,
            AdminError::ApiError { status, .. } if *status < 500 => ErrorSeverity::Medium,
            AdminError::ApiError { .. }
            | AdminError::SerializationError(_)
            | AdminError::CsvError(_) => ErrorSeverity::High,
            AdminError::UrlError(_)
            | AdminError::ConfigError { .. }
            | AdminError::InvalidConfigValueError { .. }
            | AdminError::MissingConfigError { .. }
            | AdminError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check that the API URL is reachable and try again",
            ErrorCategory::Authentication => "Run `login` again and pass the new token",
            ErrorCategory::Configuration => "Review the configuration file and CLI overrides",
            ErrorCategory::Validation => "Correct the highlighted field and resubmit",
            ErrorCategory::Remote => "Inspect the server response; the request may need fixing",
            ErrorCategory::Io => "Check file permissions and the output path",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AdminError::Unauthorized => "Sessão inválida. Faça login novamente.".to_string(),
            AdminError::SessionExpired => "Sessão expirada. Faça login novamente.".to_string(),
            AdminError::ValidationError { message, .. } => message.clone(),
            AdminError::ApiError { errors, .. } => errors
                .first()
                .map(|e| e.message.clone())
                .unwrap_or_else(|| "Erro inesperado".to_string()),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AdminError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_error_body() {
        let errors = ApiErrorResponse::parse_body(
            400,
            r#"{"code": 409, "type": "DUPLICADO", "message": "CPF já cadastrado"}"#,
        );
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, 409);
        assert_eq!(errors[0].kind, "DUPLICADO");
        assert_eq!(errors[0].cause, None);
    }

    #[test]
    fn test_parse_array_error_body_fills_defaults() {
        let errors = ApiErrorResponse::parse_body(
            422,
            r#"[{"message": "nome obrigatório"}, {"type": "CAMPO", "cause": "email"}]"#,
        );
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].code, 422);
        assert_eq!(errors[0].kind, "DESCONHECIDO");
        assert_eq!(errors[1].message, "Erro inesperado");
        assert_eq!(errors[1].cause.as_deref(), Some("email"));
    }

    #[test]
    fn test_parse_unstructured_body() {
        let errors = ApiErrorResponse::parse_body(500, "Internal Server Error");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, 500);
        assert_eq!(errors[0].message, "Erro inesperado");
    }

    #[test]
    fn test_severity_and_category() {
        assert_eq!(AdminError::Unauthorized.category(), ErrorCategory::Authentication);
        assert_eq!(
            AdminError::validation("cpfCnpj", "CPF ou CNPJ inválido.").severity(),
            ErrorSeverity::Low
        );
        let remote = AdminError::ApiError {
            status: 503,
            errors: ApiErrorResponse::parse_body(503, ""),
        };
        assert_eq!(remote.severity(), ErrorSeverity::High);
        assert_eq!(remote.user_friendly_message(), "Erro inesperado");
    }
}
