use crate::api::session::Session;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{AdminError, ApiErrorResponse, Result};
use crate::utils::validation::validate_url;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use url::Url;

/// Endpoints that are called without a bearer token even when a session exists.
pub const UNAUTHENTICATED_ENDPOINTS: [&str; 4] = [
    "/auth/login",
    "/auth/esqueceu-senha",
    "/usuario/criar",
    "/auth/logout",
];

/// Which backend a path is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base {
    Api,
    Auth,
}

pub type Query = [(&'static str, String)];

#[derive(Debug, Clone)]
pub struct ApiClient {
    api_url: String,
    auth_url: String,
    http: Client,
}

impl ApiClient {
    pub fn new<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        validate_url("api.base_url", config.api_url())?;
        validate_url("api.auth_url", config.auth_url())?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;

        Ok(Self {
            api_url: config.api_url().trim_end_matches('/').to_string(),
            auth_url: config.auth_url().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn url(&self, base: Base, path: &str) -> Result<Url> {
        let root = match base {
            Base::Api => &self.api_url,
            Base::Auth => &self.auth_url,
        };
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{}/{}", root, path))?)
    }

    /// Builds a request. The session, when given, is attached as a bearer
    /// token unless the path is one of the unauthenticated endpoints.
    pub fn request(
        &self,
        method: Method,
        base: Base,
        path: &str,
        session: Option<&Session>,
    ) -> Result<RequestBuilder> {
        let url = self.url(base, path)?;
        let session = session.filter(|_| !is_unauthenticated(url.path()));

        if let Some(session) = session {
            if session.is_expired() {
                tracing::warn!("Refusing to send request with an expired session");
                return Err(AdminError::SessionExpired);
            }
        }

        tracing::debug!(
            method = %method,
            url = %url,
            authenticated = session.is_some(),
            "Building API request"
        );

        let mut request = self.http.request(method, url).header(ACCEPT, "application/json");
        if let Some(session) = session {
            request = request.header(AUTHORIZATION, session.bearer());
        }
        Ok(request)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("Server rejected the session");
            return Err(AdminError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let errors = ApiErrorResponse::parse_body(status.as_u16(), &body);
            tracing::error!("API request failed with status {}: {:?}", status, errors);
            return Err(AdminError::ApiError {
                status: status.as_u16(),
                errors,
            });
        }

        Ok(response)
    }

    pub async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.execute(request).await?;
        Ok(response.json().await?)
    }

    /// Plain text bodies; a JSON string literal is unquoted.
    pub async fn send_text(&self, request: RequestBuilder) -> Result<String> {
        let response = self.execute(request).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str::<String>(&body).unwrap_or(body))
    }

    pub async fn send_empty(&self, request: RequestBuilder) -> Result<()> {
        self.execute(request).await?;
        Ok(())
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Query,
        session: Option<&Session>,
    ) -> Result<T> {
        let request = self.request(Method::GET, Base::Api, path, session)?.query(query);
        self.send_json(request).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B, session: Option<&Session>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, Base::Api, path, session)?.json(body);
        self.send_json(request).await
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B, session: Option<&Session>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::PUT, Base::Api, path, session)?.json(body);
        self.send_json(request).await
    }

    pub async fn delete(&self, path: &str, session: Option<&Session>) -> Result<()> {
        let request = self.request(Method::DELETE, Base::Api, path, session)?;
        self.send_empty(request).await
    }
}

fn is_unauthenticated(url_path: &str) -> bool {
    UNAUTHENTICATED_ENDPOINTS
        .iter()
        .any(|endpoint| url_path.contains(endpoint))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::session::fake_jwt;

    struct TestConfig;

    impl ConfigProvider for TestConfig {
        fn api_url(&self) -> &str {
            "http://localhost:8080/api/"
        }

        fn auth_url(&self) -> &str {
            "http://localhost:8081/api"
        }

        fn timeout_seconds(&self) -> u64 {
            5
        }

        fn default_page_size(&self) -> u32 {
            10
        }
    }

    fn header(request: RequestBuilder, name: &str) -> Option<String> {
        let request = request.build().unwrap();
        request
            .headers()
            .get(name)
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[test]
    fn test_url_keeps_base_path() {
        let client = ApiClient::new(&TestConfig).unwrap();
        assert_eq!(
            client.url(Base::Api, "/pessoa/3").unwrap().as_str(),
            "http://localhost:8080/api/pessoa/3"
        );
        assert_eq!(
            client.url(Base::Auth, "auth/login").unwrap().as_str(),
            "http://localhost:8081/api/auth/login"
        );
    }

    #[test]
    fn test_session_is_attached_to_protected_paths_only() {
        let client = ApiClient::new(&TestConfig).unwrap();
        let session = Session::from_raw("abc");

        let protected = client
            .request(Method::GET, Base::Api, "/insumos", Some(&session))
            .unwrap();
        assert_eq!(header(protected, "authorization").as_deref(), Some("Bearer abc"));

        let public = client
            .request(Method::POST, Base::Api, "/usuario/criar", Some(&session))
            .unwrap();
        assert_eq!(header(public, "authorization"), None);

        let anonymous = client.request(Method::GET, Base::Api, "/insumos", None).unwrap();
        assert_eq!(header(anonymous, "authorization"), None);
    }

    #[test]
    fn test_expired_session_is_rejected_before_sending() {
        let client = ApiClient::new(&TestConfig).unwrap();
        let session = Session::from_raw(fake_jwt(1_000));
        let err = client
            .request(Method::GET, Base::Api, "/pessoa", Some(&session))
            .unwrap_err();
        assert!(matches!(err, AdminError::SessionExpired));
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        struct Broken;
        impl ConfigProvider for Broken {
            fn api_url(&self) -> &str {
                "ftp://example.com"
            }
            fn auth_url(&self) -> &str {
                "http://localhost"
            }
            fn timeout_seconds(&self) -> u64 {
                1
            }
            fn default_page_size(&self) -> u32 {
                10
            }
        }
        assert!(ApiClient::new(&Broken).is_err());
    }
}
