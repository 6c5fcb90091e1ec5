#![allow(dead_code)]

use base64::{engine::general_purpose, Engine as _};
use httpmock::prelude::{HttpMockRequest, MockServer};
use insumos_admin::{AdminConfig, ApiClient};

/// Client whose API base is `/api` and auth base is `/auth-api` on the mock server.
pub fn client_for(server: &MockServer) -> ApiClient {
    let config = AdminConfig::default()
        .with_overrides(Some(server.url("/api")), Some(server.url("/auth-api")));
    ApiClient::new(&config).unwrap()
}

pub fn jwt_with_exp(exp: i64) -> String {
    let header = general_purpose::URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload =
        general_purpose::URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"ana","exp":{}}}"#, exp));
    format!("{}.{}.assinatura", header, payload)
}

/// A token valid for roughly the next ten years.
pub fn fresh_jwt() -> String {
    jwt_with_exp(chrono::Utc::now().timestamp() + 315_360_000)
}

/// Request matcher for endpoints that must go out without a bearer token.
pub fn without_authorization(req: &HttpMockRequest) -> bool {
    req.headers.as_ref().map_or(true, |headers| {
        !headers
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case("authorization"))
    })
}
