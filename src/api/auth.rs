use crate::api::client::{ApiClient, Base};
use crate::api::session::Session;
use crate::domain::model::{Credenciais, Token};
use crate::utils::error::{AdminError, Result};
use reqwest::Method;
use serde_json::json;

/// Login lifecycle against the auth backend.
pub struct AuthService<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<Session> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AdminError::validation(
                "username",
                "Usuário e senha são obrigatórios.",
            ));
        }

        let credenciais = Credenciais {
            username: username.trim().to_string(),
            password: password.to_string(),
        };
        let request = self
            .client
            .request(Method::POST, Base::Auth, "/auth/login", None)?
            .json(&credenciais);
        let token: Token = self.client.send_json(request).await?;

        tracing::info!(user_id = token.id, "Logged in");
        Ok(Session::from_token(token))
    }

    /// Ends the session on the server. The session is consumed either way.
    pub async fn logout(&self, session: Session) -> Result<String> {
        let request = self
            .client
            .request(Method::POST, Base::Auth, "/auth/logout", Some(&session))?;
        let message = self.client.send_text(request).await?;
        tracing::info!(user_id = ?session.user_id(), "Logged out");
        Ok(message)
    }

    pub async fn validate_token(&self, token: &str) -> Result<Token> {
        let request = self
            .client
            .request(Method::GET, Base::Auth, "/auth/validar-token", None)?
            .query(&[("token", token)]);
        self.client.send_json(request).await
    }

    /// Checks a stored token with the server and turns it into a session.
    pub async fn resume(&self, token: &str) -> Result<Session> {
        let session = Session::from_raw(token);
        if session.is_expired() {
            return Err(AdminError::SessionExpired);
        }
        let validated = self.validate_token(token).await?;
        Ok(Session::from_token(validated))
    }

    pub async fn request_password_reset(&self, email: &str) -> Result<String> {
        let request = self
            .client
            .request(Method::POST, Base::Auth, "/auth/esqueceu-senha", None)?
            .json(&json!({ "email": email }));
        self.client.send_text(request).await
    }

    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<String> {
        let request = self
            .client
            .request(Method::POST, Base::Auth, "/auth/reset-senha", None)?
            .json(&json!({ "token": token, "newPassword": new_password }));
        self.client.send_text(request).await
    }
}
