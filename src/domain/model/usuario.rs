use crate::core::masks;
use crate::core::pagination::{push_text, QueryParams};
use crate::utils::error::{AdminError, Result};
use crate::utils::validation::{require_text, Validate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Usuario,
    UsuarioPremium,
    Admin,
    Dono,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Login {
    pub id: Option<i64>,
    pub username: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,
    pub role: Option<Role>,
    pub authorities: Vec<Role>,
}

/// Token issued by the auth service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub id: i64,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credenciais {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Usuario {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub nome: String,
    pub telefone: String,
    pub email: String,
    pub instagram_user: Option<String>,
    pub tiktok_user: Option<String>,
    pub foto_usuario_id: Option<i64>,
    pub login_id: Option<i64>,
    pub login: Option<Login>,
}

impl Validate for Usuario {
    fn validate(&self) -> Result<()> {
        require_text("nome", Some(&self.nome), "O nome é obrigatório.")?;
        require_text("email", Some(&self.email), masks::INVALID_EMAIL_MESSAGE)?;
        if let Some(message) = masks::email_error(&self.email) {
            return Err(AdminError::validation("email", message));
        }
        if let Some(message) = masks::phone_error(&self.telefone) {
            return Err(AdminError::validation("telefone", message));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CriarUsuario {
    #[serde(flatten)]
    pub usuario: Usuario,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Validate for CriarUsuario {
    fn validate(&self) -> Result<()> {
        self.usuario.validate()?;
        require_text("password", self.password.as_deref(), "A senha é obrigatória.")
    }
}

/// Profile picture uploaded with a user update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FotoPerfil {
    pub nome_arquivo: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Update payload, sent as multipart form data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AtualizarUsuario {
    pub usuario: Usuario,
    pub password: Option<String>,
    pub nova_senha: Option<String>,
    pub foto_perfil: Option<FotoPerfil>,
}

impl AtualizarUsuario {
    /// Text parts of the multipart body; unset fields are left out.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let u = &self.usuario;
        let mut fields = Vec::new();
        if let Some(id) = u.id {
            fields.push(("id", id.to_string()));
        }
        fields.push(("nome", u.nome.clone()));
        fields.push(("telefone", u.telefone.clone()));
        fields.push(("email", u.email.clone()));
        let optional = [
            ("instagramUser", &u.instagram_user),
            ("tiktokUser", &u.tiktok_user),
            ("password", &self.password),
            ("novaSenha", &self.nova_senha),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                fields.push((key, value.clone()));
            }
        }
        fields
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FiltrosUsuario {
    pub texto_busca: Option<String>,
}

impl QueryParams for FiltrosUsuario {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_text(&mut pairs, "textoBusca", &self.texto_busca);
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usuario() -> Usuario {
        Usuario {
            nome: "Ana".to_string(),
            telefone: "(11) 98765-4321".to_string(),
            email: "ana@aromas.com.br".to_string(),
            ..Usuario::default()
        }
    }

    #[test]
    fn test_create_payload_is_flat() {
        let json = serde_json::to_value(CriarUsuario {
            usuario: usuario(),
            password: Some("segredo".to_string()),
        })
        .unwrap();
        assert_eq!(json["nome"], "Ana");
        assert_eq!(json["password"], "segredo");
        assert!(json.get("usuario").is_none());
    }

    #[test]
    fn test_user_validation() {
        assert!(usuario().validate().is_ok());
        let mut sem_email = usuario();
        sem_email.email = "ana".to_string();
        assert!(sem_email.validate().is_err());
        assert!(CriarUsuario {
            usuario: usuario(),
            password: None
        }
        .validate()
        .is_err());
    }

    #[test]
    fn test_update_text_fields_skip_unset_values() {
        let update = AtualizarUsuario {
            usuario: Usuario {
                id: Some(4),
                instagram_user: Some("@aromas".to_string()),
                ..usuario()
            },
            nova_senha: Some("nova".to_string()),
            ..AtualizarUsuario::default()
        };
        let keys: Vec<_> = update.text_fields().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["id", "nome", "telefone", "email", "instagramUser", "novaSenha"]);
    }

    #[test]
    fn test_login_hides_empty_password() {
        let login: Login = serde_json::from_value(serde_json::json!({
            "id": 1, "username": "ana", "role": "ADMIN", "authorities": ["ADMIN", "USUARIO"]
        }))
        .unwrap();
        assert_eq!(login.role, Some(Role::Admin));
        let json = serde_json::to_value(&login).unwrap();
        assert!(json.get("password").is_none());
    }
}
