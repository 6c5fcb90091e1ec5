use crate::core::document::{self, DocumentKind, Verdict, INVALID_DOCUMENT_MESSAGE};
use crate::core::masks;
use crate::core::pagination::{push_text, push_value, QueryParams};
use crate::utils::error::{AdminError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const INCOMPLETE_DOCUMENT_MESSAGE: &str = "Informe o CPF (11 dígitos) ou CNPJ (14 dígitos).";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoPessoa {
    PessoaFisica,
    PessoaJuridica,
}

impl TipoPessoa {
    pub fn from_kind(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::Cpf => TipoPessoa::PessoaFisica,
            DocumentKind::Cnpj => TipoPessoa::PessoaJuridica,
        }
    }

    pub fn descricao(self) -> &'static str {
        match self {
            TipoPessoa::PessoaFisica => "Pessoa Física",
            TipoPessoa::PessoaJuridica => "Pessoa Jurídica",
        }
    }
}

impl fmt::Display for TipoPessoa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TipoPessoa::PessoaFisica => "PESSOA_FISICA",
            TipoPessoa::PessoaJuridica => "PESSOA_JURIDICA",
        })
    }
}

impl FromStr for TipoPessoa {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "PESSOA_FISICA" | "FISICA" | "PF" => Ok(TipoPessoa::PessoaFisica),
            "PESSOA_JURIDICA" | "JURIDICA" | "PJ" => Ok(TipoPessoa::PessoaJuridica),
            other => Err(format!("tipo de pessoa desconhecido: {}", other)),
        }
    }
}

/// Which registry a person belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoCadastro {
    Cliente,
    Fabricante,
    Fornecedor,
}

impl fmt::Display for TipoCadastro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TipoCadastro::Cliente => "CLIENTE",
            TipoCadastro::Fabricante => "FABRICANTE",
            TipoCadastro::Fornecedor => "FORNECEDOR",
        })
    }
}

impl FromStr for TipoCadastro {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CLIENTE" | "CLIENTES" => Ok(TipoCadastro::Cliente),
            "FABRICANTE" | "FABRICANTES" => Ok(TipoCadastro::Fabricante),
            "FORNECEDOR" | "FORNECEDORES" => Ok(TipoCadastro::Fornecedor),
            other => Err(format!("tipo de cadastro desconhecido: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoEndereco {
    #[default]
    Residencial,
    Comercial,
    Outro,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Endereco {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub tipo: TipoEndereco,
    pub logradouro: String,
    pub complemento: String,
    pub bairro: String,
    pub cep: String,
    pub cidade: String,
    pub uf: String,
    pub referencia: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoContato {
    #[default]
    Vendedor,
    Dono,
    Representante,
    Socio,
    Divulgador,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contato {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub tipo: TipoContato,
    pub telefone: String,
    pub is_whatsapp: bool,
    pub is_telegram: bool,
    pub email: String,
    pub observacoes: String,
}

/// A client, manufacturer or supplier.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pessoa {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub cpf_cnpj: Option<String>,
    pub nome_fantasia: Option<String>,
    pub razao_social: Option<String>,
    pub inscricao_estadual: Option<String>,
    pub nome: Option<String>,
    pub enderecos: Vec<Endereco>,
    pub email: Option<String>,
    pub email_secundario: Option<String>,
    pub telefone: Option<String>,
    pub telefone_secundario: Option<String>,
    pub tipo_pessoa: Option<TipoPessoa>,
    pub tipo: Option<TipoCadastro>,
    pub contatos: Vec<Contato>,
}

impl Pessoa {
    pub fn new(tipo: TipoCadastro) -> Self {
        Self {
            tipo: Some(tipo),
            ..Self::default()
        }
    }

    /// Física for a complete CPF, jurídica for a complete CNPJ.
    pub fn tipo_pessoa_from_documento(&self) -> Option<TipoPessoa> {
        let digits = document::normalize(self.cpf_cnpj.as_deref()?);
        DocumentKind::of_digits(&digits).map(TipoPessoa::from_kind)
    }

    /// Stores the masked document and keeps `tipo_pessoa` in sync with it.
    pub fn set_documento(&mut self, raw: &str) -> Verdict {
        let check = document::normalize_and_validate(raw);
        self.cpf_cnpj = if check.masked.is_empty() {
            None
        } else {
            Some(check.masked.clone())
        };
        if let Some(kind) = check.kind {
            self.tipo_pessoa = Some(TipoPessoa::from_kind(kind));
        }
        check.verdict
    }

    pub fn nome_exibicao(&self) -> &str {
        [&self.nome_fantasia, &self.razao_social, &self.nome]
            .into_iter()
            .filter_map(|v| v.as_deref())
            .find(|v| !v.trim().is_empty())
            .unwrap_or("")
    }
}

fn check_email(field: &str, value: &Option<String>) -> Result<()> {
    match value.as_deref().and_then(masks::email_error) {
        Some(message) => Err(AdminError::validation(field, message)),
        None => Ok(()),
    }
}

fn check_phone(field: &str, value: &Option<String>) -> Result<()> {
    match value.as_deref().and_then(masks::phone_error) {
        Some(message) => Err(AdminError::validation(field, message)),
        None => Ok(()),
    }
}

impl Validate for Pessoa {
    fn validate(&self) -> Result<()> {
        if self.nome_exibicao().is_empty() {
            return Err(AdminError::validation(
                "nome",
                "Informe o nome, nome fantasia ou razão social.",
            ));
        }

        if let Some(raw) = self.cpf_cnpj.as_deref().filter(|v| !v.trim().is_empty()) {
            match document::normalize_and_validate(raw).verdict {
                Verdict::Valid => {}
                Verdict::Invalid => {
                    return Err(AdminError::validation("cpfCnpj", INVALID_DOCUMENT_MESSAGE))
                }
                Verdict::Incomplete => {
                    return Err(AdminError::validation("cpfCnpj", INCOMPLETE_DOCUMENT_MESSAGE))
                }
            }
        }

        check_email("email", &self.email)?;
        check_email("emailSecundario", &self.email_secundario)?;
        check_phone("telefone", &self.telefone)?;
        check_phone("telefoneSecundario", &self.telefone_secundario)?;

        for contato in &self.contatos {
            if let Some(message) = masks::phone_error(&contato.telefone) {
                return Err(AdminError::validation("contatos.telefone", message));
            }
            if let Some(message) = masks::email_error(&contato.email) {
                return Err(AdminError::validation("contatos.email", message));
            }
        }

        for endereco in &self.enderecos {
            if !endereco.cep.is_empty() && !masks::is_complete_cep(&endereco.cep) {
                return Err(AdminError::validation("enderecos.cep", "CEP inválido."));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FiltrosPessoa {
    pub nome: Option<String>,
    pub tipo: Option<TipoCadastro>,
    pub tipo_pessoa: Option<TipoPessoa>,
    pub cpf_cnpj: Option<String>,
}

impl QueryParams for FiltrosPessoa {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_value(&mut pairs, "tipoPessoa", &self.tipo_pessoa);
        push_text(&mut pairs, "nome", &self.nome);
        push_value(&mut pairs, "tipo", &self.tipo);
        push_text(&mut pairs, "cpfCnpj", &self.cpf_cnpj);
        pairs
    }
}

/// Answer of the uniqueness check for document and e-mail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unicidade {
    pub unico: bool,
    #[serde(default)]
    pub cpf_cnpj: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}
