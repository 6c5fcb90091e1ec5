use crate::api::client::ApiClient;
use crate::api::resource::CrudResource;
use crate::api::session::Session;
use crate::core::pagination::push_text;
use crate::domain::model::{FiltrosPessoa, Pessoa, Unicidade};
use crate::utils::error::Result;

/// Clients, manufacturers and suppliers, all under `/pessoa`.
pub struct PessoaService<'a> {
    client: &'a ApiClient,
}

impl<'a> PessoaService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Asks the backend whether the document and e-mail are still free.
    pub async fn validar_unicidade(
        &self,
        session: &Session,
        cpf_cnpj: Option<String>,
        email: Option<String>,
    ) -> Result<Unicidade> {
        let mut query = Vec::new();
        push_text(&mut query, "cpfCnpj", &cpf_cnpj);
        push_text(&mut query, "email", &email);
        self.client
            .get_json("/pessoa/validar-unicidade", &query, Some(session))
            .await
    }
}

impl CrudResource for PessoaService<'_> {
    type Entity = Pessoa;
    type Payload = Pessoa;
    type Filter = FiltrosPessoa;

    fn client(&self) -> &ApiClient {
        self.client
    }

    fn path(&self) -> &'static str {
        "/pessoa"
    }
}
