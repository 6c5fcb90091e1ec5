use crate::api::client::ApiClient;
use crate::api::resource::CrudResource;
use crate::api::session::Session;
use crate::domain::model::{
    CategoriaProcesso, CriarFormulaFabricacao, FiltrosFormula, FormulaFabricacao, ProcessoOpcao,
};
use crate::utils::error::Result;

pub struct FormulaFabricacaoService<'a> {
    client: &'a ApiClient,
}

impl<'a> FormulaFabricacaoService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn tipos_processo(&self, session: &Session) -> Result<Vec<String>> {
        self.client
            .get_json(
                "/formula-fabricacao/tipos-processo-fabricacao",
                &[],
                Some(session),
            )
            .await
    }

    pub async fn processos(
        &self,
        session: &Session,
        categoria: CategoriaProcesso,
    ) -> Result<Vec<ProcessoOpcao>> {
        let path = format!("/formula-fabricacao/{}", categoria.path_segment());
        self.client.get_json(&path, &[], Some(session)).await
    }
}

impl CrudResource for FormulaFabricacaoService<'_> {
    type Entity = FormulaFabricacao;
    type Payload = CriarFormulaFabricacao;
    type Filter = FiltrosFormula;

    fn client(&self) -> &ApiClient {
        self.client
    }

    fn path(&self) -> &'static str {
        "/formula-fabricacao"
    }
}
