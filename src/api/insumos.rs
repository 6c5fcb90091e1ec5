use crate::api::client::ApiClient;
use crate::api::resource::CrudResource;
use crate::api::session::Session;
use crate::domain::model::{FiltrosInsumo, Insumo, Opcao};
use crate::utils::error::Result;

pub struct InsumoService<'a> {
    client: &'a ApiClient,
}

impl<'a> InsumoService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn tipos(&self, session: &Session) -> Result<Vec<Opcao>> {
        self.client
            .get_json("/insumos/tipo-insumo", &[], Some(session))
            .await
    }

    pub async fn unidades_medida(&self, session: &Session) -> Result<Vec<Opcao>> {
        self.client
            .get_json("/insumos/unidade-medida", &[], Some(session))
            .await
    }

    pub async fn subtipos(&self, session: &Session, tipo_insumo: &str) -> Result<Vec<Opcao>> {
        let path = format!("/insumos/subtipos-insumo/{}", tipo_insumo);
        self.client.get_json(&path, &[], Some(session)).await
    }
}

impl CrudResource for InsumoService<'_> {
    type Entity = Insumo;
    type Payload = Insumo;
    type Filter = FiltrosInsumo;

    fn client(&self) -> &ApiClient {
        self.client
    }

    fn path(&self) -> &'static str {
        "/insumos"
    }
}
