use crate::api::client::ApiClient;
use crate::api::resource::CrudResource;
use crate::api::session::Session;
use crate::domain::model::{EntradaInsumos, FiltrosEntrada, LoteEntrada};
use crate::utils::error::Result;

/// Incoming-goods receipts.
pub struct EntradaInsumosService<'a> {
    client: &'a ApiClient,
}

impl<'a> EntradaInsumosService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }
}

impl CrudResource for EntradaInsumosService<'_> {
    type Entity = EntradaInsumos;
    type Payload = EntradaInsumos;
    type Filter = FiltrosEntrada;

    fn client(&self) -> &ApiClient {
        self.client
    }

    fn path(&self) -> &'static str {
        "/entrada-insumos"
    }
}

/// Read-only access to the lots generated by receipts.
pub struct LoteEntradaService<'a> {
    client: &'a ApiClient,
}

impl<'a> LoteEntradaService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, session: &Session, id: i64) -> Result<LoteEntrada> {
        let path = format!("/lote-entrada/{}", id);
        self.client.get_json(&path, &[], Some(session)).await
    }

    pub async fn by_entrada(&self, session: &Session, entrada_id: i64) -> Result<LoteEntrada> {
        let path = format!("/lote-entrada/entrada/insumos/{}", entrada_id);
        self.client.get_json(&path, &[], Some(session)).await
    }
}
