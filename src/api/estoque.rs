use crate::api::client::ApiClient;
use crate::api::session::Session;
use crate::core::pagination::{Page, PageRequest, QueryParams};
use crate::domain::model::{Estoque, FiltrosEstoque, FiltrosLote, FiltrosMovimentacao, LoteEstoque, MovimentacaoEstoque};
use crate::utils::error::Result;

/// Stock is read-only from the dashboard; it changes through receipts
/// and production.
pub struct EstoqueService<'a> {
    client: &'a ApiClient,
}

impl<'a> EstoqueService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        session: &Session,
        filtros: &FiltrosEstoque,
        page: PageRequest,
    ) -> Result<Page<Estoque>> {
        let mut query = filtros.query_pairs();
        query.extend(page.query_pairs());
        self.client.get_json("/estoques", &query, Some(session)).await
    }

    pub async fn get(&self, session: &Session, id: i64) -> Result<Estoque> {
        let path = format!("/estoques/{}", id);
        self.client.get_json(&path, &[], Some(session)).await
    }

    pub async fn movimentacoes(
        &self,
        session: &Session,
        filtros: &FiltrosMovimentacao,
        page: PageRequest,
    ) -> Result<Page<MovimentacaoEstoque>> {
        let mut query = filtros.query_pairs();
        query.extend(page.query_pairs());
        self.client
            .get_json("/estoques/movimentacoes", &query, Some(session))
            .await
    }

    pub async fn lotes(&self, session: &Session, filtros: &FiltrosLote) -> Result<Vec<LoteEstoque>> {
        self.client
            .get_json("/estoques/lotes", &filtros.query_pairs(), Some(session))
            .await
    }
}
