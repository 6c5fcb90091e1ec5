use crate::api::client::ApiClient;
use crate::api::session::Session;
use crate::core::pagination::{Page, PageRequest, QueryParams};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Standard list/get/create/update/delete over one backend collection.
/// Payloads are validated locally before anything is sent.
#[async_trait]
pub trait CrudResource: Send + Sync {
    type Entity: DeserializeOwned + Send;
    type Payload: Serialize + Validate + Sync;
    type Filter: QueryParams + Sync;

    fn client(&self) -> &ApiClient;

    fn path(&self) -> &'static str;

    async fn list(
        &self,
        session: &Session,
        filter: &Self::Filter,
        page: PageRequest,
    ) -> Result<Page<Self::Entity>> {
        let mut query = filter.query_pairs();
        query.extend(page.query_pairs());
        self.client().get_json(self.path(), &query, Some(session)).await
    }

    async fn get(&self, session: &Session, id: i64) -> Result<Self::Entity> {
        let path = format!("{}/{}", self.path(), id);
        self.client().get_json(&path, &[], Some(session)).await
    }

    async fn create(&self, session: &Session, payload: &Self::Payload) -> Result<Self::Entity> {
        payload.validate()?;
        self.client().post_json(self.path(), payload, Some(session)).await
    }

    async fn update(
        &self,
        session: &Session,
        id: i64,
        payload: &Self::Payload,
    ) -> Result<Self::Entity> {
        payload.validate()?;
        let path = format!("{}/{}", self.path(), id);
        self.client().put_json(&path, payload, Some(session)).await
    }

    async fn delete(&self, session: &Session, id: i64) -> Result<()> {
        let path = format!("{}/{}", self.path(), id);
        tracing::info!("Deleting {}", path);
        self.client().delete(&path, Some(session)).await
    }
}
