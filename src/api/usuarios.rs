use crate::api::client::{ApiClient, Base};
use crate::api::session::Session;
use crate::core::pagination::{Page, PageRequest, QueryParams};
use crate::domain::model::{AtualizarUsuario, CriarUsuario, FiltrosUsuario, Usuario};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use reqwest::multipart::{Form, Part};
use reqwest::Method;

pub struct UsuarioService<'a> {
    client: &'a ApiClient,
}

impl<'a> UsuarioService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Sign-up; needs no session.
    pub async fn create(&self, dados: &CriarUsuario) -> Result<Usuario> {
        dados.validate()?;
        self.client.post_json("/usuario/criar", dados, None).await
    }

    pub async fn list(
        &self,
        session: &Session,
        filtros: &FiltrosUsuario,
        page: PageRequest,
    ) -> Result<Page<Usuario>> {
        let mut query = filtros.query_pairs();
        query.extend(page.query_pairs());
        self.client.get_json("/usuario", &query, Some(session)).await
    }

    pub async fn get(&self, session: &Session, id: i64) -> Result<Usuario> {
        let path = format!("/usuario/{}", id);
        self.client.get_json(&path, &[], Some(session)).await
    }

    /// Sends the update as multipart form data, with the optional photo.
    pub async fn update(
        &self,
        session: &Session,
        id: i64,
        dados: AtualizarUsuario,
    ) -> Result<Usuario> {
        dados.usuario.validate()?;

        let mut form = Form::new();
        for (key, value) in dados.text_fields() {
            form = form.text(key, value);
        }
        if let Some(foto) = dados.foto_perfil {
            let part = Part::bytes(foto.bytes)
                .file_name(foto.nome_arquivo)
                .mime_str(&foto.mime)?;
            form = form.part("fotoPerfil", part);
        }

        let path = format!("/usuario/{}/atualizar", id);
        let request = self
            .client
            .request(Method::PUT, Base::Api, &path, Some(session))?
            .multipart(form);
        self.client.send_json(request).await
    }

    pub async fn delete(&self, session: &Session, id: i64) -> Result<()> {
        let path = format!("/usuario/{}", id);
        self.client.delete(&path, Some(session)).await
    }
}
