//! reqwest-backed resource client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::domain::Resource;
use crate::domain::catalogue::Catalogue;
use crate::domain::types::RecordId;
use crate::domain::user::Credentials;
use crate::dto::auth::LoginResponse;
use crate::dto::envelope::{ApiMessage, Envelope, ListEnvelope, MessageEnvelope, Saved};
use crate::models::config::ConsoleConfig;
use crate::pagination::Page;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    AuthGateway, CatalogueReader, FileUploader, ListQuery, ResourceReader, ResourceWriter, Upload,
};
use crate::session::SessionHandle;

const JSON: &str = "application/json";

/// Talks to the REST backend, attaching the session token to every request.
#[derive(Clone)]
pub struct HttpRepository {
    base_url: String,
    client: Client,
    session: SessionHandle,
}

impl HttpRepository {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        session: SessionHandle,
    ) -> RepositoryResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            base_url,
            client,
            session,
        })
    }

    pub fn from_config(config: &ConsoleConfig, session: SessionHandle) -> RepositoryResult<Self> {
        Self::new(
            config.api_url.as_str(),
            Duration::from_secs(config.timeout_secs),
            session,
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Request with `Accept` and bearer headers but no explicit content type.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, self.url(path))
            .header(ACCEPT, JSON);

        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn json_request(&self, method: Method, path: &str) -> RequestBuilder {
        self.request(method, path).header(CONTENT_TYPE, JSON)
    }

    async fn send<R: DeserializeOwned>(&self, builder: RequestBuilder) -> RepositoryResult<R> {
        let response = builder.send().await.map_err(|err| {
            log::error!("Request failed to complete: {err}");
            RepositoryError::from(err)
        })?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let err = RepositoryError::from_response(status.as_u16(), &body);
            log::error!("Backend rejected request: {err}");
            return Err(err);
        }

        let body: &[u8] = if body.is_empty() { b"{}" } else { &body };
        Ok(serde_json::from_slice(body)?)
    }
}

fn encode_query(params: &[(&str, String)]) -> RepositoryResult<String> {
    serde_html_form::to_string(params)
        .map_err(|err| RepositoryError::InvalidRequest(format!("Failed to encode query: {err}")))
}

#[async_trait]
impl<T: Resource> ResourceReader<T> for HttpRepository {
    async fn list(&self, query: &ListQuery) -> RepositoryResult<Page<T>> {
        let query_string = encode_query(&query.params::<T>())?;
        log::debug!("GET /{}?{query_string}", T::PATH);

        let envelope: ListEnvelope<T> = self
            .send(self.json_request(Method::GET, &format!("{}?{query_string}", T::PATH)))
            .await?;

        Ok(envelope.into_page(query.pagination.per_page))
    }

    async fn get(&self, id: RecordId) -> RepositoryResult<T> {
        log::debug!("GET /{}/{id}", T::PATH);

        let envelope: Envelope<T> = self
            .send(self.json_request(Method::GET, &format!("{}/{id}", T::PATH)))
            .await?;

        Ok(envelope.data)
    }
}

#[async_trait]
impl<T: Resource> ResourceWriter<T> for HttpRepository {
    async fn create(&self, record: &T) -> RepositoryResult<Saved<T>> {
        log::debug!("POST /{}", T::PATH);

        self.send(self.json_request(Method::POST, T::PATH).json(record))
            .await
    }

    async fn update(&self, id: RecordId, record: &T) -> RepositoryResult<Saved<T>> {
        log::debug!("PUT /{}/{id}", T::PATH);

        self.send(
            self.json_request(Method::PUT, &format!("{}/{id}", T::PATH))
                .json(record),
        )
        .await
    }

    async fn delete(&self, id: RecordId) -> RepositoryResult<Option<ApiMessage>> {
        log::debug!("DELETE /{}/{id}", T::PATH);

        let envelope: MessageEnvelope = self
            .send(self.json_request(Method::DELETE, &format!("{}/{id}", T::PATH)))
            .await?;

        Ok(envelope.msg)
    }

    async fn delete_many(&self, ids: &[RecordId]) -> RepositoryResult<Option<ApiMessage>> {
        log::debug!("PATCH /{}/destroys ({} ids)", T::PATH, ids.len());

        let envelope: MessageEnvelope = self
            .send(
                self.json_request(Method::PATCH, &format!("{}/destroys", T::PATH))
                    .json(&json!({ "ids": ids })),
            )
            .await?;

        Ok(envelope.msg)
    }
}

#[async_trait]
impl CatalogueReader for HttpRepository {
    async fn list_catalogues(&self, kind: &str) -> RepositoryResult<Vec<Catalogue>> {
        let query_string = encode_query(&[("type", kind.to_string())])?;
        log::debug!("GET /{}?{query_string}", Catalogue::PATH);

        let envelope: Envelope<Vec<Catalogue>> = self
            .send(self.json_request(
                Method::GET,
                &format!("{}?{query_string}", Catalogue::PATH),
            ))
            .await?;

        Ok(envelope.data)
    }
}

#[async_trait]
impl AuthGateway for HttpRepository {
    async fn login(&self, credentials: &Credentials) -> RepositoryResult<LoginResponse> {
        log::debug!("POST /auth/login for {}", credentials.username);

        self.send(
            self.json_request(Method::POST, "auth/login")
                .json(credentials),
        )
        .await
    }

    async fn logout(&self) -> RepositoryResult<()> {
        log::debug!("POST /auth/logout");

        let _: MessageEnvelope = self
            .send(self.json_request(Method::POST, "auth/logout"))
            .await?;

        Ok(())
    }
}

#[async_trait]
impl FileUploader for HttpRepository {
    async fn upload<T: Resource>(
        &self,
        id: RecordId,
        upload: Upload,
    ) -> RepositoryResult<Option<ApiMessage>> {
        log::debug!("POST /{}/{id}/files ({})", T::PATH, upload.file_name);

        let part = Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(&upload.mime)?;
        let mut form = Form::new().part("file", part);
        if let Some(description) = upload.description {
            form = form.text("description", description);
        }

        // The multipart encoder sets the boundary-bearing content type.
        let envelope: MessageEnvelope = self
            .send(
                self.request(Method::POST, &format!("{}/{id}/files", T::PATH))
                    .multipart(form),
            )
            .await?;

        Ok(envelope.msg)
    }
}
