//! HTTP client for the console backend
//!
//! One `reqwest` client built at construction, bearer attached per request,
//! JSON in and out. Endpoints follow the backend's `{base}/{resource}[/{id}]`
//! shape; list responses arrive wrapped in a `{"data": [...]}` envelope.

use anyhow::{Context, Result};
use reqwest::multipart;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::warn;
use url::Url;

use crate::attachments::UploadRequest;
use crate::config::ConsoleConfig;
use crate::error::TransportError;
use crate::identity::IdentityKey;
use crate::models::Document;

use super::filters::ListFilters;

pub struct ApiClient {
    http: Client,
    base: Url,
    upload_timeout: Duration,
    bearer: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ConsoleConfig) -> Result<Self> {
        let base = Url::parse(&config.api_base).context("invalid API base URL")?;
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            base,
            upload_timeout: Duration::from_secs(config.upload_timeout_secs),
            bearer: None,
        })
    }

    /// Attach the bearer credential obtained from the session store.
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    pub fn set_bearer(&mut self, token: Option<String>) {
        self.bearer = token;
    }

    /// Create an entity; the response carries the server-assigned id.
    pub async fn create(&self, resource: &str, payload: &Value) -> Result<Value, TransportError> {
        let url = self.endpoint(&[resource])?;
        let response = self.authorize(self.http.post(url)).json(payload).send().await?;
        let response = check(response).await?;
        Ok(response.json().await?)
    }

    pub async fn update(
        &self,
        resource: &str,
        id: &IdentityKey,
        payload: &Value,
    ) -> Result<Value, TransportError> {
        let url = self.endpoint(&[resource, id.as_str()])?;
        let response = self.authorize(self.http.put(url)).json(payload).send().await?;
        let response = check(response).await?;
        Ok(response.json().await?)
    }

    /// List a resource. A response without a data array is logged and
    /// treated as empty rather than failing the page.
    pub async fn list(
        &self,
        resource: &str,
        filters: &ListFilters,
    ) -> Result<Vec<Value>, TransportError> {
        let url = self.endpoint(&[resource])?;
        let response = self
            .authorize(self.http.get(url).query(&filters.to_query()))
            .send()
            .await?;
        let response = check(response).await?;
        let body: Value = response.json().await?;
        Ok(unwrap_list(resource, body))
    }

    pub async fn delete(&self, resource: &str, id: &IdentityKey) -> Result<(), TransportError> {
        let url = self.endpoint(&[resource, id.as_str()])?;
        let response = self.authorize(self.http.delete(url)).send().await?;
        check(response).await?;
        Ok(())
    }

    /// The single multipart upload endpoint: file plus owning-entity
    /// coordinates, returning the created document record.
    pub async fn upload_document(
        &self,
        request: &UploadRequest,
    ) -> Result<Document, TransportError> {
        let url = self.endpoint(&["documents", "upload"])?;

        let file = multipart::Part::bytes(request.bytes.clone())
            .file_name(request.file_name.clone());
        let mut form = multipart::Form::new()
            .part("file", file)
            .text("entityType", request.entity_type.as_str())
            .text("entityId", request.entity_id.as_str().to_string())
            .text("documentType", request.doc_type.as_str());
        if let Some(label) = &request.label {
            form = form.text("label", label.clone());
        }

        let response = self
            .authorize(self.http.post(url).timeout(self.upload_timeout))
            .multipart(form)
            .send()
            .await?;
        let response = check(response).await?;

        let body: Value = response.json().await?;
        let document = match body {
            Value::Object(mut fields) if fields.contains_key("data") => {
                serde_json::from_value(fields.remove("data").unwrap_or(Value::Null))?
            }
            other => serde_json::from_value(other)?,
        };
        Ok(document)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, TransportError> {
        let mut url = self.base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| TransportError::BadBaseUrl)?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.bearer {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

async fn check(response: Response) -> Result<Response, TransportError> {
    match response.status() {
        StatusCode::UNAUTHORIZED => Err(TransportError::Unauthorized),
        status if !status.is_success() => {
            let message = response.text().await.unwrap_or_default();
            Err(TransportError::Status {
                status: status.as_u16(),
                message,
            })
        }
        _ => Ok(response),
    }
}

fn unwrap_list(resource: &str, body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut fields) => match fields.remove("data") {
            Some(Value::Array(items)) => items,
            _ => {
                warn!(resource, "list response carried no data array; treating as empty");
                Vec::new()
            }
        },
        _ => {
            warn!(resource, "unexpected list response shape; treating as empty");
            Vec::new()
        }
    }
}
