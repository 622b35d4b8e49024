//! Figma API client for fetching file data and exporting images.

use std::collections::HashMap;
use std::time::Duration;

#[cfg(test)]
use reqwest::header::HeaderMap;
use reqwest::{header::RETRY_AFTER, Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::api_types::{FigmaFile, FigmaImageExport, ImageFormat};
use crate::config::{Timeouts, DEFAULT_API_BASE_URL};
use crate::error::{FcgError, Result};

#[derive(Debug, Clone)]
pub enum FigmaAuth {
    PersonalAccessToken(String),
    OAuthToken(String),
}

impl FigmaAuth {
    pub fn from_env() -> Option<Self> {
        if let Ok(token) = std::env::var("FIGMA_TOKEN") {
            if !token.is_empty() {
                return Some(Self::PersonalAccessToken(token));
            }
        }

        if let Ok(token) = std::env::var("FIGMA_OAUTH_TOKEN") {
            if !token.is_empty() {
                return Some(Self::OAuthToken(token));
            }
        }

        None
    }

    fn token(&self) -> &str {
        match self {
            FigmaAuth::PersonalAccessToken(token) | FigmaAuth::OAuthToken(token) => token,
        }
    }

    fn apply(&self, builder: RequestBuilder) -> RequestBuilder {
        match self {
            FigmaAuth::PersonalAccessToken(token) => builder.header("X-FIGMA-TOKEN", token),
            FigmaAuth::OAuthToken(token) => builder.bearer_auth(token),
        }
    }

    #[cfg(test)]
    fn apply_to_header_map(&self, headers: &mut HeaderMap) {
        match self {
            FigmaAuth::PersonalAccessToken(token) => {
                headers.insert("X-FIGMA-TOKEN", token.parse().unwrap());
            }
            FigmaAuth::OAuthToken(token) => {
                headers.insert(
                    reqwest::header::AUTHORIZATION,
                    format!("Bearer {token}").parse().unwrap(),
                );
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ImageExportOptions {
    pub scale: f32,
    pub format: ImageFormat,
}

impl Default for ImageExportOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            format: ImageFormat::Png,
        }
    }
}

/// Document and image requests run on separate clients so each keeps its own timeout.
#[derive(Debug, Clone)]
pub struct FigmaClient {
    document_http: Client,
    image_http: Client,
    auth: FigmaAuth,
    base_url: Url,
}

impl FigmaClient {
    pub fn new(auth: FigmaAuth) -> Result<Self> {
        Self::with_base_url_and_timeouts(auth, DEFAULT_API_BASE_URL, Timeouts::default())
    }

    pub fn with_base_url(auth: FigmaAuth, base_url: impl AsRef<str>) -> Result<Self> {
        Self::with_base_url_and_timeouts(auth, base_url, Timeouts::default())
    }

    pub fn with_base_url_and_timeouts(
        auth: FigmaAuth,
        base_url: impl AsRef<str>,
        timeouts: Timeouts,
    ) -> Result<Self> {
        if auth.token().trim().is_empty() {
            return Err(FcgError::Config(
                "Missing Figma token; set FIGMA_TOKEN or FIGMA_OAUTH_TOKEN".to_string(),
            ));
        }

        let base_url = Url::parse(base_url.as_ref())?;

        Ok(Self {
            document_http: build_http(timeouts.document)?,
            image_http: build_http(timeouts.images)?,
            auth,
            base_url,
        })
    }

    /// Raw document JSON, exactly as the API returned it.
    pub async fn fetch_file_json(&self, file_key: &str) -> Result<Value> {
        let url = self.endpoint(&format!("/v1/files/{file_key}"))?;
        debug!(%url, "fetching Figma document");
        let req = self.auth.apply(self.document_http.get(url));
        send_json(req).await
    }

    pub async fn fetch_file(&self, file_key: &str) -> Result<FigmaFile> {
        let raw = self.fetch_file_json(file_key).await?;
        Ok(serde_json::from_value(raw)?)
    }

    /// Export URLs for every id in one batched request. Ids whose render failed are omitted.
    pub async fn export_images(
        &self,
        file_key: &str,
        node_ids: &[String],
        options: ImageExportOptions,
    ) -> Result<HashMap<String, String>> {
        validate_node_ids(node_ids, "exporting Figma images")?;
        validate_scale(options.scale)?;

        let mut url = self.endpoint(&format!("/v1/images/{file_key}"))?;
        url.query_pairs_mut()
            .append_pair("ids", &node_ids.join(","))
            .append_pair("scale", &options.scale.to_string())
            .append_pair("format", options.format.as_str());
        debug!(%url, count = node_ids.len(), "requesting Figma image exports");

        let req = self.auth.apply(self.image_http.get(url));
        let export: FigmaImageExport = send_json(req).await?;

        if let Some(err) = export.err.filter(|e| !e.is_empty()) {
            return Err(FcgError::figma_api(None, err));
        }

        Ok(export
            .images
            .into_iter()
            .filter_map(|(id, url)| url.filter(|u| !u.is_empty()).map(|u| (id, u)))
            .collect())
    }

    /// Download a rendered image. Export URLs are pre-signed, so no auth header is sent.
    pub async fn download_image(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .image_http
            .get(url)
            .send()
            .await
            .map_err(FcgError::Network)?;

        let status = response.status();

        if status.is_success() {
            return response
                .bytes()
                .await
                .map(|b| b.to_vec())
                .map_err(FcgError::Network);
        }

        let body = response.text().await.unwrap_or_default();
        Err(FcgError::figma_api(
            Some(status),
            format!(
                "failed to download image (status {}): {}",
                status.as_u16(),
                body
            ),
        ))
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(FcgError::InvalidUrl)
    }
}

fn build_http(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(FcgError::Network)
}

async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
    let response = request.send().await.map_err(FcgError::Network)?;
    let status = response.status();
    let retry_after = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let body = response.text().await.unwrap_or_default();

    if status.is_success() {
        return serde_json::from_str(&body).map_err(FcgError::Serialization);
    }

    let message = error_message(status, &body, retry_after.as_deref());
    if status == StatusCode::FORBIDDEN {
        return Err(FcgError::AccessDenied { message });
    }
    Err(FcgError::figma_api(Some(status), message))
}

fn validate_node_ids(node_ids: &[String], context: &str) -> Result<()> {
    if node_ids.is_empty() {
        return Err(FcgError::Config(format!(
            "node_ids cannot be empty when {context}"
        )));
    }
    Ok(())
}

/// Export scale range accepted by the images endpoint.
pub const MIN_SCALE: f32 = 0.01;
pub const MAX_SCALE: f32 = 4.0;

pub fn validate_scale(scale: f32) -> Result<()> {
    if !(MIN_SCALE..=MAX_SCALE).contains(&scale) {
        return Err(FcgError::Config(format!(
            "scale must be between {MIN_SCALE} and {MAX_SCALE} for Figma exports (got {scale})"
        )));
    }
    Ok(())
}

fn error_message(status: StatusCode, body: &str, retry_after: Option<&str>) -> String {
    let fallback = match status {
        StatusCode::FORBIDDEN => {
            "token invalid or lacks access to this file (status 403)".to_string()
        }
        _ => format!("Figma API returned status {}", status.as_u16()),
    };
    let parsed = serde_json::from_str::<Value>(body).ok();
    let from_body = parsed
        .as_ref()
        .and_then(|value| value.get("err").or_else(|| value.get("error")))
        .and_then(Value::as_str)
        .map(str::to_owned);

    match (status, retry_after, from_body) {
        (StatusCode::TOO_MANY_REQUESTS, Some(retry), Some(msg)) => {
            format!("{msg} (rate limited, retry after {retry}s)")
        }
        (StatusCode::TOO_MANY_REQUESTS, Some(retry), None) => {
            format!("rate limited by Figma API, retry after {retry}s")
        }
        (_, _, Some(msg)) => msg,
        _ => fallback,
    }
}
