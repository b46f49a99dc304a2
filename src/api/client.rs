//! Blocking HTTP client for the REST API
//!
//! Every request is issued synchronously from the event loop, with the
//! timeout taken from the config. Non-2xx responses are mapped to `ApiError`.

use super::{ApiError, ApiResult, CatalogApi, DependentRef};
use crate::config::ApiSettings;
use crate::types::{Tematica, Video};
use anyhow::{Context, Result};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Longest server error body kept in a message
const MAX_ERROR_BODY: usize = 200;

/// HTTP implementation of `CatalogApi`
pub struct HttpApi {
    http: Client,
    base_url: String,
}

impl HttpApi {
    /// Create a client for the configured endpoint
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs.max(1)))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    /// GET a JSON document
    fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> ApiResult<T> {
        let url = self.url(path);
        let mut request = self.http.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = self.execute(request, "GET", &url)?;
        decode(response, &url)
    }

    /// Send a JSON body and decode the JSON answer, `None` when the body is empty
    fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ApiResult<Option<T>> {
        let url = self.url(path);
        let label = method.to_string();
        let request = self.http.request(method, &url).json(body);
        let response = self.execute(request, &label, &url)?;

        let text = read_body(response, &url)?;
        if text.trim().is_empty() {
            debug!(%url, "empty response body");
            return Ok(None);
        }
        parse_body(&text, &url).map(Some)
    }

    fn delete(&self, path: &str) -> ApiResult<()> {
        let url = self.url(path);
        let request = self.http.delete(&url);
        self.execute(request, "DELETE", &url)?;
        Ok(())
    }

    /// Send a request and map transport failures and error statuses
    fn execute(&self, request: RequestBuilder, method: &str, url: &str) -> ApiResult<Response> {
        debug!(%method, %url, "api request");

        let response = request.send().map_err(|e| {
            warn!(%method, %url, error = %e, "api request failed");
            ApiError::Network {
                url: url.to_string(),
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        let message = error_message(&body)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());
        warn!(%method, %url, status = status.as_u16(), %message, "api error status");

        Err(match status {
            StatusCode::NOT_FOUND => ApiError::NotFound(message),
            StatusCode::CONFLICT => ApiError::Conflict(message),
            _ => ApiError::Status {
                status: status.as_u16(),
                message,
            },
        })
    }
}

impl CatalogApi for HttpApi {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn list_tematicas(&self) -> ApiResult<Vec<Tematica>> {
        self.get_json("tematicas", &[])
    }

    fn get_tematica(&self, id: u64) -> ApiResult<Tematica> {
        self.get_json(&format!("tematicas/{}", id), &[])
    }

    fn create_tematica(&self, tematica: &Tematica) -> ApiResult<Tematica> {
        let saved = self.send_json(Method::POST, "tematicas", tematica)?;
        Ok(saved.unwrap_or_else(|| tematica.clone()))
    }

    fn update_tematica(&self, id: u64, tematica: &Tematica) -> ApiResult<Tematica> {
        let saved = self.send_json(Method::PUT, &format!("tematicas/{}", id), tematica)?;
        Ok(saved.unwrap_or_else(|| Tematica {
            id: Some(id),
            ..tematica.clone()
        }))
    }

    fn delete_tematica(&self, id: u64) -> ApiResult<()> {
        self.delete(&format!("tematicas/{}", id))
    }

    fn list_videos(&self) -> ApiResult<Vec<Video>> {
        self.get_json("videos", &[])
    }

    fn videos_by_tematica(&self, tematica_id: u64) -> ApiResult<Vec<DependentRef>> {
        self.get_json("videos", &[("tematicaId", tematica_id.to_string())])
    }

    fn get_video(&self, id: u64) -> ApiResult<Video> {
        self.get_json(&format!("videos/{}", id), &[])
    }

    fn create_video(&self, video: &Video) -> ApiResult<Video> {
        let saved = self.send_json(Method::POST, "videos", video)?;
        Ok(saved.unwrap_or_else(|| video.clone()))
    }

    fn update_video(&self, id: u64, video: &Video) -> ApiResult<Video> {
        let saved = self.send_json(Method::PUT, &format!("videos/{}", id), video)?;
        Ok(saved.unwrap_or_else(|| Video {
            id: Some(id),
            ..video.clone()
        }))
    }

    fn delete_video(&self, id: u64) -> ApiResult<()> {
        self.delete(&format!("videos/{}", id))
    }
}

/// Read the body and parse it as JSON
fn decode<T: DeserializeOwned>(response: Response, url: &str) -> ApiResult<T> {
    let body = read_body(response, url)?;
    parse_body(&body, url)
}

fn read_body(response: Response, url: &str) -> ApiResult<String> {
    response.text().map_err(|e| ApiError::Network {
        url: url.to_string(),
        message: e.to_string(),
    })
}

fn parse_body<T: DeserializeOwned>(body: &str, url: &str) -> ApiResult<T> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}

/// Extract a readable message from an error body
fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        for key in ["message", "error", "detail"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return Some(text.to_string());
            }
        }
    }

    Some(trimmed.chars().take(MAX_ERROR_BODY).collect())
}
