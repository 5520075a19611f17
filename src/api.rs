use crate::config::ScannerConfig;
use crate::error::{Result, ScanError};
use crate::models::{Device, DeviceFilter, Installation, InstallationDraft};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Blocking client for the warehouse backend (`/api/...`).
pub struct ApiClient {
    client: Client,
    base: Url,
    session_token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, session_token: Option<String>, timeout: Duration) -> Result<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| ScanError::Config(format!("Invalid backend URL '{}': {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(ScanError::Config(format!("Invalid backend URL '{}'", base_url)));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ScanError::Config(e.to_string()))?;
        Ok(Self {
            client,
            base,
            session_token,
        })
    }

    pub fn from_config(config: &ScannerConfig) -> Result<Self> {
        Self::new(
            config.require_api_url()?,
            config.session_token.clone(),
            Duration::from_secs(config.http_timeout_secs),
        )
    }

    /// `{base}/api/<segments...>`, each segment percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ScanError::Config("Backend URL cannot have a path".to_string()))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.session_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Find a device by barcode, QR code or serial number.
    pub fn scan_device(&self, code: &str) -> Result<Option<Device>> {
        if !is_path_segment(code) {
            log::debug!("skipping lookup of unaddressable code {:?}", code);
            return Ok(None);
        }
        let url = self.endpoint(&["devices", "scan", code])?;
        let response = self.authorized(self.client.get(url)).send()?;
        read_optional(response)
    }

    pub fn get_device(&self, device_id: &str) -> Result<Option<Device>> {
        if !is_path_segment(device_id) {
            return Ok(None);
        }
        let url = self.endpoint(&["devices", device_id])?;
        let response = self.authorized(self.client.get(url)).send()?;
        read_optional(response)
    }

    pub fn list_devices(&self, filter: &DeviceFilter) -> Result<Vec<Device>> {
        let url = self.endpoint(&["devices"])?;
        let response = self
            .authorized(self.client.get(url).query(&filter.query_pairs()))
            .send()?;
        read_json(response)
    }

    /// Register an installation. The draft is validated before anything is sent.
    pub fn create_installation(&self, draft: &InstallationDraft) -> Result<Installation> {
        draft.validate()?;
        let url = self.endpoint(&["installations"])?;
        let response = self
            .authorized(self.client.post(url).json(draft))
            .send()?;
        read_json(response)
    }
}

/// `url` drops "." and ".." when pushing segments, so such codes would hit
/// the parent route.
fn is_path_segment(code: &str) -> bool {
    !matches!(code, "" | "." | "..")
}

fn read_optional<T: DeserializeOwned>(response: Response) -> Result<Option<T>> {
    if response.status() == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    read_json(response).map(Some)
}

fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let body = if status.is_success() {
        response.text()?
    } else {
        response.text().unwrap_or_default()
    };
    map_response(status, &body)
}

/// Map a status and body to the decoded value or a `ScanError`.
fn map_response<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T> {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(ScanError::Unauthorized);
    }
    if !status.is_success() {
        return Err(ScanError::Backend {
            status: status.as_u16(),
            message: backend_detail(body),
        });
    }
    Ok(serde_json::from_str(body)?)
}

/// Error message from a `{"detail": ...}` body, or the raw body.
pub fn backend_detail(body: &str) -> String {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| match v.get("detail") {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(other) if !other.is_null() => Some(other.to_string()),
            _ => None,
        });
    match detail {
        Some(d) => d,
        None if body.trim().is_empty() => "Empty response.".to_string(),
        None => body.trim().to_string(),
    }
}
