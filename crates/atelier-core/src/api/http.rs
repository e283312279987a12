//! HTTP binding for the remote API
//!
//! Uses `reqwest`, which runs on the browser's fetch when compiled for
//! wasm32. No timeout is set here; the transport's own applies.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use super::config::ApiConfig;
use super::traits::{ClientApi, MeasurementApi};
use super::wire::{
    ClientData, ClientsData, Envelope, ErrorBody, MeasurementData, MeasurementsData, RemoteClient,
    RemoteMeasurement,
};
use crate::domain::{ClientInput, ClientPatch, MeasurementPatch, NewMeasurement};
use crate::error::{ApiError, ApiResult};

/// Characters escaped when an id is placed in a path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Remote API client
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpApi {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.header(reqwest::header::AUTHORIZATION, format!("Bearer {}", token)),
            None => request,
        }
    }

    /// Send and decode a success envelope
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let body = self.send_raw(request).await?;
        decode_envelope(&body)
    }

    /// Send and ignore the success body
    async fn send_empty(&self, request: RequestBuilder) -> ApiResult<()> {
        self.send_raw(request).await.map(|_| ())
    }

    async fn send_raw(&self, request: RequestBuilder) -> ApiResult<String> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "API request rejected");
            return Err(classify_failure(status.as_u16(), &body));
        }
        Ok(body)
    }
}

/// Percent-encode an id as a single path segment
pub(crate) fn encode_segment(id: &str) -> String {
    utf8_percent_encode(id, PATH_SEGMENT).to_string()
}

/// Decode `{"data": T}` from a success body
pub(crate) fn decode_envelope<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    serde_json::from_str::<Envelope<T>>(body)
        .map(|envelope| envelope.data)
        .map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

/// Map a non-success status and its body onto the error taxonomy
pub(crate) fn classify_failure(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .unwrap_or_default()
        .message;
    match status {
        401 => ApiError::Unauthorized(message),
        404 => ApiError::NotFound(message),
        _ => ApiError::Server { status, message },
    }
}

#[async_trait(?Send)]
impl ClientApi for HttpApi {
    async fn create_client(&self, input: &ClientInput) -> ApiResult<RemoteClient> {
        tracing::debug!("POST /api/v1/clients");
        let request = self.client.post(self.url("/api/v1/clients")).json(input);
        self.send::<ClientData>(request).await.map(|data| data.client)
    }

    async fn list_clients(&self) -> ApiResult<Vec<RemoteClient>> {
        tracing::debug!("GET /api/v1/clients");
        let request = self.client.get(self.url("/api/v1/clients"));
        self.send::<ClientsData>(request).await.map(|data| data.clients)
    }

    async fn get_client(&self, id: &str) -> ApiResult<RemoteClient> {
        let path = format!("/api/v1/clients/{}", encode_segment(id));
        tracing::debug!("GET {}", path);
        let request = self.client.get(self.url(&path));
        self.send::<ClientData>(request).await.map(|data| data.client)
    }

    async fn update_client(&self, id: &str, patch: &ClientPatch) -> ApiResult<RemoteClient> {
        let path = format!("/api/v1/clients/{}", encode_segment(id));
        tracing::debug!("PATCH {}", path);
        let request = self.client.patch(self.url(&path)).json(patch);
        self.send::<ClientData>(request).await.map(|data| data.client)
    }

    async fn delete_client(&self, id: &str) -> ApiResult<()> {
        let path = format!("/api/v1/clients/{}", encode_segment(id));
        tracing::debug!("DELETE {}", path);
        self.send_empty(self.client.delete(self.url(&path))).await
    }
}

#[async_trait(?Send)]
impl MeasurementApi for HttpApi {
    async fn create_measurement(&self, payload: &NewMeasurement) -> ApiResult<RemoteMeasurement> {
        tracing::debug!("POST /api/v1/measurements");
        let request = self.client.post(self.url("/api/v1/measurements")).json(payload);
        self.send::<MeasurementData>(request).await.map(|data| data.measurement)
    }

    async fn list_measurements(&self, client_id: Option<&str>) -> ApiResult<Vec<RemoteMeasurement>> {
        let path = match client_id {
            Some(id) => format!("/api/v1/clients/{}/measurements", encode_segment(id)),
            None => "/api/v1/measurements".to_string(),
        };
        tracing::debug!("GET {}", path);
        let request = self.client.get(self.url(&path));
        self.send::<MeasurementsData>(request).await.map(|data| data.measurements)
    }

    async fn get_measurement(&self, id: &str) -> ApiResult<RemoteMeasurement> {
        let path = format!("/api/v1/measurements/{}", encode_segment(id));
        tracing::debug!("GET {}", path);
        let request = self.client.get(self.url(&path));
        self.send::<MeasurementData>(request).await.map(|data| data.measurement)
    }

    async fn update_measurement(&self, id: &str, patch: &MeasurementPatch) -> ApiResult<RemoteMeasurement> {
        let path = format!("/api/v1/measurements/{}", encode_segment(id));
        tracing::debug!("PATCH {}", path);
        let request = self.client.patch(self.url(&path)).json(patch);
        self.send::<MeasurementData>(request).await.map(|data| data.measurement)
    }

    async fn delete_measurement(&self, id: &str) -> ApiResult<()> {
        let path = format!("/api/v1/measurements/{}", encode_segment(id));
        tracing::debug!("DELETE {}", path);
        self.send_empty(self.client.delete(self.url(&path))).await
    }
}
