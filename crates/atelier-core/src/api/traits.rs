//! API Layer - Core Traits
//!
//! Abstract access to the remote service. Implementations return the
//! remote record shapes; normalization is the stores' job.
//!
//! Futures are not `Send`: browser fetch futures never are.

use async_trait::async_trait;

use super::wire::{RemoteClient, RemoteMeasurement};
use crate::domain::{ClientInput, ClientPatch, MeasurementPatch, NewMeasurement};
use crate::error::ApiResult;

/// Client endpoints under `/api/v1/clients`
#[async_trait(?Send)]
pub trait ClientApi {
    /// `POST /api/v1/clients`
    async fn create_client(&self, input: &ClientInput) -> ApiResult<RemoteClient>;

    /// `GET /api/v1/clients`
    async fn list_clients(&self) -> ApiResult<Vec<RemoteClient>>;

    /// `GET /api/v1/clients/{id}`
    async fn get_client(&self, id: &str) -> ApiResult<RemoteClient>;

    /// `PATCH /api/v1/clients/{id}`
    async fn update_client(&self, id: &str, patch: &ClientPatch) -> ApiResult<RemoteClient>;

    /// `DELETE /api/v1/clients/{id}`
    async fn delete_client(&self, id: &str) -> ApiResult<()>;
}

/// Measurement endpoints
#[async_trait(?Send)]
pub trait MeasurementApi {
    /// `POST /api/v1/measurements`
    async fn create_measurement(&self, payload: &NewMeasurement) -> ApiResult<RemoteMeasurement>;

    /// `GET /api/v1/measurements`, or `GET /api/v1/clients/{id}/measurements`
    /// when a client is given
    async fn list_measurements(&self, client_id: Option<&str>) -> ApiResult<Vec<RemoteMeasurement>>;

    /// `GET /api/v1/measurements/{id}`
    async fn get_measurement(&self, id: &str) -> ApiResult<RemoteMeasurement>;

    /// `PATCH /api/v1/measurements/{id}`
    async fn update_measurement(&self, id: &str, patch: &MeasurementPatch) -> ApiResult<RemoteMeasurement>;

    /// `DELETE /api/v1/measurements/{id}`
    async fn delete_measurement(&self, id: &str) -> ApiResult<()>;
}
