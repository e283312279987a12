//! Wire Shapes
//!
//! Records as the remote service sends them, the response envelope, and
//! one normalization function per resource.
//!
//! Envelope: `{"status": "success", "data": {"<key>": <resource>}}` where
//! `<key>` is `client`, `clients`, `measurement` or `measurements`.
//! Remote records carry their id as `_id`; normalization moves it to `id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Client, ClientStatus, GarmentType, Measurement, MeasurementEntry};

// ========================
// Envelope
// ========================

#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub status: Option<String>,
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub struct ClientData {
    pub client: RemoteClient,
}

#[derive(Debug, Deserialize)]
pub struct ClientsData {
    pub clients: Vec<RemoteClient>,
}

#[derive(Debug, Deserialize)]
pub struct MeasurementData {
    pub measurement: RemoteMeasurement,
}

#[derive(Debug, Deserialize)]
pub struct MeasurementsData {
    pub measurements: Vec<RemoteMeasurement>,
}

/// Body of a non-success response
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

// ========================
// Remote Records
// ========================

/// Client as stored remotely
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteClient {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub project_count: Option<u32>,
    pub last_order_date: Option<DateTime<Utc>>,
}

/// Measurement record as stored remotely
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteMeasurement {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub client_id: String,
    pub garment_type: String,
    #[serde(default)]
    pub measurements: Vec<MeasurementEntry>,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

// ========================
// Normalization
// ========================

/// Remote client -> client-facing client.
///
/// Moves `_id` to `id`, defaults `projectCount` to 0 and keeps a missing
/// `lastOrderDate` as `None`. Unknown statuses read as active.
pub fn normalize_client(remote: RemoteClient) -> Client {
    Client {
        id: remote.id,
        name: remote.name,
        email: remote.email,
        phone: non_blank(remote.phone),
        address: non_blank(remote.address),
        notes: non_blank(remote.notes),
        status: remote
            .status
            .as_deref()
            .map(ClientStatus::parse)
            .unwrap_or_default(),
        created_at: remote.created_at,
        updated_at: remote.updated_at,
        project_count: remote.project_count.unwrap_or(0),
        last_order_date: remote.last_order_date,
    }
}

/// Cleared fields come back as "" and read as absent
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Remote measurement -> client-facing measurement.
///
/// Moves `_id` to `id` and parses the garment key; entry order is kept.
pub fn normalize_measurement(remote: RemoteMeasurement) -> Measurement {
    Measurement {
        id: remote.id,
        user_id: remote.user_id,
        client_id: remote.client_id,
        garment_type: GarmentType::parse(&remote.garment_type),
        measurements: remote.measurements,
        notes: non_blank(remote.notes),
        created_at: remote.created_at,
        updated_at: remote.updated_at,
    }
}
