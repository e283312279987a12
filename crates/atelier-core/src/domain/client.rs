//! Client Entity
//!
//! A customer of the atelier, as shown in the client list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// Whether the client is currently being served
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    #[default]
    Active,
    Inactive,
}

impl ClientStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientStatus::Active => "active",
            ClientStatus::Inactive => "inactive",
        }
    }

    /// Lenient parse; anything unrecognised counts as active
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "inactive" => ClientStatus::Inactive,
            _ => ClientStatus::Active,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ClientStatus::Active => "Active",
            ClientStatus::Inactive => "Inactive",
        }
    }
}

/// Client record in its client-facing shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub status: ClientStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Number of projects run for this client (0 when the server omits it)
    pub project_count: u32,
    /// Date of the most recent order, if any
    pub last_order_date: Option<DateTime<Utc>>,
}

impl Client {
    pub fn is_active(&self) -> bool {
        self.status == ClientStatus::Active
    }

    /// Human-readable last order date for list cards
    pub fn last_order_label(&self) -> String {
        match self.last_order_date {
            Some(date) => date.format("%d %b %Y").to_string(),
            None => "No orders yet".to_string(),
        }
    }
}

impl Entity for Client {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Payload for creating a client
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ClientInput {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: ClientStatus,
}

impl ClientInput {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Default::default()
        }
    }

    /// Prefill for the edit dialog
    pub fn from_client(client: &Client) -> Self {
        Self {
            name: client.name.clone(),
            email: client.email.clone(),
            phone: client.phone.clone(),
            address: client.address.clone(),
            notes: client.notes.clone(),
            status: client.status,
        }
    }

    /// Name and email are the only required fields
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.email.trim().is_empty()
    }

    /// Trimmed copy; blank optional fields become `None`
    pub fn normalized(&self) -> Self {
        fn optional(value: &Option<String>) -> Option<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        }

        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: optional(&self.phone),
            address: optional(&self.address),
            notes: optional(&self.notes),
            status: self.status,
        }
    }
}

/// Partial update for a client; absent fields are left untouched remotely
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ClientPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ClientStatus>,
}

impl ClientPatch {
    /// Full patch from a completed form. Every field is sent; a cleared
    /// optional field goes out as "" so the server drops the old value.
    pub fn from_input(input: &ClientInput) -> Self {
        let cleared = |value: &Option<String>| Some(value.clone().unwrap_or_default());
        Self {
            name: Some(input.name.clone()),
            email: Some(input.email.clone()),
            phone: cleared(&input.phone),
            address: cleared(&input.address),
            notes: cleared(&input.notes),
            status: Some(input.status),
        }
    }
}
