//! Measurement Record Entity
//!
//! A set of body measurements taken for one client and one garment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::garment::GarmentType;

/// One measured field, e.g. "Waist 32 in"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementEntry {
    pub name: String,
    pub size: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl MeasurementEntry {
    pub fn new(name: impl Into<String>, size: f64) -> Self {
        Self {
            name: name.into(),
            size,
            unit: None,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// "Waist: 32 in"
    pub fn display(&self) -> String {
        match &self.unit {
            Some(unit) if !unit.is_empty() => format!("{}: {} {}", self.name, self.size, unit),
            _ => format!("{}: {}", self.name, self.size),
        }
    }
}

/// Measurement record in its client-facing shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    pub id: String,
    pub user_id: String,
    pub client_id: String,
    pub garment_type: GarmentType,
    /// Ordered (name, size, unit) triples
    pub measurements: Vec<MeasurementEntry>,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Measurement {
    /// Size recorded for `name`, matched case-insensitively
    pub fn size_of(&self, name: &str) -> Option<f64> {
        self.measurements
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name.trim()))
            .map(|entry| entry.size)
    }

    /// Short preview used on list cards
    pub fn preview(&self, limit: usize) -> Vec<String> {
        self.measurements.iter().take(limit).map(MeasurementEntry::display).collect()
    }
}

impl Entity for Measurement {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Payload for creating a measurement record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMeasurement {
    pub client_id: String,
    pub garment_type: GarmentType,
    pub measurements: Vec<MeasurementEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Partial update for a measurement record
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub garment_type: Option<GarmentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurements: Option<Vec<MeasurementEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
