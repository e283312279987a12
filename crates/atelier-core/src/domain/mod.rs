//! Domain Layer
//!
//! Client-facing entities. Remote shapes live in `api::wire` and are
//! normalized into these types before they reach a store.

mod entity;
mod client;
mod garment;
mod measurement;

pub use entity::Entity;
pub use client::{Client, ClientInput, ClientPatch, ClientStatus};
pub use garment::{GarmentType, GARMENT_TEMPLATES};
pub use measurement::{Measurement, MeasurementEntry, MeasurementPatch, NewMeasurement};
