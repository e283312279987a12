//! Remote API Layer
//!
//! Traits the stores talk to, the remote record shapes, and the HTTP
//! implementation used in the browser.

mod config;
mod traits;
mod http;
pub mod wire;

pub use config::ApiConfig;
pub use traits::{ClientApi, MeasurementApi};
pub use http::HttpApi;
pub use wire::{normalize_client, normalize_measurement, RemoteClient, RemoteMeasurement};
