//! Atelier Core
//!
//! Layered client-side logic for the Atelier front-end:
//! - domain: clients, measurement records and the garment template table
//! - api: wire shapes, normalization and the HTTP binding to the remote service
//! - storage / notify: seams for local persistence and user notifications
//! - store: client and measurement record stores
//! - form / search / workflow: measurement editing logic used by the pages
//!
//! Nothing here touches the DOM, so the whole crate is tested natively.

pub mod domain;
pub mod error;
pub mod api;
pub mod storage;
pub mod notify;
pub mod store;
pub mod form;
pub mod search;
pub mod workflow;

pub use domain::{
    Client, ClientInput, ClientPatch, ClientStatus, Entity, GarmentType, Measurement,
    MeasurementEntry, MeasurementPatch, NewMeasurement,
};
pub use error::{handle_api_error, ApiError, ApiResult, StorageError, StorageResult, LOGIN_ROUTE};
pub use api::{ApiConfig, ClientApi, HttpApi, MeasurementApi};
pub use storage::{KvStorage, MemoryStorage};
pub use notify::{LogNotifier, NoticeLevel, Notifier};
pub use store::{ClientStore, MeasurementStore, StoreState, SubscriptionId};
pub use form::{CustomField, FormError, FormResult, MeasurementForm, Submission, TemplateRow};
pub use workflow::{EditorEvent, EditorState};
