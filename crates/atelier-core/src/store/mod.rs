//! Record Stores
//!
//! Injectable state containers for client and measurement records. Each
//! store owns its list plus an `is_loading`/`error` pair, talks to the API
//! through a trait object, mirrors its list into local storage and pushes
//! every state change to its subscribers.

mod shared;
mod client_store;
mod measurement_store;

#[cfg(test)]
mod tests;

pub use shared::{StoreState, SubscriptionId};
pub use client_store::{ClientStore, CLIENT_STORAGE_KEY};
pub use measurement_store::{MeasurementStore, MEASUREMENT_STORAGE_KEY};
