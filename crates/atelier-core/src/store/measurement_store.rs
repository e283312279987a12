//! Measurement Record Store
//!
//! Holds the signed-in user's measurement records. The server's response
//! is the source of truth after every write.

use std::rc::Rc;

use super::shared::{StoreCore, StoreState, SubscriptionId};
use crate::api::{normalize_measurement, MeasurementApi};
use crate::domain::{GarmentType, Measurement, MeasurementEntry, MeasurementPatch, NewMeasurement};
use crate::error::ApiResult;
use crate::notify::Notifier;
use crate::storage::KvStorage;

/// Local storage key for the persisted measurement list
pub const MEASUREMENT_STORAGE_KEY: &str = "measurement-storage";

/// Cheap-to-clone handle over the measurement store
#[derive(Clone)]
pub struct MeasurementStore {
    api: Rc<dyn MeasurementApi>,
    core: Rc<StoreCore<Measurement>>,
}

impl MeasurementStore {
    pub fn new(api: Rc<dyn MeasurementApi>, storage: Rc<dyn KvStorage>, notifier: Rc<dyn Notifier>) -> Self {
        Self {
            api,
            core: Rc::new(StoreCore::new(storage, MEASUREMENT_STORAGE_KEY, notifier)),
        }
    }

    /// Copy of the current state
    pub fn state(&self) -> StoreState<Measurement> {
        self.core.snapshot()
    }

    pub fn find(&self, id: &str) -> Option<Measurement> {
        self.core.find(id)
    }

    /// Called with the new state after every change
    pub fn subscribe(&self, subscriber: impl Fn(&StoreState<Measurement>) + 'static) -> SubscriptionId {
        self.core.subscribe(subscriber)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.core.unsubscribe(id);
    }

    /// Create a record and put the server's copy at the front of the list
    pub async fn add_measurement(
        &self,
        client_id: &str,
        garment_type: GarmentType,
        measurements: Vec<MeasurementEntry>,
        notes: Option<String>,
    ) -> ApiResult<Measurement> {
        let payload = NewMeasurement {
            client_id: client_id.to_string(),
            garment_type,
            measurements,
            notes,
        };
        self.create(&payload).await
    }

    /// Same as `add_measurement` with a prebuilt payload
    pub async fn create(&self, payload: &NewMeasurement) -> ApiResult<Measurement> {
        self.core.begin();
        match self.api.create_measurement(payload).await {
            Ok(remote) => {
                let record = normalize_measurement(remote);
                tracing::info!("Added measurement {} for client {}", record.id, record.client_id);
                let stored = record.clone();
                self.core
                    .succeed_with_notice("Measurement added", |state| state.prepend(stored));
                Ok(record)
            }
            Err(e) => Err(self.core.fail(e, "Failed to add measurement")),
        }
    }

    /// Replace the list with all of the user's records, or one client's.
    /// The state's `scope` records which.
    pub async fn get_all_measurements(&self, client_id: Option<&str>) -> ApiResult<Vec<Measurement>> {
        self.core.begin();
        match self.api.list_measurements(client_id).await {
            Ok(remote) => {
                let records: Vec<Measurement> = remote.into_iter().map(normalize_measurement).collect();
                tracing::debug!("Fetched {} measurements", records.len());
                let stored = records.clone();
                let scope = client_id.map(str::to_string);
                self.core.succeed(|state| {
                    state.items = stored;
                    state.last_fetched = Some(chrono::Utc::now());
                    state.scope = scope;
                });
                Ok(records)
            }
            Err(e) => Err(self.core.fail(e, "Failed to load measurements")),
        }
    }

    /// Fetch one record; the list is left alone
    pub async fn get_single_measurement(&self, id: &str) -> ApiResult<Measurement> {
        self.core.begin();
        match self.api.get_measurement(id).await {
            Ok(remote) => {
                self.core.succeed(|_| {});
                Ok(normalize_measurement(remote))
            }
            Err(e) => Err(self.core.fail(e, "Failed to load measurement")),
        }
    }

    /// Patch a record and swap in the server's copy
    pub async fn update_measurement(&self, id: &str, patch: &MeasurementPatch) -> ApiResult<Measurement> {
        self.core.begin();
        match self.api.update_measurement(id, patch).await {
            Ok(remote) => {
                let record = normalize_measurement(remote);
                tracing::info!("Updated measurement {}", record.id);
                let stored = record.clone();
                self.core
                    .succeed_with_notice("Measurement updated", |state| state.replace(stored));
                Ok(record)
            }
            Err(e) => Err(self.core.fail(e, "Failed to update measurement")),
        }
    }

    pub async fn delete_measurement(&self, id: &str) -> ApiResult<()> {
        self.core.begin();
        match self.api.delete_measurement(id).await {
            Ok(()) => {
                tracing::info!("Deleted measurement {}", id);
                self.core
                    .succeed_with_notice("Measurement deleted", |state| state.remove(id));
                Ok(())
            }
            Err(e) => Err(self.core.fail(e, "Failed to delete measurement")),
        }
    }

    /// Reset to empty, e.g. on sign-out
    pub fn clear_measurements(&self) {
        self.core.reset();
    }

    pub fn clear_error(&self) {
        self.core.clear_error();
    }
}
