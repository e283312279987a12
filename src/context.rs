//! Application Context
//!
//! Store handles and toasts provided via Leptos Context API.

use atelier_core::{ClientStore, MeasurementStore};
use leptos::prelude::*;

use crate::services::{Services, Toasts};

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Client store (single-threaded, kept in local arena storage)
    clients: StoredValue<ClientStore, LocalStorage>,
    /// Measurement store
    measurements: StoredValue<MeasurementStore, LocalStorage>,
    /// Toast stack, also used for form errors that never reach a store
    pub toasts: Toasts,
}

impl AppContext {
    pub fn new(services: Services, toasts: Toasts) -> Self {
        Self {
            clients: StoredValue::new_local(services.clients),
            measurements: StoredValue::new_local(services.measurements),
            toasts,
        }
    }

    pub fn clients(&self) -> ClientStore {
        self.clients.get_value()
    }

    pub fn measurements(&self) -> MeasurementStore {
        self.measurements.get_value()
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
