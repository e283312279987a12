//! Global Application State Store
//!
//! Reactive mirror of the core stores, using Leptos reactive_stores for
//! fine-grained reactivity. Core stores push into it through their
//! subscriptions; components only ever read it.

use atelier_core::{Client, ClientStore, Measurement, MeasurementStore, StoreState};
use leptos::prelude::*;
use reactive_stores::Store;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Clients, most recently created first after an insert
    pub clients: Vec<Client>,
    pub clients_loading: bool,
    pub clients_error: Option<String>,
    /// Measurement records for the signed-in user
    pub measurements: Vec<Measurement>,
    pub measurements_loading: bool,
    pub measurements_error: Option<String>,
    /// Client the measurement list is filtered to, if any
    pub measurements_scope: Option<String>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Bindings
// ========================

fn apply_clients(store: &AppStore, state: &StoreState<Client>) {
    *store.clients().write() = state.items.clone();
    *store.clients_loading().write() = state.is_loading;
    *store.clients_error().write() = state.error.clone();
}

fn apply_measurements(store: &AppStore, state: &StoreState<Measurement>) {
    *store.measurements().write() = state.items.clone();
    *store.measurements_loading().write() = state.is_loading;
    *store.measurements_error().write() = state.error.clone();
    *store.measurements_scope().write() = state.scope.clone();
}

/// Seed the reactive state from the core stores and keep it in sync
pub fn bind_stores(app_store: AppStore, clients: &ClientStore, measurements: &MeasurementStore) {
    apply_clients(&app_store, &clients.state());
    apply_measurements(&app_store, &measurements.state());

    clients.subscribe(move |state| apply_clients(&app_store, state));
    measurements.subscribe(move |state| apply_measurements(&app_store, state));
}

/// Resolve a client id to a display name
pub fn client_label(clients: &[Client], client_id: &str) -> String {
    atelier_core::search::client_name(clients, client_id)
        .unwrap_or("Unknown client")
        .to_string()
}
