//! Browser Services
//!
//! Wires the core stores to the browser: local storage, toasts, HTTP,
//! and page navigation.

mod storage;
mod toast;

use std::rc::Rc;

use atelier_core::{ClientStore, KvStorage, MeasurementStore, LOGIN_ROUTE};

use crate::config;

pub use storage::WebStorage;
pub use toast::{ToastNotifier, Toasts};

/// Store handles shared by every page
#[derive(Clone)]
pub struct Services {
    pub clients: ClientStore,
    pub measurements: MeasurementStore,
}

impl Services {
    /// Build both stores over the same API client, storage and toast sink
    pub fn build(toasts: Toasts) -> Self {
        let storage: Rc<dyn KvStorage> = Rc::new(WebStorage::local());
        let api_config = config::api_config(storage.as_ref());
        tracing::info!("Using API at {}", api_config.base_url);

        let api = Rc::new(api_config.build_http_api());
        let notifier = Rc::new(ToastNotifier::new(toasts));

        Self {
            clients: ClientStore::new(api.clone(), storage.clone(), notifier.clone()),
            measurements: MeasurementStore::new(api, storage, notifier),
        }
    }
}

/// Full-page navigation, used when the session is rejected
pub fn navigate(route: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.location().set_href(route) {
        tracing::warn!("Navigation to {} failed: {:?}", route, e);
    }
}

/// Forget the stored token and go back to the sign-in page
pub fn end_session() {
    if let Err(e) = WebStorage::local().remove(config::TOKEN_STORAGE_KEY) {
        tracing::warn!("Could not clear auth token: {}", e);
    }
    navigate(LOGIN_ROUTE);
}
