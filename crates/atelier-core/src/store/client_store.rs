//! Client Record Store
//!
//! Same shape as the measurement store. Every response goes through
//! `normalize_client`, and `add_client` can redirect on auth failure.

use std::rc::Rc;

use super::shared::{StoreCore, StoreState, SubscriptionId};
use crate::api::{normalize_client, ClientApi};
use crate::domain::{Client, ClientInput, ClientPatch};
use crate::error::{handle_api_error, ApiResult};
use crate::notify::Notifier;
use crate::storage::KvStorage;

/// Local storage key for the persisted client list
pub const CLIENT_STORAGE_KEY: &str = "client-storage";

/// Cheap-to-clone handle over the client store
#[derive(Clone)]
pub struct ClientStore {
    api: Rc<dyn ClientApi>,
    core: Rc<StoreCore<Client>>,
}

impl ClientStore {
    pub fn new(api: Rc<dyn ClientApi>, storage: Rc<dyn KvStorage>, notifier: Rc<dyn Notifier>) -> Self {
        Self {
            api,
            core: Rc::new(StoreCore::new(storage, CLIENT_STORAGE_KEY, notifier)),
        }
    }

    pub fn state(&self) -> StoreState<Client> {
        self.core.snapshot()
    }

    pub fn find(&self, id: &str) -> Option<Client> {
        self.core.find(id)
    }

    pub fn subscribe(&self, subscriber: impl Fn(&StoreState<Client>) + 'static) -> SubscriptionId {
        self.core.subscribe(subscriber)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.core.unsubscribe(id);
    }

    /// Create a client. On failure the shared error routine may call
    /// `navigate` (only for authentication failures).
    pub async fn add_client(&self, input: &ClientInput, navigate: Option<&dyn Fn(&str)>) -> ApiResult<Client> {
        self.core.begin();
        match self.api.create_client(input).await {
            Ok(remote) => {
                let client = normalize_client(remote);
                tracing::info!("Added client {}", client.id);
                let stored = client.clone();
                self.core.succeed_with_notice("Client added", |state| state.prepend(stored));
                Ok(client)
            }
            Err(e) => {
                handle_api_error(&e, navigate);
                Err(self.core.fail(e, "Failed to add client"))
            }
        }
    }

    pub async fn get_all_clients(&self) -> ApiResult<Vec<Client>> {
        self.core.begin();
        match self.api.list_clients().await {
            Ok(remote) => {
                let clients: Vec<Client> = remote.into_iter().map(normalize_client).collect();
                tracing::debug!("Fetched {} clients", clients.len());
                let stored = clients.clone();
                self.core.succeed(|state| {
                    state.items = stored;
                    state.last_fetched = Some(chrono::Utc::now());
                });
                Ok(clients)
            }
            Err(e) => Err(self.core.fail(e, "Failed to load clients")),
        }
    }

    pub async fn get_single_client(&self, id: &str) -> ApiResult<Client> {
        self.core.begin();
        match self.api.get_client(id).await {
            Ok(remote) => {
                self.core.succeed(|_| {});
                Ok(normalize_client(remote))
            }
            Err(e) => Err(self.core.fail(e, "Failed to load client")),
        }
    }

    pub async fn update_client(&self, id: &str, patch: &ClientPatch) -> ApiResult<Client> {
        self.core.begin();
        match self.api.update_client(id, patch).await {
            Ok(remote) => {
                let client = normalize_client(remote);
                tracing::info!("Updated client {}", client.id);
                let stored = client.clone();
                self.core.succeed_with_notice("Client updated", |state| state.replace(stored));
                Ok(client)
            }
            Err(e) => Err(self.core.fail(e, "Failed to update client")),
        }
    }

    pub async fn delete_client(&self, id: &str) -> ApiResult<()> {
        self.core.begin();
        match self.api.delete_client(id).await {
            Ok(()) => {
                tracing::info!("Deleted client {}", id);
                self.core.succeed_with_notice("Client deleted", |state| state.remove(id));
                Ok(())
            }
            Err(e) => Err(self.core.fail(e, "Failed to delete client")),
        }
    }

    pub fn clear_clients(&self) {
        self.core.reset();
    }

    pub fn clear_error(&self) {
        self.core.clear_error();
    }
}
