//! Shared store machinery
//!
//! List state, loading/error transitions, persistence and subscriptions,
//! common to both record stores.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::Entity;
use crate::error::ApiError;
use crate::notify::Notifier;
use crate::storage::{self, KvStorage};

/// Observable state of a record store
#[derive(Debug, Clone, PartialEq)]
pub struct StoreState<T> {
    pub items: Vec<T>,
    pub is_loading: bool,
    /// Display message of the last failure
    pub error: Option<String>,
    pub last_fetched: Option<DateTime<Utc>>,
    /// Client the list was fetched for; `None` when it holds every record
    pub scope: Option<String>,
}

impl<T> Default for StoreState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            is_loading: false,
            error: None,
            last_fetched: None,
            scope: None,
        }
    }
}

impl<T: Entity> StoreState<T> {
    pub fn find(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Insert at the front, dropping any stale entry with the same id
    pub(crate) fn prepend(&mut self, item: T) {
        self.items.retain(|existing| existing.id() != item.id());
        self.items.insert(0, item);
    }

    /// Replace the entry with the same id; no-op when absent
    pub(crate) fn replace(&mut self, updated: T) {
        if let Some(slot) = self.items.iter_mut().find(|item| item.id() == updated.id()) {
            *slot = updated;
        }
    }

    pub(crate) fn remove(&mut self, id: &str) {
        self.items.retain(|item| item.id() != id);
    }
}

/// Handle returned by `subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber<T> = Rc<dyn Fn(&StoreState<T>)>;

pub(crate) struct StoreCore<T> {
    state: RefCell<StoreState<T>>,
    subscribers: RefCell<Vec<(SubscriptionId, Subscriber<T>)>>,
    next_subscription: Cell<u64>,
    storage: Rc<dyn KvStorage>,
    storage_key: &'static str,
    notifier: Rc<dyn Notifier>,
}

impl<T> StoreCore<T>
where
    T: Entity + Serialize + DeserializeOwned + 'static,
{
    /// Build a store core, restoring the persisted list if there is one
    pub(crate) fn new(storage: Rc<dyn KvStorage>, storage_key: &'static str, notifier: Rc<dyn Notifier>) -> Self {
        let mut state = StoreState::default();
        if let Some(snapshot) = storage::load_snapshot::<T>(storage.as_ref(), storage_key) {
            tracing::debug!("Restored {} records from {}", snapshot.items.len(), storage_key);
            state.items = snapshot.items;
            state.last_fetched = snapshot.last_fetched;
            state.scope = snapshot.scope;
        }
        Self {
            state: RefCell::new(state),
            subscribers: RefCell::new(Vec::new()),
            next_subscription: Cell::new(0),
            storage,
            storage_key,
            notifier,
        }
    }

    pub(crate) fn snapshot(&self) -> StoreState<T> {
        self.state.borrow().clone()
    }

    pub(crate) fn find(&self, id: &str) -> Option<T> {
        self.state.borrow().find(id).cloned()
    }

    pub(crate) fn subscribe(&self, subscriber: impl Fn(&StoreState<T>) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.get());
        self.next_subscription.set(id.0 + 1);
        self.subscribers.borrow_mut().push((id, Rc::new(subscriber)));
        id
    }

    pub(crate) fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.borrow_mut().retain(|(existing, _)| *existing != id);
    }

    /// Apply a change, persist the listed fields and notify subscribers.
    ///
    /// Subscribers get a copy so they may call back into the store.
    pub(crate) fn update(&self, change: impl FnOnce(&mut StoreState<T>)) {
        let snapshot = {
            let mut state = self.state.borrow_mut();
            change(&mut state);
            state.clone()
        };

        if let Err(e) = storage::save_snapshot(
            self.storage.as_ref(),
            self.storage_key,
            &snapshot.items,
            snapshot.last_fetched,
            snapshot.scope.as_deref(),
        ) {
            tracing::warn!("Could not persist {}: {}", self.storage_key, e);
        }

        let subscribers: Vec<Subscriber<T>> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, subscriber)| Rc::clone(subscriber))
            .collect();
        for subscriber in subscribers {
            subscriber(&snapshot);
        }
    }

    /// Request started
    pub(crate) fn begin(&self) {
        self.update(|state| {
            state.is_loading = true;
            state.error = None;
        });
    }

    /// Request succeeded; `change` reconciles the list
    pub(crate) fn succeed(&self, change: impl FnOnce(&mut StoreState<T>)) {
        self.update(|state| {
            change(state);
            state.is_loading = false;
        });
    }

    /// Successful write: reconcile and tell the user
    pub(crate) fn succeed_with_notice(&self, message: &str, change: impl FnOnce(&mut StoreState<T>)) {
        self.succeed(change);
        self.notifier.success(message);
    }

    /// Request failed: record the message, notify once, hand the error back
    pub(crate) fn fail(&self, error: ApiError, fallback: &str) -> ApiError {
        let message = error.user_message(fallback);
        tracing::warn!("{} ({})", message, error);
        self.update(|state| {
            state.is_loading = false;
            state.error = Some(message.clone());
        });
        self.notifier.error(&message);
        error
    }

    pub(crate) fn clear_error(&self) {
        self.update(|state| state.error = None);
    }

    /// Drop everything, persisted copy included
    pub(crate) fn reset(&self) {
        self.update(|state| *state = StoreState::default());
    }
}
