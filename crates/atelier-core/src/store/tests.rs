//! Store Behaviour Tests
//!
//! Runs both stores against an in-memory fake of the remote service.

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use async_trait::async_trait;

    use crate::api::{ClientApi, MeasurementApi, RemoteClient, RemoteMeasurement};
    use crate::domain::{
        ClientInput, ClientPatch, ClientStatus, GarmentType, MeasurementEntry, MeasurementPatch,
        NewMeasurement,
    };
    use crate::error::{ApiError, ApiResult};
    use crate::notify::{NoticeLevel, Notifier};
    use crate::storage::{KvStorage, MemoryStorage};
    use crate::store::{ClientStore, MeasurementStore, CLIENT_STORAGE_KEY, MEASUREMENT_STORAGE_KEY};

    // ========================
    // Fakes
    // ========================

    #[derive(Default)]
    struct FakeRemote {
        clients: RefCell<Vec<RemoteClient>>,
        measurements: RefCell<Vec<RemoteMeasurement>>,
        next_id: Cell<u32>,
        fail_next: RefCell<Option<ApiError>>,
        calls: Cell<u32>,
    }

    impl FakeRemote {
        fn fail_next(&self, error: ApiError) {
            *self.fail_next.borrow_mut() = Some(error);
        }

        fn take_failure(&self) -> ApiResult<()> {
            self.calls.set(self.calls.get() + 1);
            match self.fail_next.borrow_mut().take() {
                Some(error) => Err(error),
                None => Ok(()),
            }
        }

        fn assign_id(&self, prefix: &str) -> String {
            let id = self.next_id.get() + 1;
            self.next_id.set(id);
            format!("{}{:04}", prefix, id)
        }

        fn seed_measurement(&self, client_id: &str, garment: &str) -> String {
            let id = self.assign_id("srv-m");
            self.measurements.borrow_mut().push(RemoteMeasurement {
                id: id.clone(),
                user_id: "u1".to_string(),
                client_id: client_id.to_string(),
                garment_type: garment.to_string(),
                measurements: vec![MeasurementEntry::new("Waist", 30.0)],
                notes: None,
                created_at: None,
                updated_at: None,
            });
            id
        }

        fn seed_client(&self, name: &str) -> String {
            let id = self.assign_id("srv-c");
            self.clients.borrow_mut().push(RemoteClient {
                id: id.clone(),
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
                phone: None,
                address: None,
                notes: None,
                status: Some("active".to_string()),
                created_at: None,
                updated_at: None,
                project_count: None,
                last_order_date: None,
            });
            id
        }

        fn missing(id: &str) -> ApiError {
            ApiError::NotFound(Some(format!("No record with id {}", id)))
        }
    }

    #[async_trait(?Send)]
    impl MeasurementApi for FakeRemote {
        async fn create_measurement(&self, payload: &NewMeasurement) -> ApiResult<RemoteMeasurement> {
            self.take_failure()?;
            let remote = RemoteMeasurement {
                id: self.assign_id("srv-m"),
                user_id: "u1".to_string(),
                client_id: payload.client_id.clone(),
                garment_type: payload.garment_type.key().to_string(),
                measurements: payload.measurements.clone(),
                notes: payload.notes.clone(),
                created_at: Some(chrono::Utc::now()),
                updated_at: Some(chrono::Utc::now()),
            };
            self.measurements.borrow_mut().push(remote.clone());
            Ok(remote)
        }

        async fn list_measurements(&self, client_id: Option<&str>) -> ApiResult<Vec<RemoteMeasurement>> {
            self.take_failure()?;
            Ok(self
                .measurements
                .borrow()
                .iter()
                .filter(|m| client_id.map_or(true, |id| m.client_id == id))
                .cloned()
                .collect())
        }

        async fn get_measurement(&self, id: &str) -> ApiResult<RemoteMeasurement> {
            self.take_failure()?;
            self.measurements
                .borrow()
                .iter()
                .find(|m| m.id == id)
                .cloned()
                .ok_or_else(|| Self::missing(id))
        }

        async fn update_measurement(&self, id: &str, patch: &MeasurementPatch) -> ApiResult<RemoteMeasurement> {
            self.take_failure()?;
            let mut all = self.measurements.borrow_mut();
            let record = all.iter_mut().find(|m| m.id == id).ok_or_else(|| Self::missing(id))?;
            if let Some(garment) = &patch.garment_type {
                record.garment_type = garment.key().to_string();
            }
            if let Some(entries) = &patch.measurements {
                record.measurements = entries.clone();
            }
            if patch.notes.is_some() {
                record.notes = patch.notes.clone();
            }
            record.updated_at = Some(chrono::Utc::now());
            Ok(record.clone())
        }

        async fn delete_measurement(&self, id: &str) -> ApiResult<()> {
            self.take_failure()?;
            let mut all = self.measurements.borrow_mut();
            let before = all.len();
            all.retain(|m| m.id != id);
            if all.len() == before {
                return Err(Self::missing(id));
            }
            Ok(())
        }
    }

    #[async_trait(?Send)]
    impl ClientApi for FakeRemote {
        async fn create_client(&self, input: &ClientInput) -> ApiResult<RemoteClient> {
            self.take_failure()?;
            let remote = RemoteClient {
                id: self.assign_id("srv-c"),
                name: input.name.clone(),
                email: input.email.clone(),
                phone: input.phone.clone(),
                address: input.address.clone(),
                notes: input.notes.clone(),
                status: Some(input.status.as_str().to_string()),
                created_at: Some(chrono::Utc::now()),
                updated_at: Some(chrono::Utc::now()),
                project_count: None,
                last_order_date: None,
            };
            self.clients.borrow_mut().push(remote.clone());
            Ok(remote)
        }

        async fn list_clients(&self) -> ApiResult<Vec<RemoteClient>> {
            self.take_failure()?;
            Ok(self.clients.borrow().clone())
        }

        async fn get_client(&self, id: &str) -> ApiResult<RemoteClient> {
            self.take_failure()?;
            self.clients
                .borrow()
                .iter()
                .find(|c| c.id == id)
                .cloned()
                .ok_or_else(|| Self::missing(id))
        }

        async fn update_client(&self, id: &str, patch: &ClientPatch) -> ApiResult<RemoteClient> {
            self.take_failure()?;
            let mut all = self.clients.borrow_mut();
            let client = all.iter_mut().find(|c| c.id == id).ok_or_else(|| Self::missing(id))?;
            if let Some(name) = &patch.name {
                client.name = name.clone();
            }
            if let Some(status) = patch.status {
                client.status = Some(status.as_str().to_string());
            }
            Ok(client.clone())
        }

        async fn delete_client(&self, id: &str) -> ApiResult<()> {
            self.take_failure()?;
            self.clients.borrow_mut().retain(|c| c.id != id);
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        notices: RefCell<Vec<(NoticeLevel, String)>>,
    }

    impl RecordingNotifier {
        fn errors(&self) -> Vec<String> {
            self.notices
                .borrow()
                .iter()
                .filter(|(level, _)| *level == NoticeLevel::Error)
                .map(|(_, message)| message.clone())
                .collect()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, level: NoticeLevel, message: &str) {
            self.notices.borrow_mut().push((level, message.to_string()));
        }
    }

    struct Harness {
        remote: Rc<FakeRemote>,
        storage: Rc<MemoryStorage>,
        notifier: Rc<RecordingNotifier>,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                remote: Rc::new(FakeRemote::default()),
                storage: Rc::new(MemoryStorage::new()),
                notifier: Rc::new(RecordingNotifier::default()),
            }
        }

        fn measurements(&self) -> MeasurementStore {
            MeasurementStore::new(self.remote.clone(), self.storage.clone(), self.notifier.clone())
        }

        fn clients(&self) -> ClientStore {
            ClientStore::new(self.remote.clone(), self.storage.clone(), self.notifier.clone())
        }
    }

    fn entries() -> Vec<MeasurementEntry> {
        vec![
            MeasurementEntry::new("Chest", 40.0).with_unit("in"),
            MeasurementEntry::new("Waist", 32.0).with_unit("in"),
        ]
    }

    // ========================
    // Measurement Store
    // ========================

    #[tokio::test]
    async fn test_add_prepends_server_record() {
        let h = Harness::new();
        h.remote.seed_measurement("c1", "dress");
        let store = h.measurements();
        store.get_all_measurements(None).await.unwrap();

        let created = store
            .add_measurement("c1", GarmentType::Suit, entries(), Some("Wedding".to_string()))
            .await
            .unwrap();

        let state = store.state();
        assert_eq!(state.items.len(), 2);
        assert_eq!(state.items[0], created);
        assert!(created.id.starts_with("srv-m"));
        assert_eq!(created.garment_type, GarmentType::Suit);
        assert!(!state.is_loading);
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn test_get_all_is_idempotent() {
        let h = Harness::new();
        h.remote.seed_measurement("c1", "suit");
        h.remote.seed_measurement("c2", "dress");
        let store = h.measurements();

        let first = store.get_all_measurements(None).await.unwrap();
        let first_state = store.state().items;
        let second = store.get_all_measurements(None).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first_state, store.state().items);
        assert_eq!(store.state().items.len(), 2);
        assert!(store.state().last_fetched.is_some());
    }

    #[tokio::test]
    async fn test_get_all_scoped_to_client() {
        let h = Harness::new();
        h.remote.seed_measurement("c1", "suit");
        h.remote.seed_measurement("c2", "dress");
        let store = h.measurements();

        let records = store.get_all_measurements(Some("c2")).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(store.state().items[0].client_id, "c2");
        assert_eq!(store.state().scope.as_deref(), Some("c2"));

        store.get_all_measurements(None).await.unwrap();
        assert_eq!(store.state().items.len(), 2);
        assert_eq!(store.state().scope, None);
    }

    #[tokio::test]
    async fn test_scoped_list_restores_with_its_scope() {
        let h = Harness::new();
        h.remote.seed_measurement("c1", "suit");
        h.remote.seed_measurement("c2", "dress");
        h.measurements().get_all_measurements(Some("c1")).await.unwrap();

        let restored = h.measurements();
        assert_eq!(restored.state().items.len(), 1);
        assert_eq!(restored.state().scope.as_deref(), Some("c1"));
    }

    #[tokio::test]
    async fn test_get_single_leaves_list_alone() {
        let h = Harness::new();
        let id = h.remote.seed_measurement("c1", "suit");
        let store = h.measurements();

        let record = store.get_single_measurement(&id).await.unwrap();
        assert_eq!(record.id, id);
        assert!(store.state().items.is_empty());

        let err = store.get_single_measurement("nope").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(store.state().error.as_deref(), Some("No record with id nope"));
    }

    #[tokio::test]
    async fn test_update_replaces_entry_in_place() {
        let h = Harness::new();
        h.remote.seed_measurement("c1", "suit");
        let target = h.remote.seed_measurement("c2", "dress");
        h.remote.seed_measurement("c3", "skirt");
        let store = h.measurements();
        store.get_all_measurements(None).await.unwrap();

        let patch = MeasurementPatch {
            measurements: Some(vec![MeasurementEntry::new("Bust", 36.0)]),
            notes: Some("Taken in".to_string()),
            ..Default::default()
        };
        let updated = store.update_measurement(&target, &patch).await.unwrap();

        let state = store.state();
        assert_eq!(state.items.len(), 3);
        assert_eq!(state.items[1], updated);
        assert_eq!(state.items[1].notes.as_deref(), Some("Taken in"));
        assert_eq!(state.items[1].size_of("Bust"), Some(36.0));
    }

    #[tokio::test]
    async fn test_update_transport_failure_leaves_list_unchanged() {
        let h = Harness::new();
        let target = h.remote.seed_measurement("c1", "suit");
        let store = h.measurements();
        store.get_all_measurements(None).await.unwrap();
        let before = store.state().items;

        h.remote.fail_next(ApiError::Transport("connection reset".to_string()));
        let err = store
            .update_measurement(&target, &MeasurementPatch::default())
            .await
            .unwrap_err();

        let state = store.state();
        assert_eq!(err, ApiError::Transport("connection reset".to_string()));
        assert_eq!(state.items, before);
        assert!(!state.is_loading);
        let message = state.error.expect("error recorded");
        assert!(!message.is_empty());
        assert_eq!(message, "Failed to update measurement");
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one() {
        let h = Harness::new();
        h.remote.seed_measurement("c1", "suit");
        let target = h.remote.seed_measurement("c1", "dress");
        let store = h.measurements();
        store.get_all_measurements(None).await.unwrap();

        store.delete_measurement(&target).await.unwrap();

        let state = store.state();
        assert_eq!(state.items.len(), 1);
        assert!(state.find(&target).is_none());
    }

    #[tokio::test]
    async fn test_failure_notifies_once_with_server_message() {
        let h = Harness::new();
        let store = h.measurements();
        h.remote.fail_next(ApiError::Server {
            status: 400,
            message: Some("Garment type is required".to_string()),
        });

        let result = store.add_measurement("c1", GarmentType::Suit, entries(), None).await;

        assert!(result.is_err());
        assert!(store.state().items.is_empty());
        assert_eq!(h.notifier.errors(), vec!["Garment type is required".to_string()]);
    }

    #[tokio::test]
    async fn test_next_request_clears_previous_error() {
        let h = Harness::new();
        let store = h.measurements();
        h.remote.fail_next(ApiError::Transport("offline".to_string()));
        let _ = store.get_all_measurements(None).await;
        assert!(store.state().error.is_some());

        store.get_all_measurements(None).await.unwrap();
        assert_eq!(store.state().error, None);
    }

    #[tokio::test]
    async fn test_subscribers_see_loading_then_result() {
        let h = Harness::new();
        h.remote.seed_measurement("c1", "suit");
        let store = h.measurements();
        let seen = Rc::new(RefCell::new(Vec::<(bool, usize)>::new()));
        let sink = seen.clone();
        let subscription = store.subscribe(move |state| {
            sink.borrow_mut().push((state.is_loading, state.items.len()));
        });

        store.get_all_measurements(None).await.unwrap();
        assert_eq!(seen.borrow().as_slice(), &[(true, 0), (false, 1)]);

        store.unsubscribe(subscription);
        store.clear_measurements();
        assert_eq!(seen.borrow().len(), 2);
    }

    #[tokio::test]
    async fn test_list_survives_restart_through_storage() {
        let h = Harness::new();
        h.remote.seed_measurement("c1", "suit");
        let store = h.measurements();
        store.get_all_measurements(None).await.unwrap();

        let restored = h.measurements();
        assert_eq!(restored.state().items, store.state().items);
        assert_eq!(restored.state().last_fetched, store.state().last_fetched);
        assert!(!restored.state().is_loading);
    }

    #[tokio::test]
    async fn test_clear_empties_memory_and_storage() {
        let h = Harness::new();
        h.remote.seed_measurement("c1", "suit");
        let store = h.measurements();
        store.get_all_measurements(None).await.unwrap();

        store.clear_measurements();

        assert!(store.state().items.is_empty());
        assert!(h.measurements().state().items.is_empty());
        assert!(h.storage.get(MEASUREMENT_STORAGE_KEY).unwrap().is_some());
    }

    // ========================
    // Client Store
    // ========================

    #[tokio::test]
    async fn test_add_client_normalizes_and_prepends() {
        let h = Harness::new();
        h.remote.seed_client("Beth");
        let store = h.clients();
        store.get_all_clients().await.unwrap();

        let mut input = ClientInput::new("Amy", "amy@example.com");
        input.status = ClientStatus::Inactive;
        let client = store.add_client(&input, None).await.unwrap();

        let state = store.state();
        assert_eq!(state.items.len(), 2);
        assert_eq!(state.items[0].id, client.id);
        assert_eq!(client.project_count, 0);
        assert_eq!(client.last_order_date, None);
        assert_eq!(client.status, ClientStatus::Inactive);
    }

    #[tokio::test]
    async fn test_add_client_redirects_on_unauthorized() {
        let h = Harness::new();
        let store = h.clients();
        let routes = RefCell::new(Vec::<String>::new());
        let navigate = |route: &str| routes.borrow_mut().push(route.to_string());

        h.remote.fail_next(ApiError::Unauthorized(Some("Token expired".to_string())));
        let err = store
            .add_client(&ClientInput::new("Amy", "amy@example.com"), Some(&navigate))
            .await
            .unwrap_err();

        assert!(err.is_unauthorized());
        assert_eq!(routes.borrow().as_slice(), &["/login".to_string()]);
        assert_eq!(store.state().error.as_deref(), Some("Token expired"));
        assert_eq!(h.notifier.errors().len(), 1);
    }

    #[tokio::test]
    async fn test_add_client_validation_error_does_not_redirect() {
        let h = Harness::new();
        let store = h.clients();
        let routes = RefCell::new(Vec::<String>::new());
        let navigate = |route: &str| routes.borrow_mut().push(route.to_string());

        h.remote.fail_next(ApiError::Server { status: 409, message: None });
        let _ = store
            .add_client(&ClientInput::new("Amy", "amy@example.com"), Some(&navigate))
            .await;

        assert!(routes.borrow().is_empty());
        assert_eq!(store.state().error.as_deref(), Some("Failed to add client"));
    }

    #[tokio::test]
    async fn test_update_and_delete_client() {
        let h = Harness::new();
        let amy = h.remote.seed_client("Amy");
        let beth = h.remote.seed_client("Beth");
        let store = h.clients();
        store.get_all_clients().await.unwrap();

        let patch = ClientPatch {
            status: Some(ClientStatus::Inactive),
            ..Default::default()
        };
        let updated = store.update_client(&beth, &patch).await.unwrap();
        assert_eq!(store.state().items.len(), 2);
        assert_eq!(store.find(&beth), Some(updated));
        assert!(!store.find(&beth).unwrap().is_active());

        store.delete_client(&amy).await.unwrap();
        assert_eq!(store.state().items.len(), 1);
        assert!(store.find(&amy).is_none());
    }

    #[tokio::test]
    async fn test_get_single_client() {
        let h = Harness::new();
        let amy = h.remote.seed_client("Amy");
        let store = h.clients();

        let client = store.get_single_client(&amy).await.unwrap();
        assert_eq!(client.name, "Amy");
        assert!(store.state().items.is_empty());
    }

    #[tokio::test]
    async fn test_stores_persist_under_separate_keys() {
        let h = Harness::new();
        h.remote.seed_client("Amy");
        h.remote.seed_measurement("c1", "suit");
        let clients = h.clients();
        let measurements = h.measurements();

        clients.get_all_clients().await.unwrap();
        measurements.get_all_measurements(None).await.unwrap();
        clients.clear_clients();

        assert!(h.clients().state().items.is_empty());
        assert_eq!(h.measurements().state().items.len(), 1);
        assert!(h.storage.get(CLIENT_STORAGE_KEY).unwrap().is_some());
    }

    #[tokio::test]
    async fn test_success_notices() {
        let h = Harness::new();
        let store = h.clients();
        store.add_client(&ClientInput::new("Amy", "amy@example.com"), None).await.unwrap();
        store.get_all_clients().await.unwrap();

        let notices = h.notifier.notices.borrow();
        assert_eq!(notices.as_slice(), &[(NoticeLevel::Success, "Client added".to_string())]);
    }
}
