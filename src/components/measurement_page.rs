//! Measurements Page
//!
//! Searchable grid of measurement records with create, edit and delete
//! dialogs driven by `EditorState`.

use atelier_core::search::filter_measurements;
use atelier_core::{EditorEvent, EditorState, Measurement};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{DeleteConfirmModal, MeasurementCard, MeasurementFormModal, SearchBox};
use crate::context::use_app_context;
use crate::store::{client_label, use_app_store, AppStateStoreFields};

/// Advance the editor; events that do not apply are ignored
pub fn dispatch(editor: RwSignal<EditorState>, event: EditorEvent) {
    editor.update(|state| *state = std::mem::take(state).apply(event));
}

/// Which dialog is open; changes only when a dialog opens or closes
#[derive(Debug, Clone, PartialEq)]
enum OpenDialog {
    None,
    Form,
    Delete(String),
}

#[component]
pub fn MeasurementPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let editor = RwSignal::new(EditorState::default());
    let (query, set_query) = signal(String::new());
    let (client_filter, set_client_filter) = signal::<Option<String>>(None);

    // Reload whenever the client filter changes (and on mount)
    Effect::new(move |_| {
        let scope = client_filter.get();
        let measurements = ctx.measurements();
        spawn_local(async move {
            let _ = measurements.get_all_measurements(scope.as_deref()).await;
        });
    });

    let visible = Memo::new(move |_| {
        let query = query.get();
        let clients = store.clients().get();
        let records = store.measurements().get();
        filter_measurements(&records, &clients, &query)
            .into_iter()
            .cloned()
            .collect::<Vec<Measurement>>()
    });

    let dialog = Memo::new(move |_| {
        editor.with(|state| match state {
            EditorState::Creating(_) | EditorState::Editing(_) => OpenDialog::Form,
            EditorState::ConfirmingDelete { label, .. } => OpenDialog::Delete(label.clone()),
            EditorState::Viewing => OpenDialog::None,
        })
    });

    // Edit from the server's latest copy
    let on_edit = Callback::new(move |id: String| {
        let measurements = ctx.measurements();
        spawn_local(async move {
            if let Ok(record) = measurements.get_single_measurement(&id).await {
                dispatch(editor, EditorEvent::StartEdit(record));
            }
        });
    });

    let on_delete = Callback::new(move |(id, label): (String, String)| {
        dispatch(editor, EditorEvent::RequestDelete { id, label });
    });

    let confirm_delete = Callback::new(move |_: ()| {
        let EditorState::ConfirmingDelete { id, .. } = editor.get_untracked() else {
            return;
        };
        let measurements = ctx.measurements();
        spawn_local(async move {
            let event = match measurements.delete_measurement(&id).await {
                Ok(()) => EditorEvent::Deleted,
                Err(_) => EditorEvent::Failed,
            };
            dispatch(editor, event);
        });
    });

    let cancel = Callback::new(move |_: ()| dispatch(editor, EditorEvent::Cancel));
    let busy = Signal::derive(move || store.measurements_loading().get());

    view! {
        <section class="page measurements-page">
            <div class="page-toolbar">
                <SearchBox
                    value=query
                    set_value=set_query
                    placeholder="Search by client or garment..."
                />
                <select
                    class="client-filter"
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        set_client_filter.set((!value.is_empty()).then_some(value));
                    }
                >
                    <option value="" selected=move || client_filter.get().is_none()>
                        "All clients"
                    </option>
                    <For
                        each=move || store.clients().get()
                        key=|client| client.id.clone()
                        children=move |client| {
                            let id = client.id.clone();
                            let selected_id = client.id.clone();
                            view! {
                                <option
                                    value=id
                                    selected=move || client_filter.get().as_deref() == Some(selected_id.as_str())
                                >
                                    {client.name}
                                </option>
                            }
                        }
                    />
                </select>
                <button
                    class="primary-btn"
                    on:click=move |_| {
                        let client_id = client_filter.get_untracked();
                        dispatch(editor, EditorEvent::StartCreate { client_id });
                    }
                >
                    "New measurement"
                </button>
            </div>

            <Show when=move || store.measurements_error().get().is_some()>
                <div class="error-banner">
                    <span>{move || store.measurements_error().get().unwrap_or_default()}</span>
                    <button class="close-btn" on:click=move |_| ctx.measurements().clear_error()>
                        "×"
                    </button>
                </div>
            </Show>

            <Show when=move || busy.get() && store.measurements().read().is_empty()>
                <p class="loading">"Loading measurements..."</p>
            </Show>

            <Show when=move || !busy.get() && visible.read().is_empty()>
                <p class="empty-state">
                    {move || if query.get().trim().is_empty() {
                        "No measurements yet."
                    } else {
                        "No measurements match your search."
                    }}
                </p>
            </Show>

            <div class="measurement-grid">
                <For
                    each=move || visible.get()
                    key=|record| (record.id.clone(), record.updated_at)
                    children=move |record| {
                        let client_id = record.client_id.clone();
                        let client_name = Signal::derive(move || {
                            client_label(&store.clients().read(), &client_id)
                        });
                        view! {
                            <MeasurementCard
                                record=record
                                client_name=client_name
                                on_edit=on_edit
                                on_delete=on_delete
                            />
                        }
                    }
                />
            </div>

            {move || match dialog.get() {
                OpenDialog::Form => view! { <MeasurementFormModal editor=editor /> }.into_any(),
                OpenDialog::Delete(label) => view! {
                    <DeleteConfirmModal
                        label=label
                        busy=busy
                        on_confirm=confirm_delete
                        on_cancel=cancel
                    />
                }.into_any(),
                OpenDialog::None => ().into_any(),
            }}
        </section>
    }
}
