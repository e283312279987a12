//! Clients Page
//!
//! Searchable client list with add, edit and delete dialogs.

use atelier_core::search::filter_clients;
use atelier_core::Client;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{ClientModal, DeleteConfirmModal, SearchBox};
use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

#[derive(Debug, Clone, PartialEq)]
enum ClientDialog {
    Closed,
    Create,
    Edit(Client),
    Delete { id: String, name: String },
}

#[component]
fn ClientCard(
    client: Client,
    #[prop(into)] on_edit: Callback<String>,
    #[prop(into)] on_delete: Callback<(String, String)>,
) -> impl IntoView {
    let store = use_app_store();

    let client_id = client.id.clone();
    let record_count = move || {
        store
            .measurements()
            .read()
            .iter()
            .filter(|m| m.client_id == client_id)
            .count()
    };
    let status_class = if client.is_active() { "status-badge active" } else { "status-badge inactive" };
    let last_order = client.last_order_label();
    let edit_id = client.id.clone();
    let delete_id = client.id.clone();
    let delete_name = client.name.clone();

    view! {
        <div class="client-card">
            <div class="card-header">
                <span class="card-title">{client.name}</span>
                <span class=status_class>{client.status.label()}</span>
            </div>
            <p class="client-contact">{client.email}</p>
            {client.phone.map(|phone| view! { <p class="client-contact">{phone}</p> })}
            <dl class="client-stats">
                <dt>"Projects"</dt>
                <dd>{client.project_count}</dd>
                <dt>"Measurements"</dt>
                <dd>{record_count}</dd>
                <dt>"Last order"</dt>
                <dd>{last_order}</dd>
            </dl>
            <div class="card-footer">
                <button class="edit-btn" on:click=move |_| on_edit.run(edit_id.clone())>
                    "Edit"
                </button>
                <button
                    class="delete-btn"
                    on:click=move |_| on_delete.run((delete_id.clone(), delete_name.clone()))
                >
                    "Delete"
                </button>
            </div>
        </div>
    }
}

#[component]
pub fn ClientPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let dialog = RwSignal::new(ClientDialog::Closed);
    let (query, set_query) = signal(String::new());

    let visible = Memo::new(move |_| {
        let query = query.get();
        store.clients().with(|clients| {
            filter_clients(clients, &query).into_iter().cloned().collect::<Vec<Client>>()
        })
    });

    // Edit from the server's latest copy
    let on_edit = Callback::new(move |id: String| {
        let clients = ctx.clients();
        spawn_local(async move {
            if let Ok(client) = clients.get_single_client(&id).await {
                dialog.set(ClientDialog::Edit(client));
            }
        });
    });

    let on_delete = Callback::new(move |(id, name): (String, String)| {
        dialog.set(ClientDialog::Delete { id, name });
    });

    let close = Callback::new(move |_: ()| dialog.set(ClientDialog::Closed));

    let confirm_delete = Callback::new(move |_: ()| {
        let ClientDialog::Delete { id, .. } = dialog.get_untracked() else {
            return;
        };
        let clients = ctx.clients();
        spawn_local(async move {
            if clients.delete_client(&id).await.is_ok() {
                dialog.set(ClientDialog::Closed);
            }
        });
    });

    let busy = Signal::derive(move || store.clients_loading().get());

    // Per-client record counts need every record, not one client's
    Effect::new(move |_| {
        if store.measurements_scope().read().is_none() {
            return;
        }
        let measurements = ctx.measurements();
        spawn_local(async move {
            let _ = measurements.get_all_measurements(None).await;
        });
    });

    view! {
        <section class="page clients-page">
            <div class="page-toolbar">
                <SearchBox value=query set_value=set_query placeholder="Search by name or email..." />
                <button class="primary-btn" on:click=move |_| dialog.set(ClientDialog::Create)>
                    "Add client"
                </button>
            </div>

            <Show when=move || store.clients_error().get().is_some()>
                <div class="error-banner">
                    <span>{move || store.clients_error().get().unwrap_or_default()}</span>
                    <button class="close-btn" on:click=move |_| ctx.clients().clear_error()>
                        "×"
                    </button>
                </div>
            </Show>

            <Show when=move || busy.get() && store.clients().read().is_empty()>
                <p class="loading">"Loading clients..."</p>
            </Show>

            <Show when=move || !busy.get() && visible.read().is_empty()>
                <p class="empty-state">
                    {move || if query.get().trim().is_empty() {
                        "No clients yet."
                    } else {
                        "No clients match your search."
                    }}
                </p>
            </Show>

            <div class="client-grid">
                <For
                    each=move || visible.get()
                    key=|client| (client.id.clone(), client.updated_at)
                    children=move |client| {
                        view! { <ClientCard client=client on_edit=on_edit on_delete=on_delete /> }
                    }
                />
            </div>

            {move || match dialog.get() {
                ClientDialog::Closed => ().into_any(),
                ClientDialog::Create => view! { <ClientModal on_close=close /> }.into_any(),
                ClientDialog::Edit(client) => view! { <ClientModal client=client on_close=close /> }.into_any(),
                ClientDialog::Delete { name, .. } => view! {
                    <DeleteConfirmModal
                        label=name
                        busy=busy
                        on_confirm=confirm_delete
                        on_cancel=close
                    />
                }.into_any(),
            }}
        </section>
    }
}
