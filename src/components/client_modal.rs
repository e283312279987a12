//! Client Modal Component
//!
//! Add or edit a client. Name and email are required; the dialog closes
//! only after the store accepts the change.

use atelier_core::{Client, ClientInput, ClientPatch, ClientStatus};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::Modal;
use crate::context::use_app_context;
use crate::services;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn ClientModal(
    /// Existing client when editing
    #[prop(optional)] client: Option<Client>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let editing_id = client.as_ref().map(|c| c.id.clone());
    let is_edit = editing_id.is_some();
    let form = RwSignal::new(client.as_ref().map(ClientInput::from_client).unwrap_or_default());
    let busy = Signal::derive(move || store.clients_loading().get());
    let can_submit = move || form.with(ClientInput::is_complete) && !busy.get();

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let input = form.get_untracked().normalized();
        if !input.is_complete() || busy.get_untracked() {
            return;
        }
        let clients = ctx.clients();
        let editing_id = editing_id.clone();
        spawn_local(async move {
            let result = match editing_id {
                Some(id) => clients
                    .update_client(&id, &ClientPatch::from_input(&input))
                    .await
                    .map(|_| ()),
                None => {
                    let redirect: &dyn Fn(&str) = &services::navigate;
                    clients.add_client(&input, Some(redirect)).await.map(|_| ())
                }
            };
            if result.is_ok() {
                on_close.run(());
            }
        });
    };

    view! {
        <Modal title=if is_edit { "Edit client" } else { "New client" } on_close=on_close>
            <form class="client-form" on:submit=submit>
                <label class="form-row">
                    <span class="form-label">"Name *"</span>
                    <input
                        type="text"
                        class="form-input"
                        prop:value=move || form.with(|f| f.name.clone())
                        on:input=move |ev| {
                            let name = event_target_value(&ev);
                            form.update(|f| f.name = name);
                        }
                    />
                </label>
                <label class="form-row">
                    <span class="form-label">"Email *"</span>
                    <input
                        type="email"
                        class="form-input"
                        prop:value=move || form.with(|f| f.email.clone())
                        on:input=move |ev| {
                            let email = event_target_value(&ev);
                            form.update(|f| f.email = email);
                        }
                    />
                </label>
                <label class="form-row">
                    <span class="form-label">"Phone"</span>
                    <input
                        type="tel"
                        class="form-input"
                        prop:value=move || form.with(|f| f.phone.clone().unwrap_or_default())
                        on:input=move |ev| {
                            let phone = event_target_value(&ev);
                            form.update(|f| f.phone = Some(phone));
                        }
                    />
                </label>
                <label class="form-row">
                    <span class="form-label">"Address"</span>
                    <input
                        type="text"
                        class="form-input"
                        prop:value=move || form.with(|f| f.address.clone().unwrap_or_default())
                        on:input=move |ev| {
                            let address = event_target_value(&ev);
                            form.update(|f| f.address = Some(address));
                        }
                    />
                </label>
                <label class="form-row">
                    <span class="form-label">"Status"</span>
                    <select
                        class="form-select"
                        on:change=move |ev| {
                            let status = ClientStatus::parse(&event_target_value(&ev));
                            form.update(|f| f.status = status);
                        }
                    >
                        {[ClientStatus::Active, ClientStatus::Inactive].into_iter().map(|status| {
                            let is_selected = move || form.with(|f| f.status == status);
                            view! {
                                <option value=status.as_str() selected=is_selected>{status.label()}</option>
                            }
                        }).collect_view()}
                    </select>
                </label>
                <label class="form-row">
                    <span class="form-label">"Notes"</span>
                    <textarea
                        class="form-textarea"
                        rows="3"
                        prop:value=move || form.with(|f| f.notes.clone().unwrap_or_default())
                        on:input=move |ev| {
                            let notes = event_target_value(&ev);
                            form.update(|f| f.notes = Some(notes));
                        }
                    ></textarea>
                </label>

                <div class="modal-actions">
                    <button type="button" class="cancel-btn" on:click=move |_| on_close.run(())>
                        "Cancel"
                    </button>
                    <button type="submit" class="primary-btn" disabled=move || !can_submit()>
                        {move || match (busy.get(), is_edit) {
                            (true, _) => "Saving...",
                            (false, true) => "Save changes",
                            (false, false) => "Add client",
                        }}
                    </button>
                </div>
            </form>
        </Modal>
    }
}
