//! Delete Confirm Modal Component
//!
//! Asks before a record is removed; both buttons lock while the request runs.

use leptos::prelude::*;

use super::Modal;

/// # Arguments
/// * `label` - What is being deleted, e.g. "Shirt for Amy"
/// * `busy` - True while the delete request is in flight
#[component]
pub fn DeleteConfirmModal(
    #[prop(into)] label: String,
    #[prop(into)] busy: Signal<bool>,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <Modal title="Delete?" on_close=on_cancel>
            <p class="delete-confirm-text">
                "Delete " <strong>{label}</strong> "? This cannot be undone."
            </p>
            <div class="modal-actions">
                <button
                    type="button"
                    class="cancel-btn"
                    disabled=move || busy.get()
                    on:click=move |_| on_cancel.run(())
                >
                    "Cancel"
                </button>
                <button
                    type="button"
                    class="confirm-btn danger"
                    disabled=move || busy.get()
                    on:click=move |ev| {
                        ev.stop_propagation();
                        on_confirm.run(());
                    }
                >
                    {move || if busy.get() { "Deleting..." } else { "Delete" }}
                </button>
            </div>
        </Modal>
    }
}
