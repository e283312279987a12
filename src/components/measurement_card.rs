//! Measurement Card Component
//!
//! One record in the measurements grid: client, garment, the first few
//! sizes and edit/delete actions.

use atelier_core::Measurement;
use leptos::prelude::*;

/// Entries shown before collapsing into "+N more"
const PREVIEW_LEN: usize = 4;

#[component]
pub fn MeasurementCard(
    record: Measurement,
    #[prop(into)] client_name: Signal<String>,
    #[prop(into)] on_edit: Callback<String>,
    /// Receives the record id and a label for the confirm dialog
    #[prop(into)] on_delete: Callback<(String, String)>,
) -> impl IntoView {
    let garment = record.garment_type.label();
    let preview = record.preview(PREVIEW_LEN);
    let hidden = record.measurements.len().saturating_sub(PREVIEW_LEN);
    let date = record
        .updated_at
        .or(record.created_at)
        .map(|d| d.format("%d %b %Y").to_string())
        .unwrap_or_default();
    let notes = record.notes.clone().filter(|n| !n.trim().is_empty());

    let edit_id = record.id.clone();
    let delete_id = record.id.clone();
    let delete_garment = garment.clone();

    view! {
        <div class="measurement-card">
            <div class="card-header">
                <span class="card-title">{move || client_name.get()}</span>
                <span class="garment-badge">{garment}</span>
            </div>
            <ul class="measurement-preview">
                {preview.into_iter().map(|line| view! { <li>{line}</li> }).collect_view()}
            </ul>
            {(hidden > 0).then(|| view! { <p class="more-fields">{format!("+{} more", hidden)}</p> })}
            {notes.map(|n| view! { <p class="card-notes">{n}</p> })}
            <div class="card-footer">
                <span class="card-date">{date}</span>
                <button class="edit-btn" on:click=move |_| on_edit.run(edit_id.clone())>
                    "Edit"
                </button>
                <button
                    class="delete-btn"
                    on:click=move |_| {
                        let label = format!("{} for {}", delete_garment, client_name.get_untracked());
                        on_delete.run((delete_id.clone(), label));
                    }
                >
                    "Delete"
                </button>
            </div>
        </div>
    }
}
