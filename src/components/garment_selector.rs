//! Garment Selector Component
//!
//! One button per known garment plus a free-text "other" field.

use atelier_core::GarmentType;
use leptos::prelude::*;

#[component]
pub fn GarmentSelector(
    #[prop(into)] current: Signal<GarmentType>,
    #[prop(into)] on_change: Callback<GarmentType>,
) -> impl IntoView {
    let other_text = move || match current.get() {
        GarmentType::Other(text) => text,
        _ => String::new(),
    };

    view! {
        <div class="type-selector">
            {GarmentType::KNOWN.iter().cloned().map(|garment| {
                let label = garment.label();
                let value = garment.clone();
                let is_selected = move || current.get() == garment;
                view! {
                    <button
                        type="button"
                        class=move || if is_selected() { "type-btn active" } else { "type-btn" }
                        on:click=move |_| on_change.run(value.clone())
                    >
                        {label}
                    </button>
                }
            }).collect_view()}
            <input
                type="text"
                class="garment-other-input"
                placeholder="Other garment..."
                prop:value=other_text
                on:change=move |ev| {
                    let text = event_target_value(&ev);
                    if !text.trim().is_empty() {
                        on_change.run(GarmentType::parse(&text));
                    }
                }
            />
        </div>
    }
}
