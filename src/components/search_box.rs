//! Search Box Component

use leptos::prelude::*;

/// Text filter with a clear button
#[component]
pub fn SearchBox(
    value: ReadSignal<String>,
    set_value: WriteSignal<String>,
    #[prop(into)] placeholder: String,
) -> impl IntoView {
    view! {
        <div class="search-box">
            <input
                type="search"
                class="search-input"
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| set_value.set(event_target_value(&ev))
            />
            <Show when=move || !value.get().is_empty()>
                <button class="clear-search-btn" on:click=move |_| set_value.set(String::new())>
                    "×"
                </button>
            </Show>
        </div>
    }
}
