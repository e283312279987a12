//! Toast Stack Component

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn ToastStack() -> impl IntoView {
    let toasts = use_app_context().toasts;

    view! {
        <div class="toast-stack">
            <For
                each=move || toasts.items().get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=format!("toast toast-{}", toast.level.as_str())>
                            <span class="toast-message">{toast.message}</span>
                            <button class="toast-close" on:click=move |_| toasts.dismiss(id)>
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
