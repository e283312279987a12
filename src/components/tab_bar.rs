//! Page Tab Bar Component
//!
//! Switches between the client list and the measurements page.

use leptos::prelude::*;

use crate::store::{use_app_store, AppStateStoreFields};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Clients,
    Measurements,
}

impl Page {
    pub const ALL: [Page; 2] = [Page::Measurements, Page::Clients];

    pub fn label(&self) -> &'static str {
        match self {
            Page::Clients => "Clients",
            Page::Measurements => "Measurements",
        }
    }
}

#[component]
pub fn TabBar(
    current_page: ReadSignal<Page>,
    set_current_page: WriteSignal<Page>,
) -> impl IntoView {
    let store = use_app_store();

    view! {
        <nav class="workspace-tab-bar">
            {Page::ALL.iter().map(|page| {
                let page = *page;
                let is_active = move || current_page.get() == page;
                let count = move || match page {
                    Page::Clients => store.clients().read().len(),
                    Page::Measurements => store.measurements().read().len(),
                };
                // A client-filtered measurement list only counts that client's records
                let filtered = move || {
                    page == Page::Measurements && store.measurements_scope().read().is_some()
                };
                view! {
                    <button
                        class=move || if is_active() { "workspace-tab active" } else { "workspace-tab" }
                        on:click=move |_| set_current_page.set(page)
                    >
                        {page.label()}
                        <span
                            class=move || if filtered() { "tab-count filtered" } else { "tab-count" }
                            title=move || if filtered() { "Records for the selected client" } else { "All records" }
                        >
                            {count}
                            {move || filtered().then_some(" (filtered)")}
                        </span>
                    </button>
                }
            }).collect_view()}
        </nav>
    }
}
