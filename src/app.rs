//! Atelier Frontend App
//!
//! Root component: builds the stores, mirrors them into the reactive app
//! store and switches between the clients and measurements pages.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::components::{ClientPage, MeasurementPage, Page, TabBar, ToastStack};
use crate::context::AppContext;
use crate::services::{self, Services, Toasts};
use crate::store::{bind_stores, AppState};

#[component]
pub fn App() -> impl IntoView {
    let toasts = Toasts::new();
    let services = Services::build(toasts);

    let app_store = Store::new(AppState::default());
    bind_stores(app_store, &services.clients, &services.measurements);
    provide_context(app_store);

    let ctx = AppContext::new(services, toasts);
    provide_context(ctx);

    let (current_page, set_current_page) = signal(Page::Measurements);

    // Both pages resolve client names, so clients load once up front
    Effect::new(move |_| {
        let clients = ctx.clients();
        spawn_local(async move {
            let _ = clients.get_all_clients().await;
        });
    });

    let sign_out = move |_| {
        ctx.clients().clear_clients();
        ctx.measurements().clear_measurements();
        services::end_session();
    };

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>"Atelier"</h1>
                <TabBar current_page=current_page set_current_page=set_current_page />
                <button class="sign-out-btn" on:click=sign_out>"Sign out"</button>
            </header>

            <main class="main-content">
                {move || match current_page.get() {
                    Page::Clients => view! { <ClientPage /> }.into_any(),
                    Page::Measurements => view! { <MeasurementPage /> }.into_any(),
                }}
            </main>

            <ToastStack />
        </div>
    }
}
