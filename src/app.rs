//! Report UI App
//!
//! Router, navigation and startup loading of the signed-in user.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::{Route, Router, Routes, A};
use leptos_router::path;

use crate::api;
use crate::components::Toaster;
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::launches::LaunchesPage;
use crate::profile::ProfilePanel;
use crate::store::store_set_profile;

#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new(AppConfig::load());

    // Provide context to all children
    provide_context(ctx);

    // Load the signed-in user on mount
    Effect::new(move |_| {
        let config = ctx.config();
        spawn_local(async move {
            match api::fetch_current_user(&config).await {
                Ok(profile) => {
                    log::info!("[APP] signed in as {}", profile.login);
                    store_set_profile(&ctx.user, profile);
                }
                Err(e) => log::error!("[APP] failed to load user: {}", e),
            }
        });
    });

    view! {
        <Router>
            <div class="app-layout">
                <nav class="app-nav">
                    <A href="/launches">"Launches"</A>
                    <A href="/profile">"Profile"</A>
                </nav>

                <main class="main-content">
                    <Routes fallback=|| "Page not found.">
                        <Route path=path!("/") view=LaunchesPage />
                        <Route path=path!("/launches") view=LaunchesPage />
                        <Route path=path!("/profile") view=ProfilePanel />
                    </Routes>
                </main>

                <Toaster />
            </div>
        </Router>
    }
}
