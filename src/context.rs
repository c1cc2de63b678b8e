//! Application Context
//!
//! Shared state provided via Leptos Context API. Replaces any global user
//! model: components receive the user, config and messenger from here.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::config::AppConfig;
use crate::messenger::Toasts;
use crate::store::{UserState, UserStore};

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Signed-in user
    pub user: UserStore,
    /// Success/fail messenger
    pub toasts: Toasts,
    config: StoredValue<AppConfig>,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        Self {
            user: Store::new(UserState::default()),
            toasts: Toasts::new(config.toast_timeout_ms),
            config: StoredValue::new(config),
        }
    }

    pub fn config(&self) -> AppConfig {
        self.config.get_value()
    }

    pub fn with_config<R>(&self, f: impl FnOnce(&AppConfig) -> R) -> R {
        self.config.with_value(f)
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
