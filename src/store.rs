//! User Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity over the
//! signed-in user. Lives inside `AppContext`, never as a global.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{UserProfile, UserProfileStoreFields};

/// Signed-in user with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct UserState {
    /// Profile as last returned by the server
    pub profile: UserProfile,
    /// API token, `None` until fetched or generated
    pub api_token: Option<String>,
    /// Bumped after every photo change to bust the image cache
    pub photo_version: u32,
    /// Profile has been loaded at least once
    pub loaded: bool,
}

/// Type alias for the store
pub type UserStore = Store<UserState>;

// ========================
// Store Helper Functions
// ========================

pub fn store_set_profile(store: &UserStore, profile: UserProfile) {
    store.profile().set(profile);
    store.loaded().set(true);
}

pub fn store_set_token(store: &UserStore, token: String) {
    store.api_token().set(Some(token));
}

/// Record an uploaded or removed photo
pub fn store_set_photo_loaded(store: &UserStore, loaded: bool) {
    store.profile().photo_loaded().set(loaded);
    store.photo_version().update(|v| *v += 1);
}

pub fn store_update_info(store: &UserStore, full_name: String, email: String) {
    store.profile().full_name().set(full_name);
    store.profile().email().set(email);
}
