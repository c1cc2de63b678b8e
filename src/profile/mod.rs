//! Profile Panel
//!
//! Account settings of the signed-in user: identity fields, photo,
//! API token and client configuration.

mod avatar;
mod modals;
mod snippet;
mod token;

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::models::UserProfileStoreFields;
use crate::store::UserStateStoreFields;

use avatar::AvatarEditor;
use modals::{ChangePasswordModal, EditInfoModal};
use snippet::ConfigSnippet;
use token::ApiTokenBlock;

#[component]
pub fn ProfilePanel() -> impl IntoView {
    let user = use_app_context().user;
    let (edit_info_open, set_edit_info_open) = signal(false);
    let (change_password_open, set_change_password_open) = signal(false);

    let is_internal = move || user.profile().with(|p| p.is_internal());

    view! {
        <Show
            when=move || user.loaded().get()
            fallback=|| view! { <div class="loading">"Loading..."</div> }
        >
            <div class="profile-panel">
                <section class="profile-identity">
                    <AvatarEditor />

                    <div class="profile-fields">
                        <div class="field">
                            <span class="field-label">"Login"</span>
                            <span class="user-login">{move || user.profile().login().get()}</span>
                        </div>
                        <div class="field">
                            <span class="field-label">"Full name"</span>
                            <span class="user-name">{move || user.profile().full_name().get()}</span>
                        </div>
                        <div class="field">
                            <span class="field-label">"Email"</span>
                            <span class="user-email">{move || user.profile().email().get()}</span>
                        </div>

                        <Show when=is_internal>
                            <div class="profile-actions">
                                <button on:click=move |_| set_edit_info_open.set(true)>"Edit info"</button>
                                <button on:click=move |_| set_change_password_open.set(true)>"Change password"</button>
                            </div>
                        </Show>
                    </div>
                </section>

                <section class="profile-token">
                    <ApiTokenBlock />
                </section>

                <section class="profile-config">
                    <ConfigSnippet />
                </section>

                <EditInfoModal
                    open=edit_info_open
                    on_close=Callback::new(move |_| set_edit_info_open.set(false))
                />
                <ChangePasswordModal
                    open=change_password_open
                    on_close=Callback::new(move |_| set_change_password_open.set(false))
                />
            </div>
        </Show>
    }
}
