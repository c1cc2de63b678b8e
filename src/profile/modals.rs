//! Profile Modals
//!
//! Edit personal information and change password.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::context::use_app_context;
use crate::messenger::MessengerAction;
use crate::models::{ChangePassword, UpdateUserInfo, UserProfileStoreFields};
use crate::store::{store_update_info, UserStateStoreFields};

pub const PASSWORD_MIN: usize = 4;
pub const PASSWORD_MAX: usize = 25;

pub fn validate_user_info(full_name: &str, email: &str) -> Result<(), &'static str> {
    if full_name.trim().is_empty() {
        return Err("Full name is required");
    }
    let valid_email = email
        .split_once('@')
        .map(|(local, domain)| !local.is_empty() && domain.contains('.') && !domain.ends_with('.'))
        .unwrap_or(false);
    if !valid_email {
        return Err("Email address is not valid");
    }
    Ok(())
}

pub fn validate_password_change(old: &str, new: &str, confirm: &str) -> Result<(), &'static str> {
    if old.is_empty() {
        return Err("Current password is required");
    }
    let len = new.chars().count();
    if !(PASSWORD_MIN..=PASSWORD_MAX).contains(&len) {
        return Err("New password must be 4 to 25 characters long");
    }
    if new != confirm {
        return Err("Passwords do not match");
    }
    Ok(())
}

#[component]
pub fn EditInfoModal(#[prop(into)] open: Signal<bool>, on_close: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let user = ctx.user;

    let (full_name, set_full_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (error, set_error) = signal::<Option<&'static str>>(None);
    let (busy, set_busy) = signal(false);

    // Prefill whenever the dialog opens
    Effect::new(move |_| {
        if open.get() {
            set_full_name.set(user.profile().full_name().get_untracked());
            set_email.set(user.profile().email().get_untracked());
            set_error.set(None);
        }
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = full_name.get().trim().to_string();
        let mail = email.get().trim().to_string();
        if let Err(msg) = validate_user_info(&name, &mail) {
            set_error.set(Some(msg));
            return;
        }

        set_busy.set(true);
        let config = ctx.config();
        let login = user.profile().login().get_untracked();
        spawn_local(async move {
            let info = UpdateUserInfo { full_name: name, email: mail };
            match api::update_user_info(&config, &login, &info).await {
                Ok(()) => {
                    store_update_info(&user, info.full_name, info.email);
                    ctx.toasts.success(MessengerAction::EditUserInfo);
                    on_close.run(());
                }
                Err(e) => ctx.toasts.failure(MessengerAction::EditUserInfo, Some(&e)),
            }
            set_busy.set(false);
        });
    };

    view! {
        <Show when=move || open.get()>
            <div class="modal-backdrop">
                <form class="modal" on:submit=on_submit>
                    <div class="modal-header">
                        <span class="modal-title">"Edit personal information"</span>
                        <button type="button" class="close-btn" on:click=move |_| on_close.run(())>"×"</button>
                    </div>
                    <div class="modal-body">
                        <label>"Full name"</label>
                        <input
                            type="text"
                            prop:value=move || full_name.get()
                            on:input=move |ev| set_full_name.set(event_target_value(&ev))
                        />
                        <label>"Email"</label>
                        <input
                            type="email"
                            prop:value=move || email.get()
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                        />
                        {move || error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}
                    </div>
                    <div class="modal-footer">
                        <button type="button" class="cancel-btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                        <button type="submit" class="confirm-btn" disabled=move || busy.get()>"Save"</button>
                    </div>
                </form>
            </div>
        </Show>
    }
}

#[component]
pub fn ChangePasswordModal(#[prop(into)] open: Signal<bool>, on_close: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();

    let (old_password, set_old_password) = signal(String::new());
    let (new_password, set_new_password) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());
    let (error, set_error) = signal::<Option<&'static str>>(None);
    let (busy, set_busy) = signal(false);

    Effect::new(move |_| {
        if open.get() {
            set_old_password.set(String::new());
            set_new_password.set(String::new());
            set_confirm.set(String::new());
            set_error.set(None);
        }
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let old = old_password.get();
        let new = new_password.get();
        if let Err(msg) = validate_password_change(&old, &new, &confirm.get()) {
            set_error.set(Some(msg));
            return;
        }

        set_busy.set(true);
        let config = ctx.config();
        spawn_local(async move {
            let body = ChangePassword { old_password: old, new_password: new };
            match api::change_password(&config, &body).await {
                Ok(()) => {
                    ctx.toasts.success(MessengerAction::ChangePassword);
                    on_close.run(());
                }
                Err(e) => ctx.toasts.failure(MessengerAction::ChangePassword, Some(&e)),
            }
            set_busy.set(false);
        });
    };

    let password_input = move |value: ReadSignal<String>, set_value: WriteSignal<String>| {
        view! {
            <input
                type="password"
                prop:value=move || value.get()
                on:input=move |ev| set_value.set(event_target_value(&ev))
            />
        }
    };

    view! {
        <Show when=move || open.get()>
            <div class="modal-backdrop">
                <form class="modal" on:submit=on_submit>
                    <div class="modal-header">
                        <span class="modal-title">"Change password"</span>
                        <button type="button" class="close-btn" on:click=move |_| on_close.run(())>"×"</button>
                    </div>
                    <div class="modal-body">
                        <label>"Current password"</label>
                        {password_input(old_password, set_old_password)}
                        <label>"New password"</label>
                        {password_input(new_password, set_new_password)}
                        <label>"Confirm new password"</label>
                        {password_input(confirm, set_confirm)}
                        {move || error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}
                    </div>
                    <div class="modal-footer">
                        <button type="button" class="cancel-btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                        <button type="submit" class="confirm-btn" disabled=move || busy.get()>"Change"</button>
                    </div>
                </form>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_info_validation() {
        assert!(validate_user_info("Jane Doe", "jane@example.com").is_ok());
        assert_eq!(validate_user_info("  ", "jane@example.com"), Err("Full name is required"));
        assert!(validate_user_info("Jane", "jane.example.com").is_err());
        assert!(validate_user_info("Jane", "@example.com").is_err());
        assert!(validate_user_info("Jane", "jane@localhost").is_err());
    }

    #[test]
    fn test_password_validation() {
        assert!(validate_password_change("old", "secret", "secret").is_ok());
        assert_eq!(
            validate_password_change("old", "secret", "secreT"),
            Err("Passwords do not match")
        );
        assert!(validate_password_change("old", "abc", "abc").is_err());
        assert!(validate_password_change("old", &"x".repeat(26), &"x".repeat(26)).is_err());
        assert!(validate_password_change("", "secret", "secret").is_err());
    }
}
