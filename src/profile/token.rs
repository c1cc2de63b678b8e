//! API Token Block
//!
//! Shows the user's API token and regenerates it after confirmation.

use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::HtmlInputElement;

use crate::api;
use crate::components::ConfirmModal;
use crate::context::{use_app_context, AppContext};
use crate::error::ApiError;
use crate::messenger::MessengerAction;
use crate::store::{store_set_token, UserStateStoreFields};

/// A 401 is left to the global auth redirect
pub fn should_report_token_error(error: &ApiError) -> bool {
    !error.is_unauthorized()
}

/// Issue a new token and report the outcome
pub async fn generate_token(ctx: AppContext) {
    let config = ctx.config();
    match api::generate_api_token(&config).await {
        Ok(token) => {
            store_set_token(&ctx.user, token);
            ctx.toasts.success(MessengerAction::UpdateUuid);
        }
        Err(e) if should_report_token_error(&e) => {
            ctx.toasts.failure(MessengerAction::UpdateUuid, Some(&e));
        }
        Err(e) => log::info!("[Token] generation unauthorized: {}", e),
    }
}

/// Current token, or a fresh one when none can be retrieved
async fn load_or_generate(ctx: AppContext) {
    let config = ctx.config();
    match api::get_api_token(&config).await {
        Ok(token) => store_set_token(&ctx.user, token),
        Err(e) => {
            log::info!("[Token] no current token ({}), generating", e);
            generate_token(ctx).await;
        }
    }
}

#[component]
pub fn ApiTokenBlock() -> impl IntoView {
    let ctx = use_app_context();
    let (confirm_open, set_confirm_open) = signal(false);
    let (busy, set_busy) = signal(false);

    // Load token on mount
    Effect::new(move |_| {
        spawn_local(load_or_generate(ctx));
    });

    let token = move || ctx.user.api_token().get().unwrap_or_default();

    let on_regenerate = Callback::new(move |_| {
        set_busy.set(true);
        spawn_local(async move {
            generate_token(ctx).await;
            set_busy.set(false);
            set_confirm_open.set(false);
        });
    });

    view! {
        <div class="api-token">
            <label>"Access token"</label>
            <div class="api-token-row">
                <input
                    type="text"
                    readonly=true
                    class="api-token-input"
                    prop:value=token
                    on:click=move |ev| {
                        let input: HtmlInputElement = event_target(&ev);
                        input.select();
                    }
                />
                <button
                    class="regenerate-btn"
                    title="Regenerating invalidates the current token"
                    on:click=move |_| set_confirm_open.set(true)
                >
                    "Regenerate"
                </button>
            </div>

            <ConfirmModal
                open=confirm_open
                busy=busy
                title="Regenerate access token"
                body="The current token will stop working. Clients configured with it must be updated."
                confirm_text="Regenerate"
                on_confirm=on_regenerate
                on_cancel=Callback::new(move |_| set_confirm_open.set(false))
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_is_silent() {
        let e = ApiError::Status { status: 401, body: String::new() };
        assert!(!should_report_token_error(&e));
    }

    #[test]
    fn test_other_failures_are_reported() {
        for status in [400, 403, 404, 500, 503] {
            let e = ApiError::Status { status, body: String::new() };
            assert!(should_report_token_error(&e), "status {}", status);
        }
        assert!(should_report_token_error(&ApiError::Network("offline".into())));
        assert!(should_report_token_error(&ApiError::Decode("eof".into())));
    }
}
