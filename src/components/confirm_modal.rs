//! Confirm Modal Component
//!
//! Reusable confirmation dialog with confirm/cancel actions.

use leptos::prelude::*;

/// Modal confirmation dialog
///
/// # Arguments
/// * `open` - Whether the dialog is shown
/// * `busy` - Disables the confirm button while the confirmed action runs
/// * `on_confirm` - Callback to execute when the user confirms
/// * `on_cancel` - Callback to close the dialog without acting
#[component]
pub fn ConfirmModal(
    #[prop(into)] open: Signal<bool>,
    #[prop(into, optional)] busy: Signal<bool>,
    #[prop(into)] title: String,
    #[prop(into)] body: String,
    #[prop(into)] confirm_text: String,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <Show when=move || open.get()>
            <div class="modal-backdrop" on:click=move |_| on_cancel.run(())>
                <div class="modal" on:click=|ev| ev.stop_propagation()>
                    <div class="modal-header">
                        <span class="modal-title">{title.clone()}</span>
                        <button class="close-btn" on:click=move |_| on_cancel.run(())>"×"</button>
                    </div>
                    <div class="modal-body">{body.clone()}</div>
                    <div class="modal-footer">
                        <button class="cancel-btn" on:click=move |_| on_cancel.run(())>
                            "Cancel"
                        </button>
                        <button
                            class="confirm-btn"
                            disabled=move || busy.get()
                            on:click=move |ev| {
                                ev.stop_propagation();
                                on_confirm.run(());
                            }
                        >
                            {confirm_text.clone()}
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
