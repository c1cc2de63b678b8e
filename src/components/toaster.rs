//! Toaster Component
//!
//! Renders the messenger queue.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::messenger::ToastKind;

#[component]
pub fn Toaster() -> impl IntoView {
    let toasts = use_app_context().toasts;

    view! {
        <div class="toaster">
            <For
                each=move || toasts.items().get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let class = match toast.kind {
                        ToastKind::Success => "toast success",
                        ToastKind::Error => "toast error",
                    };
                    view! {
                        <div class=class on:click=move |_| toasts.dismiss(id)>
                            {toast.text}
                        </div>
                    }
                }
            />
        </div>
    }
}
