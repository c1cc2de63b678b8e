//! Avatar Editor
//!
//! Photo preview, validation, upload and removal.

use js_sys::Promise;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FileReader, HtmlImageElement, HtmlInputElement};

use crate::api;
use crate::components::ConfirmModal;
use crate::context::use_app_context;
use crate::error::{ApiError, Result};
use crate::messenger::MessengerAction;
use crate::models::UserProfileStoreFields;
use crate::store::{store_set_photo_loaded, UserStateStoreFields};

pub const ALLOWED_EXTENSIONS: &[&str] = &["gif", "jpg", "jpeg", "png"];
pub const MAX_SIZE_KB: u64 = 1000;
pub const MAX_WIDTH: u32 = 300;
pub const MAX_HEIGHT: u32 = 500;

/// Case-insensitive check of the file name extension
pub fn has_allowed_extension(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ALLOWED_EXTENSIONS.iter().any(|a| ext.eq_ignore_ascii_case(a)))
        .unwrap_or(false)
}

/// What is known about a candidate image after decoding it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageMeta {
    pub width: u32,
    pub height: u32,
    pub size_bytes: u64,
}

impl ImageMeta {
    /// Whole kilobytes, rounded down
    pub fn size_kb(&self) -> u64 {
        self.size_bytes / 1024
    }

    pub fn is_acceptable(&self) -> bool {
        self.size_kb() <= MAX_SIZE_KB && self.width <= MAX_WIDTH && self.height <= MAX_HEIGHT
    }
}

/// Photo block state
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AvatarStage {
    /// Showing the stored avatar with the edit controls
    #[default]
    Idle,
    /// Valid image selected, waiting for submission. `ticket` names the
    /// selection the preview was built from.
    Preview { ticket: u32, data_url: String },
    /// Last selection was refused; stored avatar stays
    Rejected,
}

impl AvatarStage {
    pub fn after_check(meta: ImageMeta, ticket: u32, data_url: String) -> Self {
        if meta.is_acceptable() {
            AvatarStage::Preview { ticket, data_url }
        } else {
            AvatarStage::Rejected
        }
    }

    pub fn can_submit(&self) -> bool {
        matches!(self, AvatarStage::Preview { .. })
    }

    pub fn shows_error(&self) -> bool {
        matches!(self, AvatarStage::Rejected)
    }
}

/// Numbers file selections so a slow check cannot overwrite the outcome
/// of a newer one
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionCounter(u32);

impl SelectionCounter {
    /// Start a new selection, invalidating all earlier ones
    pub fn begin(&mut self) -> u32 {
        self.0 = self.0.wrapping_add(1);
        self.0
    }

    pub fn is_current(&self, ticket: u32) -> bool {
        self.0 == ticket
    }

    /// Stage to show for a finished check, or `None` if it was superseded
    pub fn accept(&self, ticket: u32, outcome: AvatarStage) -> Option<AvatarStage> {
        self.is_current(ticket).then_some(outcome)
    }
}

/// The file to upload: only the one the shown preview was built from
pub fn upload_target<'a, F>(stage: &AvatarStage, selected: Option<&'a (u32, F)>) -> Option<&'a F> {
    match (stage, selected) {
        (AvatarStage::Preview { ticket, .. }, Some((selected_ticket, file))) if ticket == selected_ticket => {
            Some(file)
        }
        _ => None,
    }
}

// ========================
// Browser helpers
// ========================

/// Read a file into a `data:` URL
async fn read_as_data_url(file: &File) -> Result<String> {
    let reader = FileReader::new().map_err(ApiError::from_js)?;
    let promise = Promise::new(&mut |resolve, reject| {
        let loaded = reader.clone();
        let on_load = Closure::once_into_js(move || {
            let result = loaded.result().unwrap_or(JsValue::NULL);
            let _ = resolve.call1(&JsValue::NULL, &result);
        });
        let on_error = Closure::once_into_js(move || {
            let _ = reject.call1(&JsValue::NULL, &JsValue::from_str("failed to read file"));
        });
        reader.set_onload(Some(on_load.unchecked_ref()));
        reader.set_onerror(Some(on_error.unchecked_ref()));
    });
    reader.read_as_data_url(file).map_err(ApiError::from_js)?;

    let value = JsFuture::from(promise).await.map_err(ApiError::from_js)?;
    value
        .as_string()
        .ok_or_else(|| ApiError::Browser("file reader returned no data".to_string()))
}

/// Decode an image and return its natural size
async fn image_dimensions(src: &str) -> Result<(u32, u32)> {
    let image = HtmlImageElement::new().map_err(ApiError::from_js)?;
    let promise = Promise::new(&mut |resolve, reject| {
        let on_load = Closure::once_into_js(move || {
            let _ = resolve.call0(&JsValue::NULL);
        });
        let on_error = Closure::once_into_js(move || {
            let _ = reject.call1(&JsValue::NULL, &JsValue::from_str("not a decodable image"));
        });
        image.set_onload(Some(on_load.unchecked_ref()));
        image.set_onerror(Some(on_error.unchecked_ref()));
    });
    image.set_src(src);

    JsFuture::from(promise).await.map_err(ApiError::from_js)?;
    Ok((image.natural_width(), image.natural_height()))
}

async fn inspect(file: &File) -> Result<(ImageMeta, String)> {
    let data_url = read_as_data_url(file).await?;
    let (width, height) = image_dimensions(&data_url).await?;
    let meta = ImageMeta {
        width,
        height,
        size_bytes: file.size() as u64,
    };
    Ok((meta, data_url))
}

// ========================
// Component
// ========================

#[component]
pub fn AvatarEditor() -> impl IntoView {
    let ctx = use_app_context();
    let user = ctx.user;

    let (stage, set_stage) = signal(AvatarStage::Idle);
    let (uploading, set_uploading) = signal(false);
    let (confirm_remove, set_confirm_remove) = signal(false);
    let (removing, set_removing) = signal(false);
    let selections = StoredValue::new(SelectionCounter::default());
    let selected = StoredValue::new_local(None::<(u32, File)>);
    let file_input = NodeRef::<leptos::html::Input>::new();

    let avatar = move || match stage.get() {
        AvatarStage::Preview { data_url, .. } => data_url,
        _ => {
            let profile = user.profile().get();
            let version = user.photo_version().get();
            ctx.with_config(|config| api::avatar_src(config, &profile, version))
        }
    };

    let reset_input = move || {
        selections.update_value(|s| {
            s.begin();
        });
        selected.set_value(None);
        if let Some(input) = file_input.get_untracked() {
            input.set_value("");
        }
    };

    let on_select = move |ev: web_sys::Event| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };

        let ticket = selections.try_update_value(|s| s.begin()).unwrap_or_default();
        if !has_allowed_extension(&file.name()) {
            log::info!("[Avatar] rejected {}: extension", file.name());
            selected.set_value(None);
            set_stage.set(AvatarStage::Rejected);
            return;
        }

        selected.set_value(Some((ticket, file.clone())));
        spawn_local(async move {
            let outcome = match inspect(&file).await {
                Ok((meta, data_url)) => {
                    if !meta.is_acceptable() {
                        log::info!("[Avatar] rejected {}: {:?}", file.name(), meta);
                    }
                    AvatarStage::after_check(meta, ticket, data_url)
                }
                Err(e) => {
                    log::warn!("[Avatar] could not read {}: {}", file.name(), e);
                    AvatarStage::Rejected
                }
            };
            match selections.try_with_value(|s| s.accept(ticket, outcome)).flatten() {
                Some(stage) => set_stage.set(stage),
                None => log::debug!("[Avatar] dropped stale check of {}", file.name()),
            }
        });
    };

    let on_upload = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let current = stage.get_untracked();
        let Some(file) = selected.with_value(|sel| upload_target(&current, sel.as_ref()).cloned())
        else {
            return;
        };

        set_uploading.set(true);
        let config = ctx.config();
        spawn_local(async move {
            let result = api::upload_photo(&config, &file).await;
            set_uploading.set(false);
            set_stage.set(AvatarStage::Idle);
            reset_input();
            match result {
                Ok(()) => {
                    store_set_photo_loaded(&user, true);
                    ctx.toasts.success(MessengerAction::SubmitUpload);
                }
                Err(e) => ctx.toasts.failure(MessengerAction::SubmitUpload, Some(&e)),
            }
        });
    };

    let on_remove = Callback::new(move |_| {
        set_removing.set(true);
        let config = ctx.config();
        spawn_local(async move {
            match api::delete_photo(&config).await {
                Ok(()) => {
                    store_set_photo_loaded(&user, false);
                    set_stage.set(AvatarStage::Idle);
                    ctx.toasts.success(MessengerAction::DeletePhoto);
                }
                Err(e) => ctx.toasts.failure(MessengerAction::DeletePhoto, Some(&e)),
            }
            set_removing.set(false);
            set_confirm_remove.set(false);
        });
    });

    view! {
        <div class="avatar-editor">
            <div class="avatar" class:active=move || user.profile().photo_loaded().get()>
                <img src=avatar alt="avatar" />
            </div>

            <form class="avatar-form" on:submit=on_upload>
                <Show
                    when=move || stage.get().can_submit()
                    fallback=move || view! {
                        <div class="edit-photo">
                            <label class="select-photo">
                                "Select photo"
                                <input
                                    type="file"
                                    accept=".gif,.jpg,.jpeg,.png"
                                    node_ref=file_input
                                    on:change=on_select
                                />
                            </label>
                            <Show when=move || user.profile().photo_loaded().get()>
                                <button
                                    type="button"
                                    class="remove-photo"
                                    on:click=move |_| set_confirm_remove.set(true)
                                >
                                    "Remove photo"
                                </button>
                            </Show>
                        </div>
                    }
                >
                    <div class="upload-photo">
                        <button type="submit" disabled=move || uploading.get()>"Upload"</button>
                        <button
                            type="button"
                            class="cancel-btn"
                            on:click=move |_| {
                                set_stage.set(AvatarStage::Idle);
                                reset_input();
                            }
                        >
                            "Cancel"
                        </button>
                    </div>
                </Show>
            </form>

            <Show when=move || stage.get().shows_error()>
                <p class="photo-error">
                    {format!(
                        "Use a GIF, JPG or PNG image up to {} KB and {}×{} px",
                        MAX_SIZE_KB, MAX_WIDTH, MAX_HEIGHT
                    )}
                </p>
            </Show>

            <ConfirmModal
                open=confirm_remove
                busy=removing
                title="Delete photo"
                body="Are you sure you want to delete your profile photo?"
                confirm_text="Delete"
                on_confirm=on_remove
                on_cancel=Callback::new(move |_| set_confirm_remove.set(false))
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(width: u32, height: u32, kb: u64) -> ImageMeta {
        ImageMeta { width, height, size_bytes: kb * 1024 }
    }

    #[test]
    fn test_allowed_extensions() {
        assert!(has_allowed_extension("me.png"));
        assert!(has_allowed_extension("ME.JPEG"));
        assert!(has_allowed_extension("archive.tar.gif"));
        assert!(!has_allowed_extension("me.bmp"));
        assert!(!has_allowed_extension("png"));
        assert!(!has_allowed_extension("me.png.exe"));
    }

    #[test]
    fn test_limits_are_inclusive() {
        assert!(meta(300, 500, 1000).is_acceptable());
        assert!(!meta(301, 500, 10).is_acceptable());
        assert!(!meta(300, 501, 10).is_acceptable());
        assert!(!meta(10, 10, 1001).is_acceptable());
    }

    #[test]
    fn test_size_rounds_down() {
        // 1000 KB plus 1023 bytes still counts as 1000 KB
        let image = ImageMeta { width: 1, height: 1, size_bytes: 1000 * 1024 + 1023 };
        assert_eq!(image.size_kb(), 1000);
        assert!(image.is_acceptable());
    }

    #[test]
    fn test_stage_after_check() {
        let ok = AvatarStage::after_check(meta(100, 100, 10), 1, "data:image/png;base64,AA".into());
        assert!(ok.can_submit());
        assert!(!ok.shows_error());

        let too_big = AvatarStage::after_check(meta(600, 100, 10), 1, "data:".into());
        assert_eq!(too_big, AvatarStage::Rejected);
        assert!(!too_big.can_submit());
        assert!(too_big.shows_error());
    }

    #[test]
    fn test_stale_check_after_newer_rejection_is_ignored() {
        let mut selections = SelectionCounter::default();
        let slow = selections.begin();
        let fast = selections.begin();

        // The newer, oversized file finishes first
        let rejected = AvatarStage::after_check(meta(1000, 1000, 10), fast, "data:b".into());
        assert_eq!(selections.accept(fast, rejected), Some(AvatarStage::Rejected));

        // The older, valid file finishes last and must not turn into a preview
        let late = AvatarStage::after_check(meta(100, 100, 10), slow, "data:a".into());
        assert!(late.can_submit());
        assert_eq!(selections.accept(slow, late), None);
    }

    #[test]
    fn test_extension_rejection_supersedes_pending_check() {
        let mut selections = SelectionCounter::default();
        let pending = selections.begin();
        // A .bmp selection takes a ticket without starting a check
        selections.begin();

        let late = AvatarStage::after_check(meta(100, 100, 10), pending, "data:a".into());
        assert_eq!(selections.accept(pending, late), None);
    }

    #[test]
    fn test_upload_uses_file_behind_preview() {
        let preview = AvatarStage::Preview { ticket: 2, data_url: "data:a".into() };
        assert_eq!(upload_target(&preview, Some(&(2, "a.png"))), Some(&"a.png"));
        // Selection moved on since the preview was built
        assert_eq!(upload_target(&preview, Some(&(3, "b.png"))), None);
        assert_eq!(upload_target::<&str>(&preview, None), None);
        assert_eq!(upload_target(&AvatarStage::Rejected, Some(&(2, "a.png"))), None);
    }
}
