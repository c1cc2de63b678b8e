//! Success/Fail Messenger
//!
//! Toast notifications for the outcome of a user action.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::Deserialize;

use crate::error::ApiError;

/// User actions that report their outcome
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessengerAction {
    UpdateUuid,
    SubmitUpload,
    DeletePhoto,
    EditUserInfo,
    ChangePassword,
}

impl MessengerAction {
    pub fn success_text(self) -> &'static str {
        match self {
            MessengerAction::UpdateUuid => "Access token has been regenerated",
            MessengerAction::SubmitUpload => "Photo has been uploaded",
            MessengerAction::DeletePhoto => "Photo has been deleted",
            MessengerAction::EditUserInfo => "Personal information has been updated",
            MessengerAction::ChangePassword => "Password has been changed",
        }
    }

    pub fn failure_text(self) -> &'static str {
        match self {
            MessengerAction::UpdateUuid => "Failed to regenerate access token",
            MessengerAction::SubmitUpload => "Failed to upload photo",
            MessengerAction::DeletePhoto => "Failed to delete photo",
            MessengerAction::EditUserInfo => "Failed to update personal information",
            MessengerAction::ChangePassword => "Failed to change password",
        }
    }
}

#[derive(Deserialize)]
struct ServerMessage {
    message: String,
}

/// Generic failure text, plus the server's `message` when it sent one
pub fn failure_message(action: MessengerAction, error: Option<&ApiError>) -> String {
    let detail = match error {
        Some(ApiError::Status { body, .. }) => serde_json::from_str::<ServerMessage>(body)
            .ok()
            .map(|m| m.message)
            .filter(|m| !m.trim().is_empty()),
        _ => None,
    };
    match detail {
        Some(detail) => format!("{}: {}", action.failure_text(), detail),
        None => action.failure_text().to_string(),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub text: String,
}

/// Toast queue, shared through `AppContext`
#[derive(Clone, Copy)]
pub struct Toasts {
    items: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u32>,
    timeout_ms: u32,
}

impl Toasts {
    pub fn new(timeout_ms: u32) -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
            timeout_ms,
        }
    }

    pub fn items(&self) -> ReadSignal<Vec<Toast>> {
        self.items.read_only()
    }

    pub fn success(&self, action: MessengerAction) {
        self.push(ToastKind::Success, action.success_text().to_string());
    }

    pub fn failure(&self, action: MessengerAction, error: Option<&ApiError>) {
        if let Some(e) = error {
            log::warn!("[Messenger] {:?} failed: {}", action, e);
        }
        self.push(ToastKind::Error, failure_message(action, error));
    }

    /// Inline validation problems that never reached the server
    pub fn error_text(&self, text: impl Into<String>) {
        self.push(ToastKind::Error, text.into());
    }

    pub fn dismiss(&self, id: u32) {
        let _ = self.items.try_update(|items| items.retain(|t| t.id != id));
    }

    fn push(&self, kind: ToastKind, text: String) {
        self.next_id.update_value(|v| *v += 1);
        let id = self.next_id.get_value();
        self.items.update(|items| items.push(Toast { id, kind, text }));

        let toasts = *self;
        let timeout = self.timeout_ms;
        spawn_local(async move {
            TimeoutFuture::new(timeout).await;
            toasts.dismiss(id);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_message_without_error() {
        assert_eq!(
            failure_message(MessengerAction::SubmitUpload, None),
            "Failed to upload photo"
        );
    }

    #[test]
    fn test_failure_message_with_server_message() {
        let error = ApiError::Status {
            status: 400,
            body: r#"{"errorCode": 4001, "message": "Incorrect request"}"#.into(),
        };
        assert_eq!(
            failure_message(MessengerAction::DeletePhoto, Some(&error)),
            "Failed to delete photo: Incorrect request"
        );
    }

    #[test]
    fn test_failure_message_with_opaque_body() {
        let error = ApiError::Status { status: 502, body: "<html>Bad gateway</html>".into() };
        assert_eq!(
            failure_message(MessengerAction::UpdateUuid, Some(&error)),
            "Failed to regenerate access token"
        );
        let error = ApiError::Network("offline".into());
        assert_eq!(
            failure_message(MessengerAction::UpdateUuid, Some(&error)),
            "Failed to regenerate access token"
        );
    }
}
