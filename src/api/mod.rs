//! HTTP API Wrappers
//!
//! Frontend bindings to the reporting server, organized by domain.

mod page;
mod user;

use reqwasm::http::{Request, RequestCredentials, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::JsValue;

use crate::error::{ApiError, Result};

pub use page::*;
pub use user::*;

// ========================
// Transport
// ========================

/// Turn a non-2xx response into `ApiError::Status`, otherwise return the body
async fn read_body(resp: Response) -> Result<String> {
    let status = resp.status();
    let ok = resp.ok();
    response_body(status, ok, resp.text().await)
}

/// The body of an error response is informational only; a 2xx body that
/// cannot be read is a transport failure.
fn response_body<E: std::fmt::Display>(
    status: u16,
    ok: bool,
    body: std::result::Result<String, E>,
) -> Result<String> {
    if !ok {
        return Err(ApiError::Status {
            status,
            body: body.unwrap_or_default(),
        });
    }
    body.map_err(|e| ApiError::Network(e.to_string()))
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(ApiError::from)
}

fn with_session(req: Request) -> Request {
    req.credentials(RequestCredentials::Include)
        .header("Accept", "application/json")
}

pub async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T> {
    let resp = with_session(Request::get(url)).send().await?;
    let body = read_body(resp).await?;
    decode(&body)
}

/// POST without a body, e.g. to generate a resource
pub async fn post_empty<T: DeserializeOwned>(url: &str) -> Result<T> {
    let resp = with_session(Request::post(url)).send().await?;
    let body = read_body(resp).await?;
    decode(&body)
}

pub async fn post_json<B: Serialize>(url: &str, body: &B) -> Result<()> {
    send_json(Request::post(url), body).await
}

pub async fn put_json<B: Serialize>(url: &str, body: &B) -> Result<()> {
    send_json(Request::put(url), body).await
}

async fn send_json<B: Serialize>(req: Request, body: &B) -> Result<()> {
    let payload = serde_json::to_string(body)?;
    let resp = with_session(req)
        .header("Content-Type", "application/json")
        .body(payload)
        .send()
        .await?;
    read_body(resp).await.map(|_| ())
}

pub async fn delete(url: &str) -> Result<()> {
    let resp = with_session(Request::delete(url)).send().await?;
    read_body(resp).await.map(|_| ())
}

/// Raw multipart POST. The browser sets the boundary header itself.
pub async fn post_form(url: &str, form: web_sys::FormData) -> Result<()> {
    let resp = with_session(Request::post(url))
        .body(JsValue::from(form))
        .send()
        .await?;
    read_body(resp).await.map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_body_is_returned() {
        let body = response_body::<&str>(200, true, Ok("{\"id\":1}".to_string()));
        assert_eq!(body.unwrap(), "{\"id\":1}");
    }

    #[test]
    fn test_unreadable_success_body_is_network_error() {
        let err = response_body(200, true, Err("stream aborted")).unwrap_err();
        assert!(matches!(err, ApiError::Network(ref msg) if msg == "stream aborted"));
    }

    #[test]
    fn test_error_status_keeps_body() {
        let err = response_body::<&str>(400, false, Ok("{\"message\":\"bad\"}".to_string()))
            .unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert!(matches!(err, ApiError::Status { ref body, .. } if body.contains("bad")));
    }

    #[test]
    fn test_error_status_survives_unreadable_body() {
        let err = response_body(503, false, Err("stream aborted")).unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 503, ref body } if body.is_empty()));
    }
}
