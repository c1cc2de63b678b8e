//! User Endpoints
//!
//! Profile, API token and photo calls.

use super::{delete, get_json, post_empty, post_form, post_json, put_json};
use crate::config::AppConfig;
use crate::error::{ApiError, Result};
use crate::models::{ChangePassword, TokenResponse, UpdateUserInfo, UserProfile};

const TOKEN_PATH: &str = "sso/me/apitoken";
const PHOTO_PATH: &str = "data/photo";

pub async fn fetch_current_user(config: &AppConfig) -> Result<UserProfile> {
    get_json(&config.api_url("user")).await
}

pub async fn get_api_token(config: &AppConfig) -> Result<String> {
    let token: TokenResponse = get_json(&config.uat_url(TOKEN_PATH)).await?;
    Ok(token.access_token)
}

/// Invalidate the current token and issue a new one
pub async fn generate_api_token(config: &AppConfig) -> Result<String> {
    let token: TokenResponse = post_empty(&config.uat_url(TOKEN_PATH)).await?;
    Ok(token.access_token)
}

/// Upload a photo as multipart field `file`
pub async fn upload_photo(config: &AppConfig, file: &web_sys::File) -> Result<()> {
    let form = web_sys::FormData::new().map_err(ApiError::from_js)?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(ApiError::from_js)?;
    post_form(&config.api_url(PHOTO_PATH), form).await
}

pub async fn delete_photo(config: &AppConfig) -> Result<()> {
    delete(&config.api_url(PHOTO_PATH)).await
}

pub async fn update_user_info(config: &AppConfig, login: &str, info: &UpdateUserInfo) -> Result<()> {
    put_json(&config.api_url(&format!("user/{}", login)), info).await
}

pub async fn change_password(config: &AppConfig, body: &ChangePassword) -> Result<()> {
    post_json(&config.api_url("user/password/change"), body).await
}

/// Avatar to display. Uploaded photos are versioned so the browser
/// refetches after a change.
pub fn avatar_src(config: &AppConfig, profile: &UserProfile, version: u32) -> String {
    if !profile.photo_loaded {
        return config.default_avatar.clone();
    }
    let base = profile
        .image
        .clone()
        .unwrap_or_else(|| config.api_url(PHOTO_PATH));
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{}{}v={}", base, separator, version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avatar_default_without_photo() {
        let config = AppConfig::default();
        let profile = UserProfile { login: "jdoe".into(), ..Default::default() };
        assert_eq!(avatar_src(&config, &profile, 3), "img/default-avatar.png");
    }

    #[test]
    fn test_avatar_versioned_photo() {
        let config = AppConfig::default();
        let mut profile = UserProfile { login: "jdoe".into(), photo_loaded: true, ..Default::default() };
        assert_eq!(avatar_src(&config, &profile, 2), "/api/v1/data/photo?v=2");

        profile.image = Some("/api/v1/data/userphoto?id=jdoe".into());
        assert_eq!(avatar_src(&config, &profile, 5), "/api/v1/data/userphoto?id=jdoe&v=5");
    }
}
