//! Frontend Models
//!
//! Data structures matching API payloads.

use reactive_stores::Store;
use serde::{Deserialize, Serialize};

/// Current user as returned by `GET {api}/user`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Store)]
pub struct UserProfile {
    #[serde(alias = "userId")]
    pub login: String,
    #[serde(default, alias = "fullName")]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, alias = "defaultProject")]
    pub default_project: Option<String>,
    #[serde(default, alias = "photoLoaded")]
    pub photo_loaded: bool,
    #[serde(default, alias = "accountType")]
    pub account_type: Option<String>,
}

impl UserProfile {
    /// Only internal accounts manage their own password and info
    pub fn is_internal(&self) -> bool {
        self.account_type
            .as_deref()
            .map_or(true, |t| t.eq_ignore_ascii_case("internal"))
    }

    pub fn project_or_default(&self) -> &str {
        self.default_project.as_deref().unwrap_or("default_personal")
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateUserInfo {
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangePassword {
    #[serde(rename = "oldPassword")]
    pub old_password: String,
    #[serde(rename = "newPassword")]
    pub new_password: String,
}

/// Launch row shown by the paginated list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Launch {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub start_time: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
}
