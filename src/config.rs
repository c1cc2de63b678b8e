//! Application Configuration
//!
//! Defaults derived from `window.location`, optionally overridden by a JSON
//! document embedded in the host page:
//!
//! ```html
//! <script id="rp-config" type="application/json">{"api_base": "/api/v1"}</script>
//! ```

use serde::Deserialize;

/// Id of the embedded config element
pub const CONFIG_ELEMENT_ID: &str = "rp-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base of the reporting API
    pub api_base: String,
    /// Base of the authorization server (API tokens)
    pub uat_base: String,
    /// Public origin shown in configuration snippets
    pub origin: String,
    pub certificate_url: String,
    pub default_avatar: String,
    pub toast_timeout_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: "/api/v1".to_string(),
            uat_base: "/uat".to_string(),
            origin: String::new(),
            certificate_url: "/ui/reportportal-client-v2.jks".to_string(),
            default_avatar: "img/default-avatar.png".to_string(),
            toast_timeout_ms: 4000,
        }
    }
}

impl AppConfig {
    /// Parse an override document. Missing fields keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Build the config from the host page
    pub fn load() -> Self {
        let mut config = embedded_config_text()
            .and_then(|raw| match Self::from_json(&raw) {
                Ok(config) => Some(config),
                Err(e) => {
                    log::error!("[Config] ignoring #{}: {}", CONFIG_ELEMENT_ID, e);
                    None
                }
            })
            .unwrap_or_default();

        if config.origin.is_empty() {
            config.origin = web_sys::window()
                .and_then(|w| w.location().origin().ok())
                .unwrap_or_default();
        }
        log::debug!("[Config] {:?}", config);
        config
    }

    pub fn api_url(&self, path: &str) -> String {
        join_url(&self.api_base, path)
    }

    pub fn uat_url(&self, path: &str) -> String {
        join_url(&self.uat_base, path)
    }

    /// Endpoint clients report to, as shown in snippets
    pub fn public_api_endpoint(&self) -> String {
        join_url(&self.origin, &self.api_base)
    }
}

fn embedded_config_text() -> Option<String> {
    web_sys::window()?
        .document()?
        .get_element_by_id(CONFIG_ELEMENT_ID)?
        .text_content()
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
