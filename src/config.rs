//! Runtime configuration for the page controller.
//! Every field has a default matching the stock page templates, so a page only
//! needs to embed the values it changes.

use crate::error::PlayerError;
use serde::{Deserialize, Serialize};

/// Id of the optional `<script type="application/json">` element holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "trackdeck-config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Origin requests are resolved against. Filled from `window.location` when absent.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub endpoints: Endpoints,
    #[serde(default)]
    pub selectors: Selectors,
    #[serde(default)]
    pub icons: IconClasses,
    #[serde(default = "default_modal_element_id")]
    pub modal_element_id: String,
    /// Overrides the page-level `isAuthenticated` flag when set.
    #[serde(default)]
    pub authenticated: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub stream: String,
    pub record: String,
    pub playlist_modal: String,
    pub login: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub play_button: String,
    pub like_button: String,
    pub add_to_playlist_button: String,
    pub track_card: String,
    pub track_title: String,
    pub track_artist: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconClasses {
    pub play: String,
    pub pause: String,
    pub liked: String,
    pub not_liked: String,
    pub accent_color: String,
}

fn default_modal_element_id() -> String {
    "addToPlaylistModal".to_string()
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            endpoints: Endpoints::default(),
            selectors: Selectors::default(),
            icons: IconClasses::default(),
            modal_element_id: default_modal_element_id(),
            authenticated: None,
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            stream: "/tracks/stream".to_string(),
            record: "/tracks/record".to_string(),
            playlist_modal: "/playlists/add-to-playlist-modal".to_string(),
            login: "/account/login".to_string(),
        }
    }
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            play_button: ".play-button".to_string(),
            like_button: ".like-button".to_string(),
            add_to_playlist_button: ".add-to-playlist-btn".to_string(),
            track_card: ".track-card".to_string(),
            track_title: ".track-title".to_string(),
            track_artist: ".track-artist".to_string(),
            icon: "i".to_string(),
        }
    }
}

impl Default for IconClasses {
    fn default() -> Self {
        Self {
            play: "fas fa-play".to_string(),
            pause: "fas fa-pause".to_string(),
            liked: "fas".to_string(),
            not_liked: "far".to_string(),
            accent_color: "var(--accent)".to_string(),
        }
    }
}

impl PlayerConfig {
    /// Parse overrides from the JSON embedded in the page. Blank input yields defaults.
    pub fn from_json(raw: &str) -> Result<Self, PlayerError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), PlayerError> {
        let required = [
            ("endpoints.stream", &self.endpoints.stream),
            ("endpoints.record", &self.endpoints.record),
            ("endpoints.playlist_modal", &self.endpoints.playlist_modal),
            ("endpoints.login", &self.endpoints.login),
            ("selectors.play_button", &self.selectors.play_button),
            ("selectors.icon", &self.selectors.icon),
            ("modal_element_id", &self.modal_element_id),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(PlayerError::Config(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }

    /// Origin with any trailing slash removed; empty when unknown.
    pub fn origin(&self) -> &str {
        self.base_url
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
            .unwrap_or("")
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        if self.base_url.is_none() {
            self.base_url = Some(base_url.into());
        }
        self
    }
}

/// Read the embedded overrides and the page's auth flag.
///
/// The flag is looked up as a `window` property. A top-level `let isAuthenticated`
/// in a classic script is not one and reads as unset, so pages either assign
/// `window.isAuthenticated`, embed `"authenticated"` in the config element, or
/// call the exported `setAuthenticated` once they know.
#[cfg(target_arch = "wasm32")]
pub fn load_from_page() -> PlayerConfig {
    use crate::diagnostics::log_error;
    use wasm_bindgen::JsValue;

    let Some(window) = web_sys::window() else {
        return PlayerConfig::default();
    };

    let raw = window
        .document()
        .and_then(|doc| doc.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content())
        .unwrap_or_default();
    let mut config = PlayerConfig::from_json(&raw).unwrap_or_else(|err| {
        log_error("config", &format!("{err}; falling back to defaults"));
        PlayerConfig::default()
    });

    if let Ok(origin) = window.location().origin() {
        config = config.with_base_url(origin);
    }

    if config.authenticated.is_none() {
        let flag = js_sys::Reflect::get(&window, &JsValue::from_str("isAuthenticated"))
            .ok()
            .and_then(|value| value.as_bool());
        config.authenticated = flag;
    }

    config
}

#[cfg(test)]
mod tests;
