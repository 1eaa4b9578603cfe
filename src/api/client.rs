use crate::api::models::TrackId;
use crate::config::{Endpoints, PlayerConfig};
use crate::error::PlayerError;
use once_cell::sync::Lazy;

static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

/// Talks to the streaming site's track and playlist endpoints.
#[derive(Debug, Clone)]
pub struct TrackServiceClient {
    origin: String,
    endpoints: Endpoints,
}

impl TrackServiceClient {
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            origin: config.origin().to_string(),
            endpoints: config.endpoints.clone(),
        }
    }

    fn build_url(&self, path: &str, track: Option<&TrackId>) -> String {
        let mut url = format!("{}/{}", self.origin, path.trim_matches('/'));
        if let Some(track) = track {
            url.push('/');
            url.push_str(&urlencoding::encode(track.as_str()));
        }
        url
    }

    pub fn stream_url(&self, track: &TrackId) -> String {
        self.build_url(&self.endpoints.stream, Some(track))
    }

    pub fn record_url(&self, track: &TrackId) -> String {
        self.build_url(&self.endpoints.record, Some(track))
    }

    pub fn playlist_modal_url(&self, track: &TrackId) -> String {
        format!(
            "{}?trackId={}",
            self.build_url(&self.endpoints.playlist_modal, None),
            urlencoding::encode(track.as_str())
        )
    }

    pub fn login_url(&self) -> String {
        self.build_url(&self.endpoints.login, None)
    }

    /// Report a play. No body is sent and the response body is ignored.
    pub async fn record_play(&self, track: &TrackId) -> Result<(), PlayerError> {
        let url = self.record_url(track);
        HTTP_CLIENT.post(&url).send().await?.error_for_status()?;
        Ok(())
    }

    /// Fetch the server-rendered playlist picker for `track`.
    pub async fn fetch_playlist_modal(&self, track: &TrackId) -> Result<String, PlayerError> {
        let url = self.playlist_modal_url(track);
        let response = HTTP_CLIENT.get(&url).send().await?.error_for_status()?;
        let html = response.text().await?;
        if html.trim().is_empty() {
            return Err(PlayerError::EmptyFragment);
        }
        Ok(html)
    }
}
