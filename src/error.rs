/// Failures the controller can run into. None of them is fatal: callers log
/// them and keep the page interactive.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerError {
    /// The request never produced a response.
    Network(String),
    /// The server answered with a non-success status.
    Status { url: String, status: u16 },
    /// The modal endpoint returned no markup.
    EmptyFragment,
    /// The inserted fragment did not contain the expected modal root.
    MissingModal(String),
    /// The media element refused to start or reported an error.
    Playback(String),
    /// The page did not have the expected structure.
    Dom(String),
    Config(String),
}

impl PlayerError {
    pub fn dom(msg: impl Into<String>) -> Self {
        Self::Dom(msg.into())
    }

    pub fn playback(msg: impl Into<String>) -> Self {
        Self::Playback(msg.into())
    }

    /// Translate a `MediaError.code` reported by the audio element.
    pub fn from_media_code(code: u16) -> Self {
        let msg = match code {
            1 => "playback was aborted before the stream loaded",
            2 => "network error while loading this track",
            3 => "audio playback failed due to a decode error",
            4 => "no supported audio source was found",
            _ => "unable to load this audio source",
        };
        Self::playback(msg)
    }
}

impl std::fmt::Display for PlayerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "network error: {msg}"),
            Self::Status { url, status } => write!(f, "{url} responded with HTTP {status}"),
            Self::EmptyFragment => write!(f, "modal fragment was empty"),
            Self::MissingModal(id) => write!(f, "modal element #{id} not found in fragment"),
            Self::Playback(msg) => write!(f, "playback failed: {msg}"),
            Self::Dom(msg) => write!(f, "unexpected page structure: {msg}"),
            Self::Config(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for PlayerError {}

impl From<reqwest::Error> for PlayerError {
    fn from(err: reqwest::Error) -> Self {
        match (err.status(), err.url()) {
            (Some(status), Some(url)) => Self::Status {
                url: url.to_string(),
                status: status.as_u16(),
            },
            _ => Self::Network(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for PlayerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::PlayerError;

    #[test]
    fn display_names_the_failing_piece() {
        let err = PlayerError::Status {
            url: "https://music.test/tracks/record/42".to_string(),
            status: 500,
        };
        assert_eq!(
            err.to_string(),
            "https://music.test/tracks/record/42 responded with HTTP 500"
        );
        assert_eq!(
            PlayerError::MissingModal("addToPlaylistModal".to_string()).to_string(),
            "modal element #addToPlaylistModal not found in fragment"
        );
    }

    #[test]
    fn media_codes_map_to_readable_messages() {
        assert_eq!(
            PlayerError::from_media_code(3).to_string(),
            "playback failed: audio playback failed due to a decode error"
        );
        assert_eq!(
            PlayerError::from_media_code(0),
            PlayerError::playback("unable to load this audio source")
        );
    }

    #[test]
    fn json_errors_become_config_errors() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        assert!(matches!(PlayerError::from(err), PlayerError::Config(_)));
    }
}
