use serde::{Deserialize, Serialize};

/// Opaque track identifier as rendered in `data-track-id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Attribute values are trimmed; a blank attribute is not a track.
    pub fn from_attribute(raw: Option<String>) -> Option<Self> {
        let raw = raw?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compare against a raw attribute value the way the page markup writes it.
    pub fn matches(&self, raw: &str) -> bool {
        self.0 == raw.trim()
    }
}

impl std::fmt::Display for TrackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TrackId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// What the enclosing track card says about the track being played.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackCard {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
}

impl TrackCard {
    pub fn new(title: Option<String>, artist: Option<String>) -> Self {
        let clean = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        Self {
            title: clean(title),
            artist: clean(artist),
        }
    }

    /// "Title - Artist" style label used in logs; falls back to the id.
    pub fn label(&self, track: &TrackId) -> String {
        match (&self.title, &self.artist) {
            (Some(title), Some(artist)) => format!("{title} - {artist}"),
            (Some(title), None) => title.clone(),
            (None, Some(artist)) => format!("track {track} by {artist}"),
            (None, None) => format!("track {track}"),
        }
    }
}
