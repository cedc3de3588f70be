//! The [`Track`] entity served by the HTTP surface.

use serde::{Deserialize, Serialize};

/// A single catalogue track as held in the track cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Provider identifier, used as the cache key and in `/tracks/:id`.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(default)]
    pub duration_ms: u64,
    /// 0–100 popularity score, when the provider reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

impl Track {
    /// Creates a track with only the required fields set.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            artists: Vec::new(),
            album: None,
            duration_ms: 0,
            popularity: None,
            uri: None,
        }
    }

    pub fn with_artists<S: Into<String>>(mut self, artists: impl IntoIterator<Item = S>) -> Self {
        self.artists = artists.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }
}
