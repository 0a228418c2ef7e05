//! Sound cues played around a roll
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    Deploy,
    Success,
}

impl Cue {
    /// Id of the page's audio element for this cue.
    #[must_use]
    pub const fn element_id(self) -> &'static str {
        match self {
            Self::Deploy => "deploy-sound",
            Self::Success => "success-sound",
        }
    }

    /// Bundled asset path for this cue.
    #[must_use]
    pub const fn asset(self) -> &'static str {
        match self {
            Self::Deploy => "static/assets/audio/deploy.mp3",
            Self::Success => "static/assets/audio/success.mp3",
        }
    }
}

/// A cue could not start. Audio is decorative, so callers log and move on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AudioError {
    #[error("No audio element for {0:?}")]
    Unavailable(Cue),
    #[error("Playback of {cue:?} was rejected: {message}")]
    Rejected { cue: Cue, message: String },
}
