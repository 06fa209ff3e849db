use thiserror::Error;

/// The only failure the refresh pipeline models. Returned as a value by the feed
/// client; never fatal to the application.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    #[error("feed transport error: {0}")]
    Transport(String),
    #[error("feed responded with HTTP {code}")]
    Status { code: u16 },
    #[error("feed payload could not be parsed: {0}")]
    Parse(String),
}

impl FetchFailure {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    pub fn parse(err: impl std::fmt::Display) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<serde_json::Error> for FetchFailure {
    fn from(value: serde_json::Error) -> Self {
        Self::parse(value)
    }
}
