use std::{fmt, io};

pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Debug)]
pub enum SimError {
    /// Capacity below one, an unknown policy name, or nothing to simulate.
    InvalidConfiguration(String),
    /// An access token that does not parse as a key. `position` is 1-based.
    MalformedAccess { position: usize, token: String },
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidConfiguration(msg) => write!(f, "invalid configuration: {msg}"),
            SimError::MalformedAccess { position, token } => {
                write!(f, "malformed access #{position}: {token:?}")
            }
            SimError::Io(err) => write!(f, "io error: {err}"),
            SimError::Json(err) => write!(f, "json error: {err}"),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Io(err) => Some(err),
            SimError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for SimError {
    fn from(err: io::Error) -> Self {
        SimError::Io(err)
    }
}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        SimError::Json(err)
    }
}
