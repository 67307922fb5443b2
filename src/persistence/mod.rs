use crate::StudyRequest;
use serde_json::Error as SerdeJsonError;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum PersistenceError {
    Serialization(SerdeJsonError),
    Io(io::Error),
    InvalidData(String),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Serialization(err) => write!(f, "profile is not valid JSON: {err}"),
            PersistenceError::Io(err) => write!(f, "profile file error: {err}"),
            PersistenceError::InvalidData(msg) => write!(f, "invalid profile: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<SerdeJsonError> for PersistenceError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

impl From<io::Error> for PersistenceError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Rejects profiles the planner would refuse to run.
pub fn validate_request(request: &StudyRequest) -> PersistenceResult<()> {
    request
        .parse()
        .map(|_| ())
        .map_err(|err| PersistenceError::InvalidData(err.to_string()))
}

pub mod file;

pub use file::{StudyProfile, load_request_from_json, save_request_to_json};
