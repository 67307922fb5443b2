use super::{PersistenceResult, validate_request};
use crate::StudyRequest;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// A saved request plus the pinned date and seed used to replay it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyProfile {
    pub request: StudyRequest,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub today: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl StudyProfile {
    pub fn new(request: StudyRequest) -> Self {
        Self {
            request,
            today: None,
            seed: None,
        }
    }
}

pub fn save_request_to_json<P: AsRef<Path>>(
    profile: &StudyProfile,
    path: P,
) -> PersistenceResult<()> {
    validate_request(&profile.request)?;
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, profile)?;
    Ok(())
}

pub fn load_request_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<StudyProfile> {
    let file = File::open(path)?;
    let profile: StudyProfile = serde_json::from_reader(file)?;
    validate_request(&profile.request)?;
    Ok(profile)
}
