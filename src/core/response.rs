//! Response bodies shared by the server and the submission client

use crate::core::draft::StoredConfiguration;
use crate::core::validation::FieldErrors;
use serde::{Deserialize, Serialize};

/// Confirmation returned with a stored record
pub const SAVED_MESSAGE: &str = "Configuration saved successfully";

/// Body of a successful `POST /configurations` (200)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionAccepted {
    pub message: String,
    pub new_config: StoredConfiguration,
}

impl SubmissionAccepted {
    pub fn new(record: StoredConfiguration) -> Self {
        Self {
            message: SAVED_MESSAGE.to_string(),
            new_config: record,
        }
    }
}

/// Body of a rejected `POST /configurations` (422)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRejected {
    pub errors: FieldErrors,
}
