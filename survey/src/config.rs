//! Tunable limits applied to incoming submissions.

use serde::{Deserialize, Serialize};

/// Default cap on a respondent's display name, in characters.
pub const NAME_MAX_LENGTH: usize = 50;

/// Default cap on the text of an open answer, in characters.
pub const OPEN_ANSWER_MAX_LENGTH: usize = 200;

/// Length caps for submissions. Lengths are counted in characters after trimming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubmissionLimits {
    pub max_name_len: usize,
    pub max_open_answer_len: usize,
}

impl SubmissionLimits {
    /// Parse limits from JSON; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for SubmissionLimits {
    fn default() -> Self {
        Self {
            max_name_len: NAME_MAX_LENGTH,
            max_open_answer_len: OPEN_ANSWER_MAX_LENGTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let limits = SubmissionLimits::from_json(r#"{"maxNameLen": 20}"#).unwrap();

        assert_eq!(limits.max_name_len, 20);
        assert_eq!(limits.max_open_answer_len, OPEN_ANSWER_MAX_LENGTH);
        assert_eq!(SubmissionLimits::from_json("{}").unwrap(), SubmissionLimits::default());
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(SubmissionLimits::from_json(r#"{"maxNameLen": -1}"#).is_err());
    }
}
