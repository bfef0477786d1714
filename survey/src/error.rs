use survey_types::{RespondentId, SurveyId};

use crate::{AnswerRejection, StoreError, SurveyViolations};

/// A referenced survey or respondent does not exist (or is not visible to the caller).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotFound {
    #[error("Survey {0} not found")]
    Survey(SurveyId),

    #[error("Respondent {0} not found")]
    Respondent(RespondentId),
}

/// Input the caller can correct.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid survey: {0}")]
    Survey(#[from] SurveyViolations),

    #[error("Invalid answers: {0}")]
    Answer(#[from] AnswerRejection),
}

/// Error type for [`SurveyService`](crate::SurveyService) operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFound),

    /// The storage backend failed; the request should not be retried blindly.
    #[error("Storage failure: {0}")]
    Storage(#[source] StoreError),
}

impl ServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::MissingSurvey(id) => Self::NotFound(NotFound::Survey(id)),
            other => Self::Storage(other),
        }
    }
}

impl From<SurveyViolations> for ServiceError {
    fn from(err: SurveyViolations) -> Self {
        Self::Validation(err.into())
    }
}

impl From<AnswerRejection> for ServiceError {
    fn from(err: AnswerRejection) -> Self {
        Self::Validation(err.into())
    }
}
