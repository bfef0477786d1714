//! Core types for the survey crate.
//!
//! This crate provides the foundational types for authoring and answering surveys:
//! - `SurveyDraft`, `Question` and `AnswerOption` - The authoring model
//! - `reorder` - Dense zero-based positions for questions and answer options
//! - `PublishedSurvey`, `Respondent` and `SubmittedAnswer` - Persisted records and rows
//! - `Submission` and `Response` - One respondent's candidate answer set

mod ids;
pub use ids::{AnswerId, CreatorId, OptionId, QuestionId, RespondentId, SurveyId};

pub mod reorder;
pub use reorder::Positioned;

mod question;
pub use question::{AnswerOption, Question};

mod survey_draft;
pub use survey_draft::SurveyDraft;

mod records;
pub use records::{
    AnswerRows, AnswerValue, PublishedOption, PublishedQuestion, PublishedSurvey, Respondent,
    SubmittedAnswer, SurveyRecord, SurveySummary,
};

mod submission;
pub use submission::{NewAnswer, QuestionResponse, Response, Submission};

mod error;
pub use error::{DraftError, QuestionError};
