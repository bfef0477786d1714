//! # survey
//!
//! Author surveys, publish them, collect anonymous answers and browse them one
//! respondent at a time.
//!
//! ## Usage
//!
//! ```rust
//! use survey::{
//!     CreatorId, Direction, MemoryStore, NavigationRequest, Question, Submission, SurveyDraft,
//!     SurveyService,
//! };
//!
//! let service = SurveyService::new(MemoryStore::new());
//! let owner = CreatorId(1);
//!
//! let draft = SurveyDraft::empty()
//!     .with_title("Team lunch")
//!     .with_question(Question::closed("Where?", ["Pizzeria", "Sushi bar"]).mandatory())
//!     .with_question(Question::open("Anything else?"));
//! let survey_id = service.publish(owner, &draft)?;
//!
//! let survey = service.survey(survey_id)?;
//! let place = &survey.questions[0];
//! let submission = Submission::new("Ada").with_choices(place.id, [place.options[1].id]);
//! let ada = service.submit(survey_id, &submission)?;
//!
//! let sheet = service.answers(owner, survey_id)?;
//! assert_eq!(sheet.first().map(|r| r.id), Some(ada));
//!
//! let request = NavigationRequest {
//!     current_respondent_id: ada,
//!     direction: Direction::Next,
//! };
//! assert_eq!(service.navigate(owner, survey_id, &request)?.new_respondent_id, ada);
//! # Ok::<(), survey::ServiceError>(())
//! ```
//!
//! ## Parts
//!
//! - [`validate_survey`] - authoring rules checked before a draft is published
//! - [`validate_submission`] - a respondent's answers checked against the published questions
//! - [`AnswerSheet`] - flat answer rows grouped per respondent, with wrap-around navigation
//! - [`SurveyStore`] - the storage boundary; [`MemoryStore`] keeps everything in memory
//! - [`SurveyService`] - the operations above wired together, with logging through `tracing`

// Re-export all types from survey-types
pub use survey_types::*;

mod config;
pub use config::{NAME_MAX_LENGTH, OPEN_ANSWER_MAX_LENGTH, SubmissionLimits};

mod survey_validator;
pub use survey_validator::{SurveyViolation, SurveyViolations, validate_question, validate_survey};

mod answer_validator;
pub use answer_validator::{AnswerRejection, check_answer, validate_submission};

mod aggregate;
pub use aggregate::{
    AnswerEntry, AnswerListing, AnswerSheet, Direction, NavigationRequest, NavigationResponse,
    RespondentCursor, RespondentEntry, RespondentView,
};

mod store;
pub use store::{StoreError, SurveyStore};

mod memory_store;
pub use memory_store::MemoryStore;

mod error;
pub use error::{NotFound, ServiceError, ValidationError};

mod service;
pub use service::SurveyService;
