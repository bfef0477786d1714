//! Storage boundary for published surveys and submitted answers.

use survey_types::{
    AnswerRows, CreatorId, NewAnswer, PublishedSurvey, RespondentId, SurveyDraft, SurveyId,
    SurveyRecord,
};

/// Error type for storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Lock on {0} was poisoned")]
    LockPoisoned(&'static str),

    #[error("Survey {0} does not exist")]
    MissingSurvey(SurveyId),

    /// A failure inside a foreign storage engine.
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Row-oriented storage for surveys, respondents and answers.
///
/// `insert_survey` and `insert_submission` are each one atomic unit: either
/// every row they describe becomes visible, or none does.
pub trait SurveyStore: Send + Sync {
    /// Persist a validated draft: the survey row with an answer count of 0, one
    /// row per question and one per answer option of each closed question.
    fn insert_survey(
        &self,
        creator: CreatorId,
        draft: &SurveyDraft,
    ) -> Result<SurveyId, StoreError>;

    /// Get every survey, ordered by id.
    fn surveys(&self) -> Result<Vec<SurveyRecord>, StoreError>;

    /// Get the surveys created by one creator, ordered by id.
    fn surveys_by(&self, creator: CreatorId) -> Result<Vec<SurveyRecord>, StoreError> {
        let mut surveys = self.surveys()?;
        surveys.retain(|survey| survey.creator_id == creator);
        Ok(surveys)
    }

    /// Get a survey with its questions and options, each ordered by position.
    fn survey(&self, id: SurveyId) -> Result<Option<PublishedSurvey>, StoreError>;

    /// Persist one submission: the respondent row, all its answer rows and the
    /// increment of the survey's answer count.
    fn insert_submission(
        &self,
        survey: SurveyId,
        name: &str,
        answers: Vec<NewAnswer>,
    ) -> Result<RespondentId, StoreError>;

    /// Get the respondents and flat answer rows of a survey.
    fn answer_rows(&self, survey: SurveyId) -> Result<AnswerRows, StoreError>;
}
