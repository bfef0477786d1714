//! Request-level operations: validation, storage and aggregation wired together.

use survey_types::{
    CreatorId, PublishedSurvey, RespondentId, Submission, SurveyDraft, SurveyId, SurveySummary,
};

use crate::{
    AnswerSheet, NavigationRequest, NavigationResponse, NotFound, ServiceError, SubmissionLimits,
    SurveyStore, validate_submission, validate_survey,
};

/// Survey operations on top of a [`SurveyStore`].
///
/// Each call is independent; the service holds no state besides the store and
/// its limits.
#[derive(Debug, Default)]
pub struct SurveyService<S> {
    store: S,
    limits: SubmissionLimits,
}

impl<S: SurveyStore> SurveyService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            limits: SubmissionLimits::default(),
        }
    }

    /// Replace the default submission limits.
    pub fn with_limits(mut self, limits: SubmissionLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> &SubmissionLimits {
        &self.limits
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate a draft and publish it for `creator`.
    ///
    /// Nothing is stored if the draft breaks any rule.
    pub fn publish(
        &self,
        creator: CreatorId,
        draft: &SurveyDraft,
    ) -> Result<SurveyId, ServiceError> {
        if let Err(violations) = validate_survey(draft) {
            tracing::debug!(
                %creator,
                violations = violations.len(),
                "rejected survey draft: {violations}"
            );
            return Err(violations.into());
        }

        let id = self.store.insert_survey(creator, draft)?;
        tracing::info!(
            survey = %id,
            %creator,
            questions = draft.len(),
            "published survey '{}'",
            draft.title()
        );
        Ok(id)
    }

    /// Summaries of every published survey.
    pub fn catalogue(&self) -> Result<Vec<SurveySummary>, ServiceError> {
        Ok(self.store.surveys()?.iter().map(SurveySummary::from).collect())
    }

    /// Summaries of the surveys published by `creator`.
    pub fn surveys_of(&self, creator: CreatorId) -> Result<Vec<SurveySummary>, ServiceError> {
        Ok(self
            .store
            .surveys_by(creator)?
            .iter()
            .map(SurveySummary::from)
            .collect())
    }

    /// Fetch a published survey with its questions and options.
    pub fn survey(&self, id: SurveyId) -> Result<PublishedSurvey, ServiceError> {
        self.store
            .survey(id)?
            .ok_or_else(|| NotFound::Survey(id).into())
    }

    /// Validate and store one respondent's answers.
    ///
    /// The respondent, its answer rows and the survey's answer count are
    /// written together. Empty answers to optional questions are not stored.
    pub fn submit(
        &self,
        survey_id: SurveyId,
        submission: &Submission,
    ) -> Result<RespondentId, ServiceError> {
        let survey = self.survey(survey_id)?;

        if let Err(rejection) = validate_submission(&survey.questions, submission, &self.limits) {
            tracing::debug!(survey = %survey_id, "rejected submission: {rejection}");
            return Err(rejection.into());
        }

        let rows = submission.to_rows();
        let row_count = rows.len();
        let respondent = self
            .store
            .insert_submission(survey_id, submission.name.trim(), rows)?;
        tracing::info!(
            survey = %survey_id,
            %respondent,
            rows = row_count,
            "stored submission"
        );
        Ok(respondent)
    }

    /// All answers of a survey, grouped by respondent. Only the survey's
    /// creator may read them.
    pub fn answers(
        &self,
        creator: CreatorId,
        survey_id: SurveyId,
    ) -> Result<AnswerSheet, ServiceError> {
        self.owned_survey(creator, survey_id)?;
        let rows = self.store.answer_rows(survey_id)?;
        Ok(AnswerSheet::from_rows(rows))
    }

    /// Step to the next or previous respondent of a survey, wrapping around.
    pub fn navigate(
        &self,
        creator: CreatorId,
        survey_id: SurveyId,
        request: &NavigationRequest,
    ) -> Result<NavigationResponse, ServiceError> {
        let sheet = self.answers(creator, survey_id)?;
        let response = sheet
            .navigate(request)
            .ok_or(NotFound::Respondent(request.current_respondent_id))?;
        tracing::debug!(
            survey = %survey_id,
            from = %request.current_respondent_id,
            to = %response.new_respondent_id,
            direction = ?request.direction,
            "navigated answers"
        );
        Ok(response)
    }

    /// Fetch a survey, hiding it from anyone but its creator.
    fn owned_survey(
        &self,
        creator: CreatorId,
        survey_id: SurveyId,
    ) -> Result<PublishedSurvey, ServiceError> {
        let survey = self.survey(survey_id)?;
        if survey.record.creator_id != creator {
            tracing::debug!(survey = %survey_id, %creator, "answers requested by non-owner");
            return Err(NotFound::Survey(survey_id).into());
        }
        Ok(survey)
    }
}
