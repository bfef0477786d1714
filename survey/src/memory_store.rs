//! `MemoryStore` - an in-memory [`SurveyStore`] for tests and embedding.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use survey_types::{
    AnswerId, AnswerRows, CreatorId, NewAnswer, OptionId, PublishedOption, PublishedQuestion,
    Positioned, PublishedSurvey, QuestionId, Respondent, RespondentId, SubmittedAnswer,
    SurveyDraft, SurveyId, SurveyRecord,
};

use crate::{StoreError, SurveyStore};

/// Id sequences, one per table. Ids start at 1.
#[derive(Debug, Default)]
struct Sequences {
    survey: u64,
    question: u64,
    option: u64,
    respondent: u64,
    answer: u64,
}

fn next(sequence: &mut u64) -> u64 {
    *sequence += 1;
    *sequence
}

#[derive(Debug, Default)]
struct Tables {
    surveys: BTreeMap<SurveyId, SurveyRecord>,
    /// Question rows; their `options` are kept in `options` and joined on read.
    questions: BTreeMap<QuestionId, PublishedQuestion>,
    options: BTreeMap<OptionId, PublishedOption>,
    respondents: BTreeMap<RespondentId, Respondent>,
    answers: BTreeMap<AnswerId, SubmittedAnswer>,
    sequences: Sequences,
}

/// Survey storage held in memory.
///
/// All tables sit behind one lock, so every insert unit is applied under a
/// single write guard and readers never see half of one.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, StoreError> {
        self.tables
            .read()
            .map_err(|_| StoreError::LockPoisoned("survey tables"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, StoreError> {
        self.tables
            .write()
            .map_err(|_| StoreError::LockPoisoned("survey tables"))
    }
}

impl SurveyStore for MemoryStore {
    fn insert_survey(
        &self,
        creator: CreatorId,
        draft: &SurveyDraft,
    ) -> Result<SurveyId, StoreError> {
        let mut tables = self.write()?;
        let tables = &mut *tables;

        let survey_id = SurveyId(next(&mut tables.sequences.survey));
        tables.surveys.insert(
            survey_id,
            SurveyRecord {
                id: survey_id,
                title: draft.title().to_string(),
                creator_id: creator,
                answer_count: 0,
            },
        );

        for question in draft.questions() {
            let question_id = QuestionId(next(&mut tables.sequences.question));
            tables.questions.insert(
                question_id,
                PublishedQuestion {
                    id: question_id,
                    survey_id,
                    title: question.title().to_string(),
                    open: question.is_open(),
                    optional: question.is_optional(),
                    min_answers: question.min_answers(),
                    max_answers: question.max_answers(),
                    position: question.position(),
                    options: Vec::new(),
                },
            );

            if question.is_open() {
                continue;
            }
            for option in question.options() {
                let option_id = OptionId(next(&mut tables.sequences.option));
                tables.options.insert(
                    option_id,
                    PublishedOption {
                        id: option_id,
                        question_id,
                        text: option.text.clone(),
                        position: option.position,
                    },
                );
            }
        }

        Ok(survey_id)
    }

    fn surveys(&self) -> Result<Vec<SurveyRecord>, StoreError> {
        Ok(self.read()?.surveys.values().cloned().collect())
    }

    fn survey(&self, id: SurveyId) -> Result<Option<PublishedSurvey>, StoreError> {
        let tables = self.read()?;
        let Some(record) = tables.surveys.get(&id) else {
            return Ok(None);
        };

        let mut questions: Vec<PublishedQuestion> = tables
            .questions
            .values()
            .filter(|q| q.survey_id == id)
            .map(|row| {
                let mut options: Vec<PublishedOption> = tables
                    .options
                    .values()
                    .filter(|o| o.question_id == row.id)
                    .cloned()
                    .collect();
                options.sort_by_key(|o| o.position);
                PublishedQuestion {
                    options,
                    ..row.clone()
                }
            })
            .collect();
        questions.sort_by_key(|q| q.position);

        Ok(Some(PublishedSurvey {
            record: record.clone(),
            questions,
        }))
    }

    fn insert_submission(
        &self,
        survey: SurveyId,
        name: &str,
        answers: Vec<NewAnswer>,
    ) -> Result<RespondentId, StoreError> {
        let mut tables = self.write()?;
        let tables = &mut *tables;

        let record = tables
            .surveys
            .get_mut(&survey)
            .ok_or(StoreError::MissingSurvey(survey))?;
        record.answer_count += 1;

        let respondent_id = RespondentId(next(&mut tables.sequences.respondent));
        tables.respondents.insert(
            respondent_id,
            Respondent {
                id: respondent_id,
                survey_id: survey,
                name: name.to_string(),
            },
        );

        for answer in answers {
            let answer_id = AnswerId(next(&mut tables.sequences.answer));
            tables.answers.insert(
                answer_id,
                SubmittedAnswer {
                    id: answer_id,
                    survey_id: survey,
                    question_id: answer.question_id,
                    respondent_id,
                    value: answer.value,
                },
            );
        }

        Ok(respondent_id)
    }

    fn answer_rows(&self, survey: SurveyId) -> Result<AnswerRows, StoreError> {
        let tables = self.read()?;
        if !tables.surveys.contains_key(&survey) {
            return Err(StoreError::MissingSurvey(survey));
        }

        Ok(AnswerRows {
            respondents: tables
                .respondents
                .values()
                .filter(|r| r.survey_id == survey)
                .cloned()
                .collect(),
            answers: tables
                .answers
                .values()
                .filter(|a| a.survey_id == survey)
                .cloned()
                .collect(),
        })
    }
}
