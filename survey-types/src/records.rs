use serde::{Deserialize, Serialize};

use crate::{AnswerId, CreatorId, OptionId, QuestionId, RespondentId, SurveyId};

/// The stored header of a published survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyRecord {
    pub id: SurveyId,
    pub title: String,
    pub creator_id: CreatorId,

    /// Number of respondents; only ever incremented.
    pub answer_count: u64,
}

/// Catalogue entry for a survey: `{id, title, answers}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveySummary {
    pub id: SurveyId,
    pub title: String,
    pub answers: u64,
}

impl From<&SurveyRecord> for SurveySummary {
    fn from(record: &SurveyRecord) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            answers: record.answer_count,
        }
    }
}

/// A stored answer option of a closed question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedOption {
    pub id: OptionId,
    pub question_id: QuestionId,
    pub text: String,
    pub position: u32,
}

/// A stored question, with its options ordered by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedQuestion {
    pub id: QuestionId,
    pub survey_id: SurveyId,
    pub title: String,
    pub open: bool,
    pub optional: bool,
    pub min_answers: u32,
    pub max_answers: u32,
    pub position: u32,

    /// Empty for open questions.
    pub options: Vec<PublishedOption>,
}

impl PublishedQuestion {
    /// Check if `option` is one of this question's answer options.
    pub fn has_option(&self, option: OptionId) -> bool {
        self.options.iter().any(|o| o.id == option)
    }

    pub fn option(&self, option: OptionId) -> Option<&PublishedOption> {
        self.options.iter().find(|o| o.id == option)
    }
}

/// A published survey together with its questions, ordered by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedSurvey {
    #[serde(flatten)]
    pub record: SurveyRecord,
    pub questions: Vec<PublishedQuestion>,
}

impl PublishedSurvey {
    pub fn id(&self) -> SurveyId {
        self.record.id
    }

    pub fn title(&self) -> &str {
        &self.record.title
    }

    pub fn question(&self, id: QuestionId) -> Option<&PublishedQuestion> {
        self.questions.iter().find(|q| q.id == id)
    }
}

/// One anonymous submission identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Respondent {
    pub id: RespondentId,
    pub survey_id: SurveyId,
    pub name: String,
}

/// The stored value of one answer row.
///
/// Closed questions store one row per selected option; open questions store
/// their text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Choice(OptionId),
    Text(String),
}

impl AnswerValue {
    pub fn as_choice(&self) -> Option<OptionId> {
        match self {
            Self::Choice(option) => Some(*option),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Choice(_) => None,
        }
    }
}

/// One stored answer row: a (respondent, question, value) fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedAnswer {
    pub id: AnswerId,
    pub survey_id: SurveyId,
    pub question_id: QuestionId,
    pub respondent_id: RespondentId,
    pub value: AnswerValue,
}

/// All stored respondents and answer rows of one survey, as flat lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRows {
    pub respondents: Vec<Respondent>,
    pub answers: Vec<SubmittedAnswer>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_values_are_untagged() {
        assert_eq!(
            serde_json::to_string(&AnswerValue::Choice(OptionId(4))).unwrap(),
            "4"
        );
        assert_eq!(
            serde_json::from_str::<AnswerValue>("\"pizza\"").unwrap(),
            AnswerValue::Text("pizza".into())
        );
    }

    #[test]
    fn published_survey_flattens_its_record() {
        let survey = PublishedSurvey {
            record: SurveyRecord {
                id: SurveyId(1),
                title: "Lunch".into(),
                creator_id: CreatorId(9),
                answer_count: 0,
            },
            questions: Vec::new(),
        };

        let json = serde_json::to_value(&survey).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["title"], "Lunch");
        assert_eq!(json["creatorId"], 9);
        assert!(json["questions"].as_array().unwrap().is_empty());
    }

    #[test]
    fn summary_reports_answer_count() {
        let record = SurveyRecord {
            id: SurveyId(3),
            title: "Pets".into(),
            creator_id: CreatorId(1),
            answer_count: 5,
        };

        let json = serde_json::to_value(SurveySummary::from(&record)).unwrap();
        assert_eq!(json, serde_json::json!({"id": 3, "title": "Pets", "answers": 5}));
    }
}
