use serde::{Deserialize, Serialize};

use crate::{AnswerValue, OptionId, QuestionId};

/// A respondent's answer to one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    /// Free text, for open questions.
    Text(String),

    /// Selected option ids, for closed questions.
    Choices(Vec<OptionId>),
}

impl Response {
    /// Check if the answer carries nothing: blank text or no selection.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::Choices(choices) => choices.is_empty(),
        }
    }

    /// Get the type name of this answer for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Choices(_) => "choices",
        }
    }
}

impl From<String> for Response {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Response {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Vec<OptionId>> for Response {
    fn from(choices: Vec<OptionId>) -> Self {
        Self::Choices(choices)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    pub question_id: QuestionId,
    pub answer: Response,
}

/// One respondent's candidate answer set for a survey.
///
/// Questions may be left out; whether that is acceptable depends on the
/// question being optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// Display name of the respondent.
    pub name: String,
    pub answers: Vec<QuestionResponse>,
}

impl Submission {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            answers: Vec::new(),
        }
    }

    /// Add an answer.
    pub fn with_answer(mut self, question_id: QuestionId, answer: impl Into<Response>) -> Self {
        self.answers.push(QuestionResponse {
            question_id,
            answer: answer.into(),
        });
        self
    }

    /// Add a free-text answer.
    pub fn with_text(self, question_id: QuestionId, text: impl Into<String>) -> Self {
        self.with_answer(question_id, Response::Text(text.into()))
    }

    /// Add a selection.
    pub fn with_choices(
        self,
        question_id: QuestionId,
        choices: impl IntoIterator<Item = OptionId>,
    ) -> Self {
        self.with_answer(question_id, Response::Choices(choices.into_iter().collect()))
    }

    /// Get the first answer given for a question.
    pub fn answer_for(&self, question_id: QuestionId) -> Option<&Response> {
        self.answers
            .iter()
            .find(|a| a.question_id == question_id)
            .map(|a| &a.answer)
    }

    /// Flatten into answer rows: one per selected option, one per non-blank
    /// text. Texts are stored trimmed. Empty answers produce no row.
    pub fn to_rows(&self) -> Vec<NewAnswer> {
        let mut rows = Vec::new();
        for entry in &self.answers {
            match &entry.answer {
                Response::Text(text) => {
                    let text = text.trim();
                    if !text.is_empty() {
                        rows.push(NewAnswer {
                            question_id: entry.question_id,
                            value: AnswerValue::Text(text.to_string()),
                        });
                    }
                }
                Response::Choices(choices) => {
                    rows.extend(choices.iter().map(|&option| NewAnswer {
                        question_id: entry.question_id,
                        value: AnswerValue::Choice(option),
                    }));
                }
            }
        }
        rows
    }
}

/// An answer row that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnswer {
    pub question_id: QuestionId,
    pub value: AnswerValue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_skip_empty_answers() {
        let submission = Submission::new("Ada")
            .with_text(QuestionId(1), "  ")
            .with_choices(QuestionId(2), [OptionId(5), OptionId(6)])
            .with_choices(QuestionId(3), [])
            .with_text(QuestionId(4), "  Great course\n");

        let rows = submission.to_rows();
        assert_eq!(
            rows,
            vec![
                NewAnswer {
                    question_id: QuestionId(2),
                    value: AnswerValue::Choice(OptionId(5)),
                },
                NewAnswer {
                    question_id: QuestionId(2),
                    value: AnswerValue::Choice(OptionId(6)),
                },
                NewAnswer {
                    question_id: QuestionId(4),
                    value: AnswerValue::Text("Great course".into()),
                },
            ]
        );
    }

    #[test]
    fn responses_deserialize_from_strings_or_id_lists() {
        let submission: Submission = serde_json::from_str(
            r#"{"name": "Bo", "answers": [
                {"questionId": 1, "answer": "hello"},
                {"questionId": 2, "answer": [3, 4]}
            ]}"#,
        )
        .unwrap();

        assert_eq!(
            submission.answer_for(QuestionId(1)),
            Some(&Response::Text("hello".into()))
        );
        assert_eq!(
            submission.answer_for(QuestionId(2)),
            Some(&Response::Choices(vec![OptionId(3), OptionId(4)]))
        );
        assert!(submission.answer_for(QuestionId(3)).is_none());
    }
}
