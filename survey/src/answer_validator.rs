//! Checks a respondent's submission against the questions of a published survey.

use std::collections::HashSet;

use serde::Serialize;

use survey_types::{OptionId, PublishedQuestion, QuestionId, Response, Submission};

use crate::SubmissionLimits;

/// Reason a submission was refused. Only the first failing rule is reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "reason", rename_all = "camelCase")]
pub enum AnswerRejection {
    #[error("A name is required")]
    MissingName,

    #[error("Name is {len} characters long, at most {max} are allowed")]
    NameTooLong { len: usize, max: usize },

    #[error("Question {question} is not part of this survey")]
    UnknownQuestion { question: QuestionId },

    #[error("Question {question} was answered more than once")]
    DuplicateAnswer { question: QuestionId },

    #[error("Question {question} is mandatory")]
    Unanswered { question: QuestionId },

    #[error("Question {question} expects {expected}, got {found}")]
    WrongAnswerKind {
        question: QuestionId,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Answer to question {question} is {len} characters long, at most {max} are allowed")]
    AnswerTooLong {
        question: QuestionId,
        len: usize,
        max: usize,
    },

    #[error("Option {option} does not belong to question {question}")]
    UnknownOption { question: QuestionId, option: OptionId },

    #[error("Option {option} of question {question} was selected twice")]
    RepeatedOption { question: QuestionId, option: OptionId },

    #[error("Question {question} needs at least {min} selections, got {selected}")]
    TooFewSelected {
        question: QuestionId,
        min: u32,
        selected: usize,
    },

    #[error("Question {question} allows at most {max} selections, got {selected}")]
    TooManySelected {
        question: QuestionId,
        max: u32,
        selected: usize,
    },

    #[error("The submission contains no answers")]
    NothingAnswered,
}

impl AnswerRejection {
    /// The question the rejection is about, if any.
    pub fn question(&self) -> Option<QuestionId> {
        match self {
            Self::MissingName | Self::NameTooLong { .. } | Self::NothingAnswered => None,
            Self::UnknownQuestion { question }
            | Self::DuplicateAnswer { question }
            | Self::Unanswered { question }
            | Self::WrongAnswerKind { question, .. }
            | Self::AnswerTooLong { question, .. }
            | Self::UnknownOption { question, .. }
            | Self::RepeatedOption { question, .. }
            | Self::TooFewSelected { question, .. }
            | Self::TooManySelected { question, .. } => Some(*question),
        }
    }
}

/// Validate a submission against a survey's questions.
///
/// Checks run in a fixed order: the respondent name, entries that reference
/// no question of the survey or repeat one, then each question by position.
/// Optional questions may be left out or answered empty. Once an optional
/// closed question has selections, its maximum still applies but its minimum
/// does not. A submission that would store no answer at all is refused.
pub fn validate_submission(
    questions: &[PublishedQuestion],
    submission: &Submission,
    limits: &SubmissionLimits,
) -> Result<(), AnswerRejection> {
    check_name(&submission.name, limits)?;

    let mut seen = HashSet::new();
    for entry in &submission.answers {
        let question = entry.question_id;
        if !questions.iter().any(|q| q.id == question) {
            return Err(AnswerRejection::UnknownQuestion { question });
        }
        if !seen.insert(question) {
            return Err(AnswerRejection::DuplicateAnswer { question });
        }
    }

    let mut ordered: Vec<&PublishedQuestion> = questions.iter().collect();
    ordered.sort_by_key(|q| q.position);
    for question in ordered {
        check_answer(question, submission.answer_for(question.id), limits)?;
    }

    if submission.to_rows().is_empty() {
        return Err(AnswerRejection::NothingAnswered);
    }
    Ok(())
}

fn check_name(name: &str, limits: &SubmissionLimits) -> Result<(), AnswerRejection> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AnswerRejection::MissingName);
    }
    let len = name.chars().count();
    if len > limits.max_name_len {
        return Err(AnswerRejection::NameTooLong {
            len,
            max: limits.max_name_len,
        });
    }
    Ok(())
}

/// Check the answer (or its absence) for one question.
pub fn check_answer(
    question: &PublishedQuestion,
    answer: Option<&Response>,
    limits: &SubmissionLimits,
) -> Result<(), AnswerRejection> {
    let id = question.id;
    let Some(answer) = answer else {
        return if question.optional {
            Ok(())
        } else {
            Err(AnswerRejection::Unanswered { question: id })
        };
    };

    match (question.open, answer) {
        (true, Response::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return if question.optional {
                    Ok(())
                } else {
                    Err(AnswerRejection::Unanswered { question: id })
                };
            }
            let len = text.chars().count();
            if len > limits.max_open_answer_len {
                return Err(AnswerRejection::AnswerTooLong {
                    question: id,
                    len,
                    max: limits.max_open_answer_len,
                });
            }
            Ok(())
        }
        (false, Response::Choices(choices)) => check_choices(question, choices),
        (open, answer) => Err(AnswerRejection::WrongAnswerKind {
            question: id,
            expected: if open { "text" } else { "choices" },
            found: answer.type_name(),
        }),
    }
}

fn check_choices(question: &PublishedQuestion, choices: &[OptionId]) -> Result<(), AnswerRejection> {
    let id = question.id;

    let mut seen = HashSet::new();
    for &option in choices {
        if !question.has_option(option) {
            return Err(AnswerRejection::UnknownOption {
                question: id,
                option,
            });
        }
        if !seen.insert(option) {
            return Err(AnswerRejection::RepeatedOption {
                question: id,
                option,
            });
        }
    }

    let selected = choices.len();
    if selected == 0 {
        return if question.optional {
            Ok(())
        } else {
            Err(AnswerRejection::Unanswered { question: id })
        };
    }
    if !question.optional && selected < question.min_answers as usize {
        return Err(AnswerRejection::TooFewSelected {
            question: id,
            min: question.min_answers,
            selected,
        });
    }
    if selected > question.max_answers as usize {
        return Err(AnswerRejection::TooManySelected {
            question: id,
            max: question.max_answers,
            selected,
        });
    }
    Ok(())
}
