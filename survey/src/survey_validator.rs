//! Structural and cardinality checks run on a draft before it is published.

use serde::Serialize;

use survey_types::{Positioned, Question, SurveyDraft, reorder};

/// One broken authoring rule.
///
/// Question and option numbers are zero-based positions within the draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "rule", rename_all = "camelCase")]
pub enum SurveyViolation {
    #[error("The survey needs a title")]
    MissingSurveyTitle,

    #[error("The survey needs at least one question")]
    NoQuestions,

    #[error("Positions of the {count} questions must run from 0 without gaps")]
    ScatteredPositions { count: usize },

    #[error("Question {question}: title is empty")]
    MissingQuestionTitle { question: u32 },

    #[error("Question {question}: a closed question needs at least one answer option")]
    NoAnswerOptions { question: u32 },

    #[error("Question {question}: answer option positions are not contiguous")]
    ScatteredOptionPositions { question: u32 },

    #[error("Question {question}: the maximum number of answers must be at least 1")]
    ZeroMaximum { question: u32 },

    #[error("Question {question}: maximum of {max} answers exceeds the {options} available options")]
    MaxExceedsOptions { question: u32, max: u32, options: usize },

    #[error("Question {question}: minimum of {min} answers exceeds the maximum of {max}")]
    MinExceedsMax { question: u32, min: u32, max: u32 },

    #[error("Question {question}: {options} options leave no choice for a minimum of {min} answers")]
    MinNotBelowOptions { question: u32, min: u32, options: usize },

    #[error("Question {question}: a closed question is optional exactly when its minimum is 0")]
    OptionalityMismatch { question: u32 },

    #[error("Question {question}: answer option {option} has no text")]
    BlankAnswerOption { question: u32, option: u32 },
}

impl SurveyViolation {
    /// Position of the offending question, if the violation concerns one.
    pub fn question(&self) -> Option<u32> {
        match self {
            Self::MissingSurveyTitle | Self::NoQuestions | Self::ScatteredPositions { .. } => None,
            Self::MissingQuestionTitle { question }
            | Self::NoAnswerOptions { question }
            | Self::ScatteredOptionPositions { question }
            | Self::ZeroMaximum { question }
            | Self::MaxExceedsOptions { question, .. }
            | Self::MinExceedsMax { question, .. }
            | Self::MinNotBelowOptions { question, .. }
            | Self::OptionalityMismatch { question }
            | Self::BlankAnswerOption { question, .. } => Some(*question),
        }
    }

    /// Position of the offending answer option, if the violation concerns one.
    pub fn option(&self) -> Option<u32> {
        match self {
            Self::BlankAnswerOption { option, .. } => Some(*option),
            _ => None,
        }
    }
}

/// Every rule a draft breaks, ordered by question position; survey-level
/// violations come last. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{}", summary(.errors))]
pub struct SurveyViolations {
    errors: Vec<SurveyViolation>,
}

impl SurveyViolations {
    pub fn as_slice(&self) -> &[SurveyViolation] {
        &self.errors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SurveyViolation> {
        self.errors.iter()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// The first violation, which belongs to the earliest offending question.
    pub fn first(&self) -> Option<&SurveyViolation> {
        self.errors.first()
    }

    /// Get the violations of the question at `position`.
    pub fn for_question(&self, position: u32) -> impl Iterator<Item = &SurveyViolation> {
        self.errors
            .iter()
            .filter(move |violation| violation.question() == Some(position))
    }

    pub fn contains(&self, violation: &SurveyViolation) -> bool {
        self.errors.contains(violation)
    }
}

impl<'a> IntoIterator for &'a SurveyViolations {
    type Item = &'a SurveyViolation;
    type IntoIter = std::slice::Iter<'a, SurveyViolation>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

fn summary(errors: &[SurveyViolation]) -> String {
    match errors {
        [single] => single.to_string(),
        [first, rest @ ..] => format!("{first} (and {} more)", rest.len()),
        [] => "no violations".to_string(),
    }
}

/// Check a draft against every authoring rule.
///
/// The draft is not modified. All violations are collected, not just the
/// first one, so an editor can flag every offending question at once.
pub fn validate_survey(draft: &SurveyDraft) -> Result<(), SurveyViolations> {
    let mut errors = Vec::new();

    let mut questions: Vec<&Question> = draft.questions().iter().collect();
    questions.sort_by_key(|question| question.position());
    for question in questions {
        errors.extend(validate_question(question));
    }

    if draft.is_empty() {
        errors.push(SurveyViolation::NoQuestions);
    } else if !reorder::is_dense(draft.questions()) {
        errors.push(SurveyViolation::ScatteredPositions {
            count: draft.len(),
        });
    }
    if draft.title().trim().is_empty() {
        errors.push(SurveyViolation::MissingSurveyTitle);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(SurveyViolations { errors })
    }
}

/// Check a single question; the result is empty for a valid question.
///
/// Open questions are checked as having one implicit answer slot.
pub fn validate_question(question: &Question) -> Vec<SurveyViolation> {
    let position = question.position();
    let min = question.min_answers();
    let max = question.max_answers();
    let mut errors = Vec::new();

    if question.title().trim().is_empty() {
        errors.push(SurveyViolation::MissingQuestionTitle { question: position });
    }

    let slots = if question.is_open() {
        1
    } else {
        question.options().len()
    };

    if question.is_closed() {
        if slots == 0 {
            errors.push(SurveyViolation::NoAnswerOptions { question: position });
        } else if !reorder::is_dense(question.options()) {
            errors.push(SurveyViolation::ScatteredOptionPositions { question: position });
        }
    }

    if max == 0 {
        errors.push(SurveyViolation::ZeroMaximum { question: position });
    } else if slots > 0 && max as usize > slots {
        errors.push(SurveyViolation::MaxExceedsOptions {
            question: position,
            max,
            options: slots,
        });
    }
    if min > max {
        errors.push(SurveyViolation::MinExceedsMax {
            question: position,
            min,
            max,
        });
    }
    if slots > 0 && slots <= min as usize {
        errors.push(SurveyViolation::MinNotBelowOptions {
            question: position,
            min,
            options: slots,
        });
    }

    if question.is_closed() {
        if question.is_optional() != (min == 0) {
            errors.push(SurveyViolation::OptionalityMismatch { question: position });
        }

        let mut options: Vec<_> = question.options().iter().collect();
        options.sort_by_key(|option| option.position);
        errors.extend(
            options
                .into_iter()
                .filter(|option| option.is_blank())
                .map(|option| SurveyViolation::BlankAnswerOption {
                    question: position,
                    option: option.position,
                }),
        );
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> SurveyDraft {
        SurveyDraft::empty()
            .with_title("Team lunch")
            .with_question(
                Question::closed("Which days work?", ["Mon", "Tue", "Wed"])
                    .with_bounds(1, 2)
                    .unwrap(),
            )
            .with_question(Question::open("Allergies?"))
    }

    fn violations(draft: &SurveyDraft) -> Vec<SurveyViolation> {
        validate_survey(draft).unwrap_err().as_slice().to_vec()
    }

    #[test]
    fn accepts_a_valid_draft() {
        assert_eq!(validate_survey(&valid_draft()), Ok(()));
    }

    #[test]
    fn fresh_draft_only_lacks_titles() {
        assert_eq!(
            violations(&SurveyDraft::new()),
            vec![
                SurveyViolation::MissingQuestionTitle { question: 0 },
                SurveyViolation::MissingSurveyTitle,
            ]
        );
    }

    #[test]
    fn reports_missing_survey_title() {
        let draft = valid_draft().with_title("   ");
        assert_eq!(violations(&draft), vec![SurveyViolation::MissingSurveyTitle]);
    }

    #[test]
    fn reports_empty_survey() {
        let draft = SurveyDraft::empty().with_title("Nothing here");
        assert_eq!(violations(&draft), vec![SurveyViolation::NoQuestions]);
    }

    #[test]
    fn reports_missing_question_title() {
        let draft = valid_draft()
            .update_question(1, |q| {
                q.set_title("");
                Ok(())
            })
            .unwrap();
        assert_eq!(
            violations(&draft),
            vec![SurveyViolation::MissingQuestionTitle { question: 1 }]
        );
    }

    #[test]
    fn reports_closed_question_without_options() {
        let draft = SurveyDraft::empty()
            .with_title("Options")
            .with_question(Question::closed("Pick", Vec::<String>::new()));
        assert_eq!(
            violations(&draft),
            vec![SurveyViolation::NoAnswerOptions { question: 0 }]
        );
    }

    #[test]
    fn reports_maximum_above_option_count() {
        let draft = valid_draft()
            .update_question(0, |q| q.set_max_answers(4))
            .unwrap();
        assert_eq!(
            violations(&draft),
            vec![SurveyViolation::MaxExceedsOptions {
                question: 0,
                max: 4,
                options: 3
            }]
        );
    }

    #[test]
    fn reports_minimum_above_maximum() {
        let draft = valid_draft().update_question(0, |q| q.set_bounds(2, 1)).unwrap();
        assert_eq!(
            violations(&draft),
            vec![SurveyViolation::MinExceedsMax {
                question: 0,
                min: 2,
                max: 1
            }]
        );
    }

    #[test]
    fn reports_minimum_that_leaves_no_choice() {
        let draft = SurveyDraft::empty().with_title("Pairs").with_question(
            Question::closed("Both?", ["Yes", "No"])
                .with_bounds(2, 2)
                .unwrap(),
        );
        assert_eq!(
            violations(&draft),
            vec![SurveyViolation::MinNotBelowOptions {
                question: 0,
                min: 2,
                options: 2
            }]
        );
    }

    #[test]
    fn reports_blank_answer_options() {
        let draft = valid_draft()
            .update_question(0, |q| q.set_option_text(1, " "))
            .unwrap();

        let errors = validate_survey(&draft).unwrap_err();
        assert_eq!(
            errors.as_slice(),
            &[SurveyViolation::BlankAnswerOption {
                question: 0,
                option: 1
            }]
        );
        assert_eq!(errors.first().and_then(SurveyViolation::option), Some(1));
    }

    #[test]
    fn open_question_blank_slot_is_not_an_option() {
        let draft = SurveyDraft::empty()
            .with_title("Feedback")
            .with_question(Question::open("Comments").mandatory());
        assert_eq!(validate_survey(&draft), Ok(()));
    }

    #[test]
    fn switching_to_closed_exposes_the_blank_slot() {
        let draft = SurveyDraft::empty()
            .with_title("Switch")
            .with_question(Question::open("Which?"))
            .update_question(0, |q| {
                q.set_open(false);
                Ok(())
            })
            .unwrap();
        assert_eq!(
            violations(&draft),
            vec![SurveyViolation::BlankAnswerOption {
                question: 0,
                option: 0
            }]
        );
    }

    #[test]
    fn accumulates_in_question_order_with_survey_level_last() {
        let draft = SurveyDraft::empty()
            .with_question(Question::open(""))
            .with_question(Question::closed("Colours", ["", "Red"]).with_bounds(3, 3).unwrap());

        let errors = validate_survey(&draft).unwrap_err();
        assert_eq!(
            errors.as_slice(),
            &[
                SurveyViolation::MissingQuestionTitle { question: 0 },
                SurveyViolation::MaxExceedsOptions {
                    question: 1,
                    max: 3,
                    options: 2
                },
                SurveyViolation::MinNotBelowOptions {
                    question: 1,
                    min: 3,
                    options: 2
                },
                SurveyViolation::BlankAnswerOption {
                    question: 1,
                    option: 0
                },
                SurveyViolation::MissingSurveyTitle,
            ]
        );
        assert_eq!(errors.for_question(1).count(), 3);
        assert_eq!(
            errors.to_string(),
            "Question 0: title is empty (and 4 more)"
        );
    }

    fn closed_json(optional: bool, min: u32, max: u32, options: &str) -> String {
        format!(
            r#"{{"title": "Pick", "open": false, "optional": {optional}, "minAnswers": {min},
                "maxAnswers": {max}, "position": 0, "options": {options}}}"#
        )
    }

    fn draft_json(questions: &[String]) -> SurveyDraft {
        let json = format!(r#"{{"title": "Imported", "questions": [{}]}}"#, questions.join(","));
        serde_json::from_str(&json).unwrap()
    }

    const TWO_OPTIONS: &str = r#"[{"text": "A", "position": 0}, {"text": "B", "position": 1}]"#;

    #[test]
    fn reports_scattered_question_positions() {
        let open = |position: u32| {
            format!(
                r#"{{"title": "Q{position}", "open": true, "optional": true, "minAnswers": 0,
                    "maxAnswers": 1, "position": {position}, "options": []}}"#
            )
        };
        let draft = draft_json(&[open(0), open(2)]);
        assert_eq!(
            violations(&draft),
            vec![SurveyViolation::ScatteredPositions { count: 2 }]
        );
    }

    #[test]
    fn reports_scattered_option_positions() {
        let options = r#"[{"text": "A", "position": 0}, {"text": "B", "position": 2}]"#;
        let draft = draft_json(&[closed_json(false, 1, 1, options)]);
        assert_eq!(
            violations(&draft),
            vec![SurveyViolation::ScatteredOptionPositions { question: 0 }]
        );
    }

    #[test]
    fn reports_zero_maximum() {
        let draft = draft_json(&[closed_json(true, 0, 0, TWO_OPTIONS)]);
        assert_eq!(violations(&draft), vec![SurveyViolation::ZeroMaximum { question: 0 }]);

        let mandatory = draft_json(&[closed_json(false, 0, 0, TWO_OPTIONS)]);
        assert_eq!(
            violations(&mandatory),
            vec![
                SurveyViolation::ZeroMaximum { question: 0 },
                SurveyViolation::OptionalityMismatch { question: 0 },
            ]
        );
    }

    #[test]
    fn reports_optionality_that_disagrees_with_the_minimum() {
        let optional_with_minimum = draft_json(&[closed_json(true, 1, 1, TWO_OPTIONS)]);
        assert_eq!(
            violations(&optional_with_minimum),
            vec![SurveyViolation::OptionalityMismatch { question: 0 }]
        );

        let mandatory_without_minimum = draft_json(&[closed_json(false, 0, 1, TWO_OPTIONS)]);
        assert_eq!(
            violations(&mandatory_without_minimum),
            vec![SurveyViolation::OptionalityMismatch { question: 0 }]
        );
    }

    #[test]
    fn serializes_violations_with_their_rule() {
        let errors = validate_survey(&SurveyDraft::empty()).unwrap_err();
        let json = serde_json::to_value(&errors).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"errors": [
                {"rule": "noQuestions"},
                {"rule": "missingSurveyTitle"}
            ]})
        );
    }
}
