use survey_types::{PublishedSurvey, Question, QuestionError, Submission, SurveyDraft};

use crate::pick_options;

/// End-of-course feedback: two closed questions and one open question.
///
/// - a mandatory single-choice rating
/// - up to two follow-up topics, optional
/// - free-text comments, optional
pub fn course_feedback() -> Result<SurveyDraft, QuestionError> {
    Ok(SurveyDraft::empty()
        .with_title("Course feedback")
        .with_question(
            Question::closed(
                "How did you like the course?",
                ["Loved it", "It was fine", "Not for me"],
            )
            .mandatory(),
        )
        .with_question(
            Question::closed(
                "Which topics should we cover next?",
                ["Async", "Macros", "Unsafe", "Embedded"],
            )
            .with_bounds(0, 2)?,
        )
        .with_question(Question::open("Anything else you want to tell us?")))
}

/// Answers to a published [`course_feedback`] survey.
///
/// `rating` and `topics` are option positions; `comment` may be empty.
pub fn course_feedback_answers(
    survey: &PublishedSurvey,
    name: &str,
    rating: u32,
    topics: &[u32],
    comment: &str,
) -> Submission {
    let mut submission = Submission::new(name);
    for question in &survey.questions {
        submission = match question.position {
            0 => submission.with_choices(question.id, pick_options(question, &[rating])),
            1 => submission.with_choices(question.id, pick_options(question, topics)),
            _ => submission.with_text(question.id, comment),
        };
    }
    submission
}
