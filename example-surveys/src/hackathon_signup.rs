use survey_types::{PublishedSurvey, Question, QuestionError, Submission, SurveyDraft};

use crate::pick_options;

/// Sign-up sheet for a weekend hackathon.
pub fn hackathon_signup() -> Result<SurveyDraft, QuestionError> {
    Ok(SurveyDraft::empty()
        .with_title("Hackathon sign-up")
        .with_question(Question::open("What is your team called?").mandatory())
        .with_question(
            Question::closed(
                "Which tracks interest you?",
                ["Tooling", "Games", "Web", "Embedded"],
            )
            .with_bounds(1, 3)?,
        )
        .with_question(Question::closed("Do you need a place to sleep?", ["Yes", "No"]).mandatory())
        .with_question(Question::open("Dietary requirements?")))
}

/// Answers to a published [`hackathon_signup`] survey. Dietary requirements are left out.
pub fn hackathon_answers(
    survey: &PublishedSurvey,
    name: &str,
    team: &str,
    tracks: &[u32],
    needs_bed: bool,
) -> Submission {
    let mut submission = Submission::new(name);
    for question in &survey.questions {
        submission = match question.position {
            0 => submission.with_text(question.id, team),
            1 => submission.with_choices(question.id, pick_options(question, tracks)),
            2 => {
                let bed = if needs_bed { 0 } else { 1 };
                submission.with_choices(question.id, pick_options(question, &[bed]))
            }
            _ => submission,
        };
    }
    submission
}
