use survey_types::{Question, SurveyDraft};

/// A draft still being written: no survey title, a closed question with a
/// blank option, and a fresh untitled question at the end.
pub fn unfinished_poll() -> SurveyDraft {
    SurveyDraft::empty()
        .with_question(Question::closed("Best editor?", ["Helix", ""]))
        .add_question()
}
