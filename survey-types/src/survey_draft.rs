use serde::{Deserialize, Serialize};

use crate::reorder::{self, Positioned};
use crate::{DraftError, Question, QuestionError};

/// A survey being authored: a title and an ordered list of questions.
///
/// Edits never mutate a draft in place. Each one returns a new draft (or an
/// error, leaving the original untouched), so a half-applied edit is never
/// observable and no two views of the draft share a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyDraft {
    title: String,
    questions: Vec<Question>,
}

impl SurveyDraft {
    /// Create a fresh draft: untitled, with one default question.
    pub fn new() -> Self {
        Self {
            title: String::new(),
            questions: vec![Question::default()],
        }
    }

    /// Create a draft without any questions.
    pub fn empty() -> Self {
        Self {
            title: String::new(),
            questions: Vec::new(),
        }
    }

    /// Set the survey title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Append a question; its position is set to the end of the list.
    pub fn with_question(mut self, question: Question) -> Self {
        reorder::push(&mut self.questions, question);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get the questions, ordered by position.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, position: u32) -> Option<&Question> {
        self.questions.iter().find(|q| q.position() == position)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Append a default question.
    pub fn add_question(&self) -> Self {
        self.clone().with_question(Question::default())
    }

    pub fn remove_question(&self, position: u32) -> Result<Self, DraftError> {
        let mut next = self.clone();
        reorder::remove(&mut next.questions, position).ok_or(DraftError::UnknownQuestion(position))?;
        Ok(next)
    }

    /// Swap a question with the one above it; a no-op for the first question.
    pub fn move_question_up(&self, position: u32) -> Self {
        let mut next = self.clone();
        reorder::move_up(&mut next.questions, position);
        next
    }

    /// Swap a question with the one below it; a no-op for the last question.
    pub fn move_question_down(&self, position: u32) -> Self {
        let mut next = self.clone();
        reorder::move_down(&mut next.questions, position);
        next
    }

    /// Apply an edit to the question at `position`.
    ///
    /// The edit works on a copy; if it fails, the error is returned and this
    /// draft stays as it was. The question keeps its position whatever the
    /// edit does.
    pub fn update_question<F>(&self, position: u32, edit: F) -> Result<Self, DraftError>
    where
        F: FnOnce(&mut Question) -> Result<(), QuestionError>,
    {
        let mut next = self.clone();
        let question = next
            .questions
            .iter_mut()
            .find(|q| q.position() == position)
            .ok_or(DraftError::UnknownQuestion(position))?;
        edit(question).map_err(|source| DraftError::Question { position, source })?;
        question.set_position(position);
        Ok(next)
    }
}

impl Default for SurveyDraft {
    fn default() -> Self {
        Self::new()
    }
}
