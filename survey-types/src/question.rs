use serde::{Deserialize, Serialize};

use crate::QuestionError;
use crate::reorder::{self, Positioned};

/// A candidate answer of a closed question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    /// The text shown next to the checkbox.
    pub text: String,

    /// Zero-based position within the parent question.
    pub position: u32,
}

impl AnswerOption {
    /// Create a new answer option.
    pub fn new(text: impl Into<String>, position: u32) -> Self {
        Self {
            text: text.into(),
            position,
        }
    }

    /// Create an option without text.
    pub fn blank(position: u32) -> Self {
        Self::new(String::new(), position)
    }

    /// Check if the option has no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

impl Positioned for AnswerOption {
    fn position(&self) -> u32 {
        self.position
    }

    fn set_position(&mut self, position: u32) {
        self.position = position;
    }
}

/// A single question of a survey draft.
///
/// Open questions collect free text and have a single implicit answer slot:
/// their bounds are pinned to `0..=1` and their options to one blank entry.
/// Closed questions offer a list of [`AnswerOption`]s, of which the respondent
/// selects between `min_answers` and `max_answers`. A closed question is
/// optional exactly when its minimum is 0, so optionality is never set on its
/// own for closed questions.
///
/// Structural rules that span several fields (e.g. the maximum not exceeding
/// the number of options) are checked by the survey validator, not here, so
/// that an author can pass through intermediate states while editing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    title: String,
    open: bool,
    optional: bool,
    min_answers: u32,
    max_answers: u32,
    position: u32,
    options: Vec<AnswerOption>,
}

impl Question {
    /// Create an optional open question.
    pub fn open(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            open: true,
            optional: true,
            min_answers: 0,
            max_answers: 1,
            position: 0,
            options: vec![AnswerOption::blank(0)],
        }
    }

    /// Create an optional closed question allowing a single selection.
    pub fn closed<I, S>(title: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            open: false,
            optional: true,
            min_answers: 0,
            max_answers: 1,
            position: 0,
            options: (0..)
                .zip(options)
                .map(|(position, text)| AnswerOption::new(text, position))
                .collect(),
        }
    }

    /// Make the question mandatory.
    ///
    /// Closed questions with a minimum of 0 get a minimum of 1.
    pub fn mandatory(mut self) -> Self {
        if !self.open && self.min_answers == 0 {
            self.min_answers = 1;
        }
        self.optional = false;
        self
    }

    /// Set answer bounds (closed questions only).
    pub fn with_bounds(mut self, min: u32, max: u32) -> Result<Self, QuestionError> {
        self.set_bounds(min, max)?;
        Ok(self)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_closed(&self) -> bool {
        !self.open
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn min_answers(&self) -> u32 {
        self.min_answers
    }

    pub fn max_answers(&self) -> u32 {
        self.max_answers
    }

    /// Get the answer options, ordered by position.
    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Switch between open and closed.
    ///
    /// Becoming open resets the question to its single-slot state (bounds
    /// `0..=1`, one blank option) in one step. Becoming closed keeps that slot
    /// as the first, still blank, option; optionality then follows the minimum.
    pub fn set_open(&mut self, open: bool) {
        if open {
            self.open = true;
            self.min_answers = 0;
            self.max_answers = 1;
            self.options = vec![AnswerOption::blank(0)];
        } else if self.open {
            self.open = false;
            self.optional = self.min_answers == 0;
        }
    }

    /// Set optionality of an open question.
    pub fn set_optional(&mut self, optional: bool) -> Result<(), QuestionError> {
        if !self.open {
            return Err(QuestionError::DerivedOptionality);
        }
        self.optional = optional;
        Ok(())
    }

    /// Set the minimum number of selections; a minimum of 0 makes the question optional.
    pub fn set_min_answers(&mut self, min: u32) -> Result<(), QuestionError> {
        self.ensure_closed()?;
        self.min_answers = min;
        self.optional = min == 0;
        Ok(())
    }

    pub fn set_max_answers(&mut self, max: u32) -> Result<(), QuestionError> {
        self.ensure_closed()?;
        if max == 0 {
            return Err(QuestionError::ZeroMaximum);
        }
        self.max_answers = max;
        Ok(())
    }

    /// Set both bounds at once. Nothing changes if the new bounds are rejected.
    pub fn set_bounds(&mut self, min: u32, max: u32) -> Result<(), QuestionError> {
        self.ensure_closed()?;
        if max == 0 {
            return Err(QuestionError::ZeroMaximum);
        }
        self.min_answers = min;
        self.max_answers = max;
        self.optional = min == 0;
        Ok(())
    }

    /// Append an answer option, returning its position.
    pub fn add_option(&mut self, text: impl Into<String>) -> Result<u32, QuestionError> {
        self.ensure_closed()?;
        Ok(reorder::push(&mut self.options, AnswerOption::new(text, 0)))
    }

    pub fn set_option_text(
        &mut self,
        position: u32,
        text: impl Into<String>,
    ) -> Result<(), QuestionError> {
        self.ensure_closed()?;
        let option = self
            .options
            .iter_mut()
            .find(|option| option.position == position)
            .ok_or(QuestionError::UnknownOption(position))?;
        option.text = text.into();
        Ok(())
    }

    /// Remove an answer option; later options move up by one.
    pub fn remove_option(&mut self, position: u32) -> Result<AnswerOption, QuestionError> {
        self.ensure_closed()?;
        reorder::remove(&mut self.options, position).ok_or(QuestionError::UnknownOption(position))
    }

    pub fn move_option_up(&mut self, position: u32) -> bool {
        !self.open && reorder::move_up(&mut self.options, position)
    }

    pub fn move_option_down(&mut self, position: u32) -> bool {
        !self.open && reorder::move_down(&mut self.options, position)
    }

    fn ensure_closed(&self) -> Result<(), QuestionError> {
        if self.open {
            Err(QuestionError::OpenQuestion)
        } else {
            Ok(())
        }
    }
}

impl Default for Question {
    /// The template for a freshly added question: untitled, open and optional.
    fn default() -> Self {
        Self::open("")
    }
}

impl Positioned for Question {
    fn position(&self) -> u32 {
        self.position
    }

    fn set_position(&mut self, position: u32) {
        self.position = position;
    }
}
