/// Error type for edits to a single question.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionError {
    /// A question must always accept at least one answer.
    #[error("Maximum number of answers must be at least 1")]
    ZeroMaximum,

    /// Open questions have a single implicit answer slot.
    #[error("Open questions have no answer options or answer bounds")]
    OpenQuestion,

    /// Closed questions are optional exactly when their minimum is 0.
    #[error("Optionality of a closed question follows its minimum number of answers")]
    DerivedOptionality,

    #[error("No answer option at position {0}")]
    UnknownOption(u32),
}

/// Error type for edits to a survey draft.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("No question at position {0}")]
    UnknownQuestion(u32),

    #[error("Question {position}: {source}")]
    Question {
        position: u32,
        #[source]
        source: QuestionError,
    },
}

impl DraftError {
    /// Position of the question the edit was aimed at.
    pub fn position(&self) -> u32 {
        match self {
            Self::UnknownQuestion(position) | Self::Question { position, .. } => *position,
        }
    }
}
