use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! ids {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(
                Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
            )]
            #[serde(transparent)]
            pub struct $name(pub u64);

            impl $name {
                /// Get the raw integer value.
                pub fn get(self) -> u64 {
                    self.0
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl From<u64> for $name {
                fn from(id: u64) -> Self {
                    Self(id)
                }
            }
        )*
    };
}

ids!(
    /// Identifies a published survey.
    SurveyId,
    /// Identifies a question of a published survey.
    QuestionId,
    /// Identifies a candidate answer of a closed question.
    OptionId,
    /// Identifies one anonymous submission.
    RespondentId,
    /// Identifies one stored answer row.
    AnswerId,
    /// Stable identity of an authenticated survey creator.
    CreatorId,
);
