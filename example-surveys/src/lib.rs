//! Ready-made survey drafts and matching submissions.

pub mod course_feedback;
pub mod hackathon_signup;
pub mod unfinished_poll;

pub use course_feedback::{course_feedback, course_feedback_answers};
pub use hackathon_signup::{hackathon_answers, hackathon_signup};
pub use unfinished_poll::unfinished_poll;

use survey_types::{OptionId, PublishedQuestion};

/// Ids of the options at the given positions; unknown positions are skipped.
pub fn pick_options(question: &PublishedQuestion, positions: &[u32]) -> Vec<OptionId> {
    positions
        .iter()
        .filter_map(|&position| question.options.iter().find(|o| o.position == position))
        .map(|o| o.id)
        .collect()
}
