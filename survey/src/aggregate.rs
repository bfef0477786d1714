//! Per-respondent view over the flat answer rows of a survey.
//!
//! Stored answers are one row per (respondent, question, value). An
//! [`AnswerSheet`] groups them by respondent in a single pass and lets a
//! reader step through the respondents in creation order, wrapping around at
//! both ends.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use survey_types::{
    AnswerId, AnswerRows, AnswerValue, QuestionId, Respondent, RespondentId, SubmittedAnswer,
};

/// Which way to step through the respondents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Previous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationRequest {
    pub current_respondent_id: RespondentId,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationResponse {
    pub new_respondent_id: RespondentId,
}

/// Index into a list of `len` respondents that wraps around in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RespondentCursor {
    index: usize,
    len: usize,
}

impl RespondentCursor {
    /// Cursor on the first of `len` respondents; `None` when there are none.
    pub fn new(len: usize) -> Option<Self> {
        Self::at(0, len)
    }

    /// Cursor on the respondent at `index`; `None` if out of range.
    pub fn at(index: usize, len: usize) -> Option<Self> {
        (index < len).then_some(Self { index, len })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Move to the next respondent, wrapping from the last to the first.
    pub fn advance(&mut self) {
        self.index = (self.index + 1) % self.len;
    }

    /// Move to the previous respondent, wrapping from the first to the last.
    pub fn retreat(&mut self) {
        self.index = (self.index + self.len - 1) % self.len;
    }

    pub fn step(&mut self, direction: Direction) {
        match direction {
            Direction::Next => self.advance(),
            Direction::Previous => self.retreat(),
        }
    }
}

/// One respondent's answers together with their place in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RespondentView<'a> {
    pub respondent: &'a Respondent,
    pub answers: &'a [SubmittedAnswer],
    pub index: usize,
    pub total: usize,
}

impl RespondentView<'_> {
    /// One-based progress label, e.g. `2/5`.
    pub fn progress(&self) -> String {
        format!("{}/{}", self.index + 1, self.total)
    }

    /// Get the answer rows given to one question.
    pub fn answers_to(&self, question: QuestionId) -> impl Iterator<Item = &SubmittedAnswer> {
        self.answers.iter().filter(move |a| a.question_id == question)
    }
}

/// All respondents of a survey, in id order, each with their answer rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSheet {
    respondents: Vec<Respondent>,
    answers: BTreeMap<RespondentId, Vec<SubmittedAnswer>>,
}

impl AnswerSheet {
    /// Group flat rows by respondent.
    ///
    /// Respondents without any answer row are left out, as are rows that point
    /// at an unknown respondent.
    pub fn from_rows(rows: AnswerRows) -> Self {
        let AnswerRows {
            mut respondents,
            answers,
        } = rows;

        let mut grouped: BTreeMap<RespondentId, Vec<SubmittedAnswer>> = BTreeMap::new();
        for answer in answers {
            grouped.entry(answer.respondent_id).or_default().push(answer);
        }
        for rows in grouped.values_mut() {
            rows.sort_by_key(|a| a.id);
        }

        respondents.sort_by_key(|r| r.id);
        respondents.dedup_by_key(|r| r.id);
        respondents.retain(|respondent| {
            let answered = grouped.contains_key(&respondent.id);
            if !answered {
                tracing::warn!(
                    respondent = %respondent.id,
                    survey = %respondent.survey_id,
                    "respondent has no answers, hiding it"
                );
            }
            answered
        });

        let before = grouped.len();
        grouped.retain(|id, _| respondents.binary_search_by_key(id, |r| r.id).is_ok());
        if grouped.len() < before {
            tracing::warn!(
                dropped = before - grouped.len(),
                "answer rows reference unknown respondents"
            );
        }

        Self {
            respondents,
            answers: grouped,
        }
    }

    /// Get the respondents, ordered by id.
    pub fn respondents(&self) -> &[Respondent] {
        &self.respondents
    }

    pub fn len(&self) -> usize {
        self.respondents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.respondents.is_empty()
    }

    /// The respondent selected when the answers are first opened.
    pub fn first(&self) -> Option<&Respondent> {
        self.respondents.first()
    }

    pub fn position_of(&self, respondent: RespondentId) -> Option<usize> {
        self.respondents
            .binary_search_by_key(&respondent, |r| r.id)
            .ok()
    }

    /// Get the answer rows of one respondent; empty if unknown.
    pub fn answers_of(&self, respondent: RespondentId) -> &[SubmittedAnswer] {
        self.answers
            .get(&respondent)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn cursor_at(&self, respondent: RespondentId) -> Option<RespondentCursor> {
        RespondentCursor::at(self.position_of(respondent)?, self.len())
    }

    /// View of the respondent a cursor points at.
    pub fn view(&self, cursor: RespondentCursor) -> Option<RespondentView<'_>> {
        let respondent = self.respondents.get(cursor.index())?;
        Some(RespondentView {
            respondent,
            answers: self.answers_of(respondent.id),
            index: cursor.index(),
            total: self.len(),
        })
    }

    /// View of the first respondent, if any.
    pub fn first_view(&self) -> Option<RespondentView<'_>> {
        self.view(RespondentCursor::new(self.len())?)
    }

    /// Step from the current respondent; `None` if it is not part of this sheet.
    pub fn navigate(&self, request: &NavigationRequest) -> Option<NavigationResponse> {
        let mut cursor = self.cursor_at(request.current_respondent_id)?;
        cursor.step(request.direction);
        let respondent = self.respondents.get(cursor.index())?;
        Some(NavigationResponse {
            new_respondent_id: respondent.id,
        })
    }

    /// Flatten into the listing shape handed to readers.
    pub fn listing(&self) -> AnswerListing {
        AnswerListing {
            username_list: self
                .respondents
                .iter()
                .map(|r| RespondentEntry {
                    id: r.id,
                    name: r.name.clone(),
                })
                .collect(),
            answers: self
                .respondents
                .iter()
                .flat_map(|r| self.answers_of(r.id))
                .map(|a| AnswerEntry {
                    id: a.id,
                    question_id: a.question_id,
                    answer: a.value.clone(),
                    user_id: a.respondent_id,
                })
                .collect(),
        }
    }
}

/// Respondents and all their answers: `{usernameList, answers}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerListing {
    pub username_list: Vec<RespondentEntry>,
    pub answers: Vec<AnswerEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RespondentEntry {
    pub id: RespondentId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerEntry {
    pub id: AnswerId,
    pub question_id: QuestionId,
    pub answer: AnswerValue,
    pub user_id: RespondentId,
}

#[cfg(test)]
mod tests {
    use survey_types::{OptionId, SurveyId};

    use super::*;

    fn respondent(id: u64, name: &str) -> Respondent {
        Respondent {
            id: RespondentId(id),
            survey_id: SurveyId(1),
            name: name.to_string(),
        }
    }

    fn row(id: u64, respondent: u64, question: u64, value: AnswerValue) -> SubmittedAnswer {
        SubmittedAnswer {
            id: AnswerId(id),
            survey_id: SurveyId(1),
            question_id: QuestionId(question),
            respondent_id: RespondentId(respondent),
            value,
        }
    }

    fn sheet() -> AnswerSheet {
        AnswerSheet::from_rows(AnswerRows {
            respondents: vec![respondent(3, "C"), respondent(1, "A"), respondent(2, "B")],
            answers: vec![
                row(1, 1, 10, AnswerValue::Choice(OptionId(100))),
                row(2, 1, 10, AnswerValue::Choice(OptionId(101))),
                row(3, 2, 11, AnswerValue::Text("fine".into())),
                row(4, 3, 10, AnswerValue::Choice(OptionId(100))),
                row(5, 1, 11, AnswerValue::Text("great".into())),
            ],
        })
    }

    fn step(sheet: &AnswerSheet, from: u64, direction: Direction) -> u64 {
        sheet
            .navigate(&NavigationRequest {
                current_respondent_id: RespondentId(from),
                direction,
            })
            .unwrap()
            .new_respondent_id
            .get()
    }

    #[test]
    fn groups_rows_by_respondent() {
        let sheet = sheet();

        let names: Vec<_> = sheet.respondents().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);

        let ids: Vec<_> = sheet.answers_of(RespondentId(1)).iter().map(|a| a.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 5]);
        assert!(sheet.answers_of(RespondentId(42)).is_empty());
    }

    #[test]
    fn navigation_wraps_in_both_directions() {
        let sheet = sheet();

        assert_eq!(step(&sheet, 2, Direction::Next), 3);
        assert_eq!(step(&sheet, 3, Direction::Next), 1);
        assert_eq!(step(&sheet, 1, Direction::Previous), 3);
        assert_eq!(step(&sheet, 2, Direction::Previous), 1);
    }

    #[test]
    fn single_respondent_stays_put() {
        let sheet = AnswerSheet::from_rows(AnswerRows {
            respondents: vec![respondent(7, "Solo")],
            answers: vec![row(1, 7, 10, AnswerValue::Text("hi".into()))],
        });

        assert_eq!(step(&sheet, 7, Direction::Next), 7);
        assert_eq!(step(&sheet, 7, Direction::Previous), 7);
    }

    #[test]
    fn unknown_respondent_cannot_navigate() {
        let request = NavigationRequest {
            current_respondent_id: RespondentId(9),
            direction: Direction::Next,
        };
        assert_eq!(sheet().navigate(&request), None);
        assert_eq!(AnswerSheet::default().navigate(&request), None);
    }

    #[test]
    fn hides_respondents_without_answers_and_orphaned_rows() {
        let sheet = AnswerSheet::from_rows(AnswerRows {
            respondents: vec![respondent(1, "A"), respondent(2, "Ghost")],
            answers: vec![
                row(1, 1, 10, AnswerValue::Text("x".into())),
                row(2, 5, 10, AnswerValue::Text("orphan".into())),
            ],
        });

        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.position_of(RespondentId(2)), None);
        assert_eq!(sheet.listing().answers.len(), 1);
    }

    #[test]
    fn first_view_selects_the_first_respondent() {
        let sheet = sheet();
        let view = sheet.first_view().unwrap();

        assert_eq!(view.respondent.name, "A");
        assert_eq!(view.progress(), "1/3");
        assert_eq!(view.answers_to(QuestionId(10)).count(), 2);
        assert!(AnswerSheet::default().first_view().is_none());
    }

    #[test]
    fn cursor_is_none_for_empty_lists() {
        assert_eq!(RespondentCursor::new(0), None);
        assert_eq!(RespondentCursor::at(3, 3), None);
    }

    #[test]
    fn listing_uses_wire_names() {
        let json = serde_json::to_value(sheet().listing()).unwrap();

        assert_eq!(json["usernameList"][0], serde_json::json!({"id": 1, "name": "A"}));
        assert_eq!(
            json["answers"][0],
            serde_json::json!({"id": 1, "questionId": 10, "answer": 100, "userId": 1})
        );
        assert_eq!(json["answers"][2]["answer"], "great");
        assert_eq!(json["answers"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn navigation_messages_use_wire_names() {
        let request: NavigationRequest =
            serde_json::from_str(r#"{"currentRespondentId": 4, "direction": "previous"}"#).unwrap();
        assert_eq!(request.direction, Direction::Previous);

        let response = NavigationResponse {
            new_respondent_id: RespondentId(5),
        };
        assert_eq!(
            serde_json::to_value(response).unwrap(),
            serde_json::json!({"newRespondentId": 5})
        );
    }
}
