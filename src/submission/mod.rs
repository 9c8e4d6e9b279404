use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod store;

/// A single answer value. Ratings are constructed through [`AnswerValue::rating`]
/// so the 1..=4 range is checked once, at the point of construction. The
/// untagged serialization keeps the persisted shape a bare number or string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Rating(u8),
    Text(String),
}

impl AnswerValue {
    /// Returns `None` for values outside the four-point scale.
    pub fn rating(value: u8) -> Option<Self> {
        (1..=4).contains(&value).then_some(Self::Rating(value))
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentResponse {
    pub question_id: String,
    pub value: AnswerValue,
}

/// Immutable record of one completed session. Created once when the student
/// finishes, removed only by the teacher's clear-all action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentSubmission {
    pub id: String,
    pub student_name: String,
    pub date: DateTime<Utc>,
    pub responses: Vec<StudentResponse>,
}

impl StudentSubmission {
    pub fn new(student_name: String, responses: Vec<StudentResponse>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            student_name,
            date: Utc::now(),
            responses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_constructor_rejects_out_of_band_values() {
        assert!(AnswerValue::rating(0).is_none());
        assert!(AnswerValue::rating(5).is_none());
        assert_eq!(AnswerValue::rating(3), Some(AnswerValue::Rating(3)));
    }

    #[test]
    fn answer_values_serialize_untagged() {
        let rating = serde_json::to_string(&AnswerValue::Rating(4)).expect("rating should encode");
        assert_eq!(rating, "4");
        let text =
            serde_json::to_string(&AnswerValue::text("hola")).expect("text should encode");
        assert_eq!(text, "\"hola\"");
    }

    #[test]
    fn fresh_submissions_get_distinct_ids() {
        let a = StudentSubmission::new("Maria".to_string(), Vec::new());
        let b = StudentSubmission::new("Maria".to_string(), Vec::new());
        assert_ne!(a.id, b.id);
    }
}
