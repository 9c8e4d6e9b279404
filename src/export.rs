use crate::catalog::{rating_label, Question};
use crate::submission::{AnswerValue, StudentSubmission};
use chrono::NaiveDate;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Quotes one CSV field, doubling embedded quote characters. Every field is
/// quoted so free-text answers with commas or newlines survive as-is.
fn quote_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn answer_field(submission: &StudentSubmission, question: &Question) -> String {
    let answer = submission
        .responses
        .iter()
        .find(|response| response.question_id == question.id);
    let rendered = match answer.map(|response| &response.value) {
        Some(AnswerValue::Rating(value)) => format!("{} ({value})", rating_label(*value)),
        Some(AnswerValue::Text(text)) => text.clone(),
        None => String::new(),
    };
    quote_field(&rendered)
}

/// Builds the full CSV text: a header of name, date and the question prompts
/// in catalog order, then one row per submission in store order.
pub fn build_csv(submissions: &[StudentSubmission], questions: &[Question]) -> String {
    let mut header = vec![quote_field("Nom"), quote_field("Data")];
    header.extend(questions.iter().map(|question| quote_field(question.text)));

    let mut lines = vec![header.join(",")];
    for submission in submissions {
        let mut row = vec![
            quote_field(&submission.student_name),
            quote_field(&submission.date.format("%d/%m/%Y").to_string()),
        ];
        row.extend(
            questions
                .iter()
                .map(|question| answer_field(submission, question)),
        );
        lines.push(row.join(","));
    }

    lines.join("\n")
}

pub fn export_filename(date: NaiveDate) -> String {
    format!("autoavaluacio_resultats_{}.csv", date.format("%Y-%m-%d"))
}

/// One-shot write of the export artifact into `dir`, named with the given
/// date. Returns the path of the written file.
pub fn write_csv(
    dir: &Path,
    date: NaiveDate,
    submissions: &[StudentSubmission],
    questions: &[Question],
) -> io::Result<PathBuf> {
    let path = dir.join(export_filename(date));
    fs::write(&path, build_csv(submissions, questions))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::{build_csv, export_filename, quote_field};
    use crate::catalog::QUESTIONS;
    use crate::submission::{AnswerValue, StudentResponse, StudentSubmission};
    use chrono::NaiveDate;

    fn submission_with(responses: Vec<StudentResponse>) -> StudentSubmission {
        StudentSubmission::new("Maria".to_string(), responses)
    }

    #[test]
    fn every_field_is_quoted_and_embedded_quotes_are_doubled() {
        assert_eq!(quote_field("Maria"), "\"Maria\"");
        assert_eq!(quote_field("He said \"hi\""), "\"He said \"\"hi\"\"\"");
    }

    #[test]
    fn header_lists_name_date_and_every_question_prompt() {
        let csv = build_csv(&[], QUESTIONS);
        let header = csv.lines().next().expect("header row expected");
        assert!(header.starts_with("\"Nom\",\"Data\""));
        for question in QUESTIONS {
            assert!(header.contains(&format!("\"{}\"", question.text)));
        }
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn ratings_are_exported_as_banded_labels() {
        let submission = submission_with(vec![StudentResponse {
            question_id: "q1".to_string(),
            value: AnswerValue::Rating(3),
        }]);
        let csv = build_csv(&[submission], QUESTIONS);
        let row = csv.lines().nth(1).expect("data row expected");
        assert!(row.contains("\"Bé (3)\""));
    }

    #[test]
    fn text_answers_with_quotes_are_escaped() {
        let submission = submission_with(vec![StudentResponse {
            question_id: "q8".to_string(),
            value: AnswerValue::text("He said \"hi\""),
        }]);
        let csv = build_csv(&[submission], QUESTIONS);
        let row = csv.lines().nth(1).expect("data row expected");
        assert!(row.contains("\"He said \"\"hi\"\"\""));
    }

    #[test]
    fn unanswered_questions_render_as_empty_quoted_fields() {
        let submission = submission_with(Vec::new());
        let csv = build_csv(&[submission], QUESTIONS);
        let row = csv.lines().nth(1).expect("data row expected");
        // Name and date, then one empty field per catalog question.
        let empties = row.matches("\"\"").count();
        assert_eq!(empties, QUESTIONS.len());
    }

    #[test]
    fn rows_keep_store_order() {
        let first = StudentSubmission::new("Anna".to_string(), Vec::new());
        let second = StudentSubmission::new("Biel".to_string(), Vec::new());
        let csv = build_csv(&[first, second], QUESTIONS);
        let rows: Vec<&str> = csv.lines().skip(1).collect();
        assert!(rows[0].starts_with("\"Anna\""));
        assert!(rows[1].starts_with("\"Biel\""));
    }

    #[test]
    fn export_filename_carries_the_iso_date() {
        let date = NaiveDate::from_ymd_opt(2026, 6, 19).expect("valid date");
        assert_eq!(
            export_filename(date),
            "autoavaluacio_resultats_2026-06-19.csv"
        );
    }
}
