use crate::catalog::{Question, QUESTIONS};
use crate::submission::{AnswerValue, StudentResponse, StudentSubmission};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    Answering(usize),
    Finished,
}

/// One student's pass through the questionnaire: welcome, one screen per
/// catalog question, done. Answers live only inside the session and are
/// projected into an immutable [`StudentSubmission`] when the last question
/// is left.
///
/// Transitions invoked from the wrong state are no-ops; `answer` trusts the
/// caller to pass a value matching the current question's response type.
pub struct Session {
    catalog: &'static [Question],
    screen: Screen,
    student_name: String,
    answers: BTreeMap<&'static str, AnswerValue>,
}

impl Session {
    pub fn new() -> Self {
        Self::with_catalog(QUESTIONS)
    }

    fn with_catalog(catalog: &'static [Question]) -> Self {
        Self {
            catalog,
            screen: Screen::Welcome,
            student_name: String::new(),
            answers: BTreeMap::new(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn student_name(&self) -> &str {
        &self.student_name
    }

    pub fn current_question(&self) -> Option<&'static Question> {
        match self.screen {
            Screen::Answering(index) => self.catalog.get(index),
            _ => None,
        }
    }

    pub fn current_answer(&self) -> Option<&AnswerValue> {
        self.current_question()
            .and_then(|question| self.answers.get(question.id))
    }

    /// Fraction of the questionnaire reached, for the progress bar.
    pub fn progress(&self) -> f32 {
        match self.screen {
            Screen::Welcome => 0.0,
            Screen::Answering(index) => (index + 1) as f32 / self.catalog.len() as f32,
            Screen::Finished => 1.0,
        }
    }

    pub fn is_last_question(&self) -> bool {
        matches!(self.screen, Screen::Answering(index) if index + 1 == self.catalog.len())
    }

    /// The `next` guard: the current question has an answer entry. An empty
    /// text answer counts; text responses are never required to be non-empty.
    pub fn can_proceed(&self) -> bool {
        self.current_question()
            .is_some_and(|question| self.answers.contains_key(question.id))
    }

    /// Leaves the welcome screen. The name is trimmed before storage and the
    /// transition is blocked when nothing remains.
    pub fn start(&mut self, name: &str) -> bool {
        if self.screen != Screen::Welcome {
            return false;
        }
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return false;
        }

        self.student_name = trimmed.to_string();
        self.answers.clear();
        self.screen = Screen::Answering(0);
        true
    }

    /// Upserts the answer for the current question without advancing.
    pub fn answer(&mut self, value: AnswerValue) {
        if let Some(question) = self.current_question() {
            self.answers.insert(question.id, value);
        }
    }

    /// Advances to the next question, or finishes the session when leaving
    /// the last one. Returns the built submission on that final transition so
    /// the caller can append it to the store. Blocked (returns `None`, state
    /// unchanged) while the current question has no answer.
    pub fn next(&mut self) -> Option<StudentSubmission> {
        let Screen::Answering(index) = self.screen else {
            return None;
        };
        if !self.can_proceed() {
            return None;
        }

        if index + 1 < self.catalog.len() {
            self.screen = Screen::Answering(index + 1);
            return None;
        }

        let submission =
            StudentSubmission::new(self.student_name.clone(), self.project_responses());
        self.screen = Screen::Finished;
        Some(submission)
    }

    /// Steps back one question. Never guarded and never touches answers.
    pub fn prev(&mut self) {
        if let Screen::Answering(index) = self.screen {
            if index > 0 {
                self.screen = Screen::Answering(index - 1);
            }
        }
    }

    /// Back to the welcome screen for the next student.
    pub fn reset(&mut self) {
        self.student_name.clear();
        self.answers.clear();
        self.screen = Screen::Welcome;
    }

    /// Answered questions only, in catalog order, each with its last-written
    /// value.
    fn project_responses(&self) -> Vec<StudentResponse> {
        self.catalog
            .iter()
            .filter_map(|question| {
                self.answers.get(question.id).map(|value| StudentResponse {
                    question_id: question.id.to_string(),
                    value: value.clone(),
                })
            })
            .collect()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
