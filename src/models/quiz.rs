use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;

use super::question::{AnswerDisplay, Question, QuestionRecord};
use crate::markup::{ListStyle, MarkupPolicy, document, ordered_list};
use crate::validation::ValidationReport;

pub const DEFAULT_TITLE: &str = "My Quiz";

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

/// A question bank as read from disk.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuizBank {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub css: String,
    pub questions: Vec<QuestionRecord>,
}

impl QuizBank {
    pub fn new(questions: Vec<QuestionRecord>) -> Self {
        Self {
            title: default_title(),
            css: String::new(),
            questions,
        }
    }
}

/// An ordered set of questions making up one version of a quiz.
///
/// Shuffling mutates the quiz in place, so each version is built from the
/// original records with [`Quiz::from_question_list`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    questions: Vec<Question>,
}

impl Quiz {
    /// Builds a quiz from raw records, keeping their order.
    ///
    /// Every record is checked first; if any is invalid no question is
    /// built and the report lists all problems.
    pub fn from_question_list(records: &[QuestionRecord], policy: &MarkupPolicy) -> Result<Self, ValidationReport> {
        let mut report = ValidationReport::default();
        let mut questions = Vec::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            match Question::from_record(record.clone(), policy) {
                Ok(question) => questions.push(question),
                Err(issues) => report.extend(index + 1, issues),
            }
        }

        if report.is_empty() {
            Ok(Self { questions })
        } else {
            Err(report)
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Shuffles question order, then the options of every question.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.questions.shuffle(rng);
        for question in &mut self.questions {
            question.shuffle(rng);
        }
    }

    /// Renders the test document for `version`.
    pub fn render_test(&self, title: &str, css: &str, version: usize) -> String {
        let body = ordered_list(
            self.questions.iter().map(Question::render_test),
            ListStyle::Numeric,
        );
        let description = format!("Version {}: {} questions", version, self.questions.len());
        document(css, title, &description, &body)
    }

    /// Renders the answer key for `version`.
    pub fn render_answer_key(
        &self,
        title: &str,
        css: &str,
        version: usize,
        verbose: bool,
        display: AnswerDisplay,
    ) -> String {
        let body = ordered_list(
            self.questions
                .iter()
                .map(|question| question.render_answer_key(verbose, display)),
            ListStyle::Numeric,
        );
        let description = format!("Version {}: Answer Key", version);
        document(css, title, &description, &body)
    }
}
