//! Question bank validation.
//!
//! Every record is checked before any question is built. All problems are
//! collected so the author can fix the whole bank in one pass.

use std::fmt;

use thiserror::Error;

use crate::models::{DEFAULT_ANSWER, MAX_OPTIONS, OptionLabel, QuestionRecord};

/// A single problem with a question record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IssueKind {
    #[error("missing required prompt")]
    MissingPrompt,

    #[error("answer {answer:?} is not a letter between 'a' and 'f'")]
    InvalidAnswer { answer: String },

    #[error("answer '{answer}' does not match any of the {options} options")]
    AnswerOutOfRange { answer: char, options: usize },

    #[error("{count} options given, at most {max} are supported", max = MAX_OPTIONS)]
    TooManyOptions { count: usize },

    #[error("options list is empty")]
    NoOptions,
}

/// An issue tied to the 1-based position of its question in the bank.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("question {question}: {kind}")]
pub struct ValidationIssue {
    pub question: usize,
    pub kind: IssueKind,
}

/// Every issue found in a question bank.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub(crate) fn extend(&mut self, question: usize, kinds: Vec<IssueKind>) {
        self.issues
            .extend(kinds.into_iter().map(|kind| ValidationIssue { question, kind }));
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "question bank has {} problem(s)", self.issues.len())?;
        for issue in &self.issues {
            write!(f, "\n  {}", issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}

/// Returns every problem with a single record.
pub fn check_record(record: &QuestionRecord) -> Vec<IssueKind> {
    let mut issues = Vec::new();

    if record.prompt.as_deref().is_none_or(|p| p.trim().is_empty()) {
        issues.push(IssueKind::MissingPrompt);
    }

    // Free-response answers are printed verbatim and need no checking.
    let Some(options) = &record.options else {
        return issues;
    };

    if options.is_empty() {
        issues.push(IssueKind::NoOptions);
        return issues;
    }
    if options.len() > MAX_OPTIONS {
        issues.push(IssueKind::TooManyOptions {
            count: options.len(),
        });
    }

    let answer = record.answer.as_deref().unwrap_or(DEFAULT_ANSWER);
    match OptionLabel::from_letter(answer) {
        None => issues.push(IssueKind::InvalidAnswer {
            answer: answer.to_string(),
        }),
        Some(label) if label.index() >= options.len() => {
            issues.push(IssueKind::AnswerOutOfRange {
                answer: label.letter(),
                options: options.len(),
            })
        }
        Some(_) => {}
    }

    issues
}

/// Checks every record of a bank, failing with the full report if any
/// record is invalid.
pub fn validate_records(records: &[QuestionRecord]) -> Result<(), ValidationReport> {
    let mut report = ValidationReport::default();
    for (index, record) in records.iter().enumerate() {
        report.extend(index + 1, check_record(record));
    }

    if report.is_empty() {
        Ok(())
    } else {
        Err(report)
    }
}
