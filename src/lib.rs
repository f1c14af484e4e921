//! # rust-quizgen
//!
//! Generates printable, randomized versions of a quiz and a matching answer
//! key for each version.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rust_quizgen::{App, GenerateOptions, QuizError, load_bank, write_versions};
//!
//! fn main() -> Result<(), QuizError> {
//!     // Load the question bank
//!     let bank = load_bank("questions.yaml")?;
//!
//!     // Render one shuffled version and its answer key
//!     let versions = App::new(bank, GenerateOptions::default()).generate()?;
//!
//!     write_versions("out", "quiz", &versions)?;
//!     Ok(())
//! }
//! ```

mod app;
mod data;
pub mod logging;
pub mod markup;
mod models;
pub mod validation;

use thiserror::Error;

pub use app::{App, GenerateOptions, VersionDocuments};
pub use data::{BankFormat, LoadError, WriteError, load_bank, parse_bank, write_versions};
pub use markup::MarkupPolicy;
pub use models::{
    Answer, AnswerDisplay, DEFAULT_TITLE, MAX_OPTIONS, OptionLabel, Question, QuestionRecord, Quiz,
    QuizBank,
};
pub use validation::{IssueKind, ValidationIssue, ValidationReport};

/// Error type for quiz generation.
#[derive(Debug, Error)]
pub enum QuizError {
    /// Error loading the question bank.
    #[error("failed to load questions: {0}")]
    Load(#[from] LoadError),
    /// The question bank has invalid questions.
    #[error(transparent)]
    Validation(#[from] ValidationReport),
    /// Error writing the generated documents.
    #[error("failed to write documents: {0}")]
    Write(#[from] WriteError),
}
