use std::num::NonZeroUsize;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::markup::MarkupPolicy;
use crate::models::{AnswerDisplay, Quiz, QuizBank};
use crate::validation::{ValidationReport, validate_records};

/// Settings for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Number of independent versions to render.
    pub versions: NonZeroUsize,
    /// Shuffle question and option order. When false every version is
    /// rendered in bank order.
    pub shuffle: bool,
    /// Repeat prompt and resource in the answer key.
    pub verbose_key: bool,
    pub answer_display: AnswerDisplay,
    /// Seed for reproducible output; OS entropy is used when `None`.
    pub seed: Option<u64>,
    pub markup: MarkupPolicy,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            versions: NonZeroUsize::MIN,
            shuffle: true,
            verbose_key: false,
            answer_display: AnswerDisplay::default(),
            seed: None,
            markup: MarkupPolicy::default(),
        }
    }
}

/// The rendered documents of one version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionDocuments {
    /// 1-based version number.
    pub number: usize,
    pub test: String,
    pub answer_key: String,
}

pub struct App {
    bank: QuizBank,
    options: GenerateOptions,
}

impl App {
    pub fn new(bank: QuizBank, options: GenerateOptions) -> Self {
        Self { bank, options }
    }

    pub fn bank(&self) -> &QuizBank {
        &self.bank
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    pub fn total_questions(&self) -> usize {
        self.bank.questions.len()
    }

    /// Renders every version, using a generator seeded from the options.
    pub fn generate(&self) -> Result<Vec<VersionDocuments>, ValidationReport> {
        let mut rng = match self.options.seed {
            Some(seed) => {
                debug!(seed, "using seeded generator");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };
        self.generate_with(&mut rng)
    }

    /// Renders every version with the given random source.
    ///
    /// The bank is validated once up front; nothing is rendered if any
    /// question is invalid. Each version is built from the original records
    /// so versions never share state.
    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<VersionDocuments>, ValidationReport> {
        validate_records(&self.bank.questions)?;

        let versions = self.options.versions.get();
        info!(
            versions,
            questions = self.total_questions(),
            shuffle = self.options.shuffle,
            "generating quiz versions"
        );

        (1..=versions)
            .map(|number| self.render_version(number, rng))
            .collect()
    }

    fn render_version<R: Rng + ?Sized>(&self, number: usize, rng: &mut R) -> Result<VersionDocuments, ValidationReport> {
        let mut quiz = Quiz::from_question_list(&self.bank.questions, &self.options.markup)?;
        if self.options.shuffle {
            quiz.shuffle(rng);
        }
        debug!(version = number, questions = quiz.len(), "rendering version");

        let title = &self.bank.title;
        let css = &self.bank.css;
        Ok(VersionDocuments {
            number,
            test: quiz.render_test(title, css, number),
            answer_key: quiz.render_answer_key(
                title,
                css,
                number,
                self.options.verbose_key,
                self.options.answer_display,
            ),
        })
    }
}
