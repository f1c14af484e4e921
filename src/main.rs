use std::fs;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Parser;
use rust_quizgen::logging::init_logging;
use rust_quizgen::{AnswerDisplay, App, GenerateOptions, QuizError, load_bank, write_versions};
use tracing::info;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Question bank to load (.json, .yaml or .yml)
    questions: PathBuf,

    /// Directory the documents are written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Number of versions to generate
    #[arg(short, long = "nversions", default_value = "1")]
    nversions: NonZeroUsize,

    /// Keep questions and options in bank order
    #[arg(long)]
    no_shuffle: bool,

    /// Repeat each question in the answer key
    #[arg(long)]
    verbose_key: bool,

    /// Show the correct option's text in the answer key instead of its letter
    #[arg(long)]
    answer_text: bool,

    /// Seed for reproducible shuffling
    #[arg(long, env = "QUIZGEN_SEED")]
    seed: Option<u64>,

    /// Stylesheet file replacing the bank's css
    #[arg(long)]
    css: Option<PathBuf>,

    /// Base name of the generated files (defaults to the bank's file name)
    #[arg(long)]
    stem: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn generate_options(&self) -> GenerateOptions {
        GenerateOptions {
            versions: self.nversions,
            shuffle: !self.no_shuffle,
            verbose_key: self.verbose_key,
            answer_display: if self.answer_text {
                AnswerDisplay::OptionText
            } else {
                AnswerDisplay::Letter
            },
            seed: self.seed,
            ..GenerateOptions::default()
        }
    }

    fn stem(&self) -> String {
        self.stem.clone().unwrap_or_else(|| {
            self.questions
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "quiz".to_string())
        })
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut bank = load_bank(&args.questions).map_err(QuizError::from)?;
    if let Some(css_path) = &args.css {
        bank.css = fs::read_to_string(css_path)
            .map_err(|e| format!("failed to read stylesheet {}: {}", css_path.display(), e))?;
    }

    let app = App::new(bank, args.generate_options());
    let versions = app.generate().map_err(QuizError::from)?;
    let written = write_versions(&args.output_dir, &args.stem(), &versions).map_err(QuizError::from)?;

    for path in &written {
        info!(path = %path.display(), "generated");
    }
    println!(
        "Generated {} version(s) in {}",
        versions.len(),
        args.output_dir.display()
    );
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
