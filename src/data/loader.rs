use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::models::QuizBank;

/// Error loading a question bank.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON question bank: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML question bank: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unsupported question bank format {} (expected .json, .yaml or .yml)", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("question bank must contain at least one question")]
    Empty,
}

/// On-disk format of a question bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankFormat {
    Json,
    Yaml,
}

impl BankFormat {
    /// Picks the format from the file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Parses a question bank from text.
pub fn parse_bank(content: &str, format: BankFormat) -> Result<QuizBank, LoadError> {
    let bank: QuizBank = match format {
        BankFormat::Json => serde_json::from_str(content)?,
        BankFormat::Yaml => serde_yaml::from_str(content)?,
    };

    if bank.questions.is_empty() {
        return Err(LoadError::Empty);
    }

    Ok(bank)
}

/// Reads and parses the question bank at `path`.
pub fn load_bank<P: AsRef<Path>>(path: P) -> Result<QuizBank, LoadError> {
    let path = path.as_ref();
    let format =
        BankFormat::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat(path.to_path_buf()))?;
    debug!(path = %path.display(), ?format, "reading question bank");

    let content = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let bank = parse_bank(&content, format)?;
    info!(
        path = %path.display(),
        title = %bank.title,
        questions = bank.questions.len(),
        "loaded question bank"
    );
    Ok(bank)
}
