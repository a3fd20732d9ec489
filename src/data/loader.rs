use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use super::validate::{BankError, validate_bank};
use crate::models::Question;

/// Error loading a question bank from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{} must contain at least one question", .path.display())]
    Empty { path: PathBuf },
    #[error("{} is not a valid question bank: {source}", .path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: BankError,
    },
}

/// Load a question bank from a JSON array of questions.
///
/// The bank is validated and returned in id order.
pub fn load_questions_from_json<P: AsRef<Path>>(path: P) -> Result<Vec<Question>, LoadError> {
    let path = path.as_ref();

    let json_content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut questions: Vec<Question> =
        serde_json::from_str(&json_content).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    if questions.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    validate_bank(&questions).map_err(|source| LoadError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;

    questions.sort_by_key(|q| q.id);
    debug!(count = questions.len(), path = %path.display(), "loaded question bank");

    Ok(questions)
}
