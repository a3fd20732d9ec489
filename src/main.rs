use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use etiquette_quiz::{AnswerSheet, Quiz, grade};
use thiserror::Error;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file to load the questions from instead of the built-in bank
    #[arg(short, long)]
    questions: Option<PathBuf>,

    /// Grade a JSON answer sheet and print the report instead of starting the TUI
    #[arg(short, long, value_name = "ANSWERS")]
    grade: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let quiz = match &args.questions {
        Some(path) => match Quiz::from_json(path) {
            Ok(quiz) => quiz,
            Err(e) => {
                eprintln!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => Quiz::builtin(),
    };

    if let Some(answers_path) = args.grade {
        init_logging();
        return match grade_file(&quiz, &answers_path) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("{}", e);
                ExitCode::FAILURE
            }
        };
    }

    match quiz.run() {
        Ok(report) => {
            println!(
                "Score: {} / {} ({} of {} correct)",
                report.total_score,
                report.max_score,
                report.correct_count(),
                report.results.len()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error running quiz: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Debug, Error)]
enum GradeFileError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to encode report: {0}")]
    Encode(#[source] serde_json::Error),
}

fn grade_file(quiz: &Quiz, path: &Path) -> Result<String, GradeFileError> {
    let content = fs::read_to_string(path).map_err(|source| GradeFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let answers: AnswerSheet =
        serde_json::from_str(&content).map_err(|source| GradeFileError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let report = grade(quiz.app().questions(), &answers);
    serde_json::to_string_pretty(&report).map_err(GradeFileError::Encode)
}
