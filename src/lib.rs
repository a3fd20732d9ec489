//! # etiquette-quiz
//!
//! A fixed bank of event-etiquette questions, a pure grading model, a
//! terminal front-end, and the deploy routine that publishes the web build.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use etiquette_quiz::{AnswerSheet, Quiz, QuizError, grade, question_bank};
//!
//! fn main() -> Result<(), QuizError> {
//!     let mut answers = AnswerSheet::new();
//!     answers.answer(17, ["A", "B", "C", "D"]);
//!     let report = grade(question_bank(), &answers);
//!     assert_eq!(report.total_score, 8);
//!
//!     // Run the built-in bank in the terminal
//!     Quiz::builtin().run()?;
//!
//!     Ok(())
//! }
//! ```

mod app;
mod data;
pub mod deploy;
mod grading;
mod models;
pub mod terminal;
mod ui;

use std::io;
use std::path::Path;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use thiserror::Error;

pub use app::App;
pub use data::{BankError, LoadError, load_questions_from_json, question_bank, validate_bank};
pub use grading::{AnswerSheet, GradeReport, QuestionResult, grade};
pub use models::{AppState, Question, QuestionType, QuizOption};

/// Error type for quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    /// Error loading questions from file.
    #[error("Failed to load questions: {0}")]
    Load(#[from] LoadError),
    /// IO error during quiz execution.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A quiz instance that can be run in the terminal.
pub struct Quiz {
    app: App,
}

impl Quiz {
    /// Create a new quiz from a vector of questions.
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            app: App::with_questions(questions),
        }
    }

    /// A quiz over the built-in question bank.
    pub fn builtin() -> Self {
        Self { app: App::new() }
    }

    /// Load a quiz from a JSON file.
    ///
    /// The file must hold a JSON array of questions that passes
    /// [`validate_bank`].
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self, QuizError> {
        let questions = load_questions_from_json(path)?;
        Ok(Self::new(questions))
    }

    /// Run the quiz in the terminal.
    ///
    /// This takes over the terminal until the user quits, then returns the
    /// grade for whatever was answered.
    pub fn run(mut self) -> Result<GradeReport, QuizError> {
        let mut guard = terminal::TerminalGuard::enter()?;
        run_event_loop(guard.terminal(), &mut self.app)?;
        drop(guard);
        Ok(self.app.calculate_score())
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the underlying app for custom handling.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

fn run_event_loop(terminal: &mut terminal::AppTerminal, app: &mut App) -> Result<(), QuizError> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if handle_input(app, key.code) {
                break;
            }
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    match app.state {
        AppState::Welcome => handle_welcome_input(app, key),
        AppState::Quiz => handle_quiz_input(app, key),
        AppState::Result => handle_result_input(app, key),
    }
}

fn handle_welcome_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Enter => {
            app.start_quiz();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_previous_option();
            false
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next_option();
            false
        }
        KeyCode::Char(' ') => {
            app.toggle_option();
            false
        }
        KeyCode::Enter => {
            app.submit_answer();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_result_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Down | KeyCode::Char('j') => {
            app.scroll_results_down();
            false
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.scroll_results_up();
            false
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.restart();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_drive_a_multiple_question() {
        let mut app = App::new();
        assert!(!handle_input(&mut app, KeyCode::Enter));
        assert_eq!(app.state, AppState::Quiz);

        for _ in 0..15 {
            handle_input(&mut app, KeyCode::Enter);
        }
        assert_eq!(app.current_question().id, 16);

        // B and C
        handle_input(&mut app, KeyCode::Char('j'));
        handle_input(&mut app, KeyCode::Char(' '));
        handle_input(&mut app, KeyCode::Down);
        handle_input(&mut app, KeyCode::Char(' '));
        handle_input(&mut app, KeyCode::Enter);

        assert_eq!(app.current_question().id, 17);
        let report = app.calculate_score();
        assert!(report.result_for(16).unwrap().correct);
    }

    #[test]
    fn test_space_answers_single_choice() {
        let mut app = App::new();
        handle_input(&mut app, KeyCode::Enter);
        handle_input(&mut app, KeyCode::Char('j'));
        handle_input(&mut app, KeyCode::Char(' '));

        assert_eq!(app.current_question().id, 2);
        assert!(app.calculate_score().result_for(1).unwrap().correct);
    }

    #[test]
    fn test_quit_from_every_screen() {
        let mut app = App::new();
        assert!(handle_input(&mut app, KeyCode::Char('q')));
        app.start_quiz();
        assert!(handle_input(&mut app, KeyCode::Char('Q')));
        app.state = AppState::Result;
        assert!(handle_input(&mut app, KeyCode::Char('q')));
    }
}
