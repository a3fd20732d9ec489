mod question;

pub use question::{Question, QuestionType, QuizOption};

/// Which screen the terminal quiz is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Welcome,
    Quiz,
    Result,
}
