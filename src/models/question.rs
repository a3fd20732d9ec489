use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// How a question is answered and judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    /// Exactly one option is correct.
    Single,
    /// A true/false statement with two options.
    Boolean,
    /// Two or more options must be picked together.
    Multiple,
}

impl QuestionType {
    /// Whether more than one option may be selected at once.
    pub fn allows_many(self) -> bool {
        matches!(self, QuestionType::Multiple)
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            QuestionType::Single => "single",
            QuestionType::Boolean => "boolean",
            QuestionType::Multiple => "multiple",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    pub key: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub prompt: String,
    pub options: Vec<QuizOption>,
    pub correct_keys: BTreeSet<String>,
    pub score: u32,
}

impl Question {
    /// Judge a selection against the correct key set.
    ///
    /// Keys that are not options of this question are never correct, but they
    /// never make grading fail either.
    pub fn is_correct(&self, selected: &BTreeSet<String>) -> bool {
        match self.kind {
            QuestionType::Single | QuestionType::Boolean => {
                selected.len() == 1
                    && self.correct_keys.len() == 1
                    && *selected == self.correct_keys
            }
            QuestionType::Multiple => !selected.is_empty() && *selected == self.correct_keys,
        }
    }

    /// Look up an option by its key.
    pub fn option(&self, key: &str) -> Option<&QuizOption> {
        self.options.iter().find(|option| option.key == key)
    }

    pub fn has_option(&self, key: &str) -> bool {
        self.option(key).is_some()
    }
}
