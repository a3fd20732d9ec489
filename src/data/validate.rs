use std::collections::HashSet;

use thiserror::Error;

use crate::models::{Question, QuestionType};

/// A question bank invariant that does not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BankError {
    #[error("question id {0} appears more than once")]
    DuplicateId(u32),
    #[error("question id must be positive")]
    ZeroId,
    #[error("question {id}: option key {key:?} is repeated")]
    DuplicateOptionKey { id: u32, key: String },
    #[error("question {0} has no correct answer")]
    NoCorrectKeys(u32),
    #[error("question {id}: correct key {key:?} is not one of its options")]
    UnknownCorrectKey { id: u32, key: String },
    #[error("question {id} is {kind} but has {count} correct keys")]
    WrongCorrectCount {
        id: u32,
        kind: QuestionType,
        count: usize,
    },
    #[error("boolean question {id} has {count} options, expected 2")]
    BooleanOptionCount { id: u32, count: usize },
    #[error("question {0} is worth zero points")]
    ZeroScore(u32),
}

/// Check every invariant a question bank must satisfy.
pub fn validate_bank(bank: &[Question]) -> Result<(), BankError> {
    let mut seen_ids = HashSet::new();

    for question in bank {
        if question.id == 0 {
            return Err(BankError::ZeroId);
        }
        if !seen_ids.insert(question.id) {
            return Err(BankError::DuplicateId(question.id));
        }
        validate_question(question)?;
    }

    Ok(())
}

fn validate_question(question: &Question) -> Result<(), BankError> {
    let id = question.id;

    let mut keys = HashSet::new();
    for option in &question.options {
        if !keys.insert(option.key.as_str()) {
            return Err(BankError::DuplicateOptionKey {
                id,
                key: option.key.clone(),
            });
        }
    }

    if question.correct_keys.is_empty() {
        return Err(BankError::NoCorrectKeys(id));
    }

    if let Some(key) = question
        .correct_keys
        .iter()
        .find(|key| !keys.contains(key.as_str()))
    {
        return Err(BankError::UnknownCorrectKey {
            id,
            key: key.clone(),
        });
    }

    let count = question.correct_keys.len();
    let count_ok = match question.kind {
        QuestionType::Single | QuestionType::Boolean => count == 1,
        QuestionType::Multiple => count >= 2,
    };
    if !count_ok {
        return Err(BankError::WrongCorrectCount {
            id,
            kind: question.kind,
            count,
        });
    }

    if question.kind == QuestionType::Boolean && question.options.len() != 2 {
        return Err(BankError::BooleanOptionCount {
            id,
            count: question.options.len(),
        });
    }

    if question.score == 0 {
        return Err(BankError::ZeroScore(id));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::question_bank;

    fn sample() -> Vec<Question> {
        question_bank().iter().take(3).cloned().collect()
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut bank = sample();
        bank[1].id = bank[0].id;
        assert_eq!(validate_bank(&bank), Err(BankError::DuplicateId(1)));
    }

    #[test]
    fn test_correct_key_must_be_an_option() {
        let mut bank = sample();
        bank[0].correct_keys = ["E".to_string()].into_iter().collect();
        assert!(matches!(
            validate_bank(&bank),
            Err(BankError::UnknownCorrectKey { id: 1, .. })
        ));
    }

    #[test]
    fn test_single_with_two_answers_rejected() {
        let mut bank = sample();
        bank[0].correct_keys = ["A".to_string(), "B".to_string()].into_iter().collect();
        assert!(matches!(
            validate_bank(&bank),
            Err(BankError::WrongCorrectCount { id: 1, count: 2, .. })
        ));
    }

    #[test]
    fn test_boolean_needs_two_options() {
        let mut question = question_bank()[11].clone();
        question.options.pop();
        assert!(matches!(
            validate_bank(&[question]),
            Err(BankError::BooleanOptionCount { count: 1, .. })
        ));
    }

    #[test]
    fn test_empty_answer_rejected() {
        let mut bank = sample();
        bank[2].correct_keys.clear();
        assert_eq!(validate_bank(&bank), Err(BankError::NoCorrectKeys(3)));
    }
}
