//! Scoring a set of answers against a question bank.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::models::Question;

/// A user's selected option keys, by question id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSheet {
    selections: BTreeMap<u32, BTreeSet<String>>,
}

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the selection for a question, replacing any earlier one.
    pub fn answer<I, K>(&mut self, question_id: u32, keys: I)
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.selections
            .insert(question_id, keys.into_iter().map(Into::<String>::into).collect());
    }

    pub fn selection(&self, question_id: u32) -> Option<&BTreeSet<String>> {
        self.selections.get(&question_id)
    }

    pub fn answered_count(&self) -> usize {
        self.selections.len()
    }

    pub fn clear(&mut self) {
        self.selections.clear();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionResult {
    pub id: u32,
    pub correct: bool,
    pub awarded: u32,
    pub max: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradeReport {
    pub results: Vec<QuestionResult>,
    pub total_score: u64,
    pub max_score: u64,
}

impl GradeReport {
    pub fn correct_count(&self) -> usize {
        self.results.iter().filter(|r| r.correct).count()
    }

    pub fn percentage(&self) -> f64 {
        if self.max_score > 0 {
            (self.total_score as f64 / self.max_score as f64) * 100.0
        } else {
            0.0
        }
    }

    pub fn result_for(&self, question_id: u32) -> Option<&QuestionResult> {
        self.results.iter().find(|r| r.id == question_id)
    }
}

/// Grade every question in the bank.
///
/// Unanswered questions and selections naming unknown keys grade as incorrect.
pub fn grade(bank: &[Question], answers: &AnswerSheet) -> GradeReport {
    let results: Vec<QuestionResult> = bank
        .iter()
        .map(|question| {
            let correct = answers
                .selection(question.id)
                .is_some_and(|selected| question.is_correct(selected));
            QuestionResult {
                id: question.id,
                correct,
                awarded: if correct { question.score } else { 0 },
                max: question.score,
            }
        })
        .collect();

    GradeReport {
        total_score: results.iter().map(|r| u64::from(r.awarded)).sum(),
        max_score: results.iter().map(|r| u64::from(r.max)).sum(),
        results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::question_bank;

    fn perfect_sheet(bank: &[Question]) -> AnswerSheet {
        let mut sheet = AnswerSheet::new();
        for q in bank {
            sheet.answer(q.id, q.correct_keys.iter().cloned());
        }
        sheet
    }

    #[test]
    fn test_perfect_run_scores_100() {
        let bank = question_bank();
        let report = grade(bank, &perfect_sheet(bank));

        assert_eq!(report.total_score, 100);
        assert_eq!(report.max_score, 100);
        assert_eq!(report.correct_count(), 20);
        assert_eq!(report.percentage(), 100.0);
    }

    #[test]
    fn test_empty_sheet_scores_zero() {
        let report = grade(question_bank(), &AnswerSheet::new());
        assert_eq!(report.total_score, 0);
        assert_eq!(report.max_score, 100);
        assert_eq!(report.results.len(), 20);
    }

    #[test]
    fn test_all_four_on_question_17_awards_8() {
        let mut sheet = AnswerSheet::new();
        sheet.answer(17, ["A", "B", "C", "D"]);
        let report = grade(question_bank(), &sheet);

        let result = report.result_for(17).unwrap();
        assert!(result.correct);
        assert_eq!(result.awarded, 8);
        assert_eq!(report.total_score, 8);
    }

    #[test]
    fn test_subset_of_multiple_is_incorrect() {
        let mut sheet = AnswerSheet::new();
        sheet.answer(16, ["B"]);
        let report = grade(question_bank(), &sheet);

        let result = report.result_for(16).unwrap();
        assert!(!result.correct);
        assert_eq!(result.awarded, 0);
    }

    #[test]
    fn test_unknown_keys_do_not_fail_grading() {
        let mut sheet = AnswerSheet::new();
        sheet.answer(1, ["Z"]);
        sheet.answer(999, ["A"]);
        let report = grade(question_bank(), &sheet);

        assert!(!report.result_for(1).unwrap().correct);
        assert!(report.result_for(999).is_none());
        assert_eq!(report.total_score, 0);
    }

    #[test]
    fn test_results_follow_bank_order() {
        let report = grade(question_bank(), &AnswerSheet::new());
        let ids: Vec<u32> = report.results.iter().map(|r| r.id).collect();
        assert_eq!(ids, (1..=20).collect::<Vec<_>>());
    }

    #[test]
    fn test_large_scores_do_not_overflow_totals() {
        let mut bank: Vec<Question> = question_bank()[..2].to_vec();
        bank[0].score = 3_000_000_000;
        bank[1].score = 3_000_000_000;
        assert!(crate::data::validate_bank(&bank).is_ok());

        let report = grade(&bank, &perfect_sheet(&bank));
        assert_eq!(report.total_score, 6_000_000_000);
        assert_eq!(report.max_score, 6_000_000_000);
        assert_eq!(report.percentage(), 100.0);

        let report = grade(&bank, &AnswerSheet::new());
        assert_eq!(report.total_score, 0);
        assert_eq!(report.max_score, 6_000_000_000);
    }

    #[test]
    fn test_answer_sheet_json_shape() {
        let sheet: AnswerSheet = serde_json::from_str(r#"{"1": ["B"], "16": ["C", "B"]}"#).unwrap();
        let report = grade(question_bank(), &sheet);

        assert_eq!(report.total_score, 12);
        assert_eq!(sheet.answered_count(), 2);
    }
}
