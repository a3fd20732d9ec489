use std::collections::BTreeSet;

use crate::data::question_bank;
use crate::grading::{AnswerSheet, GradeReport, grade};
use crate::models::{AppState, Question};

pub struct App {
    pub state: AppState,
    questions: Vec<Question>,
    current_question_index: usize,
    cursor: usize,
    pending: BTreeSet<String>,
    answers: AnswerSheet,
    result_scroll: usize,
}

impl App {
    /// An app over the built-in question bank.
    pub fn new() -> Self {
        Self::with_questions(question_bank().to_vec())
    }

    pub fn with_questions(questions: Vec<Question>) -> Self {
        Self {
            state: AppState::Welcome,
            questions,
            current_question_index: 0,
            cursor: 0,
            pending: BTreeSet::new(),
            answers: AnswerSheet::new(),
            result_scroll: 0,
        }
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_question_index]
    }

    pub fn current_question_number(&self) -> usize {
        self.current_question_index + 1
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Keys toggled so far on the current multi-select question.
    pub fn pending(&self) -> &BTreeSet<String> {
        &self.pending
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    fn option_count(&self) -> usize {
        self.current_question().options.len().max(1)
    }

    pub fn select_next_option(&mut self) {
        if self.questions.is_empty() {
            return;
        }
        self.cursor = (self.cursor + 1) % self.option_count();
    }

    pub fn select_previous_option(&mut self) {
        if self.questions.is_empty() {
            return;
        }
        let count = self.option_count();
        self.cursor = (self.cursor + count - 1) % count;
    }

    pub fn start_quiz(&mut self) {
        if !self.questions.is_empty() {
            self.state = AppState::Quiz;
        }
    }

    /// Space on a question: toggles for multi-select, answers otherwise.
    pub fn toggle_option(&mut self) {
        if self.questions.is_empty() {
            return;
        }
        if self.current_question().kind.allows_many() {
            if let Some(key) = self.cursor_key() {
                if !self.pending.remove(&key) {
                    self.pending.insert(key);
                }
            }
        } else {
            self.submit_answer();
        }
    }

    /// Enter on a question: answers with the highlighted option, or with the
    /// toggled set for multi-select. An empty multi-select is ignored.
    pub fn submit_answer(&mut self) {
        if self.questions.is_empty() {
            return;
        }
        let question = self.current_question();
        let selection = if question.kind.allows_many() {
            if self.pending.is_empty() {
                return;
            }
            std::mem::take(&mut self.pending)
        } else {
            match self.cursor_key() {
                Some(key) => BTreeSet::from([key]),
                None => return,
            }
        };

        let id = self.current_question().id;
        self.answers.answer(id, selection);
        self.current_question_index += 1;
        self.cursor = 0;
        self.pending.clear();

        if self.current_question_index >= self.questions.len() {
            self.current_question_index = self.questions.len() - 1;
            self.state = AppState::Result;
        }
    }

    fn cursor_key(&self) -> Option<String> {
        self.current_question()
            .options
            .get(self.cursor)
            .map(|option| option.key.clone())
    }

    pub fn calculate_score(&self) -> GradeReport {
        grade(&self.questions, &self.answers)
    }

    pub fn scroll_results_down(&mut self) {
        if self.result_scroll + 1 < self.questions.len() {
            self.result_scroll += 1;
        }
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    pub fn restart(&mut self) {
        self.state = AppState::Welcome;
        self.current_question_index = 0;
        self.cursor = 0;
        self.pending.clear();
        self.answers.clear();
        self.result_scroll = 0;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
