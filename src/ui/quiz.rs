use std::collections::BTreeSet;

use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use crate::app::App;
use crate::models::{Question, QuestionType};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let question = app.current_question();

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_progress(frame, chunks[0], app, question);
    render_question_text(frame, chunks[1], &question.prompt);
    render_options(frame, chunks[2], question, app.cursor(), app.pending());
    render_controls(frame, chunks[3], question.kind);
}

fn type_label(kind: QuestionType) -> &'static str {
    match kind {
        QuestionType::Single => "单选题",
        QuestionType::Boolean => "判断题",
        QuestionType::Multiple => "多选题",
    }
}

fn render_progress(frame: &mut Frame, area: Rect, app: &App, question: &Question) {
    let progress = format!(
        "{} · {} pts    {}/{}",
        type_label(question.kind),
        question.score,
        app.current_question_number(),
        app.total_questions()
    );
    let widget = Paragraph::new(progress)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    cursor: usize,
    pending: &BTreeSet<String>,
) {
    let multi = question.kind.allows_many();
    let mut lines: Vec<Line> = Vec::with_capacity(question.options.len() * 2);

    for (index, option) in question.options.iter().enumerate() {
        let is_cursor = index == cursor;
        let is_checked = pending.contains(&option.key);
        let style = if is_cursor {
            Style::default().fg(Color::Cyan).bold()
        } else if is_checked {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_cursor { ">" } else { " " };

        let mut spans = vec![Span::styled(format!(" {} ", marker), style)];
        if multi {
            let check = if is_checked { "[x] " } else { "[ ] " };
            spans.push(Span::styled(check, style));
        }
        spans.push(Span::styled(format!("{}. ", option.key), style));
        spans.push(Span::styled(option.label.as_str(), style));

        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, kind: QuestionType) {
    let hint = if kind.allows_many() {
        "j/k navigate  ·  space toggle  ·  enter submit  ·  q quit"
    } else {
        "j/k navigate  ·  enter select  ·  q quit"
    };
    let widget = Paragraph::new(hint)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
