// src/scoring/grader.rs

use super::{AnswerRecord, GradeError, QuestionType};

/// Base correctness for one answer, in [0, 1].
///
/// NUMBER answers score a provisional 0.0 here: their correctness is
/// relative to the whole cohort and resolved in [`super::numeric`]. An
/// unrecognized question type scores 0.0 with a warning rather than an
/// error, so schema drift cannot take down a live session.
pub fn grade(record: &AnswerRecord) -> Result<f64, GradeError> {
    let Some(kind) = QuestionType::parse(&record.question_type) else {
        tracing::warn!(
            question_id = record.question_id,
            question_type = %record.question_type,
            "unrecognized question type, scoring 0"
        );
        return Ok(0.0);
    };

    match kind {
        QuestionType::Number => Ok(0.0),
        QuestionType::Text => grade_text(record),
        QuestionType::Order => grade_order(record),
        QuestionType::MultipleChoice => grade_multiple_choice(record),
    }
}

/// Case- and punctuation-insensitive match against any correct option.
fn grade_text(record: &AnswerRecord) -> Result<f64, GradeError> {
    let given = record
        .answer
        .first()
        .ok_or_else(|| GradeError::MalformedAnswer("TEXT answer has no value".to_string()))?;
    let given = normalize(given);

    let hit = record
        .correct_options
        .iter()
        .any(|option| normalize(option) == given);

    Ok(if hit { 1.0 } else { 0.0 })
}

/// Fraction of positions where the answer matches the correct sequence.
fn grade_order(record: &AnswerRecord) -> Result<f64, GradeError> {
    if record.correct_options.is_empty() {
        return Err(GradeError::MalformedAnswer(
            "ORDER question has no correct options".to_string(),
        ));
    }
    if record.answer.len() != record.correct_options.len() {
        return Err(GradeError::MalformedAnswer(format!(
            "ORDER answer has {} entries, expected {}",
            record.answer.len(),
            record.correct_options.len()
        )));
    }

    let hits = record
        .answer
        .iter()
        .zip(&record.correct_options)
        .filter(|(given, correct)| given == correct)
        .count();

    Ok(hits as f64 / record.correct_options.len() as f64)
}

/// Symmetric set agreement over the question's option list: +1 where the
/// correct mask and the selected mask agree, -1 where they disagree,
/// divided by the option count and floored at 0.
fn grade_multiple_choice(record: &AnswerRecord) -> Result<f64, GradeError> {
    if record.options.is_empty() {
        return Err(GradeError::MalformedAnswer(
            "MC question has no options".to_string(),
        ));
    }

    let agreement: f64 = record
        .options
        .iter()
        .map(|option| {
            let correct = record.correct_options.contains(option);
            let selected = record.answer.contains(option);
            if correct == selected { 1.0 } else { -1.0 }
        })
        .sum();

    Ok((agreement / record.options.len() as f64).max(0.0))
}

/// Lower-case and strip everything non-alphanumeric, so "Paris!" matches
/// "paris".
fn normalize(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}
