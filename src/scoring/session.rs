// src/scoring/session.rs

use super::{AnswerRecord, Graded, ScoreRow, SessionScores, grader, numeric, speed};

/// Grades every answer of a session and produces the per-answer score
/// sheet: base correctness per row, then cohort-relative NUMBER
/// resolution, then the speed bonus.
///
/// An empty record set yields [`SessionScores::NoData`] so callers can
/// tell "nobody has answered" apart from "everyone scored zero". A
/// malformed answer zero-scores its own row and carries the error
/// message; it never aborts the rest of the sheet.
pub fn score_session(records: Vec<AnswerRecord>) -> SessionScores {
    if records.is_empty() {
        return SessionScores::NoData;
    }

    let mut rows: Vec<Graded> = records
        .into_iter()
        .map(|record| match grader::grade(&record) {
            Ok(points) => Graded {
                record,
                points,
                first_points: 0.0,
                error: None,
            },
            Err(err) => {
                tracing::warn!(
                    answer_id = record.answer_id,
                    question_id = record.question_id,
                    error = %err,
                    "answer failed grading, scoring 0"
                );
                Graded {
                    record,
                    points: 0.0,
                    first_points: 0.0,
                    error: Some(err),
                }
            }
        })
        .collect();

    numeric::resolve(&mut rows);
    speed::resolve(&mut rows);

    SessionScores::Rows(
        rows.into_iter()
            .map(|row| ScoreRow {
                answer_id: row.record.answer_id,
                question_id: row.record.question_id,
                participant_id: row.record.participant_id,
                participant_name: row.record.participant_name,
                points: row.points,
                first_points: row.first_points,
                score: row.points + row.first_points,
                grading_error: row.error.map(|err| err.to_string()),
            })
            .collect(),
    )
}
