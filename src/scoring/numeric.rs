// src/scoring/numeric.rs

use std::collections::HashMap;

use super::{GradeError, Graded, QuestionType};

/// NUMBER grading is relative to the cohort, not to a fixed target: for
/// each NUMBER question, the answer(s) with the smallest absolute distance
/// to the target gain +1.0 on top of their provisional 0, everyone else
/// keeps 0.0. Equally-closest answers all win; there is no tie-break.
pub(crate) fn resolve(rows: &mut [Graded]) {
    let mut groups: HashMap<i64, Vec<usize>> = HashMap::new();
    for (idx, row) in rows.iter().enumerate() {
        if row.error.is_none()
            && QuestionType::parse(&row.record.question_type) == Some(QuestionType::Number)
        {
            groups.entry(row.record.question_id).or_default().push(idx);
        }
    }

    for indices in groups.values() {
        let mut distances: Vec<(usize, f64)> = Vec::with_capacity(indices.len());
        for &idx in indices {
            match distance_to_target(&rows[idx]) {
                Ok(distance) => distances.push((idx, distance)),
                // Unparsable rows drop out of candidacy but keep scoring
                // for everyone else in the group.
                Err(err) => rows[idx].error = Some(err),
            }
        }

        let Some(best) = distances.iter().map(|(_, d)| *d).reduce(f64::min) else {
            continue;
        };
        for (idx, distance) in distances {
            if distance == best {
                rows[idx].points += 1.0;
            }
        }
    }
}

fn distance_to_target(row: &Graded) -> Result<f64, GradeError> {
    let target = row
        .record
        .correct_options
        .first()
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .ok_or_else(|| {
            GradeError::MalformedAnswer("NUMBER question target is not numeric".to_string())
        })?;
    let value = row
        .record
        .answer
        .first()
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .ok_or_else(|| GradeError::MalformedAnswer("NUMBER answer is not numeric".to_string()))?;

    Ok((value - target).abs())
}
