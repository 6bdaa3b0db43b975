// src/scoring/speed.rs

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::Graded;

/// Awards the +1 speed bonus per question among answers whose resolved
/// points are exactly 1.0. Partially-correct and malformed answers never
/// receive it regardless of timestamp.
///
/// TODO: confirm with the quiz runners whether the bonus should go to the
/// earliest perfect answer. The selection below keeps the long-standing
/// behavior of rewarding the latest submission timestamp.
pub(crate) fn resolve(rows: &mut [Graded]) {
    let mut latest: HashMap<i64, DateTime<Utc>> = HashMap::new();
    for row in rows.iter() {
        if row.points == 1.0 && row.error.is_none() {
            latest
                .entry(row.record.question_id)
                .and_modify(|ts| {
                    if row.record.submission_time > *ts {
                        *ts = row.record.submission_time;
                    }
                })
                .or_insert(row.record.submission_time);
        }
    }

    for row in rows.iter_mut() {
        if row.points == 1.0
            && row.error.is_none()
            && latest
                .get(&row.record.question_id)
                .is_some_and(|ts| *ts == row.record.submission_time)
        {
            row.first_points = 1.0;
        }
    }
}
