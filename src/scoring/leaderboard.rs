// src/scoring/leaderboard.rs

use std::collections::{HashMap, HashSet};

use super::{LeaderboardRow, RosterEntry, SessionScores};

/// Folds a score sheet into one row per roster entry, including
/// participants with no answers at all (score 0, answered "no").
///
/// "answered" is a pacing metric: "yes" iff the participant has an answer
/// to the highest question id answered by anyone in the session. Rows are
/// sorted by total score descending; ties break on participant id
/// ascending so repeated calls return identical orderings.
pub fn player_scores(scores: &SessionScores, roster: &[RosterEntry]) -> Vec<LeaderboardRow> {
    let rows = match scores {
        SessionScores::NoData => &[][..],
        SessionScores::Rows(rows) => rows.as_slice(),
    };

    let mut totals: HashMap<i64, (f64, f64)> = HashMap::new();
    for row in rows {
        let entry = totals.entry(row.participant_id).or_insert((0.0, 0.0));
        entry.0 += row.score;
        entry.1 += row.first_points;
    }

    let pace_question = rows.iter().map(|row| row.question_id).max();
    let caught_up: HashSet<i64> = rows
        .iter()
        .filter(|row| Some(row.question_id) == pace_question)
        .map(|row| row.participant_id)
        .collect();

    let mut board: Vec<LeaderboardRow> = roster
        .iter()
        .map(|participant| {
            let (score, first_points) = totals
                .get(&participant.participant_id)
                .copied()
                .unwrap_or((0.0, 0.0));
            let answered = if caught_up.contains(&participant.participant_id) {
                "yes"
            } else {
                "no"
            };
            LeaderboardRow {
                participant_id: participant.participant_id,
                participant_name: participant.name.clone(),
                score,
                first_points,
                answered: answered.to_string(),
            }
        })
        .collect();

    board.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.participant_id.cmp(&b.participant_id))
    });

    board
}
