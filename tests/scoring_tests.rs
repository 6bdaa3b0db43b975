// tests/scoring_tests.rs
//
// Pure scoring-engine tests; no database required.

use chrono::{DateTime, TimeZone, Utc};
use livequiz::scoring::{self, AnswerRecord, RosterEntry, ScoreRow, SessionScores};

fn ts(offset_secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + offset_secs, 0).unwrap()
}

#[allow(clippy::too_many_arguments)]
fn record(
    answer_id: i64,
    participant_id: i64,
    question_id: i64,
    question_type: &str,
    options: &[&str],
    correct_options: &[&str],
    answer: &[&str],
    submitted: DateTime<Utc>,
) -> AnswerRecord {
    AnswerRecord {
        answer_id,
        participant_id,
        participant_name: format!("player-{}", participant_id),
        question_id,
        question_type: question_type.to_string(),
        options: options.iter().map(|s| s.to_string()).collect(),
        correct_options: correct_options.iter().map(|s| s.to_string()).collect(),
        answer: answer.iter().map(|s| s.to_string()).collect(),
        submission_time: submitted,
        correct_override: false,
    }
}

fn rows(scores: SessionScores) -> Vec<ScoreRow> {
    match scores {
        SessionScores::Rows(rows) => rows,
        SessionScores::NoData => panic!("expected a populated score sheet"),
    }
}

fn row<'a>(rows: &'a [ScoreRow], answer_id: i64) -> &'a ScoreRow {
    rows.iter()
        .find(|r| r.answer_id == answer_id)
        .expect("missing score row")
}

fn roster(ids: &[(i64, &str)]) -> Vec<RosterEntry> {
    ids.iter()
        .map(|(id, name)| RosterEntry {
            participant_id: *id,
            name: name.to_string(),
        })
        .collect()
}

#[test]
fn text_match_ignores_case_and_punctuation() {
    let sheet = rows(scoring::score_session(vec![record(
        1,
        1,
        10,
        "TEXT",
        &[],
        &["paris", "PARIS "],
        &["Paris!"],
        ts(0),
    )]));

    assert_eq!(row(&sheet, 1).points, 1.0);
    assert!(row(&sheet, 1).grading_error.is_none());
}

#[test]
fn text_mismatch_scores_zero() {
    let sheet = rows(scoring::score_session(vec![record(
        1,
        1,
        10,
        "TEXT",
        &[],
        &["paris"],
        &["London"],
        ts(0),
    )]));

    assert_eq!(row(&sheet, 1).points, 0.0);
    assert_eq!(row(&sheet, 1).first_points, 0.0);
}

#[test]
fn order_gives_partial_credit_per_position() {
    let sheet = rows(scoring::score_session(vec![record(
        1,
        1,
        10,
        "ORDER",
        &[],
        &["A", "B", "C"],
        &["A", "C", "B"],
        ts(0),
    )]));

    let got = row(&sheet, 1).points;
    assert!((got - 1.0 / 3.0).abs() < 1e-9, "got {}", got);
}

#[test]
fn order_length_mismatch_is_flagged_not_fatal() {
    let sheet = rows(scoring::score_session(vec![
        record(1, 1, 10, "ORDER", &[], &["A", "B", "C"], &["A", "B"], ts(0)),
        record(2, 2, 10, "ORDER", &[], &["A", "B", "C"], &["A", "B", "C"], ts(1)),
    ]));

    let bad = row(&sheet, 1);
    assert_eq!(bad.points, 0.0);
    assert!(bad.grading_error.is_some());

    // The rest of the session still scores normally.
    let good = row(&sheet, 2);
    assert_eq!(good.points, 1.0);
    assert!(good.grading_error.is_none());
}

#[test]
fn multiple_choice_rewards_exact_set_and_floors_at_zero() {
    let options = ["A", "B", "C", "D"];

    let exact = rows(scoring::score_session(vec![record(
        1,
        1,
        10,
        "MC",
        &options,
        &["A", "B"],
        &["A", "B"],
        ts(0),
    )]));
    assert_eq!(row(&exact, 1).points, 1.0);

    // (+1 -1 +1 -1) / 4 floors at 0, never negative.
    let half_wrong = rows(scoring::score_session(vec![record(
        1,
        1,
        10,
        "MC",
        &options,
        &["A", "B"],
        &["A", "C"],
        ts(0),
    )]));
    assert_eq!(row(&half_wrong, 1).points, 0.0);
    assert!(row(&half_wrong, 1).grading_error.is_none());
}

#[test]
fn number_grading_is_relative_to_the_cohort() {
    let sheet = rows(scoring::score_session(vec![
        record(1, 1, 10, "NUMBER", &[], &["100"], &["90"], ts(0)),
        record(2, 2, 10, "NUMBER", &[], &["100"], &["95"], ts(1)),
        record(3, 3, 10, "NUMBER", &[], &["100"], &["150"], ts(2)),
    ]));

    assert_eq!(row(&sheet, 1).points, 0.0);
    assert_eq!(row(&sheet, 2).points, 1.0);
    assert_eq!(row(&sheet, 3).points, 0.0);
}

#[test]
fn number_ties_all_win() {
    let sheet = rows(scoring::score_session(vec![
        record(1, 1, 10, "NUMBER", &[], &["100"], &["95"], ts(0)),
        record(2, 2, 10, "NUMBER", &[], &["100"], &["105"], ts(1)),
        record(3, 3, 10, "NUMBER", &[], &["100"], &["80"], ts(2)),
    ]));

    assert_eq!(row(&sheet, 1).points, 1.0);
    assert_eq!(row(&sheet, 2).points, 1.0);
    assert_eq!(row(&sheet, 3).points, 0.0);
}

#[test]
fn unparsable_number_is_flagged_and_excluded() {
    let sheet = rows(scoring::score_session(vec![
        record(1, 1, 10, "NUMBER", &[], &["100"], &["ninety"], ts(0)),
        record(2, 2, 10, "NUMBER", &[], &["100"], &["120"], ts(1)),
    ]));

    let bad = row(&sheet, 1);
    assert_eq!(bad.points, 0.0);
    assert!(bad.grading_error.is_some());

    // The only parseable answer is closest by default.
    assert_eq!(row(&sheet, 2).points, 1.0);
}

#[test]
fn unknown_question_type_scores_zero_without_error() {
    let sheet = rows(scoring::score_session(vec![record(
        1,
        1,
        10,
        "ESSAY",
        &[],
        &["whatever"],
        &["whatever"],
        ts(0),
    )]));

    assert_eq!(row(&sheet, 1).points, 0.0);
    assert!(row(&sheet, 1).grading_error.is_none());
}

#[test]
fn speed_bonus_goes_to_the_latest_perfect_answer() {
    // Historical behavior under review: the bonus rewards the latest
    // perfect submission, not the earliest.
    let sheet = rows(scoring::score_session(vec![
        record(1, 1, 10, "TEXT", &[], &["paris"], &["paris"], ts(0)),
        record(2, 2, 10, "TEXT", &[], &["paris"], &["paris"], ts(60)),
    ]));

    assert_eq!(row(&sheet, 1).first_points, 0.0);
    assert_eq!(row(&sheet, 1).score, 1.0);
    assert_eq!(row(&sheet, 2).first_points, 1.0);
    assert_eq!(row(&sheet, 2).score, 2.0);
}

#[test]
fn speed_bonus_requires_a_perfect_score() {
    // A later partially-correct answer never takes the bonus from an
    // earlier perfect one.
    let sheet = rows(scoring::score_session(vec![
        record(1, 1, 10, "ORDER", &[], &["A", "B", "C"], &["A", "B", "C"], ts(0)),
        record(2, 2, 10, "ORDER", &[], &["A", "B", "C"], &["A", "C", "B"], ts(60)),
    ]));

    assert_eq!(row(&sheet, 1).first_points, 1.0);
    assert_eq!(row(&sheet, 2).first_points, 0.0);
}

#[test]
fn empty_session_is_no_data_not_zero_rows() {
    assert_eq!(scoring::score_session(Vec::new()), SessionScores::NoData);
}

#[test]
fn scoring_is_idempotent() {
    let records = vec![
        record(1, 1, 10, "TEXT", &[], &["paris"], &["paris"], ts(0)),
        record(2, 2, 10, "NUMBER", &[], &["100"], &["95"], ts(1)),
        record(3, 2, 11, "NUMBER", &[], &["100"], &["90"], ts(2)),
    ];

    let first = scoring::score_session(records.clone());
    let second = scoring::score_session(records);
    assert_eq!(first, second);
}

#[test]
fn leaderboard_covers_every_participant_on_no_data() {
    let board = scoring::player_scores(
        &SessionScores::NoData,
        &roster(&[(1, "alice"), (2, "bob")]),
    );

    assert_eq!(board.len(), 2);
    for entry in &board {
        assert_eq!(entry.score, 0.0);
        assert_eq!(entry.first_points, 0.0);
        assert_eq!(entry.answered, "no");
    }
}

#[test]
fn leaderboard_sums_sorts_and_tracks_pace() {
    // q10: alice perfect (and only perfect -> bonus), bob wrong.
    // q11: bob answers alone and perfectly; alice never answers it.
    let scores = scoring::score_session(vec![
        record(1, 1, 10, "TEXT", &[], &["paris"], &["paris"], ts(0)),
        record(2, 2, 10, "TEXT", &[], &["paris"], &["london"], ts(1)),
        record(3, 2, 11, "TEXT", &[], &["oslo"], &["oslo"], ts(2)),
    ]);
    let board = scoring::player_scores(&scores, &roster(&[(1, "alice"), (2, "bob")]));

    assert_eq!(board.len(), 2);

    // Both total 2.0; the tie breaks on participant id ascending.
    assert_eq!(board[0].participant_id, 1);
    assert_eq!(board[0].score, 2.0);
    assert_eq!(board[1].participant_id, 2);
    assert_eq!(board[1].score, 2.0);

    // Pace question is q11: only bob has kept up.
    assert_eq!(board[0].answered, "no");
    assert_eq!(board[1].answered, "yes");
}

#[test]
fn leaderboard_fills_zero_for_silent_participants() {
    let scores = scoring::score_session(vec![record(
        1,
        1,
        10,
        "TEXT",
        &[],
        &["paris"],
        &["paris"],
        ts(0),
    )]);
    let board = scoring::player_scores(&scores, &roster(&[(1, "alice"), (2, "bob")]));

    assert_eq!(board.len(), 2);
    assert_eq!(board[0].participant_id, 1);
    assert_eq!(board[0].score, 2.0);
    assert_eq!(board[1].participant_id, 2);
    assert_eq!(board[1].score, 0.0);
    assert_eq!(board[1].answered, "no");
}
