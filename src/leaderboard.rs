//! Leaderboard construction from parsed rows

use crate::conventions::Conventions;
use crate::model::{rank_default, Competitor};
use crate::table::{ClassifiedColumns, RawRecord};
use regex::Regex;

lazy_static::lazy_static! {
    // Sign, digits with optional fraction (or a bare fraction), optional exponent
    static ref LEADING_NUMBER: Regex =
        Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?").unwrap();
}

/// Coerce a sheet value to an integer score
///
/// Reads the leading number of the field (trailing text is ignored) and
/// rounds half toward positive infinity. Fields with no leading number, or a
/// non-finite one, are 0.
pub fn coerce_score(value: &str) -> i64 {
    match leading_number(value) {
        Some(n) if n.is_finite() => round_half_up(n) as i64,
        _ => 0,
    }
}

/// Round to nearest, ties toward positive infinity (`-2.5` gives `-2`)
fn round_half_up(n: f64) -> f64 {
    let r = n.round();
    if n - r == 0.5 {
        r + 1.0
    } else {
        r
    }
}

/// Longest numeric prefix of a field
fn leading_number(value: &str) -> Option<f64> {
    LEADING_NUMBER
        .find(value.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Turn one row into a competitor, summing every round column
pub fn build_competitor(
    row: &RawRecord,
    columns: &ClassifiedColumns,
    conventions: &Conventions,
) -> Competitor {
    let username = row
        .non_empty(&conventions.username_column)
        .unwrap_or(&conventions.placeholder_username);

    let mut competitor = Competitor::new(username);
    for round in &columns.round_columns {
        let score = coerce_score(row.get(&round.name));
        let solved = round
            .solved
            .as_deref()
            .map(|c| coerce_score(row.get(c)))
            .unwrap_or(0);
        competitor.set_round(&round.name, score, solved);
    }

    competitor.external_handle = row
        .non_empty(&conventions.handle_column)
        .map(String::from);
    competitor.seed_opponent = row
        .non_empty(&conventions.seed_opponent_column)
        .map(String::from);

    competitor
}

/// Competitors in sheet order
pub fn build_competitors(
    rows: &[RawRecord],
    columns: &ClassifiedColumns,
    conventions: &Conventions,
) -> Vec<Competitor> {
    rows.iter()
        .map(|row| build_competitor(row, columns, conventions))
        .collect()
}

/// Competitors in default leaderboard order
pub fn build(
    rows: &[RawRecord],
    columns: &ClassifiedColumns,
    conventions: &Conventions,
) -> Vec<Competitor> {
    let mut leaderboard = build_competitors(rows, columns, conventions);
    rank_default(&mut leaderboard);
    leaderboard
}

/// Usernames that appear on more than one row
pub fn duplicate_usernames(competitors: &[Competitor]) -> Vec<String> {
    let mut seen: Vec<&str> = Vec::new();
    let mut duplicates: Vec<String> = Vec::new();
    for c in competitors {
        if seen.contains(&c.username.as_str()) {
            if !duplicates.contains(&c.username) {
                duplicates.push(c.username.clone());
            }
        } else {
            seen.push(&c.username);
        }
    }
    duplicates
}
