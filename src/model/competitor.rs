use serde::Serialize;
use std::collections::HashMap;

/// One row of the sheet after score aggregation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Competitor {
    pub username: String,
    pub round_scores: HashMap<String, i64>,
    pub round_solved: HashMap<String, i64>,
    pub total_score: i64,
    pub total_solved: i64,
    pub external_handle: Option<String>,
    pub seed_opponent: Option<String>,
}

impl Competitor {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    /// Record a round result and keep the totals in step
    pub fn with_round(mut self, round: &str, score: i64, solved: i64) -> Self {
        self.set_round(round, score, solved);
        self
    }

    pub fn with_external_handle(mut self, handle: impl Into<String>) -> Self {
        self.external_handle = Some(handle.into());
        self
    }

    pub fn with_seed_opponent(mut self, opponent: impl Into<String>) -> Self {
        self.seed_opponent = Some(opponent.into());
        self
    }

    /// Totals are recomputed with saturating sums, so extreme cells cannot overflow
    pub fn set_round(&mut self, round: &str, score: i64, solved: i64) {
        self.round_scores.insert(round.to_string(), score);
        self.round_solved.insert(round.to_string(), solved);
        self.total_score = saturating_sum(self.round_scores.values().copied());
        self.total_solved = saturating_sum(self.round_solved.values().copied());
    }

    /// Score for a round, 0 when the round is unknown
    pub fn score(&self, round: &str) -> i64 {
        self.round_scores.get(round).copied().unwrap_or(0)
    }

    pub fn solved(&self, round: &str) -> i64 {
        self.round_solved.get(round).copied().unwrap_or(0)
    }

    /// Score and solved count summed over the given rounds
    pub fn cumulative<'a>(&self, rounds: impl IntoIterator<Item = &'a str>) -> (i64, i64) {
        rounds.into_iter().fold((0, 0), |(score, solved), round| {
            (
                score.saturating_add(self.score(round)),
                solved.saturating_add(self.solved(round)),
            )
        })
    }
}

fn saturating_sum(values: impl Iterator<Item = i64>) -> i64 {
    values.fold(0, i64::saturating_add)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_follow_rounds() {
        let mut c = Competitor::new("Alice")
            .with_round("Round 1", 10, 2)
            .with_round("Round 2", 8, 1);
        assert_eq!(c.total_score, 18);
        assert_eq!(c.total_solved, 3);

        c.set_round("Round 1", 4, 0);
        assert_eq!(c.total_score, 12);
        assert_eq!(c.total_solved, 1);
    }

    #[test]
    fn test_cumulative_and_missing_round() {
        let c = Competitor::new("Bob")
            .with_round("Round 1", 7, 1)
            .with_round("Round 2", 8, 1);
        assert_eq!(c.cumulative(["Round 1"]), (7, 1));
        assert_eq!(c.cumulative(["Round 1", "Round 2"]), (15, 2));
        assert_eq!(c.score("Round 9"), 0);
        assert_eq!(c.cumulative(std::iter::empty()), (0, 0));
    }

    #[test]
    fn test_extreme_rounds_saturate() {
        let mut c = Competitor::new("Alice")
            .with_round("Round 1", i64::MAX, 1)
            .with_round("Round 2", i64::MAX, 1);
        assert_eq!(c.total_score, i64::MAX);
        assert_eq!(c.cumulative(["Round 1", "Round 2"]), (i64::MAX, 2));

        // Replacing a saturated round brings the total back to an exact sum
        c.set_round("Round 2", 5, 0);
        assert_eq!(c.total_score, i64::MAX);
        c.set_round("Round 1", 3, 0);
        assert_eq!(c.total_score, 8);
    }

    #[test]
    fn test_identity_builders() {
        let c = Competitor::new("Alice")
            .with_external_handle("tourist")
            .with_seed_opponent("Bob");
        assert_eq!(c.external_handle.as_deref(), Some("tourist"));
        assert_eq!(c.seed_opponent.as_deref(), Some("Bob"));
        assert_eq!(c.total_score, 0);
    }
}
