//! Leaderboard ordering

use super::competitor::Competitor;
use serde::Serialize;
use std::cmp::Reverse;
use std::fmt;

/// Key a leaderboard can be sorted by
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RankCriterion {
    TotalScore,
    TotalSolved,
    Round(String),
}

impl RankCriterion {
    /// `"totalScore"`, `"totalSolved"`, or anything else as a round name
    pub fn from_str(s: &str) -> RankCriterion {
        match s {
            "totalScore" | "total-score" => RankCriterion::TotalScore,
            "totalSolved" | "total-solved" => RankCriterion::TotalSolved,
            round => RankCriterion::Round(round.to_string()),
        }
    }

    pub fn key(&self, competitor: &Competitor) -> i64 {
        match self {
            RankCriterion::TotalScore => competitor.total_score,
            RankCriterion::TotalSolved => competitor.total_solved,
            RankCriterion::Round(round) => competitor.score(round),
        }
    }
}

impl fmt::Display for RankCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankCriterion::TotalScore => write!(f, "totalScore"),
            RankCriterion::TotalSolved => write!(f, "totalSolved"),
            RankCriterion::Round(round) => write!(f, "{}", round),
        }
    }
}

/// Default order: total score, then total solved, both descending; stable
pub fn rank_default(competitors: &mut [Competitor]) {
    competitors.sort_by_key(|c| (Reverse(c.total_score), Reverse(c.total_solved)));
}

/// Re-sort by one criterion descending, total score breaking ties; stable
pub fn rank_by(competitors: &mut [Competitor], criterion: &RankCriterion) {
    competitors.sort_by_key(|c| (Reverse(criterion.key(c)), Reverse(c.total_score)));
}
