use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WinnerSide {
    Left,
    Right,
    Draw,
}

impl WinnerSide {
    pub fn from_scores(left: i64, right: i64) -> Self {
        if left > right {
            WinnerSide::Left
        } else if right > left {
            WinnerSide::Right
        } else {
            WinnerSide::Draw
        }
    }
}

/// Head-to-head result for a single round
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    pub left: String,
    pub right: String,
    pub left_score: i64,
    pub right_score: i64,
    pub winner: WinnerSide,
}

impl Match {
    pub fn new(left: &str, right: &str, left_score: i64, right_score: i64) -> Self {
        Self {
            left: left.to_string(),
            right: right.to_string(),
            left_score,
            right_score,
            winner: WinnerSide::from_scores(left_score, right_score),
        }
    }

    pub fn involves(&self, username: &str) -> bool {
        self.left == username || self.right == username
    }

    pub fn winner_name(&self) -> Option<&str> {
        match self.winner {
            WinnerSide::Left => Some(self.left.as_str()),
            WinnerSide::Right => Some(self.right.as_str()),
            WinnerSide::Draw => None,
        }
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} VS {} {}",
            self.left, self.left_score, self.right_score, self.right
        )
    }
}

/// Why a competitor has no match in a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnpairedReason {
    /// Round one and the row names no seed opponent
    NoSeedOpponent,
    /// Round one and the seed opponent is not a known username
    UnknownOpponent,
    /// Round one and the seed opponent was already paired (or is the competitor itself)
    OpponentUnavailable,
    /// Swiss round with an odd field; the last-ranked competitor sits out
    OddCount,
}

impl fmt::Display for UnpairedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnpairedReason::NoSeedOpponent => write!(f, "no seed opponent"),
            UnpairedReason::UnknownOpponent => write!(f, "unknown seed opponent"),
            UnpairedReason::OpponentUnavailable => write!(f, "seed opponent already paired"),
            UnpairedReason::OddCount => write!(f, "odd number of competitors"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unpaired {
    pub username: String,
    pub reason: UnpairedReason,
}

/// All matches of one round in emission order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundPairing {
    pub round: String,
    pub matches: Vec<Match>,
    pub unpaired: Vec<Unpaired>,
}

impl RoundPairing {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn match_for(&self, username: &str) -> Option<&Match> {
        self.matches.iter().find(|m| m.involves(username))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winner_side() {
        assert_eq!(Match::new("A", "B", 10, 7).winner, WinnerSide::Left);
        assert_eq!(Match::new("A", "B", 3, 7).winner, WinnerSide::Right);
        let draw = Match::new("A", "B", 5, 5);
        assert_eq!(draw.winner, WinnerSide::Draw);
        assert_eq!(draw.winner_name(), None);
    }

    #[test]
    fn test_display() {
        let m = Match::new("Alice", "Bob", 10, 7);
        assert_eq!(m.to_string(), "Alice 10 VS 7 Bob");
        assert_eq!(m.winner_name(), Some("Alice"));
    }
}
