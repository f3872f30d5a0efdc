pub mod competitor;
pub mod matchup;
pub mod ranking;

pub use competitor::Competitor;
pub use matchup::{Match, RoundPairing, Unpaired, UnpairedReason, WinnerSide};
pub use ranking::{rank_by, rank_default, RankCriterion};
