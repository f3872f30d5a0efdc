pub mod codeforces;
pub mod conventions;
pub mod error;
pub mod leaderboard;
pub mod model;
pub mod pairing;
pub mod snapshot;
pub mod source;
pub mod table;

pub use conventions::{Conventions, RoundMatch};
pub use error::{Result, StandingsError};
pub use model::*;
pub use snapshot::Snapshot;
