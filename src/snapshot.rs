//! One complete load of a score sheet
//!
//! A snapshot is rebuilt from scratch for every load and never updated in
//! place. Re-sorting for display works on a copy of the leaderboard.

use crate::conventions::Conventions;
use crate::error::Result;
use crate::leaderboard;
use crate::model::{rank_by, rank_default, Competitor, RankCriterion, RoundPairing};
use crate::pairing::pair_rounds;
use crate::source::read_source;
use crate::table::{classify, parse, ClassifiedColumns, Table};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    #[serde(skip)]
    pub table: Table,
    pub columns: ClassifiedColumns,
    /// Competitors in sheet order
    pub competitors: Vec<Competitor>,
    /// Competitors in default ranking order
    pub leaderboard: Vec<Competitor>,
    pub rounds: Vec<RoundPairing>,
}

impl Snapshot {
    /// Run the whole pipeline over sheet text
    pub fn from_text(text: &str, conventions: &Conventions) -> Result<Snapshot> {
        let table = parse(text)?;
        let columns = classify(&table.columns, conventions);
        let competitors = leaderboard::build_competitors(&table.rows, &columns, conventions);

        for name in leaderboard::duplicate_usernames(&competitors) {
            log::warn!("Username '{}' appears on more than one row", name);
        }
        for (row, fields) in table.short_rows() {
            log::warn!(
                "Row {} has {} of {} fields; missing values read as empty",
                row,
                fields,
                table.columns.len()
            );
        }

        let mut ranked = competitors.clone();
        rank_default(&mut ranked);

        let round_names: Vec<&str> = columns.round_names().collect();
        let rounds = pair_rounds(&round_names, &competitors);

        log::info!(
            "Loaded {} competitors over {} rounds",
            competitors.len(),
            rounds.len()
        );

        Ok(Snapshot {
            table,
            columns,
            competitors,
            leaderboard: ranked,
            rounds,
        })
    }

    /// Fetch a sheet and run the pipeline; a fetch failure aborts the load
    pub fn load(location: &str, conventions: &Conventions) -> Result<Snapshot> {
        let text = read_source(location)?;
        Self::from_text(&text, conventions)
    }

    /// Leaderboard re-sorted for display by one criterion
    pub fn ranked_by(&self, criterion: &RankCriterion) -> Vec<Competitor> {
        let mut view = self.leaderboard.clone();
        rank_by(&mut view, criterion);
        view
    }

    pub fn round(&self, name: &str) -> Option<&RoundPairing> {
        self.rounds.iter().find(|r| r.round == name)
    }

    pub fn competitor(&self, username: &str) -> Option<&Competitor> {
        self.competitors.iter().find(|c| c.username == username)
    }

    /// Seed opponents that name nobody on the sheet, as (competitor, named opponent)
    pub fn unknown_seed_opponents(&self) -> Vec<(&str, &str)> {
        self.competitors
            .iter()
            .filter_map(|c| {
                let opponent = c.seed_opponent.as_deref()?;
                if self.competitor(opponent).is_none() {
                    Some((c.username.as_str(), opponent))
                } else {
                    None
                }
            })
            .collect()
    }
}
