//! Column classification
//!
//! Splits the column set into round score columns (each with its optional
//! solved-count column), identity columns and the columns shown in tables.

use crate::conventions::Conventions;
use serde::Serialize;
use std::collections::BTreeSet;

/// A round score column and the solved-count column declared for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundColumn {
    pub name: String,
    pub solved: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ClassifiedColumns {
    /// Round columns in sheet order
    pub round_columns: Vec<RoundColumn>,
    /// Columns shown in tables; does not affect totals
    pub display_columns: Vec<String>,
    /// Username, handle, seed opponent and solved-count columns
    pub identity_columns: BTreeSet<String>,
}

impl ClassifiedColumns {
    pub fn round_names(&self) -> impl Iterator<Item = &str> {
        self.round_columns.iter().map(|r| r.name.as_str())
    }

    pub fn round(&self, name: &str) -> Option<&RoundColumn> {
        self.round_columns.iter().find(|r| r.name == name)
    }

    pub fn tracks_solved(&self) -> bool {
        self.round_columns.iter().any(|r| r.solved.is_some())
    }
}

/// Classify a column set under the given naming conventions
pub fn classify(columns: &[String], conventions: &Conventions) -> ClassifiedColumns {
    let solved_columns: Vec<&String> = columns
        .iter()
        .filter(|c| conventions.is_solved_column(c))
        .collect();

    let mut identity_columns = BTreeSet::new();
    for name in columns {
        if *name == conventions.username_column
            || *name == conventions.handle_column
            || *name == conventions.seed_opponent_column
            || conventions.is_solved_column(name)
        {
            identity_columns.insert(name.clone());
        }
    }

    // A column named like both a round and a solved count is a solved count
    let round_columns: Vec<RoundColumn> = columns
        .iter()
        .filter(|c| conventions.is_round_column(c) && !conventions.is_solved_column(c))
        .map(|name| {
            let solved = conventions.round_token(name).and_then(|token| {
                let wanted = conventions.solved_column_for(token);
                solved_columns
                    .iter()
                    .find(|c| c.eq_ignore_ascii_case(&wanted))
                    .map(|c| c.to_string())
            });
            RoundColumn {
                name: name.clone(),
                solved,
            }
        })
        .collect();

    let display_columns = columns
        .iter()
        .filter(|c| !identity_columns.contains(*c))
        .cloned()
        .collect();

    log::debug!(
        "Classified {} round columns, {} identity columns",
        round_columns.len(),
        identity_columns.len()
    );

    ClassifiedColumns {
        round_columns,
        display_columns,
        identity_columns,
    }
}
