//! Column naming conventions for score sheets

use serde::Serialize;

/// How a column name is recognized as a round score column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum RoundMatch {
    /// Lower-cased name starts with the round keyword
    #[default]
    Prefix,
    /// Lower-cased name contains the round keyword anywhere
    Contains,
}

impl RoundMatch {
    pub fn from_str(s: &str) -> Option<RoundMatch> {
        match s.to_lowercase().as_str() {
            "prefix" | "starts-with" => Some(RoundMatch::Prefix),
            "contains" | "substring" => Some(RoundMatch::Contains),
            _ => None,
        }
    }
}

/// Well-known column names and keywords of a score sheet
#[derive(Debug, Clone, Serialize)]
pub struct Conventions {
    pub username_column: String,
    pub handle_column: String,
    pub seed_opponent_column: String,
    pub round_keyword: String,
    pub solved_keyword: String,
    pub round_match: RoundMatch,
    /// Username given to rows without one
    pub placeholder_username: String,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            username_column: "Username".to_string(),
            handle_column: "CodeforcesHandle".to_string(),
            seed_opponent_column: "R1_Opponent".to_string(),
            round_keyword: "round".to_string(),
            solved_keyword: "solved".to_string(),
            round_match: RoundMatch::Prefix,
            placeholder_username: "Unknown".to_string(),
        }
    }
}

impl Conventions {
    pub fn is_round_column(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        let keyword = self.round_keyword.to_lowercase();
        match self.round_match {
            RoundMatch::Prefix => lower.starts_with(&keyword),
            RoundMatch::Contains => lower.contains(&keyword),
        }
    }

    pub fn is_solved_column(&self, name: &str) -> bool {
        name.to_lowercase()
            .starts_with(&self.solved_keyword.to_lowercase())
    }

    /// Name of the solved-count column expected for a round ordinal token
    pub fn solved_column_for(&self, token: &str) -> String {
        let mut chars = self.solved_keyword.chars();
        let keyword: String = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        format!("{} {}", keyword, token)
    }

    /// Trailing ordinal token of a round column name
    ///
    /// `"Round 3"` gives `"3"`; a single-token name like `"Round3"` gives the
    /// text after the round keyword.
    pub fn round_token<'a>(&self, round_name: &'a str) -> Option<&'a str> {
        let mut tokens = round_name.split_whitespace();
        let first = tokens.next()?;
        if let Some(last) = tokens.last() {
            return Some(last);
        }

        let keyword_len = self.round_keyword.len();
        if first.len() > keyword_len
            && first.is_char_boundary(keyword_len)
            && first[..keyword_len].eq_ignore_ascii_case(&self.round_keyword)
        {
            Some(&first[keyword_len..])
        } else {
            None
        }
    }
}
