//! Competitor profile lookup against the Codeforces API
//!
//! Lookups are independent of the leaderboard: a failure here is reported to
//! the caller and never touches standings or pairings.

use crate::error::{Result, StandingsError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

pub const API_BASE: &str = "https://codeforces.com/api";

/// Public profile page for a handle
pub fn profile_url(handle: &str) -> String {
    format!("https://codeforces.com/profile/{}", handle)
}

/// Stats shown next to a competitor; every field may be missing
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Profile {
    pub handle: String,
    pub rating: Option<i64>,
    pub max_rating: Option<i64>,
    pub rank: Option<String>,
    pub solved_count: Option<usize>,
}

impl Profile {
    pub fn tier(&self) -> RatingTier {
        RatingTier::from_rating(self.rating)
    }
}

/// Something that can resolve a handle to profile stats
pub trait ProfileLookup {
    fn lookup(&self, handle: &str) -> Result<Profile>;
}

/// Rating colour bands used on profile pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RatingTier {
    Unrated,
    Gray,
    Green,
    Cyan,
    Blue,
    Violet,
    Orange,
    Red,
}

impl RatingTier {
    pub fn from_rating(rating: Option<i64>) -> Self {
        match rating {
            None => RatingTier::Unrated,
            Some(r) if r >= 2400 => RatingTier::Red,
            Some(r) if r >= 2100 => RatingTier::Orange,
            Some(r) if r >= 1900 => RatingTier::Violet,
            Some(r) if r >= 1600 => RatingTier::Blue,
            Some(r) if r >= 1400 => RatingTier::Cyan,
            Some(r) if r >= 1200 => RatingTier::Green,
            Some(_) => RatingTier::Gray,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            RatingTier::Unrated | RatingTier::Gray => "gray",
            RatingTier::Green => "#008000",
            RatingTier::Cyan => "#03A89E",
            RatingTier::Blue => "#0000FF",
            RatingTier::Violet => "#AA00AA",
            RatingTier::Orange => "#FF8C00",
            RatingTier::Red => "#FF0000",
        }
    }
}

impl fmt::Display for RatingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RatingTier::Unrated => "unrated",
            RatingTier::Gray => "gray",
            RatingTier::Green => "green",
            RatingTier::Cyan => "cyan",
            RatingTier::Blue => "blue",
            RatingTier::Violet => "violet",
            RatingTier::Orange => "orange",
            RatingTier::Red => "red",
        };
        write!(f, "{}", name)
    }
}

// API envelope: {"status": "OK", "result": ...} or {"status": "FAILED", "comment": ...}
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    status: String,
    comment: Option<String>,
    result: Option<T>,
}

impl<T> ApiResponse<T> {
    fn into_result(self) -> Result<T> {
        if self.status != "OK" {
            return Err(StandingsError::Profile(
                self.comment.unwrap_or_else(|| format!("API status {}", self.status)),
            ));
        }
        self.result
            .ok_or_else(|| StandingsError::Profile("API response has no result".to_string()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserInfo {
    handle: String,
    rating: Option<i64>,
    max_rating: Option<i64>,
    rank: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Submission {
    problem: Problem,
    verdict: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Problem {
    name: String,
}

/// Parse a `user.info` body into a profile without a solved count
fn parse_user_info(body: &str) -> Result<Profile> {
    let response: ApiResponse<Vec<UserInfo>> = serde_json::from_str(body)
        .map_err(|e| StandingsError::Profile(format!("Invalid user.info response: {}", e)))?;
    let user = response
        .into_result()?
        .into_iter()
        .next()
        .ok_or_else(|| StandingsError::Profile("user.info returned no users".to_string()))?;

    Ok(Profile {
        handle: user.handle,
        rating: user.rating,
        max_rating: user.max_rating,
        rank: user.rank,
        solved_count: None,
    })
}

/// Count distinct problem names with an accepted submission in a `user.status` body
fn parse_solved_count(body: &str) -> Result<usize> {
    let response: ApiResponse<Vec<Submission>> = serde_json::from_str(body)
        .map_err(|e| StandingsError::Profile(format!("Invalid user.status response: {}", e)))?;
    let solved: HashSet<String> = response
        .into_result()?
        .into_iter()
        .filter(|s| s.verdict.as_deref() == Some("OK"))
        .map(|s| s.problem.name)
        .collect();
    Ok(solved.len())
}

/// Blocking client for the public Codeforces API
pub struct CodeforcesClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl CodeforcesClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(API_BASE)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| StandingsError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn get(&self, method: &str, query: &[(&str, &str)]) -> Result<String> {
        let url = format!("{}/{}", self.base_url, method);
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .map_err(|e| StandingsError::Http(format!("{} request failed: {}", method, e)))?;

        // Failed API calls still carry a JSON envelope with the reason
        response
            .text()
            .map_err(|e| StandingsError::Http(format!("Failed to read {} response: {}", method, e)))
    }
}

impl ProfileLookup for CodeforcesClient {
    fn lookup(&self, handle: &str) -> Result<Profile> {
        let handle = handle.trim();
        if handle.is_empty() {
            return Err(StandingsError::Profile("No handle linked".to_string()));
        }

        let body = self.get("user.info", &[("handles", handle)])?;
        let mut profile = parse_user_info(&body)?;

        match self
            .get("user.status", &[("handle", handle)])
            .and_then(|body| parse_solved_count(&body))
        {
            Ok(count) => profile.solved_count = Some(count),
            Err(e) => log::warn!("Solved count unavailable for {}: {}", handle, e),
        }

        Ok(profile)
    }
}
