use thiserror::Error;

#[derive(Error, Debug)]
pub enum StandingsError {
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Source is empty")]
    EmptySource,

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Profile lookup failed: {0}")]
    Profile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, StandingsError>;
