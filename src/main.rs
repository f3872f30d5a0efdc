use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use swiss_standings::codeforces::{self, CodeforcesClient, ProfileLookup};
use swiss_standings::conventions::{Conventions, RoundMatch};
use swiss_standings::{Competitor, RankCriterion, Snapshot};

#[derive(Parser)]
#[command(name = "swiss-standings")]
#[command(about = "Tournament leaderboard and Swiss pairings from a score sheet", long_about = None)]
struct Cli {
    #[command(flatten)]
    sheet: SheetArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SheetArgs {
    /// Score sheet path or http(s) URL
    #[arg(long, global = true, env = "STANDINGS_SOURCE", default_value = "veriler.csv")]
    source: String,

    /// Column holding the competitor username
    #[arg(long, global = true, env = "STANDINGS_USERNAME_COLUMN", default_value = "Username")]
    username_column: String,

    /// Column holding the Codeforces handle
    #[arg(long, global = true, env = "STANDINGS_HANDLE_COLUMN", default_value = "CodeforcesHandle")]
    handle_column: String,

    /// Column holding the round one seed opponent
    #[arg(long, global = true, env = "STANDINGS_SEED_COLUMN", default_value = "R1_Opponent")]
    seed_column: String,

    /// Keyword identifying round score columns
    #[arg(long, global = true, default_value = "round")]
    round_keyword: String,

    /// Keyword identifying solved-count columns
    #[arg(long, global = true, default_value = "solved")]
    solved_keyword: String,

    /// Match the round keyword as a prefix or anywhere in the name
    #[arg(long, global = true, default_value = "prefix", value_parser = ["prefix", "contains"])]
    round_match: String,
}

impl SheetArgs {
    fn conventions(&self) -> Conventions {
        Conventions {
            username_column: self.username_column.clone(),
            handle_column: self.handle_column.clone(),
            seed_opponent_column: self.seed_column.clone(),
            round_keyword: self.round_keyword.clone(),
            solved_keyword: self.solved_keyword.clone(),
            round_match: RoundMatch::from_str(&self.round_match).unwrap_or_default(),
            ..Conventions::default()
        }
    }

    fn load(&self) -> Result<Snapshot> {
        Snapshot::load(&self.source, &self.conventions())
            .with_context(|| format!("Failed to load score sheet {}", self.source))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show the leaderboard
    Standings {
        /// Sort key: totalScore, totalSolved, or a round column name
        #[arg(long)]
        sort: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the matches of every round
    Pairings {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Display how the sheet's columns were classified
    Info,

    /// Report sheet problems that are otherwise absorbed silently
    Validate,

    /// Look up a competitor's Codeforces profile
    Profile {
        /// Codeforces handle, or a username from the sheet
        handle: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Standings { sort, json } => {
            standings(&cli.sheet, sort.as_deref(), json)?;
        }
        Commands::Pairings { json } => {
            pairings(&cli.sheet, json)?;
        }
        Commands::Info => {
            info(&cli.sheet)?;
        }
        Commands::Validate => {
            validate(&cli.sheet)?;
        }
        Commands::Profile { handle } => {
            profile(&cli.sheet, &handle)?;
        }
    }

    Ok(())
}

fn standings(sheet: &SheetArgs, sort: Option<&str>, json: bool) -> Result<()> {
    let snapshot = sheet.load()?;
    let rows = match sort {
        Some(key) => snapshot.ranked_by(&RankCriterion::from_str(key)),
        None => snapshot.leaderboard.clone(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let rounds: Vec<&str> = snapshot.columns.round_names().collect();
    print_standings(&rows, &rounds);
    Ok(())
}

fn print_standings(rows: &[Competitor], rounds: &[&str]) {
    let name_width = rows
        .iter()
        .map(|c| c.username.len())
        .max()
        .unwrap_or(8)
        .max(8);
    let round_widths: Vec<usize> = rounds.iter().map(|r| r.len().max(5)).collect();

    let mut header = format!("Rank | {:<name_width$}", "Username");
    for (round, width) in rounds.iter().zip(round_widths.iter().copied()) {
        header.push_str(&format!(" | {:>width$}", round));
    }
    header.push_str(" | Total Solved | Total Score");
    println!("{}", header);
    println!("{}", "-".repeat(header.len()));

    for (i, c) in rows.iter().enumerate() {
        let mut line = format!("{:>4} | {:<name_width$}", i + 1, c.username);
        for (round, width) in rounds.iter().zip(round_widths.iter().copied()) {
            line.push_str(&format!(" | {:>width$}", c.score(round)));
        }
        line.push_str(&format!(" | {:>12} | {:>11}", c.total_solved, c.total_score));
        println!("{}", line);
    }

    println!();
    println!("{} competitors", rows.len());
}

fn pairings(sheet: &SheetArgs, json: bool) -> Result<()> {
    let snapshot = sheet.load()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot.rounds)?);
        return Ok(());
    }

    if snapshot.rounds.is_empty() {
        println!("No round columns found");
        return Ok(());
    }

    for round in &snapshot.rounds {
        println!("{}", round.round);
        if round.is_empty() {
            println!("  Waiting...");
        }
        for m in &round.matches {
            match m.winner_name() {
                Some(winner) => println!("  {}  (winner: {})", m, winner),
                None => println!("  {}  (draw)", m),
            }
        }
        for u in &round.unpaired {
            println!("  {} unpaired: {}", u.username, u.reason);
        }
        println!();
    }

    Ok(())
}

fn info(sheet: &SheetArgs) -> Result<()> {
    let snapshot = sheet.load()?;
    let columns = &snapshot.columns;

    println!("Score sheet: {}", sheet.source);
    println!("Delimiter: '{}'", snapshot.table.delimiter);
    println!("Columns: {}", snapshot.table.columns.len());
    println!("Competitors: {}", snapshot.competitors.len());
    println!();

    println!("Rounds: {}", columns.round_columns.len());
    for round in &columns.round_columns {
        match &round.solved {
            Some(solved) => println!("  {} (solved: {})", round.name, solved),
            None => println!("  {} (no solved column)", round.name),
        }
    }
    println!();

    println!("Identity columns:");
    for name in &columns.identity_columns {
        println!("  {}", name);
    }
    println!();

    println!("Display columns: {}", columns.display_columns.join(", "));

    Ok(())
}

fn validate(sheet: &SheetArgs) -> Result<()> {
    let snapshot = sheet.load()?;
    let conventions = sheet.conventions();
    let mut issues = Vec::new();

    if !snapshot.table.has_column(&conventions.username_column) {
        issues.push(format!(
            "No '{}' column; every competitor is '{}'",
            conventions.username_column, conventions.placeholder_username
        ));
    }
    if snapshot.columns.round_columns.is_empty() {
        issues.push("No round columns".to_string());
    }

    for name in swiss_standings::leaderboard::duplicate_usernames(&snapshot.competitors) {
        issues.push(format!("Username '{}' appears more than once", name));
    }
    for (row, fields) in snapshot.table.short_rows() {
        issues.push(format!(
            "Row {}: {} fields (expected {})",
            row,
            fields,
            snapshot.table.columns.len()
        ));
    }
    for (username, opponent) in snapshot.unknown_seed_opponents() {
        issues.push(format!("{}: seed opponent '{}' is not on the sheet", username, opponent));
    }
    if let Some(first) = snapshot.rounds.first() {
        for u in &first.unpaired {
            issues.push(format!("{}: no {} match ({})", u.username, first.round, u.reason));
        }
    }

    println!("Score sheet loaded");
    println!("  {} competitors", snapshot.competitors.len());
    println!("  {} rounds", snapshot.rounds.len());

    if issues.is_empty() {
        println!("  No issues found");
    } else {
        println!("  Issues found:");
        for issue in issues {
            println!("    - {}", issue);
        }
    }

    Ok(())
}

fn profile(sheet: &SheetArgs, handle: &str) -> Result<()> {
    // A sheet username resolves to its linked handle when the sheet is available
    let handle = match Snapshot::load(&sheet.source, &sheet.conventions()) {
        Ok(snapshot) => match snapshot.competitor(handle) {
            Some(c) => match &c.external_handle {
                Some(linked) => linked.clone(),
                None => {
                    println!("{}: Not linked", c.username);
                    return Ok(());
                }
            },
            None => handle.to_string(),
        },
        Err(e) => {
            log::debug!("Sheet not loaded for profile lookup: {}", e);
            handle.to_string()
        }
    };

    let client = CodeforcesClient::new()?;
    println!("Handle: {} ({})", handle, codeforces::profile_url(&handle));

    match client.lookup(&handle) {
        Ok(p) => {
            let unrated = || "Unrated".to_string();
            let tier = p.tier();
            println!(
                "  Rating: {} [{} {}]",
                p.rating.map(|r| r.to_string()).unwrap_or_else(unrated),
                tier,
                tier.color()
            );
            println!(
                "  Max rating: {}",
                p.max_rating.map(|r| r.to_string()).unwrap_or_else(unrated)
            );
            println!("  Rank: {}", p.rank.unwrap_or_else(unrated));
            println!(
                "  Solved: {}",
                p.solved_count.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string())
            );
        }
        Err(e) => {
            println!("  Profile unavailable: {}", e);
        }
    }

    Ok(())
}
