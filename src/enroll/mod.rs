//! Roster enrollment utility.
//!
//! Reads a newline-delimited file of GitHub usernames and inserts each valid,
//! lowercased name into the classRoll table, tolerating duplicates.

pub mod logic;

use anyhow::{Context, Result};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::EnrollConfig;
use logic::{LineAction, classify_line};

const INSERT_ROSTER_ENTRY: &str =
    r#"INSERT INTO "classRoll" ("githubName") VALUES ($1) ON CONFLICT ("githubName") DO NOTHING"#;

// SQLSTATE for unique_violation.
const UNIQUE_VIOLATION: &str = "23505";

/// Resolves the single required command-line argument, the input file path.
pub fn input_path_from_args(mut args: impl Iterator<Item = String>) -> Result<PathBuf> {
    let path = args
        .nth(1)
        .context("You must provide exactly one argument, the path to the input file")?;
    let path = PathBuf::from(path);
    if !path.exists() {
        anyhow::bail!("File not found at {}", path.display());
    }
    Ok(path)
}

/// Runs the full enrollment pass and prints the summary line.
///
/// Any database error that is not a uniqueness conflict aborts the run; the
/// connection is closed before the error propagates to the caller.
pub async fn run_app(config: &EnrollConfig, input_path: &Path) -> Result<()> {
    let contents = fs::read_to_string(input_path)
        .with_context(|| format!("Failed to read input file {}", input_path.display()))?;

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to the database")?;

    let result = enroll_lines(&pool, contents.lines()).await;
    pool.close().await;

    let added = result?;
    println!("✅ Done. {} new GitHub names added.", added);
    Ok(())
}

async fn enroll_lines<'a>(pool: &PgPool, lines: impl Iterator<Item = &'a str>) -> Result<u64> {
    let mut added = 0u64;
    for raw in lines {
        match classify_line(raw) {
            LineAction::Skip => continue,
            LineAction::Invalid(line) => {
                eprintln!("⚠️ Skipping invalid GitHub username: \"{}\"", line);
            }
            LineAction::Insert(github_name) => {
                added += insert_roster_entry(pool, &github_name).await?;
            }
        }
    }
    Ok(added)
}

/// Conflict-tolerant insert: returns 1 for a new row, 0 if the name was
/// already enrolled.
async fn insert_roster_entry(pool: &PgPool, github_name: &str) -> Result<u64> {
    match sqlx::query(INSERT_ROSTER_ENTRY)
        .bind(github_name)
        .execute(pool)
        .await
    {
        Ok(done) => Ok(done.rows_affected()),
        // ON CONFLICT already absorbs duplicates; a raw unique violation is
        // still treated as "already enrolled" rather than a failure.
        Err(e) if is_unique_violation(&e) => Ok(0),
        Err(e) => {
            Err(e).with_context(|| format!("Database error inserting \"{}\"", github_name))
        }
    }
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .and_then(|db| db.code())
        .map(|code| code == UNIQUE_VIOLATION)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> impl Iterator<Item = String> {
        values
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn test_missing_argument_is_rejected() {
        let result = input_path_from_args(args(&["enroll-roster"]));
        assert!(result.is_err());
        assert!(format!("{:#}", result.unwrap_err()).contains("exactly one argument"));
    }

    #[test]
    fn test_nonexistent_path_is_rejected() {
        let result = input_path_from_args(args(&["enroll-roster", "/no/such/roster.txt"]));
        assert!(result.is_err());
        assert!(format!("{:#}", result.unwrap_err()).contains("File not found"));
    }

    #[test]
    fn test_existing_path_is_accepted() -> Result<()> {
        // Cargo runs unit tests from the crate root, so the manifest is a
        // file guaranteed to exist.
        let path = input_path_from_args(args(&["enroll-roster", "Cargo.toml"]))?;
        assert_eq!(path, PathBuf::from("Cargo.toml"));
        Ok(())
    }

    #[test]
    fn test_insert_statement_is_conflict_tolerant() {
        assert!(INSERT_ROSTER_ENTRY.contains(r#"ON CONFLICT ("githubName") DO NOTHING"#));
        assert!(INSERT_ROSTER_ENTRY.contains(r#"INSERT INTO "classRoll""#));
    }
}
