//! Interactive database reset utility.
//!
//! Drives a scope selector and an operation menu over stdin/stdout. Every
//! destructive operation is confirmed before any connection is opened, runs
//! against a fresh connection, and reports back before the menu loops.

pub mod logic;
pub mod notify;

use anyhow::{Context, Result};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::io::{Write, stdin, stdout};

use crate::config::ResetConfig;
use logic::Scope;

/// Outcome of the scope selector prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeChoice {
    Scope(Scope),
    Exit,
}

/// One of the destructive menu operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    TaskUser,
    ClassRoll,
    Origin,
}

/// Outcome of the operation menu prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Run(Operation),
    Exit,
}

pub fn parse_scope_choice(input: &str) -> Option<ScopeChoice> {
    match input.trim().to_lowercase().as_str() {
        "a" => Some(ScopeChoice::Scope(Scope::All)),
        "b" => Some(ScopeChoice::Scope(Scope::Stale)),
        "c" => Some(ScopeChoice::Exit),
        _ => None,
    }
}

pub fn parse_menu_choice(input: &str) -> Option<MenuChoice> {
    match input.trim() {
        "1" => Some(MenuChoice::Run(Operation::TaskUser)),
        "2" => Some(MenuChoice::Run(Operation::ClassRoll)),
        "3" => Some(MenuChoice::Run(Operation::Origin)),
        "4" => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// Only an explicit yes counts; everything else aborts the pending operation.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

impl Operation {
    /// Confirmation warning naming the affected table(s) and scope.
    pub fn warning(&self, scope: Scope) -> String {
        match self {
            Operation::TaskUser => format!(
                "⚠️  This will DELETE {} rows from Task and User tables. Proceed?",
                scope.describe()
            ),
            Operation::ClassRoll => format!(
                "⚠️  This will DELETE {} rows from classRoll. Proceed?",
                scope.describe()
            ),
            Operation::Origin => format!(
                "⚠️  This will DELETE {} rows from Origin AND notify the front end. Proceed?",
                scope.describe()
            ),
        }
    }
}

/// Runs the full interactive session: scope selector, then the menu loop.
pub async fn run_app(config: &ResetConfig) -> Result<()> {
    let scope = match prompt_scope()? {
        ScopeChoice::Exit => {
            println!("Exiting.");
            return Ok(());
        }
        ScopeChoice::Scope(scope) => scope,
    };
    menu_loop(config, scope).await
}

fn prompt_scope() -> Result<ScopeChoice> {
    loop {
        println!();
        println!(" Database Reset");
        println!("-------------------------");
        println!("a. Delete all entries.");
        println!(
            "b. Delete only entries older than {} days.",
            logic::RETENTION_DAYS
        );
        println!("c. Exit.");
        let input = ask("Enter your choice (a,b,c): ")?;
        match parse_scope_choice(&input) {
            Some(choice) => return Ok(choice),
            None => println!("Try again."),
        }
    }
}

async fn menu_loop(config: &ResetConfig, scope: Scope) -> Result<()> {
    loop {
        println!();
        println!("🧰 Database Reset Utility");
        println!("-------------------------");
        println!("1. Delete entries in Task and User tables");
        println!("2. Delete entries in classRoll table");
        println!("3. Delete entries in Origin table, then POST to RESET_URL");
        println!("4. Exit");
        println!("-------------------------");

        let input = ask("Enter your choice (1-4): ")?;
        let Some(choice) = parse_menu_choice(&input) else {
            eprintln!("❌ Invalid choice. Please enter a number from 1-4.");
            continue;
        };

        match choice {
            MenuChoice::Exit => {
                println!("Exiting.");
                return Ok(());
            }
            MenuChoice::Run(operation) => {
                // Failures are reported and the menu loops; only stdin/stdout
                // trouble tears the session down.
                if let Err(e) = run_operation(config, scope, operation).await {
                    eprintln!("❌ Error: {:?}", e);
                }
            }
        }
    }
}

/// Confirms then executes one menu operation against a fresh connection.
///
/// The connection is opened only after an affirmative answer and is closed on
/// every path, success or failure, before the menu loops.
async fn run_operation(config: &ResetConfig, scope: Scope, operation: Operation) -> Result<()> {
    if !confirm(&operation.warning(scope))? {
        return Ok(());
    }

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to the database")?;

    let result = execute_operation(config, &pool, scope, operation).await;
    pool.close().await;
    result
}

async fn execute_operation(
    config: &ResetConfig,
    pool: &PgPool,
    scope: Scope,
    operation: Operation,
) -> Result<()> {
    match operation {
        Operation::TaskUser => {
            let (tasks, users) = logic::reset_task_user(pool, scope).await?;
            println!(
                "✅ Task and User tables cleaned up ({} task rows, {} user rows removed).",
                tasks, users
            );
        }
        Operation::ClassRoll => {
            let removed = logic::reset_class_roll(pool, scope).await?;
            println!("✅ classRoll table cleaned up ({} rows removed).", removed);
        }
        Operation::Origin => {
            let removed = logic::reset_origin(pool, scope).await?;
            println!("✅ Origin table cleaned up ({} rows removed).", removed);

            // The deletion has committed; a failed notification is a warning,
            // not an error for this operation.
            match notify::notify_reset(&config.reset_url, &config.database_url).await {
                Ok(()) => println!("✅ Notified front end at {}", config.reset_url),
                Err(e) => eprintln!("❌ Failed to POST to RESET_URL: {:#}", e),
            }
        }
    }
    Ok(())
}

fn ask(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    stdout().flush().context("Failed to flush stdout")?;

    let mut input = String::new();
    stdin()
        .read_line(&mut input)
        .context("Failed to read user input")?;
    Ok(input.trim().to_string())
}

fn confirm(message: &str) -> Result<bool> {
    let answer = ask(&format!("{} (y/N): ", message))?;
    Ok(is_affirmative(&answer))
}
