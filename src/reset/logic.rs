// classdb-tools/src/reset/logic.rs
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use sqlx::{Executor, PgPool, Postgres};

/// Rows older than this are eligible for stale-scoped deletion.
pub const RETENTION_DAYS: i64 = 90;

/// Operator-selected deletion scope, chosen once per session and passed
/// explicitly into every delete routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Every row in the target table(s).
    All,
    /// Only rows with a creation timestamp older than [`RETENTION_DAYS`].
    Stale,
}

impl Scope {
    /// Short description used in confirmation warnings.
    pub fn describe(&self) -> &'static str {
        match self {
            Scope::All => "ALL",
            Scope::Stale => "only stale (older than 90 days)",
        }
    }
}

/// Cutoff timestamp for stale-scoped deletes.
pub fn retention_cutoff() -> DateTime<Utc> {
    Utc::now() - Duration::days(RETENTION_DAYS)
}

/// Delete statements for the Task/User cleanup, in execution order.
///
/// Task rows always go first so the `userId` foreign key never dangles.
/// Both statements target the canonical `"User"` identifier; the legacy
/// script issued `DELETE FROM "USER"` in its all-rows branch, which quoted
/// identifiers make a different (and nonexistent) table.
pub fn task_user_statements(scope: Scope) -> [&'static str; 2] {
    match scope {
        Scope::All => [r#"DELETE FROM "Task""#, r#"DELETE FROM "User""#],
        Scope::Stale => [
            r#"DELETE FROM "Task" WHERE "userId" IN (SELECT "id" FROM "User" WHERE "creationDate" < $1)"#,
            r#"DELETE FROM "User" WHERE "creationDate" < $1"#,
        ],
    }
}

/// Delete statement for the classRoll roster table.
pub fn class_roll_statement(scope: Scope) -> &'static str {
    match scope {
        Scope::All => r#"DELETE FROM "classRoll""#,
        Scope::Stale => r#"DELETE FROM "classRoll" WHERE "creationDate" < $1"#,
    }
}

/// Delete statement for the Origin table.
pub fn origin_statement(scope: Scope) -> &'static str {
    match scope {
        Scope::All => r#"DELETE FROM "Origin""#,
        Scope::Stale => r#"DELETE FROM "Origin" WHERE "creationDate" < $1"#,
    }
}

/// Clears Task then User inside one transaction.
///
/// Any failure rolls the whole transaction back (implicitly, when the
/// transaction guard drops), so partial deletion across the two tables is
/// never observable. Returns (task rows, user rows) removed.
pub async fn reset_task_user(pool: &PgPool, scope: Scope) -> Result<(u64, u64)> {
    let [task_stmt, user_stmt] = task_user_statements(scope);
    let mut tx = pool.begin().await.context("Failed to begin transaction")?;
    let tasks = run_scoped(&mut *tx, task_stmt, scope)
        .await
        .context("Failed to delete from Task")?;
    let users = run_scoped(&mut *tx, user_stmt, scope)
        .await
        .context("Failed to delete from User")?;
    tx.commit()
        .await
        .context("Failed to commit Task/User cleanup")?;
    Ok((tasks, users))
}

/// Clears the classRoll roster table. Single statement, no transaction.
pub async fn reset_class_roll(pool: &PgPool, scope: Scope) -> Result<u64> {
    run_scoped(pool, class_roll_statement(scope), scope)
        .await
        .context("Failed to delete from classRoll")
}

/// Clears the Origin table. Single statement, no transaction.
pub async fn reset_origin(pool: &PgPool, scope: Scope) -> Result<u64> {
    run_scoped(pool, origin_statement(scope), scope)
        .await
        .context("Failed to delete from Origin")
}

async fn run_scoped<'c, E>(executor: E, statement: &str, scope: Scope) -> sqlx::Result<u64>
where
    E: Executor<'c, Database = Postgres>,
{
    let query = sqlx::query(statement);
    let query = match scope {
        Scope::All => query,
        Scope::Stale => query.bind(retention_cutoff()),
    };
    Ok(query.execute(executor).await?.rows_affected())
}
