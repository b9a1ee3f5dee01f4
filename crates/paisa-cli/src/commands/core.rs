//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` / `resolve_user` / `resolve_period` - shared utilities
//! - `cmd_init` - Initialize the database

use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::Datelike;

use paisa_core::{models::User, Database, DateWindow};

pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path must be valid UTF-8")?;
    tracing::debug!(path = %db_path.display(), "Opening database");
    Database::new(path_str).context("Failed to open database")
}

/// Resolve the acting user from --user, falling back to the sole registered
/// user when the flag is omitted.
pub fn resolve_user(db: &Database, email: Option<&str>) -> Result<User> {
    if let Some(email) = email {
        return db
            .get_user_by_email(email)?
            .with_context(|| format!("No user with email '{}'", email));
    }
    let users = db.list_users()?;
    match users.len() {
        0 => bail!("No users registered yet. Run: paisa user add NAME EMAIL"),
        1 => {
            let user = users.into_iter().next().unwrap();
            tracing::debug!(user_id = user.id, "Acting as the sole registered user");
            Ok(user)
        }
        _ => bail!("Multiple users registered; pick one with --user EMAIL"),
    }
}

/// Turn optional month/year flags into a window, `None` when both are
/// omitted. One without the other is an error.
pub fn resolve_period(
    month: Option<u32>,
    year: Option<i32>,
) -> Result<Option<(i32, u32, DateWindow)>> {
    match (month, year) {
        (Some(m), Some(y)) => month_window(y, m).map(Some),
        (None, None) => Ok(None),
        _ => bail!("--month and --year must be given together"),
    }
}

/// Like `resolve_period`, but defaults to the current calendar month.
pub fn resolve_period_or_current(
    month: Option<u32>,
    year: Option<i32>,
) -> Result<(i32, u32, DateWindow)> {
    match resolve_period(month, year)? {
        Some(period) => Ok(period),
        None => {
            let today = chrono::Utc::now().date_naive();
            month_window(today.year(), today.month())
        }
    }
}

fn month_window(year: i32, month: u32) -> Result<(i32, u32, DateWindow)> {
    let window = DateWindow::month(year, month)
        .with_context(|| format!("Invalid month/year: {}/{}", month, year))?;
    Ok((year, month, window))
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let _db = open_db(db_path)?;

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Register a user: paisa user add \"Your Name\" you@example.com");
    println!("  2. Record an expense: paisa add \"Mess lunch\" 85.50 -c \"Food & Snacks\"");
    println!("  3. Start web UI: paisa serve");

    Ok(())
}
