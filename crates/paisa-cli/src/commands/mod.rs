//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Core commands (init) and shared utilities (open_db, periods)
//! - `expenses` - Expense commands (add, list)
//! - `reports` - Statistics, suggestions, report, and export commands
//! - `serve` - Web server command
//! - `users` - User management commands

pub mod core;
pub mod expenses;
pub mod reports;
pub mod serve;
pub mod users;

// Re-export command functions for main.rs
pub use core::*;
pub use expenses::*;
pub use reports::*;
pub use serve::*;
pub use users::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
