pub mod health;
pub mod login;
pub mod pretest;
pub mod reset_db;
pub mod seed;

use colored::Colorize;
use serde::Serialize;

use nursery_qa::QaResult;

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> QaResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Green check / red cross status marker.
pub fn marker(ok: bool) -> String {
    if ok {
        "✓".green().bold().to_string()
    } else {
        "✗".red().bold().to_string()
    }
}
