use serde_json::json;

use super::{marker, print_json};
use nursery_qa::db;
use nursery_qa::env::Env;
use nursery_qa::fixtures::PretestStore;
use nursery_qa::{QaError, QaResult};

fn confirm(yes: bool) -> QaResult<()> {
    if yes {
        Ok(())
    } else {
        Err(QaError::NotConfirmed(format!(
            "truncate {}",
            db::RESET_TABLES.join(", ")
        )))
    }
}

/// Truncate the nursery tables. The stored pretest ids point at deleted rows
/// afterwards, so the record is dropped too.
pub async fn run(store: &PretestStore, yes: bool, json: bool) -> QaResult<()> {
    confirm(yes)?;
    let env = Env::load()?;
    db::reset_database(&env.db).await?;
    let cleared = store.clear()?;

    if json {
        return print_json(&json!({
            "database": env.db.name,
            "tables": db::RESET_TABLES,
            "pretest_record_cleared": cleared,
        }));
    }
    println!(
        "{} truncated {} in {}",
        marker(true),
        db::RESET_TABLES.join(", "),
        env.db.name
    );
    if cleared {
        println!("  pretest record removed");
    }
    Ok(())
}
