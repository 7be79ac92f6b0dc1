use chrono::{DateTime, Local};
use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::{marker, print_json};
use nursery_qa::fixtures::{Entity, PretestStore};
use nursery_qa::{QaError, QaResult};

#[derive(Tabled)]
struct Row {
    #[tabled(rename = "ENTITY")]
    entity: &'static str,
    #[tabled(rename = "ID")]
    id: String,
}

pub fn show(store: &PretestStore, json: bool) -> QaResult<()> {
    let ids = store
        .read()
        .ok_or_else(|| QaError::NoPretestRecord(store.path().to_path_buf()))?;

    if json {
        return print_json(&ids);
    }

    let rows: Vec<Row> = [
        Entity::ParentCategory,
        Entity::Category,
        Entity::Plant,
        Entity::Sale,
    ]
    .into_iter()
    .map(|e| Row {
        entity: e.label(),
        id: e.pretest_id(&ids).to_string(),
    })
    .collect();

    println!("Record: {}", store.path().display());
    if let Ok(modified) = std::fs::metadata(store.path()).and_then(|m| m.modified()) {
        let modified: DateTime<Local> = modified.into();
        println!("Written: {}", modified.format("%Y-%m-%d %H:%M"));
    }
    println!("{}", Table::new(rows).with(Style::sharp()));
    Ok(())
}

pub fn clear(store: &PretestStore, json: bool) -> QaResult<()> {
    let removed = store.clear()?;
    if json {
        return print_json(&json!({ "path": store.path(), "removed": removed }));
    }
    if removed {
        println!("{} removed {}", marker(true), store.path().display());
    } else {
        println!("No pretest record at {}", store.path().display());
    }
    Ok(())
}
