use std::path::Path;

use colored::Colorize;
use serde_json::json;

use super::{marker, print_json};
use nursery_qa::QaResult;
use nursery_qa::api::ApiClient;
use nursery_qa::env::Env;
use nursery_qa::fixtures::{FixtureState, PretestStore, SeedOutcome, SeedTemplate, ensure_seeded_with};

/// Single-writer seed phase: run once before a parallel cucumber run so
/// every worker reuses the same record.
pub async fn run(store: &PretestStore, testdata: Option<&Path>, json: bool) -> QaResult<()> {
    let env = Env::load()?;
    let client = ApiClient::from_env(&env)?;
    let template = match testdata {
        Some(dir) => SeedTemplate::load(dir)?,
        None => SeedTemplate::default(),
    };

    let mut state = FixtureState::default();
    let outcome = ensure_seeded_with(&client, &env, store, &mut state, &template).await?;
    let (label, ids) = match &outcome {
        SeedOutcome::Reused(ids) => ("reused", ids),
        SeedOutcome::Created(ids) => ("created", ids),
    };

    if json {
        return print_json(&json!({ "outcome": label, "ids": ids }));
    }

    println!(
        "{} pretest record {} at {}",
        marker(true),
        label.bold(),
        store.path().display()
    );
    println!("  parent category: {}", ids.parent_category_id);
    println!("  category:        {}", ids.category_id);
    println!("  plant:           {}", ids.plant_id);
    println!("  sale:            {}", ids.sale_id);
    Ok(())
}
