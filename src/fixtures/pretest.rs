//! Pretest seeding: create the category → subcategory → plant → sale chain
//! once and hand its ids to later scenarios and runs.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use super::{FixtureState, PretestStore, unique_name};
use crate::api::{ApiClient, ApiResponse};
use crate::env::{Env, Role};
use crate::error::{QaError, QaResult};
use crate::models::{NewPlant, PretestIds, id_string};

/// What the seed payloads look like.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedTemplate {
    pub category_name: String,
    pub subcategory_name: String,
    pub plant: NewPlant,
}

impl Default for SeedTemplate {
    fn default() -> Self {
        SeedTemplate {
            category_name: "Fruits".to_string(),
            subcategory_name: "Mango".to_string(),
            plant: NewPlant {
                name: "Mango Tree".to_string(),
                price: 150.0,
                quantity: 25,
                category_id: None,
            },
        }
    }
}

#[derive(Deserialize)]
struct CategoryFile {
    name: String,
}

impl SeedTemplate {
    /// Read `category.json` and `plants.json` from a test-data directory.
    /// A missing file keeps the default for that part.
    pub fn load(dir: &Path) -> QaResult<Self> {
        let mut template = SeedTemplate::default();

        let category = dir.join("category.json");
        if category.exists() {
            let file: CategoryFile = serde_json::from_str(&fs::read_to_string(category)?)?;
            template.category_name = file.name;
        }

        let plants = dir.join("plants.json");
        if plants.exists() {
            template.plant = serde_json::from_str(&fs::read_to_string(plants)?)?;
        }

        Ok(template)
    }
}

/// How the scenario got its pretest ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// A valid record was on disk; nothing was created.
    Reused(PretestIds),
    /// The chain was created and the record written.
    Created(PretestIds),
}

impl SeedOutcome {
    pub fn ids(&self) -> &PretestIds {
        match self {
            SeedOutcome::Reused(ids) | SeedOutcome::Created(ids) => ids,
        }
    }
}

/// [`ensure_seeded_with`] using the default template.
pub async fn ensure_seeded(
    client: &ApiClient,
    env: &Env,
    store: &PretestStore,
    state: &mut FixtureState,
) -> QaResult<SeedOutcome> {
    ensure_seeded_with(client, env, store, state, &SeedTemplate::default()).await
}

/// Adopt the stored pretest record, or create the chain and store it.
///
/// Either way the scenario ends up authenticated as admin. A failing step
/// aborts the chain; entities created before it stay in `state` so cleanup
/// can remove them.
pub async fn ensure_seeded_with(
    client: &ApiClient,
    env: &Env,
    store: &PretestStore,
    state: &mut FixtureState,
    template: &SeedTemplate,
) -> QaResult<SeedOutcome> {
    if let Some(ids) = store.read() {
        state.adopt(&ids);
        state.auth_token = Some(client.auth().authenticate(env, Role::Admin).await?);
        info!(
            plant = %ids.plant_id,
            sale = %ids.sale_id,
            "reusing pretest record"
        );
        return Ok(SeedOutcome::Reused(ids));
    }

    let token = client.auth().authenticate(env, Role::Admin).await?;
    state.auth_token = Some(token.clone());

    let response = client
        .categories()
        .create_raw(&token, json!({ "name": unique_name(&template.category_name) }))
        .await?;
    let parent_id = created_id(&response, "parent category", &["id"])?;
    state.created_parent_category_id = Some(parent_id.clone());

    let response = client
        .categories()
        .create_sub(&token, &template.subcategory_name, &parent_id)
        .await?;
    let category_id = created_id(&response, "subcategory", &["id"])?;
    state.created_category_id = Some(category_id.clone());

    let response = client
        .plants()
        .create_in_category(&token, &category_id, &template.plant)
        .await?;
    let plant_id = created_id(&response, "plant", &["id"])?;
    state.created_plant_id = Some(plant_id.clone());

    let response = client.sales().sell(&token, &plant_id, 1).await?;
    let sale_id = created_id(&response, "sale", &["id", "saleId"])?;
    state.record_sale(sale_id.clone());

    let ids = PretestIds {
        parent_category_id: parent_id,
        category_id,
        plant_id,
        sale_id,
    };
    store.write(&ids)?;
    state.pretest_ids = Some(ids.clone());

    info!(
        parent = %ids.parent_category_id,
        category = %ids.category_id,
        plant = %ids.plant_id,
        sale = %ids.sale_id,
        "pretest chain created"
    );
    Ok(SeedOutcome::Created(ids))
}

/// The id of a seed step's response. Anything but a 201 carrying one of
/// `fields` fails the step.
fn created_id(response: &ApiResponse, step: &str, fields: &[&str]) -> QaResult<String> {
    let id = fields
        .iter()
        .find_map(|f| response.body.get(*f).and_then(id_string));
    match id {
        Some(id) if response.status == 201 => Ok(id),
        _ => Err(QaError::Seed {
            step: step.to_string(),
            status: response.status,
            body: match &response.body {
                Value::Null => response.raw.clone(),
                body => body.to_string(),
            },
        }),
    }
}
