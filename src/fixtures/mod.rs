//! Per-scenario fixture state and the lifecycle hooks around it.

pub mod cleanup;
pub mod pretest;
pub mod store;

use std::fmt;

use crate::api::ApiResponse;
use crate::error::{QaError, QaResult};
use crate::models::PretestIds;

pub use cleanup::{CleanupReport, cleanup};
pub use pretest::{SeedOutcome, SeedTemplate, ensure_seeded, ensure_seeded_with};
pub use store::PretestStore;

/// Step parameter that stands for the seeded entity instead of a literal id.
pub const PRETEST_KEYWORD: &str = "pretest";

/// The four entities of the fixture chain, in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    ParentCategory,
    Category,
    Plant,
    Sale,
}

impl Entity {
    pub fn label(&self) -> &'static str {
        match self {
            Entity::ParentCategory => "parent category",
            Entity::Category => "category",
            Entity::Plant => "plant",
            Entity::Sale => "sale",
        }
    }

    /// This entity's id in a pretest record.
    pub fn pretest_id<'a>(&self, ids: &'a PretestIds) -> &'a str {
        match self {
            Entity::ParentCategory => &ids.parent_category_id,
            Entity::Category => &ids.category_id,
            Entity::Plant => &ids.plant_id,
            Entity::Sale => &ids.sale_id,
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// API-facing scenario state. Built fresh for every scenario and dropped
/// after the cleanup hook has run.
#[derive(Debug, Default)]
pub struct FixtureState {
    pub auth_token: Option<String>,
    pub last_response: Option<ApiResponse>,
    /// Responses of bulk steps, such as logging in with a table of users.
    pub multiple_responses: Vec<ApiResponse>,

    pub created_parent_category_id: Option<String>,
    pub created_category_id: Option<String>,
    pub created_plant_id: Option<String>,
    pub created_sale_id: Option<String>,
    pub created_sale_ids: Vec<String>,

    pub deleted_plant_id: Option<String>,
    pub sale_id_to_fetch: Option<String>,
    pub plant_id: Option<i64>,
    pub initial_plant_stock: Option<f64>,
    pub quantity_sold: Option<i64>,

    /// The pretest record this scenario adopted or created, if any.
    pub pretest_ids: Option<PretestIds>,
}

impl FixtureState {
    /// Take over the ids of a pretest record.
    pub fn adopt(&mut self, ids: &PretestIds) {
        self.created_parent_category_id = Some(ids.parent_category_id.clone());
        self.created_category_id = Some(ids.category_id.clone());
        self.created_plant_id = Some(ids.plant_id.clone());
        self.created_sale_id = Some(ids.sale_id.clone());
        self.created_sale_ids = vec![ids.sale_id.clone()];
        self.pretest_ids = Some(ids.clone());
    }

    /// Remember a sale so cleanup deletes it.
    pub fn record_sale(&mut self, id: String) {
        if !self.created_sale_ids.contains(&id) {
            self.created_sale_ids.push(id.clone());
        }
        self.created_sale_id = Some(id);
    }

    /// The id this scenario holds for `entity`.
    pub fn created_id(&self, entity: Entity) -> Option<&str> {
        match entity {
            Entity::ParentCategory => self.created_parent_category_id.as_deref(),
            Entity::Category => self.created_category_id.as_deref(),
            Entity::Plant => self.created_plant_id.as_deref(),
            Entity::Sale => self.created_sale_id.as_deref(),
        }
    }

    /// Resolve a step parameter to a numeric id of `entity`, falling back to
    /// the on-disk record when the scenario has not created one.
    pub fn resolve(&self, param: &str, entity: Entity, store: &PretestStore) -> QaResult<i64> {
        resolve_id(
            param,
            self.created_id(entity),
            || store.read().map(|ids| entity.pretest_id(&ids).to_string()),
            entity.label(),
        )
    }
}

/// Normalize a step parameter into an id.
///
/// The keyword `pretest` (any case, surrounding whitespace ignored) resolves
/// to `from_world`, then to `from_store`; anything else must be an integer.
pub fn resolve_id<F>(param: &str, from_world: Option<&str>, from_store: F, what: &str) -> QaResult<i64>
where
    F: FnOnce() -> Option<String>,
{
    let normalized = param.trim();
    if normalized.eq_ignore_ascii_case(PRETEST_KEYWORD) {
        let id = match from_world {
            Some(id) => id.to_string(),
            None => from_store().ok_or_else(|| QaError::PretestMissing(what.to_string()))?,
        };
        return parse_id(&id);
    }
    parse_id(normalized)
}

fn parse_id(raw: &str) -> QaResult<i64> {
    raw.trim()
        .parse()
        .map_err(|_| QaError::InvalidId(raw.to_string()))
}

/// `base` with a short random suffix, for names the API requires to be unique.
///
/// The base is cut to six characters so the result stays within the short
/// name limits the nursery app enforces on categories.
pub fn unique_name(base: &str) -> String {
    let base: String = base.chars().take(6).collect();
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{base}{}", &suffix[..4])
}
