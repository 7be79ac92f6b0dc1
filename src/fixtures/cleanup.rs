//! Best-effort teardown of the entities a scenario created.

use tracing::{debug, warn};

use super::{Entity, FixtureState};
use crate::api::{ApiClient, ApiResponse};
use crate::error::QaResult;

/// Scenario tags that turn the cleanup hook off. Compared without the `@`.
pub const OPT_OUT_TAGS: &[&str] = &["skip-cleanup", "manages-categories"];

/// One entity the hook looked at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deletion {
    pub entity: Entity,
    pub id: String,
    pub detail: Option<String>,
}

impl Deletion {
    fn new(entity: Entity, id: &str, detail: Option<String>) -> Self {
        Deletion {
            entity,
            id: id.to_string(),
            detail,
        }
    }
}

/// What the cleanup hook did for one scenario.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Why nothing was attempted, when the hook bailed out early.
    pub not_run: Option<String>,
    pub deleted: Vec<Deletion>,
    pub failed: Vec<Deletion>,
    pub skipped: Vec<Deletion>,
}

impl CleanupReport {
    fn not_run(reason: impl Into<String>) -> Self {
        CleanupReport {
            not_run: Some(reason.into()),
            ..Default::default()
        }
    }
}

/// True if any of `tags` (with or without a leading `@`) opts out of cleanup.
pub fn opted_out(tags: &[String]) -> Option<&str> {
    tags.iter()
        .map(|t| t.trim_start_matches('@'))
        .find(|t| OPT_OUT_TAGS.contains(t))
}

/// Delete what the scenario created: sales, then the plant, then the
/// subcategory, then the parent category.
///
/// Failures are logged and recorded, never returned, so one stuck entity
/// does not stop the rest or fail the scenario. Ids that belong to the
/// pretest record are left alone for the next scenario.
pub async fn cleanup(client: &ApiClient, state: &FixtureState, tags: &[String]) -> CleanupReport {
    if let Some(tag) = opted_out(tags) {
        debug!(tag, "cleanup disabled by tag");
        return CleanupReport::not_run(format!("opted out with @{tag}"));
    }
    let Some(token) = state.auth_token.as_deref() else {
        return CleanupReport::not_run("no auth token");
    };

    let mut report = CleanupReport::default();
    for (entity, id) in targets(state) {
        if let Some(ids) = &state.pretest_ids {
            if entity.pretest_id(ids) == id {
                report
                    .skipped
                    .push(Deletion::new(entity, &id, Some("pretest record".to_string())));
                continue;
            }
        }
        if entity == Entity::Plant && state.deleted_plant_id.as_deref() == Some(id.as_str()) {
            report
                .skipped
                .push(Deletion::new(entity, &id, Some("deleted by scenario".to_string())));
            continue;
        }

        match delete(client, token, entity, &id).await {
            Ok(response) if response.is_success() => {
                debug!(%entity, %id, "deleted");
                report.deleted.push(Deletion::new(entity, &id, None));
            }
            Ok(response) if response.status == 404 => {
                debug!(%entity, %id, "already gone");
                report
                    .deleted
                    .push(Deletion::new(entity, &id, Some("already gone".to_string())));
            }
            Ok(response) => {
                warn!(%entity, %id, status = response.status, body = %response.raw, "cleanup delete rejected");
                report.failed.push(Deletion::new(
                    entity,
                    &id,
                    Some(format!("status {}", response.status)),
                ));
            }
            Err(e) => {
                warn!(%entity, %id, error = %e, "cleanup delete failed");
                report
                    .failed
                    .push(Deletion::new(entity, &id, Some(e.to_string())));
            }
        }
    }
    report
}

/// Everything to delete, in foreign-key order.
fn targets(state: &FixtureState) -> Vec<(Entity, String)> {
    let mut sales = state.created_sale_ids.clone();
    if let Some(id) = &state.created_sale_id {
        if !sales.contains(id) {
            sales.push(id.clone());
        }
    }

    let mut targets: Vec<(Entity, String)> = sales.into_iter().map(|id| (Entity::Sale, id)).collect();
    for entity in [Entity::Plant, Entity::Category, Entity::ParentCategory] {
        if let Some(id) = state.created_id(entity) {
            targets.push((entity, id.to_string()));
        }
    }
    targets
}

async fn delete(client: &ApiClient, token: &str, entity: Entity, id: &str) -> QaResult<ApiResponse> {
    match entity {
        Entity::Sale => client.sales().delete(token, id).await,
        Entity::Plant => client.plants().delete(token, id).await,
        Entity::Category | Entity::ParentCategory => client.categories().delete(token, id).await,
    }
}
