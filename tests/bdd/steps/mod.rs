pub mod auth_steps;
pub mod plant_steps;
pub mod sale_steps;
pub mod ui_sales_steps;

use std::collections::HashMap;

use cucumber::gherkin::Step;
use nursery_qa::QaResult;
use nursery_qa::api::ApiResponse;
use nursery_qa::fixtures::Entity;

use crate::{NurseryWorld, harness};

// ---------------------------------------------------------------------------
// Helpers shared by the step modules
// ---------------------------------------------------------------------------

/// Rows of the step's data table, keyed by the header row.
pub fn table_rows(step: &Step) -> Vec<HashMap<String, String>> {
    let table = step
        .table
        .as_ref()
        .unwrap_or_else(|| panic!("step '{}' needs a data table", step.value));
    let Some((header, rows)) = table.rows.split_first() else {
        return Vec::new();
    };
    rows.iter()
        .map(|row| {
            header
                .iter()
                .cloned()
                .zip(row.iter().map(|cell| cell.trim().to_string()))
                .collect()
        })
        .collect()
}

/// The single data row of a step table.
pub fn table_row(step: &Step) -> HashMap<String, String> {
    table_rows(step)
        .into_iter()
        .next()
        .unwrap_or_else(|| panic!("step '{}' has an empty data table", step.value))
}

/// Unwrap a library result, failing the step with the error message.
pub fn ok<T>(result: QaResult<T>, what: &str) -> T {
    result.unwrap_or_else(|e| panic!("{what}: {e}"))
}

/// Store an API call's response as the scenario's last response.
pub fn record(world: &mut NurseryWorld, result: QaResult<ApiResponse>, what: &str) {
    world.fixtures.last_response = Some(ok(result, what));
}

pub fn last_response(world: &NurseryWorld) -> &ApiResponse {
    world
        .fixtures
        .last_response
        .as_ref()
        .expect("no response recorded: run a request step first")
}

/// Assert the last response has `status`, showing the body when it does not.
pub fn assert_status(world: &NurseryWorld, status: u16) {
    let response = last_response(world);
    assert_eq!(
        response.status,
        status,
        "expected status {status}, got {}: {}",
        response.status,
        response.raw
    );
}

/// Resolve an id step parameter (`pretest` or a number) for `entity`.
pub fn resolve(world: &NurseryWorld, param: &str, entity: Entity) -> i64 {
    ok(
        world.fixtures.resolve(param, entity, &harness().store),
        &format!("cannot resolve {entity} id {param:?}"),
    )
}
