#![allow(deprecated)]
use std::collections::HashMap;

use cucumber::gherkin::Step;
use cucumber::{given, then, when};
use nursery_qa::fixtures::{Entity, unique_name};
use nursery_qa::models::{NewPlant, PlantUpdate};
use nursery_qa::routes;
use serde_json::Value;

use super::{last_response, ok, record, resolve, table_row};
use crate::{NurseryWorld, harness};

/// Values the update scenario writes and then reads back.
const UPDATED_NAME: &str = "Golden Pothos";
const UPDATED_PRICE: f64 = 60.0;
const UPDATED_QUANTITY: i64 = 150;

fn cell<'a>(row: &'a HashMap<String, String>, column: &str) -> &'a str {
    row.get(column)
        .map(String::as_str)
        .unwrap_or_else(|| panic!("table needs a '{column}' column"))
}

fn number<T: std::str::FromStr>(row: &HashMap<String, String>, column: &str) -> T {
    let raw = cell(row, column);
    raw.parse()
        .unwrap_or_else(|_| panic!("'{column}' is not a number: {raw:?}"))
}

/// A plant payload from a `name | categoryId | price | quantity` row.
fn plant_from_row(world: &NurseryWorld, row: &HashMap<String, String>) -> NewPlant {
    NewPlant {
        name: cell(row, "name").to_string(),
        price: number(row, "price"),
        quantity: number(row, "quantity"),
        category_id: Some(resolve(world, cell(row, "categoryId"), Entity::Category)),
    }
}

// ---------------------------------------------------------------------------
// Given steps
// ---------------------------------------------------------------------------

/// The plant must answer 200 with a matching id; it becomes the scenario's
/// working plant.
#[given(expr = "a plant exists with ID {string}")]
async fn plant_exists(world: &mut NurseryWorld, param: String) {
    let token = world.token().to_string();
    let plant_id = resolve(world, &param, Entity::Plant);
    let response = ok(
        harness().client.plants().get(&token, &plant_id.to_string()).await,
        "get plant",
    );
    assert_eq!(
        response.status, 200,
        "plant {plant_id} does not exist: {}",
        response.raw
    );
    assert_eq!(
        response.id().as_deref(),
        Some(plant_id.to_string().as_str()),
        "plant response has a different id"
    );
    world.fixtures.plant_id = Some(plant_id);
    world.fixtures.last_response = Some(response);
}

/// Build a throwaway root category, subcategory and plant for a delete test.
#[given("a plant exists for delete")]
async fn plant_exists_for_delete(world: &mut NurseryWorld) {
    let token = world.token().to_string();
    let client = &harness().client;

    let root = ok(
        client.categories().create_root(&token, &unique_name("Del")).await,
        "create root category",
    );
    let parent_id = root
        .id()
        .unwrap_or_else(|| panic!("root category response has no id: {}", root.raw));
    world.fixtures.created_parent_category_id = Some(parent_id.clone());

    let sub = ok(
        client
            .categories()
            .create_sub(&token, &unique_name("Sub"), &parent_id)
            .await,
        "create subcategory",
    );
    let category_id = sub
        .id()
        .unwrap_or_else(|| panic!("subcategory response has no id: {}", sub.raw));
    world.fixtures.created_category_id = Some(category_id.clone());

    let plant = NewPlant {
        name: unique_name("Plant"),
        price: 100.0,
        quantity: 10,
        category_id: None,
    };
    let created = ok(
        client
            .plants()
            .create_in_category(&token, &category_id, &plant)
            .await,
        "create plant",
    );
    let plant_id = created
        .id()
        .unwrap_or_else(|| panic!("plant response has no id: {}", created.raw));
    world.fixtures.plant_id = plant_id.parse().ok();
    world.fixtures.created_plant_id = Some(plant_id);
}

// ---------------------------------------------------------------------------
// When steps
// ---------------------------------------------------------------------------

/// Authenticated `GET` of any API path.
#[when(expr = "I send GET request to {string}")]
async fn get_path(world: &mut NurseryWorld, path: String) {
    let token = world.token().to_string();
    let result = harness().client.get_path(Some(&token), &path).await;
    record(world, result, "GET request");
}

#[when(expr = "I send GET request to {string} without authentication")]
async fn get_path_anonymously(world: &mut NurseryWorld, path: String) {
    let result = harness().client.plants().get_path_unauthenticated(&path).await;
    record(world, result, "unauthenticated GET request");
}

#[when(expr = "I send GET request to plants by category id {string}")]
async fn plants_by_category(world: &mut NurseryWorld, param: String) {
    let token = world.token().to_string();
    let category_id = resolve(world, &param, Entity::Category);
    let result = harness()
        .client
        .plants()
        .by_category(&token, &category_id.to_string())
        .await;
    record(world, result, "list plants by category");
}

#[when("I create a plant with valid details")]
async fn create_valid_plant(world: &mut NurseryWorld, step: &Step) {
    create_plant(world, step).await;
    let response = last_response(world);
    if response.is_success() {
        world.fixtures.created_plant_id = response.id();
    }
}

#[when("I create a plant with empty name")]
async fn create_unnamed_plant(world: &mut NurseryWorld, step: &Step) {
    create_plant(world, step).await;
}

async fn create_plant(world: &mut NurseryWorld, step: &Step) {
    let token = world.token().to_string();
    let plant = plant_from_row(world, &table_row(step));
    let result = harness().client.plants().create(&token, &plant).await;
    record(world, result, "create plant");
}

/// Update from an `id | name | price | quantity` row.
#[when("I update plant details")]
async fn update_plant(world: &mut NurseryWorld, step: &Step) {
    let token = world.token().to_string();
    let row = table_row(step);
    let plant_id = resolve(world, cell(&row, "id"), Entity::Plant);
    let update = PlantUpdate {
        name: Some(cell(&row, "name").to_string()),
        price: Some(number(&row, "price")),
        quantity: Some(number(&row, "quantity")),
        category_id: None,
    };
    let result = harness()
        .client
        .plants()
        .update(&token, &plant_id.to_string(), &update)
        .await;
    record(world, result, "update plant");
}

#[when("I delete the plant")]
async fn delete_created_plant(world: &mut NurseryWorld) {
    let id = world
        .fixtures
        .created_plant_id
        .clone()
        .expect("no plant to delete: add 'Given a plant exists for delete'");
    delete_plant(world, id).await;
}

async fn delete_plant(world: &mut NurseryWorld, id: String) {
    let token = world.token().to_string();
    let result = harness().client.plants().delete(&token, &id).await;
    record(world, result, "delete plant");
    if world.fixtures.created_plant_id.as_deref() == Some(id.as_str()) {
        world.fixtures.created_plant_id = None;
    }
    world.fixtures.deleted_plant_id = Some(id);
}

#[when(expr = "I send GET request to view details for plant {string}")]
async fn view_plant(world: &mut NurseryWorld, param: String) {
    let token = world.token().to_string();
    let plant_id = resolve(world, &param, Entity::Plant);
    let result = harness()
        .client
        .plants()
        .get(&token, &plant_id.to_string())
        .await;
    record(world, result, "get plant");
}

// ---------------------------------------------------------------------------
// Then steps
// ---------------------------------------------------------------------------

#[then("the plant list is returned in response body")]
async fn plant_list_returned(world: &mut NurseryWorld) {
    let response = last_response(world);
    assert!(
        response.body.is_array(),
        "expected a plant array: {}",
        response.raw
    );
}

#[then("the plant is created successfully")]
async fn plant_created(world: &mut NurseryWorld) {
    let response = last_response(world);
    assert!(response.body.get("id").is_some(), "no id: {}", response.raw);
    assert!(response.body.get("name").is_some(), "no name: {}", response.raw);
}

#[then("validation error message is displayed")]
async fn plant_validation_error(world: &mut NurseryWorld) {
    let body = &last_response(world).body;
    let has_message = ["error", "message"]
        .iter()
        .filter_map(|field| body.get(*field))
        .any(|value| match value {
            Value::String(s) => !s.is_empty(),
            Value::Null | Value::Bool(false) => false,
            _ => true,
        });
    assert!(has_message, "no validation message in {body}");
}

#[then("the updated plant details are returned")]
async fn updated_plant_returned(world: &mut NurseryWorld) {
    let response = last_response(world);
    let body = &response.body;
    assert!(response.id().is_some(), "updated plant has no id: {}", response.raw);
    assert_eq!(body.get("name").and_then(Value::as_str), Some(UPDATED_NAME));
    assert_eq!(body.get("price").and_then(Value::as_f64), Some(UPDATED_PRICE));
    assert_eq!(
        body.get("quantity").and_then(Value::as_i64),
        Some(UPDATED_QUANTITY)
    );
}

#[then("plant is removed from database")]
async fn plant_removed(world: &mut NurseryWorld) {
    let token = world.token().to_string();
    let id = world
        .fixtures
        .deleted_plant_id
        .clone()
        .expect("no plant was deleted in this scenario");
    let response = ok(harness().client.plants().get(&token, &id).await, "get plant");
    assert_eq!(
        response.status, 404,
        "plant {id} still exists: {}",
        response.raw
    );
}

#[then(expr = "the response contains correct details for plant {string}")]
async fn plant_details_correct(world: &mut NurseryWorld, param: String) {
    let plant_id = resolve(world, &param, Entity::Plant);
    let response = last_response(world);
    assert_eq!(
        response.id().as_deref(),
        Some(plant_id.to_string().as_str()),
        "wrong plant returned: {}",
        response.raw
    );
    for field in ["name", "categoryId", "price", "quantity"] {
        assert!(
            response.body.get(field).is_some(),
            "plant details lack '{field}': {}",
            response.raw
        );
    }
}

/// A non-empty array whose plants all carry a category with id and name.
#[then("the response contains plants from category")]
async fn plants_from_category(world: &mut NurseryWorld) {
    let response = last_response(world);
    let plants = response
        .body
        .as_array()
        .unwrap_or_else(|| panic!("expected a plant array: {}", response.raw));
    assert!(!plants.is_empty(), "category has no plants");
    for plant in plants {
        let category = plant
            .get("category")
            .unwrap_or_else(|| panic!("plant without category: {plant}"));
        assert!(category.get("id").is_some(), "category without id: {plant}");
        assert!(category.get("name").is_some(), "category without name: {plant}");
    }
}

#[then("the plants endpoint requires authentication")]
async fn plants_require_auth(world: &mut NurseryWorld) {
    let status = last_response(world).status;
    assert!(
        status == 401 || status == 403,
        "{} answered {status} without a token",
        routes::PLANTS
    );
}

