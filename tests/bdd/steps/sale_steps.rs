#![allow(deprecated)]
use cucumber::{given, then, when};
use nursery_qa::fixtures::Entity;
use nursery_qa::inspect;
use nursery_qa::models::{SalesPageQuery, id_string};
use serde_json::Value;

use super::{assert_status, last_response, ok, record, resolve};
use crate::{NurseryWorld, harness};

/// `id`, or `_id` on payloads that use it.
fn sale_id(body: &Value) -> Option<String> {
    body.get("id")
        .or_else(|| body.get("_id"))
        .and_then(id_string)
}

async fn plant_stock(token: &str, plant_id: i64) -> f64 {
    let response = ok(
        harness().client.plants().get(token, &plant_id.to_string()).await,
        "get plant",
    );
    inspect::extract_stock(&response.body).unwrap_or_else(|| {
        panic!(
            "no numeric stock or quantity field in plant response: {}",
            response.raw
        )
    })
}

async fn sell(world: &mut NurseryWorld, plant_id: i64, quantity: i64) {
    let token = world.token().to_string();
    world.fixtures.plant_id = Some(plant_id);
    world.fixtures.quantity_sold = Some(quantity);
    let result = harness()
        .client
        .sales()
        .sell(&token, &plant_id.to_string(), quantity)
        .await;
    record(world, result, "sell plant");
}

async fn request_sales_list(world: &mut NurseryWorld) {
    let token = world.token().to_string();
    let result = harness().client.sales().list(&token).await;
    record(world, result, "list sales");
}

async fn request_sales_page(world: &mut NurseryWorld, query: SalesPageQuery) {
    let token = world.token().to_string();
    let result = harness().client.sales().page(&token, &query).await;
    record(world, result, "sales page");
}

// ---------------------------------------------------------------------------
// Given steps
// ---------------------------------------------------------------------------

/// Record the plant's current stock as the baseline for later checks.
#[given(expr = "plant with id {string} is in stock")]
async fn plant_in_stock(world: &mut NurseryWorld, param: String) {
    let plant_id = resolve(world, &param, Entity::Plant);
    let stock = plant_stock(world.token(), plant_id).await;
    assert!(stock > 0.0, "plant {plant_id} is out of stock");
    world.fixtures.plant_id = Some(plant_id);
    world.fixtures.initial_plant_stock = Some(stock);
}

#[given(expr = "a sale exists for plant with id {string} and quantity {int}")]
async fn sale_exists(world: &mut NurseryWorld, param: String, quantity: i64) {
    let plant_id = resolve(world, &param, Entity::Plant);
    sell(world, plant_id, quantity).await;
    let response = last_response(world);
    assert_eq!(
        response.status, 201,
        "could not create a sale: {}",
        response.raw
    );
    let id = sale_id(&response.body)
        .unwrap_or_else(|| panic!("created sale has no id: {}", response.raw));
    world.fixtures.record_sale(id);
}

/// Sell `count` times, stopping at the first refusal. Fails up front when
/// the plant cannot cover every sale.
#[given(expr = "at least {int} sales exist for plant with id {string} and quantity {int}")]
async fn sales_exist_for_plant(world: &mut NurseryWorld, count: i64, param: String, quantity: i64) {
    let plant_id = resolve(world, &param, Entity::Plant);
    let stock = plant_stock(world.token(), plant_id).await;
    world.fixtures.initial_plant_stock = Some(stock);
    let required = (count * quantity) as f64;
    assert!(
        stock >= required,
        "not enough stock for plant {plant_id}: have {stock}, need {required}"
    );

    for _ in 0..count {
        sell(world, plant_id, quantity).await;
        let response = last_response(world);
        if response.status != 201 {
            break;
        }
        if let Some(id) = sale_id(&response.body) {
            world.fixtures.record_sale(id);
        }
    }
}

/// Prefer this scenario's or the pretest sale, else the first listed sale.
#[given("a valid sale id exists")]
async fn valid_sale_id(world: &mut NurseryWorld) {
    let known = world
        .fixtures
        .created_sale_id
        .clone()
        .or_else(|| harness().store.read().map(|ids| ids.sale_id));
    if let Some(id) = known {
        world.fixtures.sale_id_to_fetch = Some(id);
        return;
    }

    let response = ok(
        harness().client.sales().list(world.token()).await,
        "list sales",
    );
    let first = response
        .body
        .as_array()
        .and_then(|sales| sales.first())
        .unwrap_or_else(|| panic!("no sales exist to fetch: {}", response.raw));
    let id = sale_id(first).unwrap_or_else(|| panic!("listed sale has no id: {first}"));
    world.fixtures.sale_id_to_fetch = Some(id);
}

#[given(expr = "at least {int} sales exist")]
async fn at_least_sales(world: &mut NurseryWorld, count: usize) {
    let response = ok(
        harness().client.sales().list(world.token()).await,
        "list sales",
    );
    let sales = response
        .body
        .as_array()
        .unwrap_or_else(|| panic!("sales list is not an array: {}", response.raw));
    assert!(
        sales.len() >= count,
        "expected at least {count} sales, found {}",
        sales.len()
    );
}

// ---------------------------------------------------------------------------
// When steps
// ---------------------------------------------------------------------------

#[when(expr = "Admin sells plant with id {string} and quantity {int}")]
async fn admin_sells(world: &mut NurseryWorld, param: String, quantity: i64) {
    let plant_id = resolve(world, &param, Entity::Plant);
    sell(world, plant_id, quantity).await;
}

/// Sell one more unit than the plant holds.
#[when(expr = "Admin sells plant with id {string} with quantity exceeding stock")]
async fn admin_oversells(world: &mut NurseryWorld, param: String) {
    let plant_id = resolve(world, &param, Entity::Plant);
    let stock = match world.fixtures.initial_plant_stock {
        Some(stock) => stock,
        None => {
            let stock = plant_stock(world.token(), plant_id).await;
            world.fixtures.initial_plant_stock = Some(stock);
            stock
        }
    };
    sell(world, plant_id, stock as i64 + 1).await;
}

#[when("Admin requests the sales list")]
async fn admin_requests_sales(world: &mut NurseryWorld) {
    request_sales_list(world).await;
}

#[when("User requests the sales list")]
async fn user_requests_sales(world: &mut NurseryWorld) {
    request_sales_list(world).await;
}

#[when("Admin deletes the sale")]
async fn admin_deletes_sale(world: &mut NurseryWorld) {
    let token = world.token().to_string();
    let id = world
        .fixtures
        .created_sale_id
        .clone()
        .expect("no sale to delete: add a Given step that creates one");
    let result = harness().client.sales().delete(&token, &id).await;
    record(world, result, "delete sale");
    if last_response(world).is_success() {
        world.fixtures.created_sale_ids.retain(|s| s != &id);
        world.fixtures.created_sale_id = None;
    }
}

/// `sort` is a `field,dir` spec such as `soldAt,desc`.
#[when(expr = "Admin requests sales page {int} with size {int} sorted by {string}")]
async fn admin_requests_sorted_page(world: &mut NurseryWorld, page: u32, size: u32, sort: String) {
    request_sales_page(world, SalesPageQuery::new(page, size).with_sort_spec(&sort)).await;
}

#[when(expr = "User requests sales page {int} with size {int}")]
async fn user_requests_page(world: &mut NurseryWorld, page: u32, size: u32) {
    request_sales_page(world, SalesPageQuery::new(page, size)).await;
}

#[when("User requests the sale by id")]
async fn user_requests_sale(world: &mut NurseryWorld) {
    let token = world.token().to_string();
    let id = world
        .fixtures
        .sale_id_to_fetch
        .clone()
        .or_else(|| world.fixtures.created_sale_id.clone())
        .expect("no sale id: add 'Given a valid sale id exists'");
    let result = harness().client.sales().get(&token, &id).await;
    record(world, result, "get sale");
}

#[when(expr = "User requests the sale with invalid id {int}")]
async fn user_requests_invalid_sale(world: &mut NurseryWorld, id: i64) {
    let token = world.token().to_string();
    let result = harness().client.sales().get(&token, &id.to_string()).await;
    record(world, result, "get sale");
}

// ---------------------------------------------------------------------------
// Then steps
// ---------------------------------------------------------------------------

#[then(expr = "the sales response status is {int}")]
async fn sales_status(world: &mut NurseryWorld, status: u16) {
    assert_status(world, status);
}

/// 201 with id, plant and quantity, matching what was sold. The sale is
/// recorded for cleanup.
#[then("the sale is created successfully")]
async fn sale_created(world: &mut NurseryWorld) {
    assert_status(world, 201);
    let response = last_response(world);
    let body = &response.body;
    for field in ["id", "plant", "quantity"] {
        assert!(body.get(field).is_some(), "sale lacks '{field}': {}", response.raw);
    }

    if let Some(sold) = world.fixtures.quantity_sold {
        assert_eq!(
            body.get("quantity").and_then(Value::as_i64),
            Some(sold),
            "sale quantity differs from the amount sold"
        );
    }
    if let Some(plant_id) = world.fixtures.plant_id {
        let sold_plant = body.pointer("/plant/id").and_then(id_string);
        assert_eq!(
            sold_plant.as_deref(),
            Some(plant_id.to_string().as_str()),
            "sale is for a different plant"
        );
    }

    if let Some(id) = sale_id(body) {
        world.fixtures.record_sale(id);
    }
}

#[then("the plant stock is reduced")]
async fn stock_reduced(world: &mut NurseryWorld) {
    let plant_id = world.fixtures.plant_id.expect("no plant was sold");
    let initial = world
        .fixtures
        .initial_plant_stock
        .expect("no stock baseline: add 'Given plant with id ... is in stock'");
    let sold = world.fixtures.quantity_sold.expect("nothing was sold");

    let stock = plant_stock(world.token(), plant_id).await;
    assert_eq!(
        stock,
        initial - sold as f64,
        "stock went from {initial} to {stock} after selling {sold}"
    );
}

#[then("the sales list is returned")]
async fn sales_list_returned(world: &mut NurseryWorld) {
    assert_status(world, 200);
    let response = last_response(world);
    assert!(response.body.is_array(), "sales list is not an array: {}", response.raw);
}

/// A Spring page: `content` holds at most `max` sales, `size` echoes `max`
/// and `number` is non-negative when present.
#[then(expr = "a paginated sales response is returned with max size {int}")]
async fn paginated_sales(world: &mut NurseryWorld, max: u64) {
    assert_status(world, 200);
    let response = last_response(world);
    let body = &response.body;
    assert!(body.is_object(), "page response is not an object: {}", response.raw);

    let content = body
        .get("content")
        .and_then(Value::as_array)
        .unwrap_or_else(|| panic!("page response has no content array: {}", response.raw));
    assert!(
        content.len() as u64 <= max,
        "page holds {} sales, more than {max}",
        content.len()
    );
    if let Some(size) = body.get("size") {
        assert_eq!(size.as_u64(), Some(max), "page size differs");
    }
    if let Some(number) = body.get("number") {
        assert!(
            number.as_i64().is_some_and(|n| n >= 0),
            "negative page number: {number}"
        );
    }
}

#[then("the sale details are returned")]
async fn sale_details(world: &mut NurseryWorld) {
    let response = last_response(world);
    assert!(
        sale_id(&response.body).is_some(),
        "sale details have no id: {}",
        response.raw
    );
}

#[then("an error response is returned")]
async fn error_response(world: &mut NurseryWorld) {
    let response = last_response(world);
    assert!(
        inspect::has_error_field(&response.body),
        "response does not look like an error: {}",
        response.raw
    );
}
