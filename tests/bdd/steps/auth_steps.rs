#![allow(deprecated)]
use cucumber::gherkin::Step;
use cucumber::{given, then, when};
use nursery_qa::api::auth;
use nursery_qa::env::Role;

use super::{ok, table_rows};
use crate::{NurseryWorld, harness};

// ---------------------------------------------------------------------------
// Given steps
// ---------------------------------------------------------------------------

/// Log in as the configured admin and keep the token for later steps.
#[given("Admin authenticated")]
async fn admin_authenticated(world: &mut NurseryWorld) {
    let h = harness();
    let creds = h.env.credentials(Role::Admin);
    let response = ok(
        h.client.auth().login(&creds.username, &creds.password).await,
        "admin login",
    );
    assert_eq!(response.status, 200, "admin login failed: {}", response.raw);
    let token = auth::token_from(&response).expect("admin login response has no token");
    world.fixtures.auth_token = Some(token);
    world.fixtures.last_response = Some(response);
}

/// Log in as the configured non-admin user.
#[given("User authenticated")]
async fn user_authenticated(world: &mut NurseryWorld) {
    let h = harness();
    let token = ok(h.client.auth().authenticate(&h.env, Role::User).await, "user login");
    world.fixtures.auth_token = Some(token);
}

// ---------------------------------------------------------------------------
// When steps
// ---------------------------------------------------------------------------

/// Log in once per table row (`username`, `password`), keeping every
/// response. Blank cells are sent as empty strings.
#[when("I login via API with invalid credentials")]
async fn login_with_invalid_credentials(world: &mut NurseryWorld, step: &Step) {
    login_each(world, step).await;
}

/// Log in with the configured credentials of each role in the `role` column.
#[when("I login via API as each configured role")]
async fn login_as_each_role(world: &mut NurseryWorld, step: &Step) {
    let h = harness();
    world.fixtures.multiple_responses.clear();
    for row in table_rows(step) {
        let role = row.get("role").expect("table needs a 'role' column");
        let role = Role::from_str(role).unwrap_or_else(|e| panic!("{e}"));
        let creds = h.env.credentials(role);
        let response = ok(
            h.client.auth().login(&creds.username, &creds.password).await,
            "login request",
        );
        world.fixtures.multiple_responses.push(response);
    }
}

async fn login_each(world: &mut NurseryWorld, step: &Step) {
    let client = &harness().client;
    world.fixtures.multiple_responses.clear();
    for row in table_rows(step) {
        let username = row.get("username").map(String::as_str).unwrap_or("");
        let password = row.get("password").map(String::as_str).unwrap_or("");
        let response = ok(client.auth().login(username, password).await, "login request");
        world.fixtures.multiple_responses.push(response);
    }
}

// ---------------------------------------------------------------------------
// Then steps
// ---------------------------------------------------------------------------

#[then(expr = "each login response status should be {int}")]
async fn each_login_status(world: &mut NurseryWorld, status: u16) {
    assert!(
        !world.fixtures.multiple_responses.is_empty(),
        "no login responses recorded"
    );
    for (i, response) in world.fixtures.multiple_responses.iter().enumerate() {
        assert_eq!(
            response.status, status,
            "login #{} returned {}: {}",
            i + 1,
            response.status,
            response.raw
        );
    }
}

#[then("each response should contain a token")]
async fn each_response_has_token(world: &mut NurseryWorld) {
    for (i, response) in world.fixtures.multiple_responses.iter().enumerate() {
        assert!(
            auth::token_from(response).is_some(),
            "login #{} has no token: {}",
            i + 1,
            response.raw
        );
    }
}

/// The role claim of every returned token matches the table's `role` column.
#[then("each token should carry the expected role")]
async fn each_token_has_role(world: &mut NurseryWorld, step: &Step) {
    let rows = table_rows(step);
    assert_eq!(
        rows.len(),
        world.fixtures.multiple_responses.len(),
        "expected one role per login"
    );
    for (row, response) in rows.iter().zip(&world.fixtures.multiple_responses) {
        let expected = row.get("role").expect("table needs a 'role' column");
        let token = auth::token_from(response).expect("login response has no token");
        let role = auth::token_role(&token);
        assert_eq!(
            role.as_deref(),
            Some(expected.to_lowercase().as_str()),
            "unexpected role claim in token"
        );
    }
}
