use serde_json::json;

use super::{marker, print_json};
use nursery_qa::QaResult;
use nursery_qa::api::{ApiClient, health};
use nursery_qa::env::{Env, Role};

/// Probe `/api/health` as admin. Returns whether the app looks healthy.
pub async fn run(json: bool) -> QaResult<bool> {
    let env = Env::load()?;
    let client = ApiClient::from_env(&env)?;
    let token = client.auth().authenticate(&env, Role::Admin).await?;
    let response = client.health().check(Some(&token)).await?;
    let healthy = response.is_success() && health::looks_healthy(&response.body);

    if json {
        print_json(&json!({
            "status": response.status,
            "healthy": healthy,
            "body": response.body,
        }))?;
    } else {
        println!(
            "{} {} -> {}",
            marker(healthy),
            client.url(nursery_qa::routes::HEALTH),
            response.status
        );
        if !healthy {
            println!("{}", response.pretty_body());
        }
    }
    Ok(healthy)
}
