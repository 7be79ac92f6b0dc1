use serde_json::json;

use super::{marker, print_json};
use nursery_qa::QaResult;
use nursery_qa::api::{ApiClient, auth};
use nursery_qa::env::{Env, Role};

/// Log in with the configured credentials for `role` and show the role
/// claim the server put in the token.
pub async fn run(role: Role, json: bool) -> QaResult<()> {
    let env = Env::load()?;
    let client = ApiClient::from_env(&env)?;
    let creds = env.credentials(role);
    let token = client.auth().token_for(creds).await?;
    let claim = auth::token_role(&token);

    if json {
        return print_json(&json!({
            "role": role.as_str(),
            "username": creds.username,
            "claim": claim,
        }));
    }
    println!(
        "{} logged in as {} ({})",
        marker(true),
        creds.username,
        claim.as_deref().unwrap_or("no role claim")
    );
    Ok(())
}
