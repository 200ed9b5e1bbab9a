use crate::config::Config;
use crate::models::CreateUserRequest;
use crate::services::user_store::UserStore;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

const DEFAULT_DEMO_USERNAME: &str = "demo";
const DEFAULT_DEMO_PASSWORD: &str = "demo-password";

#[derive(Debug, Deserialize)]
pub struct DemoUserSeed {
    #[serde(default = "default_demo_username")]
    pub username: String,
    /// Plain-text password from seed file (will be hashed before storage)
    pub password: String,
}

fn default_demo_username() -> String {
    DEFAULT_DEMO_USERNAME.to_string()
}

/// Creates the demo account the client assumes (id 1) on an empty store.
pub async fn bootstrap(config: &Config, users: &UserStore) -> Result<()> {
    let seed = match &config.demo_user.seed_file {
        Some(path) if !path.is_empty() => read_seed(Path::new(path)).await?,
        _ => None,
    };

    let seed = match seed {
        Some(seed) => seed,
        None if config.demo_user.enabled => DemoUserSeed {
            username: default_demo_username(),
            password: DEFAULT_DEMO_PASSWORD.to_string(),
        },
        None => {
            tracing::debug!("Demo user disabled, skipping bootstrap");
            return Ok(());
        }
    };

    if users.get_user_by_username(&seed.username).await.is_some() {
        tracing::info!("Demo user {} already exists, seed skipped", seed.username);
        return Ok(());
    }

    let user = users
        .create_user(CreateUserRequest {
            username: seed.username,
            password: seed.password,
        })
        .await
        .context("Failed to create demo user")?;
    tracing::info!("Demo user {} bootstrapped with id {}", user.username, user.id);

    Ok(())
}

async fn read_seed(path: &Path) -> Result<Option<DemoUserSeed>> {
    if !path.exists() {
        tracing::warn!(
            "Demo user seed file {} not found, falling back to defaults",
            path.display()
        );
        return Ok(None);
    }

    let contents = fs::read_to_string(path)
        .await
        .context("Failed to read demo user seed file")?;
    let seed = serde_json::from_str(&contents).context("Failed to deserialize demo user seed")?;
    Ok(Some(seed))
}
