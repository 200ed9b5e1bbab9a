use crate::models::{CreateUserRequest, User};
use crate::services::{StoreError, StoreResult};
use anyhow::Context;
use bcrypt::{hash, verify};
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct UserTable {
    users: BTreeMap<i32, User>,
    last_id: i32,
}

/// In-memory accounts. Passwords are kept as bcrypt hashes only.
#[derive(Debug)]
pub struct UserStore {
    table: RwLock<UserTable>,
    bcrypt_cost: u32,
}

impl UserStore {
    pub fn with_cost(bcrypt_cost: u32) -> Self {
        Self {
            table: RwLock::new(UserTable::default()),
            bcrypt_cost,
        }
    }

    pub async fn create_user(&self, req: CreateUserRequest) -> StoreResult<User> {
        let password_hash =
            hash(&req.password, self.bcrypt_cost).context("Failed to hash password")?;

        let mut table = self.table.write().await;
        if table.users.values().any(|u| u.username == req.username) {
            return Err(StoreError::Conflict(format!(
                "Username '{}' is already taken",
                req.username
            )));
        }

        table.last_id += 1;
        let user = User {
            id: table.last_id,
            username: req.username,
            password_hash,
            created_at: Utc::now(),
        };
        table.users.insert(user.id, user.clone());

        tracing::info!("Created user id={} username={}", user.id, user.username);
        Ok(user)
    }

    pub async fn get_user(&self, id: i32) -> Option<User> {
        self.table.read().await.users.get(&id).cloned()
    }

    pub async fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.table
            .read()
            .await
            .users
            .values()
            .find(|u| u.username == username)
            .cloned()
    }

    pub async fn verify_password(&self, username: &str, password: &str) -> StoreResult<bool> {
        let Some(user) = self.get_user_by_username(username).await else {
            return Ok(false);
        };
        Ok(verify(password, &user.password_hash).context("Failed to verify password")?)
    }
}
