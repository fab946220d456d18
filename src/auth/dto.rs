use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repo_types::User;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Account fields safe to return to clients.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub user_uuid: Uuid,
    pub full_name: String,
    pub email: String,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            user_uuid: u.user_uuid,
            full_name: u.full_name,
            email: u.email,
        }
    }
}

/// Body of a successful register or login: `{ user, token }`.
#[derive(Debug, Serialize)]
pub struct Session {
    pub user: PublicUser,
    pub token: String,
}
