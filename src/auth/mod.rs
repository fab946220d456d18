use crate::state::AppState;
use axum::Router;

pub mod dto;
mod extract;
pub mod handlers;
pub mod password;
pub mod repo;
pub mod repo_types;
pub mod token;

pub use extract::AuthUser;

pub fn router() -> Router<AppState> {
    handlers::auth_routes()
}
