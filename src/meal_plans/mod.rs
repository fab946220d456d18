pub mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;
mod services;

use crate::state::AppState;
use axum::Router;

pub use repo::{MealPlanTreeSource, PgMealPlanTrees};

pub fn router() -> Router<AppState> {
    handlers::meal_plan_routes()
}
