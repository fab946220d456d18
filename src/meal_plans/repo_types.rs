use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::meals::repo_types::{Meal, MealFoodRow};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MealPlan {
    pub id: i64,
    pub meal_plan_uuid: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub patient_id: i64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Plan joined with its patient's public id and the number of active meals.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct MealPlanSummary {
    pub id: i64,
    pub meal_plan_uuid: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub patient_uuid: Uuid,
    pub meals_count: i64,
}

/// Fully materialized plan: meals in display order, each with its foods.
#[derive(Debug, Clone)]
pub struct MealPlanTree {
    pub plan: MealPlanSummary,
    pub meals: Vec<(Meal, Vec<MealFoodRow>)>,
}
