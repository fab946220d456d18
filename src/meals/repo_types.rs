use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::nutrition::{AsPortion, FoodPortion, NutrientProfile};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Meal {
    pub id: i64,
    pub meal_uuid: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub meal_plan_id: i64,
    pub meal_order: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// A food linked to a meal, joined with its per-100g reference values.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct MealFoodRow {
    pub food_uuid: Uuid,
    pub food_name: String,
    pub kcal_per_serving: f64,
    pub carbs_per_serving: f64,
    pub protein_per_serving: f64,
    pub fat_per_serving: f64,
    pub quantity: f64, // grams
}

impl AsPortion for MealFoodRow {
    fn portion(&self) -> FoodPortion {
        FoodPortion::new(
            NutrientProfile {
                kcal: self.kcal_per_serving,
                carbs: self.carbs_per_serving,
                protein: self.protein_per_serving,
                fat: self.fat_per_serving,
            },
            self.quantity,
        )
    }
}
