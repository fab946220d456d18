use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repo_types::Food;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateFoodRequest {
    pub food_name: String,
    pub kcal_per_serving: f64,
    pub carbs_per_serving: f64,
    pub protein_per_serving: f64,
    pub fat_per_serving: f64,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateFoodRequest {
    pub food_name: Option<String>,
    pub kcal_per_serving: Option<f64>,
    pub carbs_per_serving: Option<f64>,
    pub protein_per_serving: Option<f64>,
    pub fat_per_serving: Option<f64>,
}

impl UpdateFoodRequest {
    pub fn is_empty(&self) -> bool {
        self.food_name.is_none()
            && self.kcal_per_serving.is_none()
            && self.carbs_per_serving.is_none()
            && self.protein_per_serving.is_none()
            && self.fat_per_serving.is_none()
    }
}

#[derive(Debug, Serialize)]
pub struct FoodResponse {
    pub food_uuid: Uuid,
    pub food_name: String,
    pub kcal_per_serving: f64,
    pub carbs_per_serving: f64,
    pub protein_per_serving: f64,
    pub fat_per_serving: f64,
}

impl From<Food> for FoodResponse {
    fn from(f: Food) -> Self {
        Self {
            food_uuid: f.food_uuid,
            food_name: f.food_name,
            kcal_per_serving: f.kcal_per_serving,
            carbs_per_serving: f.carbs_per_serving,
            protein_per_serving: f.protein_per_serving,
            fat_per_serving: f.fat_per_serving,
        }
    }
}
