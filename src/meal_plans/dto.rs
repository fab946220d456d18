use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::meals::dto::MealFoodItem;
use crate::meals::repo_types::{Meal, MealFoodRow};
use crate::nutrition::{resolve_plan, CalculatedNutrition, ResolvedFood, ResolvedMeal};

use super::repo_types::{MealPlanSummary, MealPlanTree};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateMealPlanRequest {
    pub name: String,
    pub description: Option<String>,
    pub patient_uuid: Uuid,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateMealPlanRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl UpdateMealPlanRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

#[derive(Debug, Serialize)]
pub struct MealPlanResponse {
    pub meal_plan_uuid: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub patient_uuid: Uuid,
    pub meals_count: i64,
}

impl From<MealPlanSummary> for MealPlanResponse {
    fn from(s: MealPlanSummary) -> Self {
        Self {
            meal_plan_uuid: s.meal_plan_uuid,
            name: s.name,
            description: s.description,
            patient_uuid: s.patient_uuid,
            meals_count: s.meals_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DetailFood {
    #[serde(flatten)]
    pub food: MealFoodItem,
    pub calculated_nutrition: CalculatedNutrition,
}

impl From<ResolvedFood<MealFoodRow>> for DetailFood {
    fn from(r: ResolvedFood<MealFoodRow>) -> Self {
        Self {
            food: MealFoodItem::from(&r.food),
            calculated_nutrition: r.calculated,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DetailMeal {
    pub meal_uuid: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub meal_order: i32,
    pub foods: Vec<DetailFood>,
    pub total_nutrition: CalculatedNutrition,
}

impl From<ResolvedMeal<Meal, MealFoodRow>> for DetailMeal {
    fn from(r: ResolvedMeal<Meal, MealFoodRow>) -> Self {
        Self {
            meal_uuid: r.meal.meal_uuid,
            name: r.meal.name,
            description: r.meal.description,
            meal_order: r.meal.meal_order,
            foods: r.nutrition.foods.into_iter().map(Into::into).collect(),
            total_nutrition: r.nutrition.total,
        }
    }
}

/// Plan with per-food, per-meal and plan-wide nutrition, all rounded to 2 dp.
#[derive(Debug, Serialize)]
pub struct MealPlanDetailResponse {
    pub meal_plan_uuid: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub patient_uuid: Uuid,
    pub meals: Vec<DetailMeal>,
    pub total_plan_nutrition: CalculatedNutrition,
}

impl From<MealPlanTree> for MealPlanDetailResponse {
    fn from(tree: MealPlanTree) -> Self {
        let resolved = resolve_plan(tree.meals);
        Self {
            meal_plan_uuid: tree.plan.meal_plan_uuid,
            name: tree.plan.name,
            description: tree.plan.description,
            patient_uuid: tree.plan.patient_uuid,
            meals: resolved.meals.into_iter().map(Into::into).collect(),
            total_plan_nutrition: resolved.total,
        }
    }
}
