use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::meals::repo_types::{Meal, MealFoodRow};
use crate::nutrition::{resolve_meal_simple, CalculatedNutrition};

/// One `{food_uuid, quantity}` entry of a meal write request.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FoodQuantity {
    pub food_uuid: Uuid,
    pub quantity: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateMealRequest {
    pub name: String,
    pub description: Option<String>,
    pub meal_plan_uuid: Uuid,
    pub meal_order: Option<i32>,
    #[serde(default)]
    pub foods: Vec<FoodQuantity>,
}

/// Partial update. When `foods` is present it replaces the whole food list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateMealRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub meal_order: Option<i32>,
    pub foods: Option<Vec<FoodQuantity>>,
}

impl UpdateMealRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.meal_order.is_none()
            && self.foods.is_none()
    }
}

#[derive(Debug, Serialize)]
pub struct MealListItem {
    pub meal_uuid: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub meal_plan_id: i64,
    pub meal_order: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<Meal> for MealListItem {
    fn from(m: Meal) -> Self {
        Self {
            meal_uuid: m.meal_uuid,
            name: m.name,
            description: m.description,
            meal_plan_id: m.meal_plan_id,
            meal_order: m.meal_order,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MealFoodItem {
    pub food_uuid: Uuid,
    pub name: String,
    pub quantity: f64,
    pub kcal_per_serving: f64,
    pub carbs_per_serving: f64,
    pub protein_per_serving: f64,
    pub fat_per_serving: f64,
}

impl From<&MealFoodRow> for MealFoodItem {
    fn from(r: &MealFoodRow) -> Self {
        Self {
            food_uuid: r.food_uuid,
            name: r.food_name.clone(),
            quantity: r.quantity,
            kcal_per_serving: r.kcal_per_serving,
            carbs_per_serving: r.carbs_per_serving,
            protein_per_serving: r.protein_per_serving,
            fat_per_serving: r.fat_per_serving,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TotalNutrition {
    pub total_kcal: f64,
    pub total_carbs: f64,
    pub total_protein: f64,
    pub total_fat: f64,
}

impl From<CalculatedNutrition> for TotalNutrition {
    fn from(n: CalculatedNutrition) -> Self {
        Self {
            total_kcal: n.kcal,
            total_carbs: n.carbs,
            total_protein: n.protein,
            total_fat: n.fat,
        }
    }
}

/// Meal as returned by get/create/update: raw food list plus the unrounded total.
#[derive(Debug, Serialize)]
pub struct MealResponse {
    pub meal_uuid: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub meal_plan_id: i64,
    pub meal_order: i32,
    pub foods: Vec<MealFoodItem>,
    pub total_nutrition: TotalNutrition,
}

impl MealResponse {
    pub fn new(meal: Meal, foods: &[MealFoodRow]) -> Self {
        Self {
            meal_uuid: meal.meal_uuid,
            name: meal.name,
            description: meal.description,
            meal_plan_id: meal.meal_plan_id,
            meal_order: meal.meal_order,
            foods: foods.iter().map(MealFoodItem::from).collect(),
            total_nutrition: resolve_meal_simple(foods).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meal() -> Meal {
        Meal {
            id: 1,
            meal_uuid: Uuid::new_v4(),
            name: "Breakfast".into(),
            description: None,
            meal_plan_id: 3,
            meal_order: 1,
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        }
    }

    fn row(
        name: &str,
        quantity: f64,
        kcal: f64,
        carbs: f64,
        protein: f64,
        fat: f64,
    ) -> MealFoodRow {
        MealFoodRow {
            food_uuid: Uuid::new_v4(),
            food_name: name.into(),
            kcal_per_serving: kcal,
            carbs_per_serving: carbs,
            protein_per_serving: protein,
            fat_per_serving: fat,
            quantity,
        }
    }

    #[test]
    fn single_food_total() {
        let res = MealResponse::new(meal(), &[row("Apple", 100.0, 52.0, 14.0, 0.3, 0.2)]);
        assert_eq!(
            res.total_nutrition,
            TotalNutrition {
                total_kcal: 52.0,
                total_carbs: 14.0,
                total_protein: 0.3,
                total_fat: 0.2,
            }
        );
    }

    #[test]
    fn two_food_total_and_json_shape() {
        let res = MealResponse::new(
            meal(),
            &[
                row("Apple", 100.0, 52.0, 14.0, 0.3, 0.2),
                row("Banana", 50.0, 89.0, 23.0, 1.1, 0.3),
            ],
        );
        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(json["total_nutrition"]["total_kcal"], 96.5);
        assert_eq!(json["total_nutrition"]["total_carbs"], 25.5);
        assert_eq!(json["foods"][1]["name"], "Banana");
        assert_eq!(json["foods"][1]["quantity"], 50.0);
        assert_eq!(json["meal_plan_id"], 3);
        assert!(json["foods"][0].get("calculated_nutrition").is_none());
    }

    #[test]
    fn raw_total_is_not_rounded() {
        let res = MealResponse::new(meal(), &[row("Odd", 33.0, 33.333, 0.0, 0.0, 0.0)]);
        assert!((res.total_nutrition.total_kcal - 10.99989).abs() < 1e-9);
    }

    #[test]
    fn zero_quantity_and_empty_meal() {
        let res = MealResponse::new(meal(), &[row("Butter", 0.0, 717.0, 0.1, 0.9, 81.0)]);
        assert_eq!(res.total_nutrition.total_kcal, 0.0);
        assert_eq!(res.total_nutrition.total_fat, 0.0);

        let res = MealResponse::new(meal(), &[]);
        assert!(res.foods.is_empty());
        assert_eq!(res.total_nutrition.total_kcal, 0.0);
        assert_eq!(res.total_nutrition.total_carbs, 0.0);
    }
}
