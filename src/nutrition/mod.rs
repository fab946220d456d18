//! Nutrition aggregation.
//!
//! Foods carry nutrient values per 100 g. A portion scales them by its
//! quantity; meals sum their portions and plans sum their meals. Two totals
//! exist side by side:
//!
//! * [`total_raw`] sums unrounded scaled values and is served by the meal
//!   endpoints (`total_nutrition.total_*`).
//! * [`total_of_rounded`] sums values that were already rounded to 2 dp and
//!   rounds again; the meal-plan details endpoint uses it for every meal
//!   total and the plan total.
//!
//! The two can differ in the last digits for the same meal.

mod aggregate;
mod portion;
mod resolve;
mod types;

pub use aggregate::{total_of_rounded, total_raw};
pub use portion::{calculate, round2};
pub use resolve::{
    resolve_meal_detail, resolve_meal_simple, resolve_plan, MealNutrition, PlanNutrition,
    ResolvedFood, ResolvedMeal,
};
pub use types::{AsPortion, CalculatedNutrition, FoodPortion, NutrientProfile};
