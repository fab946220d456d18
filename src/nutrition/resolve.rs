use super::aggregate::{total_of_rounded, total_raw};
use super::portion::calculate;
use super::types::{AsPortion, CalculatedNutrition};

/// A food entry paired with its rounded calculated nutrition.
#[derive(Debug, Clone)]
pub struct ResolvedFood<F> {
    pub food: F,
    pub calculated: CalculatedNutrition,
}

/// Per-food nutrition of one meal plus the meal total, foods in input order.
#[derive(Debug, Clone)]
pub struct MealNutrition<F> {
    pub foods: Vec<ResolvedFood<F>>,
    pub total: CalculatedNutrition,
}

#[derive(Debug, Clone)]
pub struct ResolvedMeal<M, F> {
    pub meal: M,
    pub nutrition: MealNutrition<F>,
}

/// Every meal of a plan resolved in input order, plus the plan total.
#[derive(Debug, Clone)]
pub struct PlanNutrition<M, F> {
    pub meals: Vec<ResolvedMeal<M, F>>,
    pub total: CalculatedNutrition,
}

/// Total for the simple meal response: no per-food rounding.
pub fn resolve_meal_simple<F: AsPortion>(foods: &[F]) -> CalculatedNutrition {
    total_raw(foods)
}

/// Per-food rounded nutrition and the total of those rounded values.
pub fn resolve_meal_detail<F: AsPortion>(foods: Vec<F>) -> MealNutrition<F> {
    let foods: Vec<_> = foods
        .into_iter()
        .map(|food| {
            let p = food.portion();
            let calculated = calculate(&p.profile, p.quantity_grams);
            ResolvedFood { food, calculated }
        })
        .collect();
    let total = total_of_rounded(foods.iter().map(|f| &f.calculated));
    MealNutrition { foods, total }
}

/// Resolve every meal through the detail path; the plan total sums the
/// already rounded meal totals.
pub fn resolve_plan<M, F: AsPortion>(meals: Vec<(M, Vec<F>)>) -> PlanNutrition<M, F> {
    let meals: Vec<_> = meals
        .into_iter()
        .map(|(meal, foods)| ResolvedMeal {
            meal,
            nutrition: resolve_meal_detail(foods),
        })
        .collect();
    let total = total_of_rounded(meals.iter().map(|m| &m.nutrition.total));
    PlanNutrition { meals, total }
}
