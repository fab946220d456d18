use super::types::{CalculatedNutrition, NutrientProfile};

/// Round to two decimal places, midpoint away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Scale a per-100g profile to `quantity_grams`, each field rounded to 2 dp.
///
/// Input is expected to be validated upstream; nothing is clamped here.
pub fn calculate(profile: &NutrientProfile, quantity_grams: f64) -> CalculatedNutrition {
    let multiplier = quantity_grams / 100.0;
    CalculatedNutrition {
        kcal: round2(profile.kcal * multiplier),
        carbs: round2(profile.carbs * multiplier),
        protein: round2(profile.protein * multiplier),
        fat: round2(profile.fat * multiplier),
    }
}
