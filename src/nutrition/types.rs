use serde::{Deserialize, Serialize};

/// Nutrient values of a food per 100 grams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientProfile {
    pub kcal: f64,
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
}

/// One occurrence of a food inside a meal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoodPortion {
    pub profile: NutrientProfile,
    pub quantity_grams: f64,
}

impl FoodPortion {
    pub fn new(profile: NutrientProfile, quantity_grams: f64) -> Self {
        Self {
            profile,
            quantity_grams,
        }
    }
}

/// Actual nutrient amounts for a quantity (or a sum of them).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculatedNutrition {
    pub kcal: f64,
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
}

impl CalculatedNutrition {
    pub const ZERO: Self = Self {
        kcal: 0.0,
        carbs: 0.0,
        protein: 0.0,
        fat: 0.0,
    };

    pub(crate) fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            kcal: f(self.kcal),
            carbs: f(self.carbs),
            protein: f(self.protein),
            fat: f(self.fat),
        }
    }

    pub(crate) fn add(self, other: Self) -> Self {
        Self {
            kcal: self.kcal + other.kcal,
            carbs: self.carbs + other.carbs,
            protein: self.protein + other.protein,
            fat: self.fat + other.fat,
        }
    }
}

/// Anything that can be read as a food portion: persisted meal/food rows,
/// request items, test fixtures.
pub trait AsPortion {
    fn portion(&self) -> FoodPortion;
}

impl AsPortion for FoodPortion {
    fn portion(&self) -> FoodPortion {
        *self
    }
}
