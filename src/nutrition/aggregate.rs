use super::portion::round2;
use super::types::{AsPortion, CalculatedNutrition};

/// Sum of the unrounded scaled values of every portion.
///
/// The result is left as the float sum; the simple meal response exposes it
/// as-is. Contrast with [`total_of_rounded`].
pub fn total_raw<P: AsPortion>(portions: &[P]) -> CalculatedNutrition {
    portions.iter().fold(CalculatedNutrition::ZERO, |total, item| {
        let p = item.portion();
        let factor = p.quantity_grams / 100.0;
        CalculatedNutrition {
            kcal: total.kcal + p.profile.kcal * factor,
            carbs: total.carbs + p.profile.carbs * factor,
            protein: total.protein + p.profile.protein * factor,
            fat: total.fat + p.profile.fat * factor,
        }
    })
}

/// Sum already rounded values, then round the sum to 2 dp again.
pub fn total_of_rounded<'a, I>(items: I) -> CalculatedNutrition
where
    I: IntoIterator<Item = &'a CalculatedNutrition>,
{
    items
        .into_iter()
        .fold(CalculatedNutrition::ZERO, |total, item| total.add(*item))
        .map(round2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::{calculate, FoodPortion, NutrientProfile};

    fn portion(quantity: f64, kcal: f64, carbs: f64, protein: f64, fat: f64) -> FoodPortion {
        FoodPortion::new(
            NutrientProfile {
                kcal,
                carbs,
                protein,
                fat,
            },
            quantity,
        )
    }

    #[test]
    fn raw_total_single_food() {
        let total = total_raw(&[portion(100.0, 52.0, 14.0, 0.3, 0.2)]);
        assert_eq!(total.kcal, 52.0);
        assert_eq!(total.carbs, 14.0);
        assert_eq!(total.protein, 0.3);
        assert_eq!(total.fat, 0.2);
    }

    #[test]
    fn raw_total_two_foods() {
        let total = total_raw(&[
            portion(100.0, 52.0, 14.0, 0.3, 0.2),
            portion(50.0, 89.0, 23.0, 1.1, 0.3),
        ]);
        assert_eq!(total.kcal, 96.5);
        assert_eq!(total.carbs, 25.5);
    }

    #[test]
    fn raw_total_keeps_extra_digits() {
        let total = total_raw(&[portion(33.0, 33.333, 0.0, 0.0, 0.0)]);
        assert!((total.kcal - 10.99989).abs() < 1e-9);
        assert_ne!(total.kcal, 11.0);
    }

    #[test]
    fn zero_quantity_contributes_nothing() {
        let total = total_raw(&[portion(0.0, 900.0, 50.0, 40.0, 100.0)]);
        assert_eq!(total, CalculatedNutrition::ZERO);
    }

    #[test]
    fn empty_inputs_are_zero() {
        let none: [FoodPortion; 0] = [];
        assert_eq!(total_raw(&none), CalculatedNutrition::ZERO);
        let nothing: &[CalculatedNutrition] = &[];
        assert_eq!(total_of_rounded(nothing), CalculatedNutrition::ZERO);
    }

    #[test]
    fn rounded_total_sums_rounded_items() {
        // 0.004 kcal per item rounds to 0.00, so three of them stay 0.00
        // while the raw sum of 0.012 would round to 0.01.
        let p = NutrientProfile {
            kcal: 1.0,
            ..Default::default()
        };
        let items: Vec<_> = (0..3).map(|_| calculate(&p, 0.4)).collect();
        assert_eq!(total_of_rounded(&items).kcal, 0.0);

        let raw = total_raw(&[FoodPortion::new(p, 0.4); 3]);
        assert_eq!(round2(raw.kcal), 0.01);
    }
}
