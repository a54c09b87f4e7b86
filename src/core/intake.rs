//! Daily intake estimation.
//!
//! BMR uses the Mifflin-St Jeor equation, TDEE multiplies it by an activity
//! factor, and macro ranges are derived from acceptable distribution ranges
//! expressed as a share of TDEE.

use crate::core::{ActivityLevel, BiometricInput, Gender, IntakeRecommendation, MacroRange};

const MSJ_WEIGHT_COEF: f64 = 10.0;
const MSJ_HEIGHT_COEF: f64 = 6.25;
const MSJ_AGE_COEF: f64 = 5.0;
const MSJ_MALE_CONSTANT: f64 = 5.0;
const MSJ_FEMALE_CONSTANT: f64 = -161.0;

pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;
pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Share of daily calories, as (low, high) percent.
pub const CARBS_PERCENT: (f64, f64) = (45.0, 65.0);
pub const PROTEIN_PERCENT: (f64, f64) = (10.0, 35.0);
pub const FAT_PERCENT: (f64, f64) = (20.0, 35.0);

pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age: u32, gender: Gender) -> f64 {
    let gender_constant = match gender {
        Gender::Male => MSJ_MALE_CONSTANT,
        Gender::Female => MSJ_FEMALE_CONSTANT,
    };

    MSJ_WEIGHT_COEF * weight_kg + MSJ_HEIGHT_COEF * height_cm - MSJ_AGE_COEF * f64::from(age)
        + gender_constant
}

pub fn calculate_tdee(bmr: f64, activity: ActivityLevel) -> f64 {
    bmr * activity.multiplier()
}

fn macro_range(tdee: f64, percent: (f64, f64), kcal_per_gram: f64) -> MacroRange {
    MacroRange {
        low: tdee * percent.0 / 100.0 / kcal_per_gram,
        high: tdee * percent.1 / 100.0 / kcal_per_gram,
    }
}

/// Returns (carbs, protein, fat) gram ranges for a daily calorie budget.
pub fn recommended_macros(tdee: f64) -> (MacroRange, MacroRange, MacroRange) {
    (
        macro_range(tdee, CARBS_PERCENT, KCAL_PER_GRAM_CARBS),
        macro_range(tdee, PROTEIN_PERCENT, KCAL_PER_GRAM_PROTEIN),
        macro_range(tdee, FAT_PERCENT, KCAL_PER_GRAM_FAT),
    )
}

pub fn estimate_intake(input: &BiometricInput) -> IntakeRecommendation {
    let raw_bmr = calculate_bmr(input.weight_kg, input.height_cm, input.age, input.gender);
    if raw_bmr < 0.0 {
        tracing::warn!("BMR computed as {:.2} kcal, clamping to 0", raw_bmr);
    }
    let bmr = raw_bmr.max(0.0);
    let calories = calculate_tdee(bmr, input.activity);
    let (carbs, protein, fat) = recommended_macros(calories);

    tracing::debug!(
        "Intake for {} / {}: BMR {:.2}, TDEE {:.2}",
        input.gender,
        input.activity,
        bmr,
        calories
    );

    IntakeRecommendation {
        bmr,
        calories,
        carbs,
        protein,
        fat,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_bmr_male_reference_value() {
        assert!(close(calculate_bmr(70.0, 175.0, 25, Gender::Male), 1673.75));
    }

    #[test]
    fn test_bmr_female_uses_minus_161() {
        let male = calculate_bmr(60.0, 165.0, 30, Gender::Male);
        let female = calculate_bmr(60.0, 165.0, 30, Gender::Female);
        assert!(close(male - female, 166.0));
        assert!(close(female, 600.0 + 1031.25 - 150.0 - 161.0));
    }

    #[test]
    fn test_tdee_multipliers() {
        assert!(close(calculate_tdee(1673.75, ActivityLevel::Moderate), 2594.3125));
        assert!(close(calculate_tdee(1000.0, ActivityLevel::Sedentary), 1200.0));
        assert!(close(calculate_tdee(1000.0, ActivityLevel::Light), 1375.0));
        assert!(close(calculate_tdee(1000.0, ActivityLevel::Active), 1725.0));
        assert!(close(calculate_tdee(1000.0, ActivityLevel::VeryActive), 1900.0));
    }

    #[test]
    fn test_unknown_activity_uses_sedentary() {
        let level = ActivityLevel::parse_lenient("marathon every day");
        assert!(close(calculate_tdee(1000.0, level), 1200.0));
    }

    #[test]
    fn test_recommended_macros_for_2000_kcal() {
        let (carbs, protein, fat) = recommended_macros(2000.0);
        assert!(close(carbs.low, 225.0));
        assert!(close(carbs.high, 325.0));
        assert!(close(protein.low, 50.0));
        assert!(close(protein.high, 175.0));
        assert!((fat.low - 44.44).abs() < 0.01);
        assert!((fat.high - 77.78).abs() < 0.01);
    }

    #[test]
    fn test_ranges_are_ordered() {
        for tdee in [0.0, 850.5, 2000.0, 4321.0] {
            let (carbs, protein, fat) = recommended_macros(tdee);
            for range in [carbs, protein, fat] {
                assert!(range.low <= range.high);
                assert!(range.low >= 0.0);
            }
        }
    }

    #[test]
    fn test_estimate_intake_chains_steps() {
        let input = BiometricInput::new(25, 70.0, 175.0, Gender::Male, ActivityLevel::Moderate).unwrap();
        let rec = estimate_intake(&input);
        assert!(close(rec.bmr, 1673.75));
        assert!(close(rec.calories, 2594.3125));
        assert!(close(rec.carbs.low, 2594.3125 * 0.45 / 4.0));
        assert!(close(rec.fat.high, 2594.3125 * 0.35 / 9.0));
    }

    #[test]
    fn test_estimate_intake_never_negative() {
        let input = BiometricInput::new(120, 1.0, 1.0, Gender::Female, ActivityLevel::Active).unwrap();
        let rec = estimate_intake(&input);
        assert_eq!(rec.bmr, 0.0);
        assert_eq!(rec.calories, 0.0);
        assert_eq!(rec.carbs.low, 0.0);
    }
}
