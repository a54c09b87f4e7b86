use crate::core::aggregator::CombineReport;
use crate::core::{IntakeRecommendation, MacroRange, NutrientProfile};
use std::fmt::Write;

pub fn format_profile(profile: &NutrientProfile) -> String {
    let mut out = format!(
        "Nutrition for {} ({}g):\n",
        profile.food_description, profile.quantity
    );
    for (label, value, unit) in [
        ("Carbs", profile.carbs, "g"),
        ("Protein", profile.protein, "g"),
        ("Fat", profile.fat, "g"),
        ("Calories", profile.calories, " kcal"),
        ("Fiber", profile.fiber, "g"),
    ] {
        let _ = writeln!(out, "  {}: {:.2}{}", label, value, unit);
    }
    out
}

pub fn format_combined(report: &CombineReport) -> String {
    let total = &report.total;
    let mut out = format!("Combined Macros for {} food items:\n", report.requested);
    for (label, value, unit) in [
        ("Carbs", total.carbs, "g"),
        ("Protein", total.protein, "g"),
        ("Fat", total.fat, "g"),
        ("Calories", total.calories, " kcal"),
        ("Fiber", total.fiber, "g"),
        ("Quantity", total.quantity, "g"),
    ] {
        let _ = writeln!(out, "  {}: {:.2}{}", label, value, unit);
    }
    for skipped in &report.skipped {
        let _ = writeln!(out, "  Skipped '{}': {}", skipped.food, skipped.reason);
    }
    out
}

fn format_range(range: &MacroRange) -> String {
    format!("{:.2}g - {:.2}g", range.low, range.high)
}

pub fn format_intake(rec: &IntakeRecommendation) -> String {
    format!(
        "Recommended daily intake based on your profile:\n\
         BMR: {:.2} kcal\n\
         Calories: {:.2} kcal\n\
         Carbohydrates: {}\n\
         Protein: {}\n\
         Fat: {}\n",
        rec.bmr,
        rec.calories,
        format_range(&rec.carbs),
        format_range(&rec.protein),
        format_range(&rec.fat),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::intake::recommended_macros;

    #[test]
    fn test_format_profile_rounds_for_display() {
        let profile = NutrientProfile {
            carbs: 20.700000000000003,
            protein: 0.39,
            fat: 0.255,
            calories: 78.0,
            fiber: 3.5999999999999996,
            quantity: 150.0,
            food_description: "Apples, raw".to_string(),
        };
        let text = format_profile(&profile);
        assert!(text.starts_with("Nutrition for Apples, raw (150g):"));
        assert!(text.contains("  Carbs: 20.70g"));
        assert!(text.contains("  Calories: 78.00 kcal"));
        assert!(text.contains("  Fiber: 3.60g"));
    }

    #[test]
    fn test_format_intake() {
        let (carbs, protein, fat) = recommended_macros(2000.0);
        let rec = IntakeRecommendation {
            bmr: 1500.0,
            calories: 2000.0,
            carbs,
            protein,
            fat,
        };
        let text = format_intake(&rec);
        assert!(text.contains("Calories: 2000.00 kcal"));
        assert!(text.contains("Carbohydrates: 225.00g - 325.00g"));
        assert!(text.contains("Fat: 44.44g - 77.78g"));
    }
}
