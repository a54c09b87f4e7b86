use crate::core::extractor::LookupOutcome;
use crate::core::{AggregateProfile, NutrientProfile};

impl AggregateProfile {
    /// 累加一筆結果；同一食物查兩次就算兩次
    pub fn add(&mut self, profile: &NutrientProfile) {
        self.carbs += profile.carbs;
        self.protein += profile.protein;
        self.fat += profile.fat;
        self.calories += profile.calories;
        self.fiber += profile.fiber;
        self.quantity += profile.quantity;
        self.items += 1;
    }

    pub fn merge(&mut self, other: &AggregateProfile) {
        self.carbs += other.carbs;
        self.protein += other.protein;
        self.fat += other.fat;
        self.calories += other.calories;
        self.fiber += other.fiber;
        self.quantity += other.quantity;
        self.items += other.items;
    }
}

pub fn aggregate<'a, I>(profiles: I) -> AggregateProfile
where
    I: IntoIterator<Item = &'a NutrientProfile>,
{
    profiles
        .into_iter()
        .fold(AggregateProfile::default(), |mut total, profile| {
            total.add(profile);
            total
        })
}

/// An item in a combined lookup that contributed nothing to the total.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedItem {
    pub food: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombineReport {
    pub total: AggregateProfile,
    pub requested: usize,
    pub skipped: Vec<SkippedItem>,
}

impl CombineReport {
    pub fn record(&mut self, food: &str, outcome: &LookupOutcome) {
        self.requested += 1;
        match outcome {
            LookupOutcome::Found(profile) => self.total.add(profile),
            LookupOutcome::NotFound => self.skip(food, "not found in the food database"),
            LookupOutcome::Failed(message) => self.skip(food, message),
        }
    }

    pub fn skip(&mut self, food: &str, reason: &str) {
        tracing::debug!("Skipping '{}' in combined lookup: {}", food, reason);
        self.skipped.push(SkippedItem {
            food: food.to_string(),
            reason: reason.to_string(),
        });
    }
}

/// Folds a batch of lookups; misses and failures are skipped, never fatal.
pub fn combine_outcomes<'a, I>(outcomes: I) -> CombineReport
where
    I: IntoIterator<Item = (&'a str, &'a LookupOutcome)>,
{
    let mut report = CombineReport::default();
    for (food, outcome) in outcomes {
        report.record(food, outcome);
    }
    report
}
