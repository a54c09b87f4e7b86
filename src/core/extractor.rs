use crate::core::{FoodSource, NutrientProfile, NutrientQuery};
use crate::domain::model::FoodRecord;

/// USDA FoodData Central nutrient ids
pub const NUTRIENT_PROTEIN: u32 = 1003;
pub const NUTRIENT_FAT: u32 = 1004;
pub const NUTRIENT_CARBS: u32 = 1005;
pub const NUTRIENT_ENERGY_KCAL: u32 = 1008;
pub const NUTRIENT_FIBER: u32 = 1079;

const MISSING_DESCRIPTION: &str = "N/A";

#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Found(NutrientProfile),
    NotFound,
    Failed(String),
}

impl LookupOutcome {
    pub fn profile(&self) -> Option<&NutrientProfile> {
        match self {
            LookupOutcome::Found(profile) => Some(profile),
            _ => None,
        }
    }
}

fn per_100g(record: &FoodRecord, nutrient_id: u32, quantity: f64) -> f64 {
    let value = record.nutrients.get(&nutrient_id).copied().unwrap_or(0.0);
    // 上游偶爾回傳負值或 NaN，統一視為 0
    let value = if value.is_finite() { value.max(0.0) } else { 0.0 };
    value / 100.0 * quantity
}

/// Scales the per-100g values of `record` to `quantity` grams.
pub fn extract_profile(record: &FoodRecord, quantity: f64) -> NutrientProfile {
    NutrientProfile {
        carbs: per_100g(record, NUTRIENT_CARBS, quantity),
        protein: per_100g(record, NUTRIENT_PROTEIN, quantity),
        fat: per_100g(record, NUTRIENT_FAT, quantity),
        calories: per_100g(record, NUTRIENT_ENERGY_KCAL, quantity),
        fiber: per_100g(record, NUTRIENT_FIBER, quantity),
        quantity,
        food_description: record
            .description
            .clone()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| MISSING_DESCRIPTION.to_string()),
    }
}

pub struct NutrientExtractor<F: FoodSource> {
    source: F,
}

impl<F: FoodSource> NutrientExtractor<F> {
    pub fn new(source: F) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &F {
        &self.source
    }

    pub async fn lookup(&self, query: &NutrientQuery) -> LookupOutcome {
        tracing::debug!("Looking up '{}' ({}g)", query.food, query.quantity);

        match self.source.search_first(&query.food).await {
            Ok(Some(record)) => {
                let profile = extract_profile(&record, query.quantity);
                tracing::info!(
                    "✅ Found '{}' for query '{}'",
                    profile.food_description,
                    query.food
                );
                LookupOutcome::Found(profile)
            }
            Ok(None) => {
                tracing::info!("No foods found in the USDA database for '{}'", query.food);
                LookupOutcome::NotFound
            }
            Err(e) => {
                // 傳輸錯誤只中止本次查詢
                tracing::warn!("❌ Lookup for '{}' failed: {}", query.food, e);
                LookupOutcome::Failed(e.user_friendly_message())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{NutriError, Result};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn record(pairs: &[(u32, f64)], description: Option<&str>) -> FoodRecord {
        FoodRecord {
            description: description.map(str::to_string),
            nutrients: pairs.iter().copied().collect::<HashMap<_, _>>(),
        }
    }

    /// reqwest 在送出前拒絕不合法的網址，用來產生真實的網路錯誤
    fn transport_error() -> NutriError {
        match reqwest::Client::new().get("not a url").build() {
            Err(e) => NutriError::ApiError(e),
            Ok(_) => panic!("request with a relative url should not build"),
        }
    }

    enum Reply {
        Hit(FoodRecord),
        Miss,
        Broken,
    }

    struct MockSource {
        reply: Reply,
        calls: AtomicUsize,
    }

    impl MockSource {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl FoodSource for MockSource {
        async fn search_first(&self, _query: &str) -> Result<Option<FoodRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Reply::Hit(record) => Ok(Some(record.clone())),
                Reply::Miss => Ok(None),
                Reply::Broken => Err(transport_error()),
            }
        }
    }

    #[test]
    fn test_extract_scales_linearly() {
        let rec = record(
            &[
                (NUTRIENT_CARBS, 13.8),
                (NUTRIENT_PROTEIN, 0.26),
                (NUTRIENT_FAT, 0.17),
                (NUTRIENT_ENERGY_KCAL, 52.0),
                (NUTRIENT_FIBER, 2.4),
            ],
            Some("Apples, raw, with skin"),
        );

        let profile = extract_profile(&rec, 150.0);

        assert!((profile.carbs - 13.8 / 100.0 * 150.0).abs() < 1e-9);
        assert!((profile.protein - 0.26 / 100.0 * 150.0).abs() < 1e-9);
        assert!((profile.fat - 0.17 / 100.0 * 150.0).abs() < 1e-9);
        assert!((profile.calories - 78.0).abs() < 1e-9);
        assert!((profile.fiber - 3.6).abs() < 1e-9);
        assert_eq!(profile.quantity, 150.0);
        assert_eq!(profile.food_description, "Apples, raw, with skin");
    }

    #[test]
    fn test_extract_missing_nutrients_default_to_zero() {
        let rec = record(&[(NUTRIENT_PROTEIN, 25.0), (9999, 12.0)], None);

        let profile = extract_profile(&rec, 200.0);

        assert_eq!(profile.protein, 50.0);
        assert_eq!(profile.carbs, 0.0);
        assert_eq!(profile.fat, 0.0);
        assert_eq!(profile.calories, 0.0);
        assert_eq!(profile.fiber, 0.0);
        assert_eq!(profile.food_description, "N/A");
    }

    #[test]
    fn test_extract_clamps_negative_values() {
        let rec = record(&[(NUTRIENT_FAT, -1.0), (NUTRIENT_CARBS, f64::NAN)], Some("Odd"));
        let profile = extract_profile(&rec, 100.0);
        assert_eq!(profile.fat, 0.0);
        assert_eq!(profile.carbs, 0.0);
    }

    #[tokio::test]
    async fn test_lookup_found() {
        let rec = record(&[(NUTRIENT_ENERGY_KCAL, 89.0)], Some("Bananas, raw"));
        let extractor = NutrientExtractor::new(MockSource::new(Reply::Hit(rec)));
        let query = NutrientQuery::new("banana", 120.0).unwrap();

        let outcome = extractor.lookup(&query).await;

        let profile = outcome.profile().expect("profile");
        assert_eq!(profile.food_description, "Bananas, raw");
        assert!((profile.calories - 106.8).abs() < 1e-9);
        assert_eq!(extractor.source().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_lookup_not_found_is_not_an_error() {
        let extractor = NutrientExtractor::new(MockSource::new(Reply::Miss));
        let query = NutrientQuery::new("unobtainium", 10.0).unwrap();

        assert_eq!(extractor.lookup(&query).await, LookupOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_lookup_failure_is_reported() {
        let extractor = NutrientExtractor::new(MockSource::new(Reply::Broken));
        let query = NutrientQuery::new("apple", 10.0).unwrap();

        match extractor.lookup(&query).await {
            LookupOutcome::Failed(message) => {
                assert!(message.starts_with("Could not reach the food database"))
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }
}
