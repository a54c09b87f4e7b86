use crate::core::aggregator::CombineReport;
use crate::core::extractor::{LookupOutcome, NutrientExtractor};
use crate::core::intake::estimate_intake;
use crate::core::persistence::{OutputFormat, ResultWriter};
use crate::core::{
    BiometricInput, FoodSource, IntakeRecommendation, NutrientProfile, NutrientQuery, Storage,
};
use crate::utils::error::{NutriError, Result};
use crate::utils::validation::parse_quantity;

/// Successful single lookups collected during one session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultLog {
    entries: Vec<NutrientProfile>,
}

impl ResultLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, profile: NutrientProfile) {
        self.entries.push(profile);
    }

    pub fn entries(&self) -> &[NutrientProfile] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub struct Session<F: FoodSource, S: Storage> {
    extractor: NutrientExtractor<F>,
    writer: ResultWriter<S>,
    log: ResultLog,
}

impl<F: FoodSource, S: Storage> Session<F, S> {
    pub fn new(source: F, storage: S) -> Self {
        Self::with_log(source, storage, ResultLog::new())
    }

    pub fn with_log(source: F, storage: S, log: ResultLog) -> Self {
        Self {
            extractor: NutrientExtractor::new(source),
            writer: ResultWriter::new(storage),
            log,
        }
    }

    pub fn results(&self) -> &[NutrientProfile] {
        self.log.entries()
    }

    pub fn into_log(self) -> ResultLog {
        self.log
    }

    /// 單筆查詢；數量不合法時不會呼叫 API
    pub async fn lookup(&mut self, food: &str, quantity: &str) -> Result<LookupOutcome> {
        let query = NutrientQuery::new(food, parse_quantity(quantity)?)?;
        let outcome = self.extractor.lookup(&query).await;

        if let LookupOutcome::Found(profile) = &outcome {
            self.log.push(profile.clone());
            tracing::debug!("Result log now holds {} entries", self.log.len());
        }
        Ok(outcome)
    }

    /// Looks up every item and sums the hits. Combined lookups are not
    /// added to the result log.
    pub async fn combine<T: AsRef<str>>(&self, items: &[(T, T)]) -> CombineReport {
        let mut report = CombineReport::default();

        for (food, quantity) in items {
            let food = food.as_ref();
            let query = match parse_quantity(quantity.as_ref())
                .and_then(|quantity| NutrientQuery::new(food, quantity))
            {
                Ok(query) => query,
                Err(e) => {
                    tracing::warn!("Skipping '{}': {}", food, e);
                    report.requested += 1;
                    report.skip(food, &e.user_friendly_message());
                    continue;
                }
            };

            let outcome = self.extractor.lookup(&query).await;
            report.record(food, &outcome);
        }

        tracing::info!(
            "🧮 Combined {} of {} items",
            report.total.items,
            report.requested
        );
        report
    }

    pub fn recommend(&self, input: &BiometricInput) -> IntakeRecommendation {
        estimate_intake(input)
    }

    pub async fn save(&self, format: &str, name: &str) -> Result<String> {
        if self.log.is_empty() {
            return Err(NutriError::validation(
                "results",
                "No results to save. Search for food items first.",
            ));
        }
        let format: OutputFormat = format.parse()?;
        self.writer.save(self.log.entries(), format, name).await
    }

    pub async fn load(&self, file_name: &str) -> Result<Vec<NutrientProfile>> {
        self.writer.load(file_name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::extractor::{NUTRIENT_CARBS, NUTRIENT_ENERGY_KCAL, NUTRIENT_PROTEIN};
    use crate::core::{ActivityLevel, Gender};
    use crate::domain::model::FoodRecord;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    /// Answers from a fixed catalogue; "boom" simulates a transport error.
    #[derive(Clone, Default)]
    struct CatalogueSource {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl FoodSource for CatalogueSource {
        async fn search_first(&self, query: &str) -> Result<Option<FoodRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let nutrients: HashMap<u32, f64> = match query {
                "rice" => [(NUTRIENT_CARBS, 28.0), (NUTRIENT_ENERGY_KCAL, 130.0)].into(),
                "chicken" => [(NUTRIENT_PROTEIN, 31.0), (NUTRIENT_ENERGY_KCAL, 165.0)].into(),
                "boom" => {
                    let err = reqwest::Client::new()
                        .get("not a url")
                        .build()
                        .unwrap_err();
                    return Err(NutriError::ApiError(err));
                }
                _ => return Ok(None),
            };
            Ok(Some(FoodRecord {
                description: Some(query.to_uppercase()),
                nutrients,
            }))
        }
    }

    #[derive(Clone, Default)]
    struct MemStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl Storage for MemStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.files.lock().await.get(path).cloned().ok_or_else(|| {
                NutriError::IoError(std::io::Error::new(std::io::ErrorKind::NotFound, path.to_string()))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<String> {
            self.files.lock().await.insert(path.to_string(), data.to_vec());
            Ok(path.to_string())
        }
    }

    fn session() -> (Session<CatalogueSource, MemStorage>, Arc<AtomicUsize>) {
        let source = CatalogueSource::default();
        let calls = source.calls.clone();
        (Session::new(source, MemStorage::default()), calls)
    }

    #[tokio::test]
    async fn test_lookup_appends_found_profiles() {
        let (mut session, _) = session();

        let outcome = session.lookup("rice", "200").await.unwrap();

        assert!((outcome.profile().unwrap().carbs - 56.0).abs() < 1e-9);
        assert_eq!(session.results().len(), 1);
        assert_eq!(session.results()[0].food_description, "RICE");
    }

    #[tokio::test]
    async fn test_invalid_quantity_rejected_before_lookup() {
        let (mut session, calls) = session();

        for bad in ["0", "-10", "ten"] {
            let err = session.lookup("rice", bad).await.unwrap_err();
            assert!(matches!(err, NutriError::ValidationError { .. }));
        }

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(session.results().is_empty());

        // 會話繼續可用
        assert!(session.lookup("rice", "100").await.is_ok());
        assert_eq!(session.results().len(), 1);
    }

    #[tokio::test]
    async fn test_not_found_and_failure_do_not_touch_log() {
        let (mut session, _) = session();

        assert_eq!(session.lookup("nothing", "100").await.unwrap(), LookupOutcome::NotFound);
        match session.lookup("boom", "100").await.unwrap() {
            LookupOutcome::Failed(message) => {
                assert!(message.starts_with("Could not reach the food database"))
            }
            other => panic!("expected failure, got {:?}", other),
        }
        assert!(session.results().is_empty());
    }

    #[tokio::test]
    async fn test_combine_tolerates_bad_items() {
        let (session, calls) = session();

        let items = [
            ("rice", "100"),
            ("boom", "50"),
            ("chicken", "0"),
            ("chicken", "200"),
            ("nothing", "10"),
        ];
        let report = session.combine(&items).await;

        assert_eq!(report.requested, 5);
        assert_eq!(report.total.items, 2);
        assert_eq!(report.total.quantity, 300.0);
        assert!((report.total.calories - 460.0).abs() < 1e-9);
        assert_eq!(report.skipped.len(), 3);
        // 數量為 0 的項目不會發出請求
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert!(session.results().is_empty());
    }

    #[tokio::test]
    async fn test_save_requires_results_and_valid_format() {
        let (mut session, _) = session();

        let err = session.save("csv", "out").await.unwrap_err();
        assert!(err.to_string().contains("No results to save"));

        session.lookup("chicken", "100").await.unwrap();
        assert!(session.save("yaml", "out").await.is_err());
        assert_eq!(session.results().len(), 1);

        let path = session.save("JSON", "out").await.unwrap();
        assert_eq!(path, "out.json");
        let loaded = session.load("out.json").await.unwrap();
        assert_eq!(loaded, session.results());
    }

    #[test]
    fn test_recommend_delegates_to_estimator() {
        let (session, _) = session();
        let input = BiometricInput::new(25, 70.0, 175.0, Gender::Male, ActivityLevel::Moderate).unwrap();
        let rec = session.recommend(&input);
        assert!((rec.calories - 2594.3125).abs() < 1e-6);
    }
}
