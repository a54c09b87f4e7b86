//! USDA FoodData Central search client.
//!
//! Only `GET /foods/search` is used; the first returned food is taken as the
//! match for a query.

use crate::core::{ConfigProvider, FoodSource};
use crate::domain::model::FoodRecord;
use crate::utils::error::{NutriError, Result};
use crate::utils::validation::validate_required_field;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    foods: Vec<SearchFood>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchFood {
    description: Option<String>,
    #[serde(default)]
    food_nutrients: Vec<SearchNutrient>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchNutrient {
    nutrient_id: Option<u32>,
    value: Option<f64>,
}

impl From<SearchFood> for FoodRecord {
    fn from(food: SearchFood) -> Self {
        let nutrients = food
            .food_nutrients
            .into_iter()
            .filter_map(|n| Some((n.nutrient_id?, n.value?)))
            .collect();
        FoodRecord {
            description: food.description,
            nutrients,
        }
    }
}

pub struct UsdaClient {
    client: Client,
    base_url: String,
    api_key: String,
    page_size: u32,
}

impl UsdaClient {
    /// 缺少 API key 時在啟動階段就失敗
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let api_key = config.api_key();
        let api_key = validate_required_field("api_key", &api_key)?.to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()
            .map_err(|e| NutriError::ConfigError {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: config.api_base_url().trim_end_matches('/').to_string(),
            api_key,
            page_size: config.page_size(),
        })
    }

    fn search_url(&self) -> String {
        format!("{}/foods/search", self.base_url)
    }
}

#[async_trait]
impl FoodSource for UsdaClient {
    async fn search_first(&self, query: &str) -> Result<Option<FoodRecord>> {
        let url = self.search_url();
        tracing::debug!("Making API request to: {} (query='{}')", url, query);

        let page_size = self.page_size.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("query", query),
                ("api_key", self.api_key.as_str()),
                ("pageSize", page_size.as_str()),
            ])
            .send()
            .await?;

        tracing::debug!("API response status: {}", response.status());

        let body: SearchResponse = response.error_for_status()?.json().await?;
        tracing::debug!("API returned {} foods", body.foods.len());

        Ok(body.foods.into_iter().next().map(FoodRecord::from))
    }
}
