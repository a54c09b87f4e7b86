use crate::domain::model::FoodRecord;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn api_key(&self) -> Option<&str>;
    fn output_dir(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn page_size(&self) -> u32;
}

/// Food database collaborator. `Ok(None)` means no item matched the query.
#[async_trait]
pub trait FoodSource: Send + Sync {
    async fn search_first(&self, query: &str) -> Result<Option<FoodRecord>>;
}
