#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::persistence::OutputFormat;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_range, validate_url, Validate};
use toml_config::TomlConfig;

pub const DEFAULT_BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";
pub const DEFAULT_OUTPUT_DIR: &str = ".";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_PAGE_SIZE: u32 = 1;
pub const API_KEY_ENV: &str = "USDA_API_KEY";
pub const LEGACY_API_KEY_ENV: &str = "API_KEY";

/// Values given on the command line; they win over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub output_dir: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub page_size: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub output_dir: String,
    pub timeout_seconds: u64,
    pub page_size: u32,
    pub default_format: OutputFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            page_size: DEFAULT_PAGE_SIZE,
            default_format: OutputFormat::Csv,
        }
    }
}

impl AppConfig {
    /// 合併順序: 命令列 > 設定檔 > 環境變數 API_KEY > 預設值
    pub fn resolve(overrides: ConfigOverrides, file: Option<&TomlConfig>) -> Result<Self> {
        let defaults = AppConfig::default();

        let api_key = overrides
            .api_key
            .filter(|key| !key.trim().is_empty())
            .or_else(|| file.and_then(|f| f.api_key()).map(str::to_string))
            .or_else(|| {
                std::env::var(LEGACY_API_KEY_ENV)
                    .ok()
                    .filter(|key| !key.trim().is_empty())
            });

        let default_format = match file.and_then(|f| f.default_format()) {
            Some(format) => format.parse()?,
            None => defaults.default_format,
        };

        Ok(Self {
            api_key,
            base_url: overrides
                .base_url
                .or_else(|| file.and_then(|f| f.base_url()).map(str::to_string))
                .unwrap_or(defaults.base_url),
            output_dir: overrides
                .output_dir
                .or_else(|| file.and_then(|f| f.output_directory()).map(str::to_string))
                .unwrap_or(defaults.output_dir),
            timeout_seconds: overrides
                .timeout_seconds
                .or_else(|| file.and_then(|f| f.timeout_seconds()))
                .unwrap_or(defaults.timeout_seconds),
            page_size: overrides
                .page_size
                .or_else(|| file.and_then(|f| f.page_size()))
                .unwrap_or(defaults.page_size),
            default_format,
        })
    }
}

impl ConfigProvider for AppConfig {
    fn api_base_url(&self) -> &str {
        &self.base_url
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn output_dir(&self) -> &str {
        &self.output_dir
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn page_size(&self) -> u32 {
        self.page_size
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api.base_url", &self.base_url)?;
        validate_path("output.directory", &self.output_dir)?;
        validate_range("api.timeout_seconds", self.timeout_seconds, 1, 300)?;
        validate_range("api.page_size", self.page_size, 1, 200)?;
        Ok(())
    }
}
