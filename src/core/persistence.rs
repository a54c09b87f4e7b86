use crate::core::{NutrientProfile, Storage};
use crate::utils::error::{NutriError, Result};
use crate::utils::validation::validate_path;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }

    pub fn from_path(path: &str) -> Result<Self> {
        let ext = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        ext.parse()
    }
}

impl FromStr for OutputFormat {
    type Err = NutriError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(NutriError::validation(
                "format",
                format!("'{}' is not a supported format (csv/json). Please try again.", other),
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

pub fn render(results: &[NutrientProfile], format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            for profile in results {
                writer.serialize(profile)?;
            }
            // csv 只在第一筆序列化時寫標頭
            writer.flush()?;
            writer
                .into_inner()
                .map_err(|e| NutriError::IoError(e.into_error()))
        }
        OutputFormat::Json => {
            let mut buf = Vec::new();
            let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
            let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
            serde::Serialize::serialize(results, &mut ser)?;
            Ok(buf)
        }
    }
}

pub fn parse(data: &[u8], format: OutputFormat) -> Result<Vec<NutrientProfile>> {
    match format {
        OutputFormat::Csv => {
            let mut reader = csv::Reader::from_reader(data);
            let mut profiles = Vec::new();
            for row in reader.deserialize() {
                let profile: NutrientProfile = row?;
                profiles.push(profile);
            }
            Ok(profiles)
        }
        OutputFormat::Json => Ok(serde_json::from_slice(data)?),
    }
}

/// 沒有指定檔名時使用時間戳記
pub fn default_file_stem() -> String {
    format!(
        "nutrition_results_{}",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    )
}

pub struct ResultWriter<S: Storage> {
    storage: S,
}

impl<S: Storage> ResultWriter<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Writes `<name>.<ext>` and returns the full output path.
    pub async fn save(
        &self,
        results: &[NutrientProfile],
        format: OutputFormat,
        name: &str,
    ) -> Result<String> {
        let stem = match name.trim() {
            "" => default_file_stem(),
            stem => stem.to_string(),
        };
        validate_path("file name", &stem)?;

        let file_name = format!("{}.{}", stem, format.extension());
        let data = render(results, format)?;

        tracing::debug!(
            "Writing {} results ({} bytes) to {}",
            results.len(),
            data.len(),
            file_name
        );
        let output_path = self.storage.write_file(&file_name, &data).await?;
        tracing::info!("💾 Results saved to {}", output_path);
        Ok(output_path)
    }

    pub async fn load(&self, file_name: &str) -> Result<Vec<NutrientProfile>> {
        let format = OutputFormat::from_path(file_name)?;
        let data = self.storage.read_file(file_name).await?;
        parse(&data, format)
    }
}
