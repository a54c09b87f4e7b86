pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{storage::LocalStorage, usda::UsdaClient};
pub use app::menu::Menu;
pub use config::{toml_config::TomlConfig, AppConfig};
pub use crate::core::session::{ResultLog, Session};
pub use utils::error::{NutriError, Result};
