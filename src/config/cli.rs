use crate::config::ConfigOverrides;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "nutri-lookup")]
#[command(about = "Look up nutrition facts from USDA FoodData Central and estimate daily intake")]
pub struct CliConfig {
    /// Path to an optional TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// USDA FoodData Central API key
    #[arg(long, env = "USDA_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Directory that saved result files are written to
    #[arg(long, global = true)]
    pub output_dir: Option<String>,

    #[arg(long, global = true)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, global = true)]
    pub page_size: Option<u32>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Start the interactive menu (default)
    Menu,
    /// Look up a single food item
    Lookup(LookupArgs),
    /// Look up several items and print the combined macros
    Combine {
        /// Items as `food name:grams`
        #[arg(required = true)]
        items: Vec<String>,
    },
    /// Estimate recommended daily intake
    Intake(IntakeArgs),
    /// Print a previously saved result file
    Show {
        /// File name relative to the output directory
        file: String,
    },
}

#[derive(Debug, Clone, Args)]
pub struct LookupArgs {
    pub food: String,

    /// Quantity in grams
    #[arg(allow_hyphen_values = true)]
    pub grams: String,

    /// Save the result as csv or json
    #[arg(long)]
    pub save: Option<String>,

    /// Output file name without extension
    #[arg(long, default_value = "")]
    pub name: String,
}

#[derive(Debug, Clone, Args)]
pub struct IntakeArgs {
    #[arg(long)]
    pub age: String,

    /// Weight in kg
    #[arg(long)]
    pub weight: String,

    /// Height in cm
    #[arg(long)]
    pub height: String,

    /// male or female
    #[arg(long)]
    pub gender: String,

    /// sedentary, light, moderate, active or very active
    #[arg(long, default_value = "sedentary")]
    pub activity: String,
}

impl CliConfig {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            output_dir: self.output_dir.clone(),
            timeout_seconds: self.timeout_seconds,
            page_size: self.page_size,
        }
    }

    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Menu)
    }
}

/// 解析 `food name:grams`，以最後一個冒號分隔
pub fn split_item(item: &str) -> Option<(String, String)> {
    let (food, grams) = item.rsplit_once(':')?;
    let food = food.trim();
    if food.is_empty() {
        return None;
    }
    Some((food.to_string(), grams.trim().to_string()))
}
