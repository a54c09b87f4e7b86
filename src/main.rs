use anyhow::Context;
use clap::Parser;
use nutri_lookup::app::menu::parse_biometrics;
use nutri_lookup::app::report::{format_combined, format_intake, format_profile};
use nutri_lookup::config::cli::{split_item, Command, IntakeArgs, LookupArgs};
use nutri_lookup::core::extractor::LookupOutcome;
use nutri_lookup::core::intake::estimate_intake;
use nutri_lookup::core::persistence::ResultWriter;
use nutri_lookup::domain::ports::ConfigProvider;
use nutri_lookup::utils::{logger, validation::Validate};
use nutri_lookup::{
    AppConfig, CliConfig, LocalStorage, Menu, NutriError, Session, TomlConfig, UsdaClient,
};
use tokio::io::BufReader;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let file_config = match &cli.config {
        Some(path) => Some(
            TomlConfig::from_file(path)
                .with_context(|| format!("Failed to load config file '{}'", path))?,
        ),
        None => None,
    };

    // 初始化日誌
    let verbose = cli.verbose || file_config.as_ref().is_some_and(|f| f.verbose());
    if cli.log_json || file_config.as_ref().is_some_and(|f| f.json_logs()) {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("Starting nutri-lookup");

    let config = match AppConfig::resolve(cli.overrides(), file_config.as_ref())
        .and_then(|config| config.validate().map(|_| config))
    {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };
    tracing::debug!(
        "Resolved config: base_url={}, output_dir={}, timeout={}s, page_size={}",
        config.base_url,
        config.output_dir,
        config.timeout_seconds,
        config.page_size
    );

    if let Err(e) = run(cli.command(), &config).await {
        exit_with(&e);
    }
    Ok(())
}

fn exit_with(e: &NutriError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code().max(1))
}

fn food_session(config: &AppConfig) -> nutri_lookup::Result<Session<UsdaClient, LocalStorage>> {
    let client = UsdaClient::from_config(config)?;
    let storage = LocalStorage::new(config.output_dir().to_string());
    Ok(Session::new(client, storage))
}

async fn run(command: Command, config: &AppConfig) -> nutri_lookup::Result<()> {
    match command {
        Command::Menu => {
            let session = food_session(config)?;
            let stdin = BufReader::new(tokio::io::stdin());
            let menu = Menu::new(session, stdin, std::io::stdout(), config.default_format);
            let (log, _) = menu.run().await?;
            tracing::info!("Session ended with {} results", log.len());
            Ok(())
        }
        Command::Lookup(args) => lookup(args, config).await,
        Command::Combine { items } => {
            let session = food_session(config)?;
            // 格式錯誤的項目保留下來，由數量驗證標記為略過
            let items: Vec<(String, String)> = items
                .iter()
                .map(|item| split_item(item).unwrap_or_else(|| (item.clone(), String::new())))
                .collect();
            let report = session.combine(&items).await;
            print!("{}", format_combined(&report));
            Ok(())
        }
        Command::Intake(args) => intake(args),
        Command::Show { file } => {
            let writer = ResultWriter::new(LocalStorage::new(config.output_dir().to_string()));
            let results = writer.load(&file).await?;
            println!("{} results in {}", results.len(), file);
            for profile in &results {
                println!("\n{}", format_profile(profile));
            }
            Ok(())
        }
    }
}

async fn lookup(args: LookupArgs, config: &AppConfig) -> nutri_lookup::Result<()> {
    let mut session = food_session(config)?;

    match session.lookup(&args.food, &args.grams).await? {
        LookupOutcome::Found(profile) => print!("{}", format_profile(&profile)),
        LookupOutcome::NotFound => {
            println!("Food item not found in the USDA API. Please try again.");
            return Ok(());
        }
        LookupOutcome::Failed(message) => {
            return Err(NutriError::LookupFailed {
                food: args.food,
                message,
            });
        }
    }

    if let Some(format) = args.save {
        let path = session.save(&format, &args.name).await?;
        println!("Results saved to {}", path);
    }
    Ok(())
}

fn intake(args: IntakeArgs) -> nutri_lookup::Result<()> {
    let input = parse_biometrics(
        &args.age,
        &args.weight,
        &args.height,
        &args.gender,
        &args.activity,
    )?;
    print!("{}", format_intake(&estimate_intake(&input)));
    Ok(())
}
