use clap::{Parser, Subcommand};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

mod domain;
mod application;
mod infrastructure;

use application::errors::{BotError, ConfigError};
use application::services::{CommandService, EventService};
use domain::entities::CommandCatalog;
use domain::traits::CommandRegistrar;
use infrastructure::adapters::console;
use infrastructure::adapters::discord::{self, DiscordRest};
use infrastructure::config::Config;

#[derive(Parser)]
#[command(name = "discord-command-bot")]
#[command(about = "A minimal Discord command bot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Bot token (overrides config and DISCORD_TOKEN)
    #[arg(short, long)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to Discord and start the bot
    Run,
    /// Try the prefix and slash commands locally on stdin
    Console,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let (config, load_error) = load_config(&cli.config);
    init_logging(&config.logging.level);
    install_panic_hook();

    if let Some(e) = load_error {
        tracing::warn!("Failed to load config: {}, using defaults", e);
    }

    match cli.command {
        Commands::Run => run_bot(config, cli.token),
        Commands::Console => run_console(config),
        Commands::Version => {
            println!("discord-command-bot v{}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Commands::InitConfig => init_config(),
    }
}

fn load_config(path: &str) -> (Config, Option<ConfigError>) {
    let (mut config, error) = if Path::new(path).exists() {
        match Config::load(path) {
            Ok(config) => (config, None),
            Err(e) => (Config::default(), Some(e)),
        }
    } else {
        (Config::default(), None)
    };

    config.apply_env();
    (config, error)
}

fn init_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(filter)
        .init();
}

/// Panics inside event tasks are logged; the runtime keeps the process alive
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("Unhandled panic: {}", info);
    }));
}

fn build_service(config: &Config, application_id: Option<String>) -> Arc<EventService> {
    let commands = CommandService::new(CommandCatalog::builtin(), application_id);
    Arc::new(EventService::new(config.bot.prefix.clone(), commands))
}

fn build_runtime() -> Option<tokio::runtime::Runtime> {
    match tokio::runtime::Runtime::new() {
        Ok(rt) => Some(rt),
        Err(e) => {
            tracing::error!("Failed to start async runtime: {}", e);
            None
        }
    }
}

fn run_bot(mut config: Config, token_override: Option<String>) -> ExitCode {
    if let Some(token) = token_override {
        config.discord.token = Some(token);
    }

    let credentials = match config.validate().map_err(BotError::from) {
        Ok(credentials) => credentials,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("Starting {}", config.bot.name);

    let Some(rt) = build_runtime() else {
        return ExitCode::FAILURE;
    };

    let service = build_service(&config, credentials.application_id.clone());
    let registrar: Arc<dyn CommandRegistrar> = Arc::new(DiscordRest::with_api_base(
        credentials.token.clone(),
        config.discord.api_base.clone(),
    ));

    let result = rt.block_on(discord::run(&credentials.token, service, registrar, shutdown_signal()));
    // In-flight replies are not awaited
    rt.shutdown_background();

    match result {
        Ok(()) => {
            tracing::info!("Shut down gracefully");
            ExitCode::SUCCESS
        }
        Err(e) if e.is_fatal() => {
            tracing::error!("Failed to login: {}", e);
            ExitCode::FAILURE
        }
        // Already reported through the event service
        Err(_) => ExitCode::FAILURE,
    }
}

fn run_console(config: Config) -> ExitCode {
    let Some(rt) = build_runtime() else {
        return ExitCode::FAILURE;
    };

    let service = build_service(&config, None);
    match rt.block_on(console::run_console(service)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Console stopped: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_config() -> ExitCode {
    match Config::default().to_yaml() {
        Ok(yaml) => {
            println!("{}", yaml);
            println!("\nSave this to config.yaml and adjust as needed.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, shutting down gracefully..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down gracefully..."),
    }
}
