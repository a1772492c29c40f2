use clap::{Parser, Subcommand};
use std::path::Path;
use std::sync::Arc;

mod application;
mod domain;
mod infrastructure;

use application::errors::BotError;
use application::messaging::{InvocationDispatcher, INTERACTION_TTL};
use application::services::{CommandRegistrar, RelayContext, RelayService, RelaySettings};
use domain::entities::parameters::{COUNT_OPTION, LANG_OPTION, TOPIC_OPTION};
use domain::entities::{CommandInvocation, InvokingUser, OptionValue};
use infrastructure::adapters::console::ConsoleResponder;
use infrastructure::adapters::discord::{self, GatewayHandler, GuildCommandPublisher};
use infrastructure::config::{Config, ProcessEnv};
use infrastructure::http::HttpBackend;
use infrastructure::logging::StructuredLogger;

#[derive(Parser)]
#[command(name = "research-relay")]
#[command(about = "Relays a Discord slash command to a fixed HTTP endpoint", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "relay.yaml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Register the command and connect to the gateway
    Run,
    /// Publish the command set to the guild and exit
    Register,
    /// Run one invocation locally, replying on the console
    Invoke {
        #[arg(long)]
        trend_topic: String,
        #[arg(long)]
        count: Option<i64>,
        #[arg(long)]
        lang: Option<String>,
    },
    /// Generate default config
    InitConfig,
    /// Show version
    Version,
}

fn main() {
    // .env is optional
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Version => {
            println!("research-relay v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(&cli.config),
        command => block_on(run_command(command, load_config(&cli.config))),
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn block_on<F: std::future::Future<Output = Result<(), BotError>>>(future: F) -> Result<(), BotError> {
    let rt = tokio::runtime::Runtime::new().map_err(|e| BotError::Gateway(format!("Failed to start runtime: {}", e)))?;
    rt.block_on(future)
}

fn load_config(path: &str) -> Config {
    if !Path::new(path).exists() {
        return Config::load_env();
    }

    Config::load(path)
        .unwrap_or_else(|e| {
            tracing::warn!("Failed to load config: {}, using defaults", e);
            Config::default()
        })
        .with_env(&ProcessEnv)
}

fn init_config(path: &str) -> Result<(), BotError> {
    if Path::new(path).exists() {
        println!("{} already exists, leaving it untouched", path);
        return Ok(());
    }
    Config::default().write(path)?;
    println!("Wrote default config to {}", path);
    Ok(())
}

async fn run_command(command: Commands, config: Config) -> Result<(), BotError> {
    let logger = Arc::new(StructuredLogger::from_config(&config.logging));
    install_panic_hook(logger.clone());

    for key in config.missing_fields() {
        logger.warn(&format!("Environment variable {} is not set", key), None);
    }

    match command {
        Commands::Run => run_bot(config, logger).await,
        Commands::Register => {
            register(&config, logger).await;
            Ok(())
        }
        Commands::Invoke {
            trend_topic,
            count,
            lang,
        } => {
            invoke_locally(&config, logger, trend_topic, count, lang).await;
            Ok(())
        }
        Commands::InitConfig | Commands::Version => Ok(()),
    }
}

/// Panics anywhere are logged; the runtime keeps the process alive
fn install_panic_hook(logger: Arc<StructuredLogger>) {
    std::panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_default();
        logger.error(
            "Uncaught Exception",
            Some(&serde_json::json!({
                "message": info.to_string(),
                "location": location,
            })),
        );
    }));
}

fn relay_service(config: &Config, logger: Arc<StructuredLogger>) -> Arc<RelayService> {
    Arc::new(RelayService::new(RelayContext {
        settings: RelaySettings {
            target_url: config.relay.target_url.clone(),
            credentials: config.credentials(),
            dashboard_url: config.relay.dashboard_url.clone(),
            variant: config.relay.command,
        },
        backend: Arc::new(HttpBackend::new()),
        logger,
    }))
}

async fn register(config: &Config, logger: Arc<StructuredLogger>) -> bool {
    let registrar = CommandRegistrar::new(config.relay.command, logger.clone());

    match discord::rest_client(&config.discord.token, &config.discord.application_id) {
        Ok(http) => {
            let publisher = GuildCommandPublisher::new(http);
            registrar.register_commands(&publisher, &config.discord.guild_id).await
        }
        Err(e) => {
            logger.error(
                "Failed to reload commands",
                Some(&serde_json::json!({ "error": { "message": e.to_string() } })),
            );
            false
        }
    }
}

async fn run_bot(config: Config, logger: Arc<StructuredLogger>) -> Result<(), BotError> {
    logger.info("Bot starting up");

    // Registration failures are logged inside and do not stop the gateway
    register(&config, logger.clone()).await;

    let dispatcher = Arc::new(InvocationDispatcher::new(relay_service(&config, logger.clone())));
    let handler = GatewayHandler::new(dispatcher, logger.clone(), &config.discord.activity);

    if let Err(e) = discord::start_gateway(&config.discord.token, handler).await {
        logger.error(
            "Failed to login",
            Some(&serde_json::json!({ "error": { "message": e.to_string() } })),
        );
        return Err(e);
    }

    logger.info("Bot stopped");
    Ok(())
}

async fn invoke_locally(
    config: &Config,
    logger: Arc<StructuredLogger>,
    trend_topic: String,
    count: Option<i64>,
    lang: Option<String>,
) {
    let relay = relay_service(config, logger);
    let user = InvokingUser {
        id: "0".to_string(),
        tag: "console".to_string(),
    };

    let mut invocation = CommandInvocation::new(relay.command_name(), user)
        .with_option(TOPIC_OPTION, OptionValue::String(trend_topic));
    if let Some(count) = count {
        invocation = invocation.with_option(COUNT_OPTION, OptionValue::Integer(count));
    }
    if let Some(lang) = lang {
        invocation = invocation.with_option(LANG_OPTION, OptionValue::String(lang));
    }

    let deadline = tokio::time::Instant::now() + INTERACTION_TTL;
    let report = relay.handle(&invocation, &ConsoleResponder::new(), deadline).await;
    if report.outcome.is_success() {
        tracing::info!("Invocation finished in state {:?}", report.final_state());
    } else {
        tracing::warn!("Invocation failed: {:?}", report.outcome);
    }
}
