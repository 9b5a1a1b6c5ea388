//! CLI entrypoint for finchat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use finchat_application::{ChatError, HandleChatUseCase};
use finchat_domain::{EMPTY_GENERATION_RESPONSE, TopicClassifier};
use finchat_infrastructure::config::FileLoggingConfig;
use finchat_infrastructure::{
    CompletionClient, ConfigLoader, FileConfig, JsonlExchangeLogger, build_http_client,
};
use finchat_presentation::{ApiError, AppState, Cli, Command, create_router, serve};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    // Before parsing, so .env can feed FINCHAT_* overrides and API keys
    let dotenv_path = dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
    }
    .context("Failed to load configuration")?;

    if let Some(host) = &cli.host {
        config.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        println!();
        println!("{}", config.to_redacted_toml()?);
        return Ok(());
    }

    let _log_guard = init_tracing(cli.verbose, &config.logging)?;
    if let Some(path) = dotenv_path {
        debug!("Loaded environment from {}", path.display());
    }

    let issues = config.validate();
    for issue in &issues {
        if issue.is_error() {
            error!("{}", issue);
        } else {
            warn!("{}", issue);
        }
    }
    let errors = issues.iter().filter(|i| i.is_error()).count();
    if errors > 0 {
        bail!("Configuration has {} error(s)", errors);
    }

    let use_case = build_use_case(&config)?;

    match cli.command_or_default() {
        Command::Serve => run_server(&config, use_case).await,
        Command::Ask { message } => ask(&use_case, &message).await,
    }
}

/// Console logging plus optional daily-rolling files.
///
/// The returned guard flushes the file writer and must live until exit.
fn init_tracing(verbose: u8, logging: &FileLoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match verbose {
            0 => logging.parse_level().0,
            1 => "info",
            2 => "debug",
            _ => "trace", // -vvv or more
        };
        EnvFilter::new(level)
    });

    let (file_layer, guard) = match &logging.directory {
        Some(directory) => {
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("finchat")
                .filename_suffix("log")
                .build(directory)
                .with_context(|| format!("Failed to open log directory {}", directory.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

// === Dependency Injection ===
fn build_use_case(config: &FileConfig) -> Result<HandleChatUseCase> {
    let (kind, _) = config.provider.parse_kind();
    let transport = kind.transport(
        build_http_client()?,
        config.provider.base_url.clone(),
        config.provider.resolve_api_key(),
    );

    let policy = config.retry.to_policy();
    match policy.worst_case_latency() {
        Some(worst_case) => info!(
            provider = %kind,
            model = %config.provider.model(),
            "Using completion provider ({} attempts, worst case {:?})",
            policy.max_attempts,
            worst_case
        ),
        None => info!(
            provider = %kind,
            model = %config.provider.model(),
            "Using completion provider ({} attempts)",
            policy.max_attempts
        ),
    }

    let client = Arc::new(CompletionClient::new(transport, policy));
    let classifier = TopicClassifier::new(config.vocabulary.to_vocabulary());
    let mut use_case = HandleChatUseCase::new(client, classifier, config.generation_settings());

    if let Some(path) = &config.logging.exchange_log {
        let logger = JsonlExchangeLogger::open(path)
            .with_context(|| format!("Failed to open exchange log {}", path.display()))?;
        info!("Recording exchanges to {}", logger.path().display());
        use_case = use_case.with_exchange_logger(Arc::new(logger));
    }

    Ok(use_case)
}

async fn run_server(config: &FileConfig, use_case: HandleChatUseCase) -> Result<()> {
    let shutdown = CancellationToken::new();
    let router = create_router(
        AppState::new(use_case, shutdown.clone()),
        &config.server.cors_origins,
    );

    let address = config.server.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Listening on http://{}", listener.local_addr()?);

    let signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutting down");
            signal.cancel();
        }
    });

    serve(listener, router, shutdown).await?;
    Ok(())
}

async fn ask(use_case: &HandleChatUseCase, message: &str) -> Result<()> {
    let cancellation = CancellationToken::new();
    let signal = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal.cancel();
        }
    });

    match use_case.execute_cancellable(message, &cancellation).await {
        Ok(reply) => println!("{}", reply.text),
        Err(ChatError::EmptyGeneration) => println!("{}", EMPTY_GENERATION_RESPONSE),
        Err(e) => bail!("{}", ApiError::from(e).message),
    }
    Ok(())
}
