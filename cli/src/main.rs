//! CLI entrypoint for docqa-relay
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use relay_application::{
    DocumentQuestionSubmitter, ExchangeLogger, NoExchangeLogger, QuestionSubmitter, SessionStore,
    SubmitQuestionUseCase, UnconfiguredSubmitter,
};
use relay_infrastructure::{ConfigLoader, FileConfig, HumataGateway, JsonlExchangeLogger};
use relay_presentation::{AppState, Cli, Command, router, serve};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("info"),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {e}"))?
    };

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        println!();
        println!("{}", toml::to_string_pretty(&config.redacted())?);
        return Ok(());
    }

    let issues = config.validate();
    if !issues.is_empty() {
        for issue in &issues {
            warn!("Invalid configuration: {}", issue);
        }
        bail!("{} configuration problem(s), see above", issues.len());
    }

    // === Dependency Injection ===
    let exchange_logger = build_exchange_logger(&config);
    let submitter = build_submitter(&config, exchange_logger)?;

    match cli.resolved_command() {
        Command::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let addr: SocketAddr = format!("{host}:{port}")
                .parse()
                .with_context(|| format!("Invalid bind address {host}:{port}"))?;

            let state = AppState::new(submitter, &config.server.welcome_message);
            let app = router(state, &config.server.allowed_origins);

            info!("Starting docqa-relay");
            serve(addr, app).await?;
        }
        Command::Ask { question } => {
            let answer = submitter.submit(&question).await?;
            println!("{}", answer.text);
        }
    }

    Ok(())
}

fn build_exchange_logger(config: &FileConfig) -> Arc<dyn ExchangeLogger> {
    let Some(path) = &config.logging.exchange_log else {
        return Arc::new(NoExchangeLogger);
    };

    match JsonlExchangeLogger::new(path) {
        Some(logger) => {
            info!("Exchange log: {}", logger.path().display());
            Arc::new(logger)
        }
        None => Arc::new(NoExchangeLogger),
    }
}

/// Build the submitter for the configured document.
///
/// Missing credentials do not stop the relay: every question then fails
/// with a configuration error naming what is missing.
fn build_submitter(
    config: &FileConfig,
    exchange_logger: Arc<dyn ExchangeLogger>,
) -> Result<Arc<dyn QuestionSubmitter>> {
    let upstream = &config.upstream;
    let env = |name: &str| std::env::var(name).ok();

    let credentials = upstream
        .resolve_api_key(env)
        .and_then(|key| Ok((key, upstream.resolve_document_id(env)?)));

    let (api_key, document_id) = match credentials {
        Ok(credentials) => credentials,
        Err(e) => {
            warn!("{}", e);
            return Ok(Arc::new(UnconfiguredSubmitter::new(e.to_string())));
        }
    };

    let gateway = Arc::new(
        HumataGateway::new(&upstream.base_url, api_key, upstream.timeout())
            .context("Failed to build HTTP client")?,
    );
    let sessions = Arc::new(
        SessionStore::new(gateway.clone())
            .with_id_fields(upstream.session_id_fields())
            .with_exchange_logger(exchange_logger.clone()),
    );
    let use_case = SubmitQuestionUseCase::new(
        gateway,
        sessions,
        upstream.ask_params(&config.answer.fallback),
    )
    .with_exchange_logger(exchange_logger);

    info!(
        "Relaying questions on document {} via {}",
        document_id, upstream.base_url
    );
    Ok(Arc::new(DocumentQuestionSubmitter::new(use_case, document_id)))
}
