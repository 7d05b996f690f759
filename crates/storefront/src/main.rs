//! Shopfront - terminal storefront over the Shopify Storefront API.
//!
//! # Usage
//!
//! ```bash
//! # Browse the shop, reading commands from stdin
//! shopfront browse --path / --width 390 --height 844
//!
//! # List collections matching a search query
//! shopfront collections --query summer --first 10
//! ```
//!
//! # Commands
//!
//! - `browse` - interactive session; see [`shopfront::commands`] for the
//!   line commands it accepts
//! - `collections` - one page of collections, printed as a table

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use shopfront::commands::SessionCommand;
use shopfront::config::ShopfrontConfig;
use shopfront::error::Result;
use shopfront::runtime::Runtime;
use shopfront::state::AppState;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

#[derive(Parser)]
#[command(name = "shopfront")]
#[command(author, version, about = "Terminal storefront over the Shopify Storefront API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive browsing session
    Browse {
        /// Path the session starts at
        #[arg(short, long, default_value = "/")]
        path: String,

        /// Viewport width in pixels
        #[arg(long, default_value_t = 1280)]
        width: u32,

        /// Viewport height in pixels
        #[arg(long, default_value_t = 800)]
        height: u32,

        /// Origin that internal links are resolved against
        #[arg(long, default_value = "http://localhost:3000")]
        origin: Url,
    },
    /// Print one page of collections
    Collections {
        /// Search query
        #[arg(short, long)]
        query: Option<String>,

        /// Page size
        #[arg(short, long, default_value_t = 10, value_parser = clap::value_parser!(i64).range(1..=250))]
        first: i64,

        /// Cursor of the last collection on the previous page
        #[arg(short, long)]
        after: Option<String>,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ShopfrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing(config: &ShopfrontConfig) {
    // Defaults to info level for our crate if RUST_LOG is not set.
    // Logs go to stderr; stdout carries the rendered frames.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopfront=info".into());

    let json_layer = config.json_logs.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!config.json_logs)
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration from environment (needed for Sentry init)
    let config = match ShopfrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            let _ = writeln!(std::io::stderr().lock(), "shopfront: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);
    init_tracing(&config);

    let state = AppState::new(config);
    let result = match cli.command {
        Commands::Browse {
            path,
            width,
            height,
            origin,
        } => browse(&state, &path, width, height, &origin).await,
        Commands::Collections {
            query,
            first,
            after,
        } => collections(&state, query, first, after).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            e.report();
            let _ = writeln!(std::io::stderr().lock(), "shopfront: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn browse(state: &AppState, path: &str, width: u32, height: u32, origin: &Url) -> Result<()> {
    tracing::info!(
        api_url = %state.config().api.api_url,
        home = ?state.config().catalog.home,
        "Starting browse session"
    );
    let mut runtime = Runtime::start(
        state.storefront().clone(),
        state.client().clone(),
        path,
        width,
        height,
    );
    runtime.settle().await;
    print_frame(&runtime.render())?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            () = shutdown_signal() => None,
        };
        let Some(line) = line else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<SessionCommand>() {
            Ok(SessionCommand::Quit) => break,
            Ok(command) => command,
            Err(e) => {
                e.report();
                writeln!(std::io::stderr().lock(), "{e}")?;
                continue;
            }
        };

        command.apply(&mut runtime, origin);
        runtime.settle().await;
        print_frame(&runtime.render())?;
    }

    tracing::info!(
        external_loads = runtime.history().external_loads().len(),
        "Session ended"
    );
    Ok(())
}

async fn collections(
    state: &AppState,
    query: Option<String>,
    first: i64,
    after: Option<String>,
) -> Result<()> {
    let page = state
        .client()
        .fetch_collections_page(first, after, query)
        .await?;

    let mut out = std::io::stdout().lock();
    writeln!(out, "{:<24} {:<32} {:>8}", "HANDLE", "TITLE", "PRODUCTS")?;
    for collection in &page.data {
        writeln!(
            out,
            "{:<24} {:<32} {:>8}",
            collection.handle,
            collection.title,
            collection.products.data.len()
        )?;
    }
    if let Some(cursor) = page.next_cursor() {
        writeln!(out, "next: --after {cursor}")?;
    }
    Ok(())
}

fn print_frame(frame: &str) -> Result<()> {
    let mut out = std::io::stdout().lock();
    writeln!(out, "{frame}")?;
    out.flush()?;
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, ending session");
}
