use std::{io, sync::OnceLock};

use application::{Args, Config};
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stdout)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (!STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .init();

    if start().await.is_err() {
        std::process::exit(1);
    }
}

async fn start() -> Result<(), ()> {
    let Args { config, command } = Args::parse().unwrap_or_else(|e| e.exit());

    let config = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
    })?;

    LOG_LEVEL
        .set(config.log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let path = command.path().display().to_string();
    let report = application::run(command, config).await.map_err(|e| {
        log::error!("`{path}`: {e}");
    })?;

    let json = serde_json::to_string_pretty(&report).map_err(|e| {
        log::error!("failed to print report: {e}");
    })?;
    println!("{json}");

    Ok(())
}
