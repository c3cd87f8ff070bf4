use clap::Parser;

mod app;
mod commands;
mod flow;
mod output;

use app::Console;
use commands::cli::{Args, Commands};
use harvester_core::api as core_api;
use harvester_core::api::ConsoleError;
use tracing::Instrument;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            exit_code_for_error(&e)
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<i32, ConsoleError> {
    let args = Args::parse();
    let cfg = core_api::load_default().map_err(|e| ConsoleError::Config(e.to_string()))?;
    init_tracing(&cfg.logging).map_err(ConsoleError::Config)?;

    let console = Console::new(&cfg, &args)?;
    let status_printer = console.spawn_status_printer();

    let run_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("console.run", run_id = %run_id);
    let result = dispatch(&console, args.command).instrument(span).await;

    // Let queued status messages drain before the process exits.
    drop(console);
    let _ = status_printer.await;

    result.map(|_| 0)
}

async fn dispatch(console: &Console, command: Commands) -> Result<(), ConsoleError> {
    match command {
        Commands::Brokers { command } => commands::brokers::run(console, command).await,
        Commands::Connectors { command } => commands::connectors::run(console, command).await,
        Commands::Tasks { command } => commands::tasks::run(console, command).await,
        Commands::Processes { command } => commands::processes::run(console, command).await,
        Commands::Triggers { command } => commands::triggers::run(console, command).await,
    }
}

fn exit_code_for_error(e: &ConsoleError) -> i32 {
    // 0: success
    // 11: config error
    // 20: transport / backend error
    // 30: validation (client-side form or argument checks)
    // 50: internal/uncategorized
    match e {
        ConsoleError::Config(_) => 11,
        ConsoleError::Client(_) => 20,
        ConsoleError::Io(_) => 20,
        ConsoleError::Form(_) => 30,
        ConsoleError::Validation(_) => 30,
        ConsoleError::Anyhow(_) => 50,
    }
}

fn init_tracing(cfg: &core_api::LoggingConfig) -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.level))
        .map_err(|e| format!("invalid log filter {}: {}", cfg.level, e))?;

    let console_layer = cfg
        .console
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    let file_layer = if cfg.file {
        let directory = cfg
            .directory
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().to_string_lossy().to_string());
        std::fs::create_dir_all(&directory).map_err(|e| e.to_string())?;
        let appender = tracing_appender::rolling::daily(directory, "harvester.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let _ = LOG_GUARD.set(guard);
        Some(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| e.to_string())?;
    Ok(())
}
