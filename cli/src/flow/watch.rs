//! Live view of one running process.

use std::time::Duration;

use harvester_core::api::{AppEvent, ConsoleError, ProcessInfo, ProcessWatch};
use indicatif::{ProgressBar, ProgressStyle};
use uuid::Uuid;

use crate::app::Console;

/// Polls the process until it reaches a terminal status, rendering
/// progress on a spinner. Ctrl-C stops the watch without touching the
/// process itself.
pub async fn watch_process(
    console: &Console,
    uuid: Uuid,
) -> Result<Option<ProcessInfo>, ConsoleError> {
    let mut rx = console.bus.subscribe();
    let handle = ProcessWatch::spawn(console.processes.clone(), console.bus.clone(), uuid);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner.set_message(format!("process {}", uuid));

    let join = handle.join();
    tokio::pin!(join);

    let finished = loop {
        tokio::select! {
            result = &mut join => break result,
            _ = tokio::signal::ctrl_c() => {
                spinner.finish_and_clear();
                console.bus.info(format!("stopped watching process {}", uuid));
                return Ok(None);
            }
            event = rx.recv() => {
                if let Ok(AppEvent::ProcessChanged(info)) = event {
                    if info.uuid == uuid {
                        spinner.set_message(describe(&info));
                    }
                }
            }
        }
    };

    spinner.finish_and_clear();
    match &finished {
        Some(info) => {
            println!("{}", describe(info));
            if console.json {
                crate::output::print_json(info)?;
            }
        }
        None => {
            return Err(ConsoleError::Anyhow(anyhow::anyhow!(
                "watch of process {} ended without a terminal status",
                uuid
            )))
        }
    }
    Ok(finished)
}

fn describe(info: &ProcessInfo) -> String {
    match &info.statistics {
        Some(stats) => format!(
            "process {} {} (acquired {}, succeeded {}, failed {})",
            info.uuid,
            info.status,
            stats.acquired,
            stats.succeeded,
            stats.failed()
        ),
        None => format!("process {} {}", info.uuid, info.status),
    }
}
