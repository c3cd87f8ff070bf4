//! Console assembly: REST wrappers, event bus and the status printer.

use harvester_core::api as core_api;
use harvester_core::api::{AppEvent, StatusLevel};
use tokio::task::JoinHandle;

use crate::commands::cli::Args;

pub struct Console {
    pub bus: core_api::EventBus,
    pub brokers: core_api::BrokersRest,
    pub connectors: core_api::ConnectorsRest,
    pub tasks: core_api::TasksRest,
    pub processes: core_api::ProcessesRest,
    pub triggers: core_api::TriggersRest,
    pub json: bool,
}

impl Console {
    pub fn new(cfg: &core_api::AppConfig, args: &Args) -> Result<Self, core_api::ConsoleError> {
        let url = args.server.as_deref().unwrap_or(&cfg.server.url);
        let mut http = cfg.http.clone();
        if let Some(timeout_ms) = args.timeout_ms {
            http.timeout_ms = timeout_ms;
        }
        let ctx = core_api::RestContext::new(url, &http)?;
        tracing::debug!(target: "harvester.cli", url = %ctx.base_url(), "console ready");
        Ok(Console {
            bus: core_api::EventBus::new(),
            brokers: core_api::BrokersRest::new(ctx.clone()),
            connectors: core_api::ConnectorsRest::new(ctx.clone()),
            tasks: core_api::TasksRest::new(ctx.clone()),
            processes: core_api::ProcessesRest::new(ctx.clone()),
            triggers: core_api::TriggersRest::new(ctx),
            json: args.json,
        })
    }

    /// Prints status events to stderr, latest message wins. Ends when the
    /// bus is dropped.
    pub fn spawn_status_printer(&self) -> JoinHandle<()> {
        let mut rx = self.bus.subscribe();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(AppEvent::Status(msg)) => match msg.level {
                        StatusLevel::Info => eprintln!("{}", msg.text),
                        StatusLevel::Error => eprintln!("error: {}", msg.text),
                    },
                    Ok(_) => {}
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }
}
