//! Thin typed wrappers over the harvester REST endpoints.
//!
//! One wrapper per resource, all sharing a [`RestContext`] (connection
//! pool, base URL, timeouts). Wrappers do no orchestration; multi-call
//! flows live in [`crate::schedule`] and [`crate::poll`].

mod brokers;
mod connectors;
mod context;
mod processes;
mod tasks;
mod triggers;

pub use brokers::BrokersRest;
pub use connectors::ConnectorsRest;
pub use context::RestContext;
pub use processes::ProcessesRest;
pub use tasks::TasksRest;
pub use triggers::TriggersRest;
