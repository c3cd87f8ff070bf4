pub mod brokers;
pub mod cli;
pub mod connectors;
pub mod processes;
pub mod tasks;
pub mod triggers;
