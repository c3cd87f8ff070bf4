use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use uuid::Uuid;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Inbound,
    Outbound,
}

#[derive(Parser, Debug)]
#[command(name = "harvester", version, about = "Administrative console for the harvester backend")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Base URL of the harvester REST API (overrides config).
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Per-request timeout in milliseconds (overrides config).
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Print raw JSON instead of tables.
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configured brokers (connector instances).
    Brokers {
        #[command(subcommand)]
        command: BrokersCommand,
    },
    /// Inspect connector types and their argument schemas.
    Connectors {
        #[command(subcommand)]
        command: ConnectorsCommand,
    },
    /// Manage source-to-destination pipelines.
    Tasks {
        #[command(subcommand)]
        command: TasksCommand,
    },
    /// Inspect and control running executions.
    Processes {
        #[command(subcommand)]
        command: ProcessesCommand,
    },
    /// Inspect schedules across all tasks.
    Triggers {
        #[command(subcommand)]
        command: TriggersCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum BrokersCommand {
    /// List brokers, optionally by category.
    List {
        #[arg(long, value_enum)]
        category: Option<Category>,
    },
    /// Show one broker.
    Show { id: Uuid },
    /// Create a broker from a definition file.
    Create {
        /// JSON file with the broker definition.
        file: PathBuf,
    },
    /// Update a broker from a definition file. The stored connector type
    /// is kept; a differing type in the file is rejected.
    Update { id: Uuid, file: PathBuf },
    /// Delete a broker.
    Delete { id: Uuid },
}

#[derive(Subcommand, Debug)]
pub enum ConnectorsCommand {
    /// List inbound connector templates.
    Inbound {
        /// Show a single template by connector type.
        #[arg(long)]
        id: Option<String>,
    },
    /// List outbound connector templates.
    Outbound {
        #[arg(long)]
        id: Option<String>,
    },
}

#[derive(ClapArgs, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct ScheduleArgs {
    /// Recurrence period.
    #[arg(long, value_parser = parse_period)]
    pub period: Option<String>,

    /// Fixed time of day, HH:mm.
    #[arg(long)]
    pub at: Option<String>,

    /// Remove any existing schedule.
    #[arg(long)]
    pub clear: bool,
}

fn parse_period(raw: &str) -> Result<String, String> {
    let token = raw.to_uppercase();
    if harvester_core::api::PERIOD_TOKENS.contains(&token.as_str()) {
        Ok(token)
    } else {
        Err(format!(
            "unknown period {raw}; expected one of {}",
            harvester_core::api::PERIOD_TOKENS.join(", ")
        ))
    }
}

#[derive(Subcommand, Debug)]
pub enum TasksCommand {
    /// List tasks with their derived labels.
    List,
    /// Show one task.
    Show { id: Uuid },
    /// Create a task from a definition file.
    Create { file: PathBuf },
    /// Update a task from a definition file.
    Update { id: Uuid, file: PathBuf },
    /// Set or clear the task name.
    Rename {
        id: Uuid,
        /// New name; omit to fall back to the derived label.
        name: Option<String>,
    },
    /// Delete a task.
    Delete { id: Uuid },
    /// Execute the task now.
    Execute {
        id: Uuid,
        /// Poll the spawned process until it completes.
        #[arg(long, default_value_t = false)]
        watch: bool,
    },
    /// Replace the task's schedule.
    Schedule {
        id: Uuid,
        #[command(flatten)]
        schedule: ScheduleArgs,
    },
    /// Show the task's run history.
    History { id: Uuid },
    /// Delete the task's run history.
    PurgeHistory { id: Uuid },
    /// Download the task definition as JSON.
    Export {
        id: Uuid,
        /// Output file; stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Upload a previously exported task definition.
    Import { file: PathBuf },
}

#[derive(Subcommand, Debug)]
pub enum ProcessesCommand {
    /// List processes.
    List,
    /// Show one process.
    Show { id: Uuid },
    /// Poll a process until it completes.
    Watch { id: Uuid },
    /// Request an abort of a running process.
    Abort { id: Uuid },
    /// Drop completed processes.
    Purge,
}

#[derive(Subcommand, Debug)]
pub enum TriggersCommand {
    /// List triggers across all tasks.
    List,
    /// Delete a trigger.
    Delete { id: Uuid },
    /// List trigger type templates.
    Types,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_tree_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn period_parser_accepts_known_tokens() {
        assert_eq!(parse_period("p1d").unwrap(), "P1D");
        assert!(parse_period("P3D").is_err());
    }

    #[test]
    fn schedule_flags_are_exclusive() {
        let err = Args::try_parse_from([
            "harvester", "tasks", "schedule", "2c18ff70-8bc5-4db5-8c77-72e745113d7b",
            "--period", "P1D", "--clear",
        ]);
        assert!(err.is_err());
    }
}
