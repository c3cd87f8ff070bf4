use harvester_core::api::{ConsoleError, ProcessInfo};

use crate::app::Console;
use crate::commands::cli::ProcessesCommand;
use crate::flow::watch;
use crate::output;

pub async fn run(console: &Console, command: ProcessesCommand) -> Result<(), ConsoleError> {
    match command {
        ProcessesCommand::List => list(console).await,
        ProcessesCommand::Show { id } => {
            let process = console.processes.get(id).await?;
            if console.json {
                output::print_json(&process)?;
            } else {
                print_detail(&process);
            }
            Ok(())
        }
        ProcessesCommand::Watch { id } => {
            watch::watch_process(console, id).await?;
            Ok(())
        }
        ProcessesCommand::Abort { id } => {
            console.processes.abort(id).await?;
            console.bus.info(format!("abort of process {} requested", id));
            Ok(())
        }
        ProcessesCommand::Purge => {
            console.processes.purge().await?;
            console.bus.info("completed processes purged");
            Ok(())
        }
    }
}

async fn list(console: &Console) -> Result<(), ConsoleError> {
    let processes = console.processes.list().await?;
    if console.json {
        return Ok(output::print_json(&processes)?);
    }
    let rows: Vec<Vec<String>> = processes
        .iter()
        .map(|p| {
            let stats = p.statistics.unwrap_or_default();
            vec![
                p.uuid.to_string(),
                p.status.to_string(),
                p.description.clone().unwrap_or_default(),
                stats.acquired.to_string(),
                stats.succeeded.to_string(),
            ]
        })
        .collect();
    output::print_table(
        &["uuid", "status", "description", "acquired", "succeeded"],
        &rows,
    );
    Ok(())
}

fn print_detail(process: &ProcessInfo) {
    println!("uuid:   {}", process.uuid);
    println!("status: {}", process.status);
    if let Some(task_id) = process.task_id {
        println!("task:   {}", task_id);
    }
    if let Some(description) = &process.description {
        println!("about:  {}", description);
    }
    if let Some(stats) = &process.statistics {
        println!(
            "stats:  acquired {}, succeeded {}, failed {}",
            stats.acquired,
            stats.succeeded,
            stats.failed()
        );
        if let Some(start) = stats.start_date {
            println!("start:  {}", start.to_rfc3339());
        }
        if let Some(end) = stats.end_date {
            println!("end:    {}", end.to_rfc3339());
        }
    }
}
