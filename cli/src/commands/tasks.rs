use std::path::Path;

use chrono::NaiveTime;
use harvester_core::api as core_api;
use harvester_core::api::{replace_schedule, ConsoleError, TaskDefinition, TriggerDefinition};
use uuid::Uuid;

use crate::app::Console;
use crate::commands::cli::{ScheduleArgs, TasksCommand};
use crate::flow::watch;
use crate::output;

pub async fn run(console: &Console, command: TasksCommand) -> Result<(), ConsoleError> {
    match command {
        TasksCommand::List => list(console).await,
        TasksCommand::Show { id } => {
            let task = console.tasks.get(id).await?;
            if console.json {
                output::print_json(&task)?;
            } else {
                println!("uuid:  {}", task.uuid);
                println!("label: {}", task.task_definition.label());
            }
            Ok(())
        }
        TasksCommand::Create { file } => {
            let definition = read_definition(&file)?;
            let task = console.tasks.create(&definition).await?;
            console.bus.publish(core_api::AppEvent::TasksChanged);
            console.bus.info(format!(
                "task {} created as {}",
                task.task_definition.label(),
                task.uuid
            ));
            println!("{}", task.uuid);
            Ok(())
        }
        TasksCommand::Update { id, file } => {
            let definition = read_definition(&file)?;
            let task = console.tasks.update(id, &definition).await?;
            console.bus.publish(core_api::AppEvent::TasksChanged);
            console.bus.info(format!("task {} updated", task.uuid));
            Ok(())
        }
        TasksCommand::Rename { id, name } => {
            let task = console.tasks.get(id).await?;
            let mut definition = task.task_definition;
            definition.name = name.filter(|n| !n.is_empty());
            let task = console.tasks.update(id, &definition).await?;
            console
                .bus
                .info(format!("task renamed to {}", task.task_definition.label()));
            Ok(())
        }
        TasksCommand::Delete { id } => {
            console.tasks.delete(id).await?;
            console.bus.publish(core_api::AppEvent::TasksChanged);
            console.bus.info(format!("task {} deleted", id));
            Ok(())
        }
        TasksCommand::Execute { id, watch: follow } => {
            let process = console.tasks.execute(id).await?;
            console
                .bus
                .info(format!("process {} {}", process.uuid, process.status));
            if follow {
                watch::watch_process(console, process.uuid).await?;
            } else {
                println!("{}", process.uuid);
            }
            Ok(())
        }
        TasksCommand::Schedule { id, schedule } => set_schedule(console, id, schedule).await,
        TasksCommand::History { id } => history(console, id).await,
        TasksCommand::PurgeHistory { id } => {
            console.tasks.purge_history(id).await?;
            console.bus.info(format!("history of task {} purged", id));
            Ok(())
        }
        TasksCommand::Export { id, out } => {
            let raw = console.tasks.export(id).await?;
            match out {
                Some(path) => {
                    std::fs::write(&path, raw)?;
                    console
                        .bus
                        .info(format!("task {} exported to {}", id, path.display()));
                }
                None => println!("{}", raw),
            }
            Ok(())
        }
        TasksCommand::Import { file } => {
            let bytes = std::fs::read(&file)?;
            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "task.json".to_string());
            let task = console.tasks.import(&file_name, bytes).await?;
            console.bus.publish(core_api::AppEvent::TasksChanged);
            println!("{}", task.uuid);
            Ok(())
        }
    }
}

async fn list(console: &Console) -> Result<(), ConsoleError> {
    let tasks = console.tasks.list().await?;
    if console.json {
        return Ok(output::print_json(&tasks)?);
    }
    let rows: Vec<Vec<String>> = tasks
        .iter()
        .map(|t| vec![t.uuid.to_string(), t.task_definition.label()])
        .collect();
    output::print_table(&["uuid", "label"], &rows);
    Ok(())
}

async fn set_schedule(console: &Console, id: Uuid, args: ScheduleArgs) -> Result<(), ConsoleError> {
    let definition = if args.clear {
        None
    } else if let Some(period) = args.period.as_deref() {
        Some(TriggerDefinition::periodic(period))
    } else if let Some(at) = args.at.as_deref() {
        let time = NaiveTime::parse_from_str(at, "%H:%M")
            .map_err(|_| ConsoleError::Validation(format!("not a time (HH:mm): {}", at)))?;
        Some(TriggerDefinition::at_time(&time.format("%H:%M").to_string()))
    } else {
        None
    };

    let created = replace_schedule(
        &console.tasks,
        &console.triggers,
        &console.bus,
        id,
        definition.as_ref(),
    )
    .await?;

    match created {
        Some(trigger) => {
            let info = trigger
                .trigger_definition
                .scheduling_info()
                .unwrap_or_else(|| trigger.trigger_definition.kind.clone());
            console
                .bus
                .info(format!("task {} scheduled: {}", id, info));
        }
        None => console.bus.info(format!("schedule of task {} cleared", id)),
    }
    Ok(())
}

async fn history(console: &Console, id: Uuid) -> Result<(), ConsoleError> {
    let events = console.tasks.history(id).await?;
    if console.json {
        return Ok(output::print_json(&events)?);
    }
    let rows: Vec<Vec<String>> = events
        .iter()
        .map(|e| {
            let stats = e.statistics.unwrap_or_default();
            vec![
                e.uuid.to_string(),
                stats
                    .start_date
                    .map(|d| d.to_rfc3339())
                    .unwrap_or_default(),
                stats.end_date.map(|d| d.to_rfc3339()).unwrap_or_default(),
                stats.acquired.to_string(),
                stats.succeeded.to_string(),
                stats.failed().to_string(),
            ]
        })
        .collect();
    output::print_table(
        &["uuid", "started", "ended", "acquired", "succeeded", "failed"],
        &rows,
    );
    Ok(())
}

fn read_definition(file: &Path) -> Result<TaskDefinition, ConsoleError> {
    let raw = std::fs::read_to_string(file)?;
    let definition: TaskDefinition = serde_json::from_str(&raw)
        .map_err(|e| ConsoleError::Validation(format!("{}: {}", file.display(), e)))?;
    if definition.source.is_none() {
        return Err(ConsoleError::Validation(format!(
            "{}: task definition has no source",
            file.display()
        )));
    }
    Ok(definition)
}
