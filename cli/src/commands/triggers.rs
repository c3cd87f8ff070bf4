use harvester_core::api::ConsoleError;

use crate::app::Console;
use crate::commands::cli::TriggersCommand;
use crate::output;

pub async fn run(console: &Console, command: TriggersCommand) -> Result<(), ConsoleError> {
    match command {
        TriggersCommand::List => {
            let triggers = console.triggers.list().await?;
            if console.json {
                return Ok(output::print_json(&triggers)?);
            }
            let rows: Vec<Vec<String>> = triggers
                .iter()
                .map(|t| {
                    vec![
                        t.uuid.to_string(),
                        t.trigger_definition.kind.clone(),
                        t.trigger_definition
                            .task_id
                            .map(|id| id.to_string())
                            .unwrap_or_default(),
                        t.trigger_definition.scheduling_info().unwrap_or_default(),
                    ]
                })
                .collect();
            output::print_table(&["uuid", "type", "task", "schedule"], &rows);
            Ok(())
        }
        TriggersCommand::Delete { id } => {
            console.triggers.delete(id).await?;
            console.bus.info(format!("trigger {} deleted", id));
            Ok(())
        }
        TriggersCommand::Types => {
            let types = console.triggers.types().await?;
            if console.json {
                return Ok(output::print_json(&types)?);
            }
            let rows: Vec<Vec<String>> = types
                .iter()
                .map(|t| vec![t.kind.clone(), t.label.clone()])
                .collect();
            output::print_table(&["type", "label"], &rows);
            Ok(())
        }
    }
}
