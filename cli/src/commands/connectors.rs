use harvester_core::api::{ConnectorTemplate, ConsoleError};

use crate::app::Console;
use crate::commands::cli::ConnectorsCommand;
use crate::output;

pub async fn run(console: &Console, command: ConnectorsCommand) -> Result<(), ConsoleError> {
    match command {
        ConnectorsCommand::Inbound { id: Some(id) } => {
            show(console, console.connectors.inbound_one(&id).await?)
        }
        ConnectorsCommand::Inbound { id: None } => {
            list(console, console.connectors.inbound().await?)
        }
        ConnectorsCommand::Outbound { id: Some(id) } => {
            show(console, console.connectors.outbound_one(&id).await?)
        }
        ConnectorsCommand::Outbound { id: None } => {
            list(console, console.connectors.outbound().await?)
        }
    }
}

fn list(console: &Console, templates: Vec<ConnectorTemplate>) -> Result<(), ConsoleError> {
    if console.json {
        return Ok(output::print_json(&templates)?);
    }
    let rows: Vec<Vec<String>> = templates
        .iter()
        .map(|t| {
            vec![
                t.kind.clone(),
                t.label.clone(),
                t.arguments.len().to_string(),
            ]
        })
        .collect();
    output::print_table(&["type", "label", "arguments"], &rows);
    Ok(())
}

fn show(console: &Console, template: ConnectorTemplate) -> Result<(), ConsoleError> {
    if console.json {
        return Ok(output::print_json(&template)?);
    }
    println!("{} ({})", template.kind, template.label);
    let rows: Vec<Vec<String>> = template
        .arguments
        .iter()
        .map(|a| {
            vec![
                a.name.clone(),
                a.kind.to_string(),
                if a.required { "required" } else { "" }.to_string(),
                a.label.clone(),
                a.hint.clone().unwrap_or_default(),
            ]
        })
        .collect();
    output::print_table(&["name", "type", "", "label", "hint"], &rows);
    Ok(())
}
