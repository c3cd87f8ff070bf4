use std::path::Path;

use harvester_core::api as core_api;
use harvester_core::api::{ConsoleError, EntityDefinition, Form, ValueMap};

use crate::app::Console;
use crate::commands::cli::{BrokersCommand, Category};
use crate::output;

pub async fn run(console: &Console, command: BrokersCommand) -> Result<(), ConsoleError> {
    match command {
        BrokersCommand::List { category } => list(console, category).await,
        BrokersCommand::Show { id } => {
            let broker = console.brokers.get(id).await?;
            if console.json {
                output::print_json(&broker)?;
            } else {
                print_detail(&broker);
            }
            Ok(())
        }
        BrokersCommand::Create { file } => create(console, &file).await,
        BrokersCommand::Update { id, file } => update(console, id, &file).await,
        BrokersCommand::Delete { id } => {
            console.brokers.delete(id).await?;
            console.bus.info(format!("broker {} deleted", id));
            Ok(())
        }
    }
}

async fn list(console: &Console, category: Option<Category>) -> Result<(), ConsoleError> {
    let brokers = match category {
        None => console.brokers.list().await?,
        Some(Category::Inbound) => console.brokers.input().await?,
        Some(Category::Outbound) => console.brokers.output().await?,
    };
    if console.json {
        return Ok(output::print_json(&brokers)?);
    }
    let rows: Vec<Vec<String>> = brokers
        .iter()
        .map(|b| {
            vec![
                b.uuid.to_string(),
                b.category.map(|c| c.to_string()).unwrap_or_default(),
                b.broker_definition.kind.clone(),
                b.broker_definition.display_label(),
            ]
        })
        .collect();
    output::print_table(&["uuid", "category", "type", "label"], &rows);
    Ok(())
}

fn print_detail(broker: &core_api::BrokerInfo) {
    println!("uuid:  {}", broker.uuid);
    println!("type:  {}", broker.broker_definition.kind);
    println!("label: {}", broker.broker_definition.display_label());
    for (key, value) in &broker.broker_definition.properties {
        println!("  {} = {}", key, value);
    }
}

async fn create(console: &Console, file: &Path) -> Result<(), ConsoleError> {
    let mut definition = read_definition(file)?;
    apply_template(console, &mut definition).await?;
    let broker = console.brokers.create(&definition).await?;
    console.bus.info(format!(
        "broker {} created as {}",
        broker.broker_definition.display_label(),
        broker.uuid
    ));
    println!("{}", broker.uuid);
    Ok(())
}

async fn update(console: &Console, id: uuid::Uuid, file: &Path) -> Result<(), ConsoleError> {
    let existing = console.brokers.get(id).await?;
    let mut definition = read_definition(file)?;

    // The connector type of a stored broker never changes.
    let stored = &existing.broker_definition.kind;
    if !definition.kind.is_empty() && definition.kind != *stored {
        return Err(ConsoleError::Validation(format!(
            "broker type is immutable: stored {}, file says {}",
            stored, definition.kind
        )));
    }
    definition.kind = stored.clone();
    definition.uuid = Some(id);

    apply_template(console, &mut definition).await?;
    let broker = console.brokers.update(id, &definition).await?;
    console
        .bus
        .info(format!("broker {} updated", broker.uuid));
    Ok(())
}

fn read_definition(file: &Path) -> Result<EntityDefinition, ConsoleError> {
    let raw = std::fs::read_to_string(file)?;
    let definition: EntityDefinition = serde_json::from_str(&raw)
        .map_err(|e| ConsoleError::Validation(format!("{}: {}", file.display(), e)))?;
    if definition.kind.is_empty() {
        return Err(ConsoleError::Validation(format!(
            "{}: broker definition has no type",
            file.display()
        )));
    }
    Ok(definition)
}

/// Runs the definition's properties through the connector's argument
/// form: defaults fill in, values coerce, passwords scramble, and the
/// usual required/pattern checks apply before anything is submitted.
async fn apply_template(
    console: &Console,
    definition: &mut EntityDefinition,
) -> Result<(), ConsoleError> {
    let (inbound, outbound) = futures::future::try_join(
        console.connectors.inbound(),
        console.connectors.outbound(),
    )
    .await?;
    let template = inbound
        .iter()
        .chain(outbound.iter())
        .find(|t| t.kind == definition.kind)
        .ok_or_else(|| {
            ConsoleError::Validation(format!("unknown connector type: {}", definition.kind))
        })?;

    let mut form = Form::render(&template.arguments)?;
    form.init(&definition.properties);
    let violations = form.validate();
    if !violations.is_empty() {
        return Err(ConsoleError::Validation(violations.join("; ")));
    }
    let mut properties = ValueMap::new();
    form.read(&mut properties);
    form.destroy();
    definition.properties = properties;
    Ok(())
}
