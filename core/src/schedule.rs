//! Trigger replacement for a task's schedule.

use uuid::Uuid;

use crate::bus::{AppEvent, EventBus};
use crate::client::{TasksRest, TriggersRest};
use crate::error::ClientError;
use crate::model::{TriggerDefinition, TriggerInfo};

/// Replaces whatever schedule a task currently has.
///
/// Existing triggers are listed and deleted concurrently; only after all
/// deletions settle is the new schedule submitted. A partial deletion
/// failure surfaces as the first error with no rollback. Passing `None`
/// (or a `NULL`-typed definition) just clears the schedule.
pub async fn replace_schedule(
    tasks: &TasksRest,
    triggers: &TriggersRest,
    bus: &EventBus,
    task_id: Uuid,
    new_def: Option<&TriggerDefinition>,
) -> Result<Option<TriggerInfo>, ClientError> {
    let existing = tasks.triggers(task_id).await?;
    tracing::debug!(
        target: "harvester.schedule",
        task = %task_id,
        existing = existing.len(),
        "replacing schedule"
    );

    let deletions = existing.iter().map(|t| triggers.delete(t.uuid));
    for result in futures::future::join_all(deletions).await {
        result?;
    }

    let created = match new_def {
        Some(def) if def.kind != "NULL" => Some(tasks.schedule(task_id, def).await?),
        _ => None,
    };

    bus.publish(AppEvent::TriggersChanged { task_id });
    Ok(created)
}
