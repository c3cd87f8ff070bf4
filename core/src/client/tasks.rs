use uuid::Uuid;

use super::context::RestContext;
use crate::error::ClientError;
use crate::model::{HistoryEvent, ProcessInfo, TaskDefinition, TaskInfo, TriggerDefinition, TriggerInfo};

#[derive(Clone)]
pub struct TasksRest {
    ctx: RestContext,
}

impl TasksRest {
    pub fn new(ctx: RestContext) -> Self {
        TasksRest { ctx }
    }

    pub async fn list(&self) -> Result<Vec<TaskInfo>, ClientError> {
        self.ctx.get_json("tasks").await
    }

    pub async fn get(&self, id: Uuid) -> Result<TaskInfo, ClientError> {
        self.ctx.get_json(&format!("tasks/{}", id)).await
    }

    pub async fn create(&self, definition: &TaskDefinition) -> Result<TaskInfo, ClientError> {
        self.ctx.put_json("tasks", definition).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        definition: &TaskDefinition,
    ) -> Result<TaskInfo, ClientError> {
        self.ctx.post_json(&format!("tasks/{}", id), definition).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
        self.ctx.delete(&format!("tasks/{}", id)).await
    }

    /// Starts an immediate execution; the returned process is polled
    /// separately.
    pub async fn execute(&self, id: Uuid) -> Result<ProcessInfo, ClientError> {
        self.ctx.put_empty(&format!("tasks/{}/execute", id)).await
    }

    pub async fn schedule(
        &self,
        id: Uuid,
        definition: &TriggerDefinition,
    ) -> Result<TriggerInfo, ClientError> {
        self.ctx
            .put_json(&format!("tasks/{}/schedule", id), definition)
            .await
    }

    pub async fn history(&self, id: Uuid) -> Result<Vec<HistoryEvent>, ClientError> {
        self.ctx.get_json(&format!("tasks/{}/history", id)).await
    }

    pub async fn purge_history(&self, id: Uuid) -> Result<(), ClientError> {
        self.ctx.delete(&format!("tasks/{}/history", id)).await
    }

    pub async fn triggers(&self, id: Uuid) -> Result<Vec<TriggerInfo>, ClientError> {
        self.ctx.get_json(&format!("tasks/{}/triggers", id)).await
    }

    /// Raw task definition JSON, as served for file download.
    pub async fn export(&self, id: Uuid) -> Result<String, ClientError> {
        self.ctx.get_text(&format!("tasks/{}/export", id)).await
    }

    pub async fn import(&self, file_name: &str, bytes: Vec<u8>) -> Result<TaskInfo, ClientError> {
        self.ctx.post_file("tasks/upload", file_name, bytes).await
    }
}
