use uuid::Uuid;

use super::context::RestContext;
use crate::error::ClientError;
use crate::model::{ConnectorTemplate, TriggerInfo};

#[derive(Clone)]
pub struct TriggersRest {
    ctx: RestContext,
}

impl TriggersRest {
    pub fn new(ctx: RestContext) -> Self {
        TriggersRest { ctx }
    }

    pub async fn list(&self) -> Result<Vec<TriggerInfo>, ClientError> {
        self.ctx.get_json("triggers").await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
        self.ctx.delete(&format!("triggers/{}", id)).await
    }

    /// Trigger type templates, same shape as connector templates.
    pub async fn types(&self) -> Result<Vec<ConnectorTemplate>, ClientError> {
        self.ctx.get_json("triggers/types").await
    }
}
