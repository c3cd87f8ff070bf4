use uuid::Uuid;

use super::context::RestContext;
use crate::error::ClientError;
use crate::model::ProcessInfo;

#[derive(Clone)]
pub struct ProcessesRest {
    ctx: RestContext,
}

impl ProcessesRest {
    pub fn new(ctx: RestContext) -> Self {
        ProcessesRest { ctx }
    }

    pub async fn list(&self) -> Result<Vec<ProcessInfo>, ClientError> {
        self.ctx.get_json("processes").await
    }

    pub async fn get(&self, id: Uuid) -> Result<ProcessInfo, ClientError> {
        self.ctx.get_json(&format!("processes/{}", id)).await
    }

    /// Requests abort; the process transitions through `aborting` and is
    /// observed via polling like any other status change.
    pub async fn abort(&self, id: Uuid) -> Result<(), ClientError> {
        self.ctx.delete(&format!("processes/{}", id)).await
    }

    /// Drops completed processes from the backend's list.
    pub async fn purge(&self) -> Result<(), ClientError> {
        self.ctx.delete("processes").await
    }
}
