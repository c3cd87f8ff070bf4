use uuid::Uuid;

use super::context::RestContext;
use crate::error::ClientError;
use crate::model::{BrokerInfo, EntityDefinition};

#[derive(Clone)]
pub struct BrokersRest {
    ctx: RestContext,
}

impl BrokersRest {
    pub fn new(ctx: RestContext) -> Self {
        BrokersRest { ctx }
    }

    pub async fn list(&self) -> Result<Vec<BrokerInfo>, ClientError> {
        self.ctx.get_json("brokers").await
    }

    pub async fn input(&self) -> Result<Vec<BrokerInfo>, ClientError> {
        self.ctx.get_json("brokers/input").await
    }

    pub async fn output(&self) -> Result<Vec<BrokerInfo>, ClientError> {
        self.ctx.get_json("brokers/output").await
    }

    pub async fn get(&self, id: Uuid) -> Result<BrokerInfo, ClientError> {
        self.ctx.get_json(&format!("brokers/{}", id)).await
    }

    pub async fn create(&self, definition: &EntityDefinition) -> Result<BrokerInfo, ClientError> {
        self.ctx.put_json("brokers", definition).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        definition: &EntityDefinition,
    ) -> Result<BrokerInfo, ClientError> {
        self.ctx
            .post_json(&format!("brokers/{}", id), definition)
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
        self.ctx.delete(&format!("brokers/{}", id)).await
    }
}
