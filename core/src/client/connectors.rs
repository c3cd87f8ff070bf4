use super::context::RestContext;
use crate::error::ClientError;
use crate::model::ConnectorTemplate;

/// Connector schema templates; these drive the argument forms.
#[derive(Clone)]
pub struct ConnectorsRest {
    ctx: RestContext,
}

impl ConnectorsRest {
    pub fn new(ctx: RestContext) -> Self {
        ConnectorsRest { ctx }
    }

    pub async fn inbound(&self) -> Result<Vec<ConnectorTemplate>, ClientError> {
        self.ctx.get_json("connectors/inbound").await
    }

    pub async fn outbound(&self) -> Result<Vec<ConnectorTemplate>, ClientError> {
        self.ctx.get_json("connectors/outbound").await
    }

    pub async fn inbound_one(&self, id: &str) -> Result<ConnectorTemplate, ClientError> {
        self.ctx.get_json(&format!("connectors/inbound/{}", id)).await
    }

    pub async fn outbound_one(&self, id: &str) -> Result<ConnectorTemplate, ClientError> {
        self.ctx
            .get_json(&format!("connectors/outbound/{}", id))
            .await
    }
}
