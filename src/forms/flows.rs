//! Bodies of the flow builder endpoints.

use serde::Deserialize;
use serde_json::{Value, json};

use crate::domain::types::{FlowId, FlowName};
use crate::forms::FormError;

fn flow_id(id: i32) -> Result<FlowId, FormError> {
    FlowId::new(id).map_err(|_| FormError::InvalidId)
}

fn flow_name(name: String) -> Result<FlowName, FormError> {
    FlowName::new(name).map_err(|_| FormError::InvalidName)
}

#[derive(Debug, Deserialize)]
pub struct CreateFlowForm {
    pub name: String,
}

impl CreateFlowForm {
    pub fn name(self) -> Result<FlowName, FormError> {
        flow_name(self.name)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFlowForm {
    pub flow_id: i32,
    pub name: String,
    /// Left unchanged when absent.
    #[serde(default)]
    pub active: Option<bool>,
}

pub struct UpdateFlowPayload {
    pub flow_id: FlowId,
    pub name: FlowName,
    pub active: Option<bool>,
}

impl TryFrom<UpdateFlowForm> for UpdateFlowPayload {
    type Error = FormError;

    fn try_from(form: UpdateFlowForm) -> Result<Self, Self::Error> {
        Ok(Self {
            flow_id: flow_id(form.flow_id)?,
            name: flow_name(form.name)?,
            active: form.active,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateFlowForm {
    pub flow_id: i32,
}

impl DuplicateFlowForm {
    pub fn flow_id(&self) -> Result<FlowId, FormError> {
        flow_id(self.flow_id)
    }
}

/// Graph saved from the editor canvas.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveFlowForm {
    pub id_flow: i32,
    pub nodes: Vec<Value>,
    #[serde(default)]
    pub connections: Vec<Value>,
}

impl SaveFlowForm {
    pub fn flow_id(&self) -> Result<FlowId, FormError> {
        flow_id(self.id_flow)
    }

    pub fn into_graph(self) -> Value {
        json!({ "nodes": self.nodes, "connections": self.connections })
    }
}
