//! Chatbot flows edited in the flow builder.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::types::{CompanyId, FlowId, FlowName, TypeConstraintError, UserId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Flow {
    pub id: FlowId,
    pub company_id: CompanyId,
    pub user_id: Option<UserId>,
    pub name: FlowName,
    pub active: bool,
    /// Node graph as saved by the editor; `None` until the first save.
    pub flow: Option<Value>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewFlow {
    pub company_id: CompanyId,
    pub user_id: Option<UserId>,
    pub name: FlowName,
    pub active: bool,
    pub flow: Option<Value>,
}

impl Flow {
    /// Copy of this flow under a derived name, owned by `user_id`.
    pub fn duplicate(&self, user_id: UserId) -> Result<NewFlow, TypeConstraintError> {
        Ok(NewFlow {
            company_id: self.company_id,
            user_id: Some(user_id),
            name: FlowName::new(format!("{} - copy", self.name.as_str()))?,
            active: self.active,
            flow: self.flow.clone(),
        })
    }
}

#[derive(Clone, Debug)]
pub struct UpdateFlow {
    pub name: FlowName,
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn duplicate_keeps_graph_and_renames() {
        let flow = Flow {
            id: FlowId::new(3).unwrap(),
            company_id: CompanyId::new(7).unwrap(),
            user_id: None,
            name: FlowName::new("Welcome").unwrap(),
            active: false,
            flow: Some(json!({"nodes": [{"id": "1"}], "connections": []})),
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        };

        let copy = flow.duplicate(UserId::new(2).unwrap()).unwrap();

        assert_eq!(copy.name.as_str(), "Welcome - copy");
        assert_eq!(copy.flow, flow.flow);
        assert!(!copy.active);
        assert_eq!(copy.user_id, Some(UserId::new(2).unwrap()));
    }
}
