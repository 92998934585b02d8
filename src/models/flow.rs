//! Diesel models for flow builder records.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::flow::{Flow as DomainFlow, NewFlow as DomainNewFlow, UpdateFlow as DomainUpdateFlow};
use crate::domain::types::{CompanyId, FlowId, FlowName, TypeConstraintError, UserId};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::flows)]
pub struct Flow {
    pub id: i32,
    pub company_id: i32,
    pub user_id: Option<i32>,
    pub name: String,
    pub active: bool,
    /// JSON text of the node graph.
    pub flow: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::flows)]
pub struct NewFlow<'a> {
    pub company_id: i32,
    pub user_id: Option<i32>,
    pub name: &'a str,
    pub active: bool,
    pub flow: Option<String>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::flows)]
pub struct UpdateFlow<'a> {
    pub name: &'a str,
    pub active: bool,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Flow> for DomainFlow {
    type Error = TypeConstraintError;

    fn try_from(flow: Flow) -> Result<Self, Self::Error> {
        let graph = flow
            .flow
            .map(|text| serde_json::from_str(&text))
            .transpose()
            .map_err(|e| TypeConstraintError::InvalidValue(format!("flow graph: {e}")))?;

        Ok(Self {
            id: FlowId::try_from(flow.id)?,
            company_id: CompanyId::try_from(flow.company_id)?,
            user_id: flow.user_id.map(UserId::try_from).transpose()?,
            name: FlowName::new(flow.name)?,
            active: flow.active,
            flow: graph,
            created_at: flow.created_at,
            updated_at: flow.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewFlow> for NewFlow<'a> {
    fn from(flow: &'a DomainNewFlow) -> Self {
        Self {
            company_id: flow.company_id.get(),
            user_id: flow.user_id.map(UserId::get),
            name: flow.name.as_str(),
            active: flow.active,
            flow: flow.flow.as_ref().map(|graph| graph.to_string()),
        }
    }
}

impl<'a> From<&'a DomainUpdateFlow> for UpdateFlow<'a> {
    fn from(flow: &'a DomainUpdateFlow) -> Self {
        Self {
            name: flow.name.as_str(),
            active: flow.active,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(flow: Option<&str>) -> Flow {
        Flow {
            id: 1,
            company_id: 1,
            user_id: None,
            name: "Welcome".into(),
            active: true,
            flow: flow.map(str::to_string),
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn stored_graph_is_parsed() {
        let flow = DomainFlow::try_from(row(Some(r#"{"nodes":[],"connections":[]}"#))).unwrap();
        assert_eq!(flow.flow.unwrap()["nodes"], serde_json::json!([]));
    }

    #[test]
    fn corrupt_graph_is_rejected() {
        assert!(matches!(
            DomainFlow::try_from(row(Some("{nodes"))),
            Err(TypeConstraintError::InvalidValue(_))
        ));
    }
}
