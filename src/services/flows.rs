//! Flow builder records. Any user of the company may edit the company's flows.

use crate::auth::AuthenticatedUser;
use crate::domain::flow::{Flow, NewFlow, UpdateFlow};
use crate::domain::types::{CompanyId, FlowId};
use crate::events::{Action, EventPublisher, RealtimeEvent, Resource};
use crate::forms::flows::{
    CreateFlowForm, DuplicateFlowForm, SaveFlowForm, UpdateFlowForm, UpdateFlowPayload,
};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Page, PageParams};
use crate::repository::{FlowListQuery, FlowReader, FlowWriter};
use crate::services::{ServiceError, ServiceResult, identity, log_repo_error};

pub const ERR_NO_FLOW_FOUND: &str = "ERR_NO_FLOW_FOUND";

fn load_flow<R>(repo: &R, company_id: CompanyId, id: FlowId) -> ServiceResult<Flow>
where
    R: FlowReader + ?Sized,
{
    repo.get_flow_by_id(id, company_id)?
        .ok_or(ServiceError::NotFound(ERR_NO_FLOW_FOUND))
}

fn publish<E: EventPublisher + ?Sized>(events: &E, action: Action, flow: &Flow) {
    events.publish(RealtimeEvent::record(
        flow.company_id,
        Resource::Flow,
        action,
        flow,
    ));
}

pub fn list_flows<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: &PageParams,
) -> ServiceResult<Page<Flow>>
where
    R: FlowReader + ?Sized,
{
    let query = FlowListQuery::new(user.company_id()?)
        .search(params.search())
        .paginate(params.page(), DEFAULT_ITEMS_PER_PAGE);

    let (count, flows) = repo
        .list_flows(query)
        .map_err(log_repo_error("Failed to list flows"))?;

    Ok(Page::new(flows, count, params.offset()))
}

pub fn show_flow<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<Flow>
where
    R: FlowReader + ?Sized,
{
    load_flow(repo, user.company_id()?, FlowId::new(id)?)
}

/// New flows start active with an empty graph.
pub fn create_flow<R, E>(
    repo: &R,
    events: &E,
    user: &AuthenticatedUser,
    form: CreateFlowForm,
) -> ServiceResult<Flow>
where
    R: FlowWriter + ?Sized,
    E: EventPublisher + ?Sized,
{
    let (company_id, user_id) = identity(user)?;

    let flow = repo
        .create_flow(&NewFlow {
            company_id,
            user_id: Some(user_id),
            name: form.name()?,
            active: true,
            flow: None,
        })
        .map_err(log_repo_error("Failed to create flow"))?;

    publish(events, Action::Create, &flow);

    Ok(flow)
}

pub fn update_flow<R, E>(
    repo: &R,
    events: &E,
    user: &AuthenticatedUser,
    form: UpdateFlowForm,
) -> ServiceResult<Flow>
where
    R: FlowReader + FlowWriter + ?Sized,
    E: EventPublisher + ?Sized,
{
    let payload = UpdateFlowPayload::try_from(form)?;
    let current = load_flow(repo, user.company_id()?, payload.flow_id)?;

    let flow = repo
        .update_flow(
            current.id,
            &UpdateFlow {
                name: payload.name,
                active: payload.active.unwrap_or(current.active),
            },
        )
        .map_err(log_repo_error("Failed to update flow"))?;

    publish(events, Action::Update, &flow);

    Ok(flow)
}

/// Stores the graph drawn in the editor.
pub fn save_flow_graph<R, E>(
    repo: &R,
    events: &E,
    user: &AuthenticatedUser,
    form: SaveFlowForm,
) -> ServiceResult<Flow>
where
    R: FlowReader + FlowWriter + ?Sized,
    E: EventPublisher + ?Sized,
{
    let current = load_flow(repo, user.company_id()?, form.flow_id()?)?;

    let flow = repo
        .save_flow_graph(current.id, &form.into_graph())
        .map_err(log_repo_error("Failed to save flow graph"))?;

    publish(events, Action::Update, &flow);

    Ok(flow)
}

/// Copies graph and status under `"<name> - copy"`, owned by the requester.
pub fn duplicate_flow<R, E>(
    repo: &R,
    events: &E,
    user: &AuthenticatedUser,
    form: DuplicateFlowForm,
) -> ServiceResult<Flow>
where
    R: FlowReader + FlowWriter + ?Sized,
    E: EventPublisher + ?Sized,
{
    let (company_id, user_id) = identity(user)?;
    let source = load_flow(repo, company_id, form.flow_id()?)?;

    let flow = repo
        .create_flow(&source.duplicate(user_id)?)
        .map_err(log_repo_error("Failed to duplicate flow"))?;

    log::info!("Flow {} duplicated as {}", source.id, flow.id);
    publish(events, Action::Create, &flow);

    Ok(flow)
}

pub fn delete_flow<R, E>(
    repo: &R,
    events: &E,
    user: &AuthenticatedUser,
    id: i32,
) -> ServiceResult<()>
where
    R: FlowReader + FlowWriter + ?Sized,
    E: EventPublisher + ?Sized,
{
    let flow = load_flow(repo, user.company_id()?, FlowId::new(id)?)?;

    repo.delete_flow(flow.id)
        .map_err(log_repo_error("Failed to delete flow"))?;

    events.publish(RealtimeEvent::deleted(
        flow.company_id,
        Resource::Flow,
        flow.id.get(),
    ));

    Ok(())
}
