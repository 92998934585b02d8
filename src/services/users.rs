//! User administration workflows.

use crate::auth::{AuthenticatedUser, hash_password};
use crate::domain::types::{CompanyId, Profile, UserId};
use crate::domain::user::{NewUser, UpdateUser, User, UserPreferences};
use crate::events::{Action, EventPublisher, RealtimeEvent, Resource};
use crate::forms::FormError;
use crate::forms::users::{TicketsWidthForm, UserForm, UserListParams, UserPayload};
use crate::models::config::ServerConfig;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Page, PageParams};
use crate::repository::{UserListQuery, UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult, ensure_admin, ensure_not_demo, log_repo_error};
use validator::Validate;

pub const ERR_NO_USER_FOUND: &str = "ERR_NO_USER_FOUND";
pub const ERR_EMAIL_ALREADY_EXISTS: &str = "ERR_EMAIL_ALREADY_EXISTS";

fn publish_user<E: EventPublisher + ?Sized>(events: &E, action: Action, user: &User) {
    events.publish(RealtimeEvent::record(
        user.company_id,
        Resource::User,
        action,
        user,
    ));
}

/// Loads a user the requester may address: same company, or any company for super users.
fn load_target<R>(repo: &R, requester: &AuthenticatedUser, id: i32) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    let id = UserId::new(id)?;
    let user = if requester.super_user {
        repo.get_user(id)?
    } else {
        repo.get_user_by_id(id, requester.company_id()?)?
    };
    user.ok_or(ServiceError::NotFound(ERR_NO_USER_FOUND))
}

/// Admins may edit anyone in their company; everybody may edit themselves.
fn ensure_can_edit(requester: &AuthenticatedUser, target: &User) -> ServiceResult<()> {
    if requester.super_user || requester.is_admin() || requester.user_id()? == target.id {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

pub fn list_users<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: &PageParams,
) -> ServiceResult<Page<User>>
where
    R: UserReader + ?Sized,
{
    let company_id = user.company_id()?;

    let query = UserListQuery::new(company_id)
        .search(params.search())
        .paginate(params.page(), DEFAULT_ITEMS_PER_PAGE);

    let (count, users) = repo
        .list_users(query)
        .map_err(log_repo_error("Failed to list users"))?;

    Ok(Page::new(users, count, params.offset()))
}

/// Unpaginated list; `companyId` is honoured for super users only.
pub fn list_simple<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: &UserListParams,
) -> ServiceResult<Vec<User>>
where
    R: UserReader + ?Sized,
{
    let company_id = match params.company_id {
        Some(id) if user.super_user => CompanyId::new(id)?,
        _ => user.company_id()?,
    };

    repo.list_company_users(company_id)
        .map_err(log_repo_error("Failed to list company users"))
}

pub fn show_user<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    load_target(repo, user, id)
}

pub fn create_user<R, E>(
    repo: &R,
    events: &E,
    config: &ServerConfig,
    user: &AuthenticatedUser,
    form: UserForm,
) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
    E: EventPublisher + ?Sized,
{
    ensure_not_demo(config)?;
    ensure_admin(user)?;

    let payload = UserPayload::try_from(form)?;

    let company_id = match payload.company_id {
        Some(id) if user.super_user => id,
        _ => user.company_id()?,
    };
    let password = payload.password.ok_or(FormError::InvalidPassword)?;

    if repo.get_user_credentials(&payload.email)?.is_some() {
        return Err(ServiceError::Conflict(ERR_EMAIL_ALREADY_EXISTS));
    }

    let new_user = NewUser {
        company_id,
        name: payload.name,
        email: payload.email,
        password_hash: hash_password(&password)?,
        profile: payload.profile.unwrap_or(Profile::User),
        super_user: false,
        preferences: payload.preferences.apply(UserPreferences::default())?,
    };

    let created = repo
        .create_user(&new_user)
        .map_err(log_repo_error("Failed to create user"))?;

    publish_user(events, Action::Create, &created);

    Ok(created)
}

pub fn update_user<R, E>(
    repo: &R,
    events: &E,
    config: &ServerConfig,
    user: &AuthenticatedUser,
    id: i32,
    form: UserForm,
) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
    E: EventPublisher + ?Sized,
{
    ensure_not_demo(config)?;

    let target = load_target(repo, user, id)?;
    ensure_can_edit(user, &target)?;

    let payload = UserPayload::try_from(form)?;

    let privileged = user.is_admin() || user.super_user;
    let profile = payload.profile.unwrap_or(target.profile);
    if profile != target.profile && !privileged {
        return Err(ServiceError::Unauthorized);
    }

    if payload.email != target.email && repo.get_user_credentials(&payload.email)?.is_some() {
        return Err(ServiceError::Conflict(ERR_EMAIL_ALREADY_EXISTS));
    }

    let password_hash = payload
        .password
        .as_ref()
        .map(hash_password)
        .transpose()?;

    let updates = UpdateUser {
        name: payload.name,
        email: payload.email,
        profile,
        preferences: if privileged {
            payload.preferences.apply(target.preferences.clone())?
        } else {
            payload
                .preferences
                .self_service()
                .apply(target.preferences.clone())?
        },
        password_hash,
    };

    let updated = repo
        .update_user(target.id, &updates)
        .map_err(log_repo_error("Failed to update user"))?;

    publish_user(events, Action::Update, &updated);

    Ok(updated)
}

pub fn delete_user<R, E>(
    repo: &R,
    events: &E,
    config: &ServerConfig,
    user: &AuthenticatedUser,
    id: i32,
) -> ServiceResult<()>
where
    R: UserReader + UserWriter + ?Sized,
    E: EventPublisher + ?Sized,
{
    ensure_not_demo(config)?;
    ensure_admin(user)?;

    let target = repo
        .get_user(UserId::new(id)?)?
        .ok_or(ServiceError::NotFound(ERR_NO_USER_FOUND))?;

    if !user.super_user && target.company_id != user.company_id()? {
        return Err(ServiceError::Form(ServiceError::Unauthorized.code()));
    }

    repo.delete_user(target.id)
        .map_err(log_repo_error("Failed to delete user"))?;

    events.publish(RealtimeEvent::deleted(
        target.company_id,
        Resource::User,
        target.id.get(),
    ));

    Ok(())
}

/// Stores a new profile image. `store` persists the upload and returns the
/// public file name; it runs only once the requester is allowed to edit.
pub fn upload_profile_image<R, E, F>(
    repo: &R,
    events: &E,
    user: &AuthenticatedUser,
    id: i32,
    store: F,
) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
    E: EventPublisher + ?Sized,
    F: FnOnce() -> ServiceResult<String>,
{
    let target = load_target(repo, user, id)?;
    ensure_can_edit(user, &target)?;

    let file_name = store()?;

    let updated = repo
        .update_profile_image(target.id, &file_name)
        .map_err(log_repo_error("Failed to store profile image"))?;

    publish_user(events, Action::Update, &updated);

    Ok(updated)
}

pub fn update_tickets_width<R, E>(
    repo: &R,
    events: &E,
    user: &AuthenticatedUser,
    id: i32,
    form: TicketsWidthForm,
) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
    E: EventPublisher + ?Sized,
{
    form.validate().map_err(FormError::from)?;

    let target = load_target(repo, user, id)?;
    ensure_can_edit(user, &target)?;

    let updated = repo
        .update_tickets_width(target.id, form.default_tickets_manager_width)
        .map_err(log_repo_error("Failed to update tickets width"))?;

    publish_user(events, Action::Update, &updated);

    Ok(updated)
}
