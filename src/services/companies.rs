//! Tenant administration, reserved to platform operators.

use crate::auth::AuthenticatedUser;
use crate::domain::company::{Company, UpdateCompany};
use crate::domain::types::{CompanyId, PLATFORM_COMPANY_ID};
use crate::forms::companies::CompanyForm;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Page, PageParams};
use crate::repository::{CompanyListQuery, CompanyReader, CompanyWriter};
use crate::services::{ServiceError, ServiceResult, ensure_super, log_repo_error};

pub const ERR_NO_COMPANY_FOUND: &str = "ERR_NO_COMPANY_FOUND";
pub const ERR_PLATFORM_COMPANY: &str = "ERR_CANNOT_DELETE_PLATFORM_COMPANY";

pub fn list_companies<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: &PageParams,
) -> ServiceResult<Page<Company>>
where
    R: CompanyReader + ?Sized,
{
    ensure_super(user)?;

    let query = CompanyListQuery::new()
        .search(params.search())
        .paginate(params.page(), DEFAULT_ITEMS_PER_PAGE);

    let (count, companies) = repo
        .list_companies(query)
        .map_err(log_repo_error("Failed to list companies"))?;

    Ok(Page::new(companies, count, params.offset()))
}

/// Super users see any company; admins only their own.
pub fn show_company<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<Company>
where
    R: CompanyReader + ?Sized,
{
    let id = CompanyId::new(id)?;
    if !user.super_user && !(user.is_admin() && user.company_id()? == id) {
        return Err(ServiceError::Unauthorized);
    }

    repo.get_company_by_id(id)?
        .ok_or(ServiceError::NotFound(ERR_NO_COMPANY_FOUND))
}

pub fn update_company<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: CompanyForm,
) -> ServiceResult<Company>
where
    R: CompanyReader + CompanyWriter + ?Sized,
{
    ensure_super(user)?;

    let id = CompanyId::new(id)?;
    let updates = UpdateCompany::try_from(form)?;

    repo.get_company_by_id(id)?
        .ok_or(ServiceError::NotFound(ERR_NO_COMPANY_FOUND))?;

    repo.update_company(id, &updates)
        .map_err(log_repo_error("Failed to update company"))
}

/// Deletes a tenant and, through the schema's cascades, everything it owns.
pub fn delete_company<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: CompanyReader + CompanyWriter + ?Sized,
{
    ensure_super(user)?;

    let id = CompanyId::new(id)?;
    if id == PLATFORM_COMPANY_ID {
        return Err(ServiceError::Forbidden(ERR_PLATFORM_COMPANY));
    }

    repo.get_company_by_id(id)?
        .ok_or(ServiceError::NotFound(ERR_NO_COMPANY_FOUND))?;

    repo.delete_company(id)
        .map_err(log_repo_error("Failed to delete company"))?;

    log::info!("Company {id} deleted by user {}", user.sub);

    Ok(())
}
