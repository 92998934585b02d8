use actix_web::{HttpResponse, get, post, put, web};

use crate::auth::AuthenticatedUser;
use crate::forms::settings::{CampaignSettingsForm, SettingForm};
use crate::repository::DieselRepository;
use crate::services::{ServiceError, settings as setting_service};

#[get("/settings")]
pub async fn list_settings(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let settings = setting_service::list_settings(repo.get_ref(), &user)?;
    Ok(HttpResponse::Ok().json(settings))
}

#[put("/settings/{key}")]
pub async fn update_setting(
    key: web::Path<String>,
    form: web::Json<SettingForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let setting = setting_service::update_setting(repo.get_ref(), &user, &key, form.into_inner())?;
    Ok(HttpResponse::Ok().json(setting))
}

#[get("/campaign-settings")]
pub async fn list_campaign_settings(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let settings = setting_service::list_campaign_settings(repo.get_ref(), &user)?;
    Ok(HttpResponse::Ok().json(settings))
}

#[post("/campaign-settings")]
pub async fn save_campaign_settings(
    form: web::Json<CampaignSettingsForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let settings =
        setting_service::save_campaign_settings(repo.get_ref(), &user, form.into_inner())?;
    Ok(HttpResponse::Ok().json(settings))
}
