//! Diesel models for users and their credentials.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::{CompanyId, Profile, TypeConstraintError, UserEmail, UserId, UserName, WorkTime};
use crate::domain::user::{
    NewUser as DomainNewUser, UpdateUser as DomainUpdateUser, User as DomainUser,
    UserCredentials, UserPreferences,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::users)]
/// Diesel model for [`crate::domain::user::User`].
pub struct User {
    pub id: i32,
    pub company_id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub profile: String,
    pub super_user: bool,
    pub online: bool,
    pub profile_image: Option<String>,
    pub start_work: String,
    pub end_work: String,
    pub whatsapp_id: Option<i32>,
    pub default_theme: String,
    pub default_menu: String,
    pub default_tickets_manager_width: i32,
    pub all_ticket: bool,
    pub allow_group: bool,
    pub all_historic: bool,
    pub all_user_chat: bool,
    pub user_close_pending_ticket: bool,
    pub show_dashboard: bool,
    pub allow_realtime: bool,
    pub allow_connections: bool,
    pub reset_password_token: Option<String>,
    pub reset_password_expires: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub company_id: i32,
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub profile: &'a str,
    pub super_user: bool,
    pub start_work: &'a str,
    pub end_work: &'a str,
    pub whatsapp_id: Option<i32>,
    pub default_theme: &'a str,
    pub default_menu: &'a str,
    pub default_tickets_manager_width: i32,
    pub all_ticket: bool,
    pub allow_group: bool,
    pub all_historic: bool,
    pub all_user_chat: bool,
    pub user_close_pending_ticket: bool,
    pub show_dashboard: bool,
    pub allow_realtime: bool,
    pub allow_connections: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::users)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub profile: &'a str,
    pub start_work: &'a str,
    pub end_work: &'a str,
    pub whatsapp_id: Option<i32>,
    pub default_theme: &'a str,
    pub default_menu: &'a str,
    pub default_tickets_manager_width: i32,
    pub all_ticket: bool,
    pub allow_group: bool,
    pub all_historic: bool,
    pub all_user_chat: bool,
    pub user_close_pending_ticket: bool,
    pub show_dashboard: bool,
    pub allow_realtime: bool,
    pub allow_connections: bool,
    pub updated_at: NaiveDateTime,
}

/// Password change that also invalidates any pending reset token.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::users)]
#[diesel(treat_none_as_null = true)]
pub struct UpdatePassword<'a> {
    pub password_hash: &'a str,
    pub reset_password_token: Option<&'a str>,
    pub reset_password_expires: Option<NaiveDateTime>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<User> for DomainUser {
    type Error = TypeConstraintError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::try_from(user.id)?,
            company_id: CompanyId::try_from(user.company_id)?,
            name: UserName::new(user.name)?,
            email: UserEmail::new(user.email)?,
            profile: user.profile.parse::<Profile>()?,
            super_user: user.super_user,
            online: user.online,
            profile_image: user.profile_image,
            preferences: UserPreferences {
                start_work: WorkTime::new(user.start_work)?,
                end_work: WorkTime::new(user.end_work)?,
                whatsapp_id: user.whatsapp_id,
                default_theme: user.default_theme,
                default_menu: user.default_menu,
                default_tickets_manager_width: user.default_tickets_manager_width,
                all_ticket: user.all_ticket,
                allow_group: user.allow_group,
                all_historic: user.all_historic,
                all_user_chat: user.all_user_chat,
                user_close_pending_ticket: user.user_close_pending_ticket,
                show_dashboard: user.show_dashboard,
                allow_realtime: user.allow_realtime,
                allow_connections: user.allow_connections,
            },
            created_at: user.created_at,
            updated_at: user.updated_at,
        })
    }
}

impl TryFrom<User> for UserCredentials {
    type Error = TypeConstraintError;

    fn try_from(mut user: User) -> Result<Self, Self::Error> {
        let password_hash = std::mem::take(&mut user.password_hash);
        Ok(Self {
            user: DomainUser::try_from(user)?,
            password_hash,
        })
    }
}

impl<'a> From<&'a DomainNewUser> for NewUser<'a> {
    fn from(user: &'a DomainNewUser) -> Self {
        let prefs = &user.preferences;
        Self {
            company_id: user.company_id.get(),
            name: user.name.as_str(),
            email: user.email.as_str(),
            password_hash: user.password_hash.as_str(),
            profile: user.profile.as_str(),
            super_user: user.super_user,
            start_work: prefs.start_work.as_str(),
            end_work: prefs.end_work.as_str(),
            whatsapp_id: prefs.whatsapp_id,
            default_theme: prefs.default_theme.as_str(),
            default_menu: prefs.default_menu.as_str(),
            default_tickets_manager_width: prefs.default_tickets_manager_width,
            all_ticket: prefs.all_ticket,
            allow_group: prefs.allow_group,
            all_historic: prefs.all_historic,
            all_user_chat: prefs.all_user_chat,
            user_close_pending_ticket: prefs.user_close_pending_ticket,
            show_dashboard: prefs.show_dashboard,
            allow_realtime: prefs.allow_realtime,
            allow_connections: prefs.allow_connections,
        }
    }
}

impl<'a> From<&'a DomainUpdateUser> for UpdateUser<'a> {
    fn from(user: &'a DomainUpdateUser) -> Self {
        let prefs = &user.preferences;
        Self {
            name: user.name.as_str(),
            email: user.email.as_str(),
            profile: user.profile.as_str(),
            start_work: prefs.start_work.as_str(),
            end_work: prefs.end_work.as_str(),
            whatsapp_id: prefs.whatsapp_id,
            default_theme: prefs.default_theme.as_str(),
            default_menu: prefs.default_menu.as_str(),
            default_tickets_manager_width: prefs.default_tickets_manager_width,
            all_ticket: prefs.all_ticket,
            allow_group: prefs.allow_group,
            all_historic: prefs.all_historic,
            all_user_chat: prefs.all_user_chat,
            user_close_pending_ticket: prefs.user_close_pending_ticket,
            show_dashboard: prefs.show_dashboard,
            allow_realtime: prefs.allow_realtime,
            allow_connections: prefs.allow_connections,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
