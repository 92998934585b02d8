//! User aggregate and the payloads used to create or change it.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CompanyId, Profile, UserEmail, UserId, UserName, WorkTime};

/// Per-user interface and permission toggles.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub start_work: WorkTime,
    pub end_work: WorkTime,
    pub whatsapp_id: Option<i32>,
    pub default_theme: String,
    pub default_menu: String,
    pub default_tickets_manager_width: i32,
    /// May see tickets assigned to other users.
    pub all_ticket: bool,
    pub allow_group: bool,
    pub all_historic: bool,
    pub all_user_chat: bool,
    pub user_close_pending_ticket: bool,
    pub show_dashboard: bool,
    pub allow_realtime: bool,
    pub allow_connections: bool,
}

/// Default width of the tickets manager panel, in pixels.
pub const DEFAULT_TICKETS_MANAGER_WIDTH: i32 = 550;

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            start_work: WorkTime::start_of_day(),
            end_work: WorkTime::end_of_day(),
            whatsapp_id: None,
            default_theme: "light".to_string(),
            default_menu: "closed".to_string(),
            default_tickets_manager_width: DEFAULT_TICKETS_MANAGER_WIDTH,
            all_ticket: false,
            allow_group: false,
            all_historic: false,
            all_user_chat: false,
            user_close_pending_ticket: true,
            show_dashboard: false,
            allow_realtime: false,
            allow_connections: false,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub company_id: CompanyId,
    pub name: UserName,
    pub email: UserEmail,
    pub profile: Profile,
    #[serde(rename = "super")]
    pub super_user: bool,
    pub online: bool,
    pub profile_image: Option<String>,
    #[serde(flatten)]
    pub preferences: UserPreferences,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.profile == Profile::Admin
    }
}

/// A user together with its stored password hash. Never serialized.
#[derive(Clone, Debug)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

#[derive(Clone, Debug)]
pub struct NewUser {
    pub company_id: CompanyId,
    pub name: UserName,
    pub email: UserEmail,
    pub password_hash: String,
    pub profile: Profile,
    pub super_user: bool,
    pub preferences: UserPreferences,
}

#[derive(Clone, Debug)]
pub struct UpdateUser {
    pub name: UserName,
    pub email: UserEmail,
    pub profile: Profile,
    pub preferences: UserPreferences,
    /// New password hash, when the password is being changed.
    pub password_hash: Option<String>,
}
