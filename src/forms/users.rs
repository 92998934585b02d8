//! Bodies of the user management endpoints.

use std::path::Path;

use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{CompanyId, PlainPassword, Profile, UserEmail, UserName, WorkTime};
use crate::domain::user::UserPreferences;
use crate::forms::{FormError, non_blank, unless_blank};

/// Optional preference overrides; absent fields keep their current value.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesForm {
    pub start_work: Option<String>,
    pub end_work: Option<String>,
    pub whatsapp_id: Option<i32>,
    pub default_theme: Option<String>,
    pub default_menu: Option<String>,
    pub default_tickets_manager_width: Option<i32>,
    pub all_ticket: Option<bool>,
    pub allow_group: Option<bool>,
    pub all_historic: Option<bool>,
    pub all_user_chat: Option<bool>,
    pub user_close_pending_ticket: Option<bool>,
    pub show_dashboard: Option<bool>,
    pub allow_realtime: Option<bool>,
    pub allow_connections: Option<bool>,
}

impl PreferencesForm {
    /// Keeps only the fields a user may change on their own record: theme,
    /// menu, ticket panel width and working hours. Permission flags and the
    /// connection assignment are dropped.
    pub fn self_service(self) -> Self {
        Self {
            start_work: self.start_work,
            end_work: self.end_work,
            default_theme: self.default_theme,
            default_menu: self.default_menu,
            default_tickets_manager_width: self.default_tickets_manager_width,
            ..Self::default()
        }
    }

    /// Applies the submitted values on top of `base`.
    pub fn apply(self, base: UserPreferences) -> Result<UserPreferences, FormError> {
        let parse_time = |value: Option<String>, current: WorkTime| match non_blank(value) {
            Some(v) => WorkTime::new(v).map_err(|_| FormError::InvalidWorkTime),
            None => Ok(current),
        };

        Ok(UserPreferences {
            start_work: parse_time(self.start_work, base.start_work)?,
            end_work: parse_time(self.end_work, base.end_work)?,
            whatsapp_id: self.whatsapp_id.or(base.whatsapp_id),
            default_theme: non_blank(self.default_theme).unwrap_or(base.default_theme),
            default_menu: non_blank(self.default_menu).unwrap_or(base.default_menu),
            default_tickets_manager_width: self
                .default_tickets_manager_width
                .unwrap_or(base.default_tickets_manager_width),
            all_ticket: self.all_ticket.unwrap_or(base.all_ticket),
            allow_group: self.allow_group.unwrap_or(base.allow_group),
            all_historic: self.all_historic.unwrap_or(base.all_historic),
            all_user_chat: self.all_user_chat.unwrap_or(base.all_user_chat),
            user_close_pending_ticket: self
                .user_close_pending_ticket
                .unwrap_or(base.user_close_pending_ticket),
            show_dashboard: self.show_dashboard.unwrap_or(base.show_dashboard),
            allow_realtime: self.allow_realtime.unwrap_or(base.allow_realtime),
            allow_connections: self.allow_connections.unwrap_or(base.allow_connections),
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub profile: Option<String>,
    /// Target company; honoured for super users only.
    #[serde(default)]
    pub company_id: Option<i32>,
    #[serde(flatten)]
    pub preferences: PreferencesForm,
}

pub struct UserPayload {
    pub name: UserName,
    pub email: UserEmail,
    pub password: Option<PlainPassword>,
    pub profile: Option<Profile>,
    pub company_id: Option<CompanyId>,
    pub preferences: PreferencesForm,
}

impl TryFrom<UserForm> for UserPayload {
    type Error = FormError;

    fn try_from(form: UserForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let password = unless_blank(form.password)
            .map(|p| PlainPassword::new(p).map_err(|_| FormError::InvalidPassword))
            .transpose()?;
        let profile = non_blank(form.profile)
            .map(|p| p.parse::<Profile>().map_err(|_| FormError::InvalidProfile))
            .transpose()?;
        let company_id = form
            .company_id
            .map(|id| CompanyId::new(id).map_err(|_| FormError::InvalidId))
            .transpose()?;

        Ok(Self {
            name: UserName::new(form.name).map_err(|_| FormError::InvalidName)?,
            email: UserEmail::new(form.email).map_err(|_| FormError::InvalidEmail)?,
            password,
            profile,
            company_id,
            preferences: form.preferences,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TicketsWidthForm {
    #[validate(range(min = 200, max = 4000))]
    pub default_tickets_manager_width: i32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListParams {
    pub company_id: Option<i32>,
}

#[derive(MultipartForm)]
pub struct ProfileImageForm {
    #[multipart(limit = "5MB")]
    pub file: TempFile,
}

impl ProfileImageForm {
    /// Copies the upload into `dir` and returns the stored file name.
    pub fn save(&self, dir: &Path, stamp: i64) -> Result<String, FormError> {
        let original = self.file.file_name.as_deref().unwrap_or("profile");
        let name = format!("{stamp}_{}", sanitize_file_name(original));

        std::fs::create_dir_all(dir).map_err(|e| {
            log::error!("Failed to create upload directory: {e}");
            FormError::InvalidUpload
        })?;
        std::fs::copy(self.file.file.path(), dir.join(&name)).map_err(|e| {
            log::error!("Failed to store uploaded file: {e}");
            FormError::InvalidUpload
        })?;

        Ok(name)
    }
}

/// Keeps ASCII alphanumerics, dots, dashes and underscores; drops any directory part.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> UserForm {
        UserForm {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            password: Some("".into()),
            profile: Some("admin".into()),
            company_id: None,
            preferences: PreferencesForm::default(),
        }
    }

    #[test]
    fn uploaded_names_lose_paths_and_odd_characters() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\Users\\ana\\foto perfil.png"), "fotoperfil.png");
        assert_eq!(sanitize_file_name("..."), "upload");
    }

    #[test]
    fn blank_password_means_unchanged() {
        let payload = UserPayload::try_from(form()).unwrap();
        assert!(payload.password.is_none());
        assert_eq!(payload.profile, Some(Profile::Admin));
    }

    #[test]
    fn unknown_profile_is_rejected() {
        let mut form = form();
        form.profile = Some("owner".into());
        assert!(matches!(
            UserPayload::try_from(form),
            Err(FormError::InvalidProfile)
        ));
    }

    #[test]
    fn preferences_override_only_given_fields() {
        let prefs = PreferencesForm {
            end_work: Some("18:00".into()),
            all_ticket: Some(true),
            ..Default::default()
        }
        .apply(UserPreferences::default())
        .unwrap();

        assert_eq!(prefs.start_work.as_str(), "00:00");
        assert_eq!(prefs.end_work.as_str(), "18:00");
        assert!(prefs.all_ticket);
        assert!(prefs.user_close_pending_ticket);
    }

    #[test]
    fn self_service_drops_permission_flags() {
        let base = UserPreferences::default();
        let prefs = PreferencesForm {
            default_theme: Some("dark".into()),
            all_ticket: Some(true),
            allow_connections: Some(true),
            show_dashboard: Some(true),
            whatsapp_id: Some(4),
            ..Default::default()
        }
        .self_service()
        .apply(base.clone())
        .unwrap();

        assert_eq!(prefs.default_theme, "dark");
        assert_eq!(prefs.all_ticket, base.all_ticket);
        assert_eq!(prefs.allow_connections, base.allow_connections);
        assert_eq!(prefs.show_dashboard, base.show_dashboard);
        assert_eq!(prefs.whatsapp_id, base.whatsapp_id);
    }

    #[test]
    fn password_keeps_surrounding_spaces() {
        let mut form = form();
        form.password = Some(" secret1 ".into());
        let payload = UserPayload::try_from(form).unwrap();
        assert_eq!(payload.password.unwrap().as_str(), " secret1 ");
    }

    #[test]
    fn invalid_work_time_is_rejected() {
        let result = PreferencesForm {
            start_work: Some("25:00".into()),
            ..Default::default()
        }
        .apply(UserPreferences::default());
        assert!(matches!(result, Err(FormError::InvalidWorkTime)));
    }
}
