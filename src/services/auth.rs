//! Signup, login and password recovery.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::auth::{AuthenticatedUser, hash_password, issue_token, verify_password};
use crate::domain::company::{Company, NewCompany};
use crate::domain::setting::USER_CREATION_KEY;
use crate::domain::types::{PLATFORM_COMPANY_ID, PlainPassword, Profile, ResetToken, UserEmail};
use crate::domain::user::{NewUser, User, UserPreferences};
use crate::dto::auth::LoginResponse;
use crate::forms::auth::{
    LoginForm, RecoverPasswordForm, ResetPasswordForm, SignupForm, SignupPayload,
};
use crate::forms::{FormError, non_blank, unless_blank};
use crate::mail::{MailTemplates, Mailer};
use crate::models::config::ServerConfig;
use crate::repository::{
    CompanyReader, CompanyWriter, SettingReader, UserReader, UserWriter,
};
use crate::services::users::ERR_EMAIL_ALREADY_EXISTS;
use crate::services::{ServiceError, ServiceResult, ensure_not_demo, log_repo_error};

/// Hours a password reset link stays valid.
pub const RESET_TOKEN_VALID_HOURS: i64 = 24;
pub const ERR_COMPANY_INACTIVE: &str = "ERR_COMPANY_INACTIVE";

/// Creates a trial company with its first admin and sends the welcome email.
///
/// A failed welcome email is logged; the account is created regardless.
pub fn signup<R, M>(
    repo: &R,
    mailer: &M,
    templates: &MailTemplates,
    config: &ServerConfig,
    form: SignupForm,
    today: NaiveDate,
) -> ServiceResult<(Company, User)>
where
    R: SettingReader + UserReader + CompanyWriter + ?Sized,
    M: Mailer + ?Sized,
{
    ensure_not_demo(config)?;

    let creation = repo
        .get_setting(PLATFORM_COMPANY_ID, USER_CREATION_KEY)
        .map_err(log_repo_error("Failed to read signup setting"))?;
    if creation.is_some_and(|setting| setting.is_disabled()) {
        return Err(ServiceError::UserCreationDisabled);
    }

    let payload = SignupPayload::try_from(form)?;

    if repo.get_user_credentials(&payload.email)?.is_some() {
        return Err(ServiceError::Conflict(ERR_EMAIL_ALREADY_EXISTS));
    }

    let new_company = NewCompany::trial(
        payload.company_name,
        payload.company_email,
        payload.phone,
        payload.document,
        payload.plan_id,
        today,
        config.trial_days,
    );
    let admin = NewUser {
        company_id: PLATFORM_COMPANY_ID,
        name: payload.name,
        email: payload.email,
        password_hash: hash_password(&payload.password)?,
        profile: Profile::Admin,
        super_user: false,
        preferences: UserPreferences::default(),
    };

    let (company, user) = repo
        .create_company_with_admin(&new_company, &admin)
        .map_err(log_repo_error("Failed to create company"))?;

    log::info!("Company {} created by signup of {}", company.id, user.email);

    let due_date = company
        .due_date
        .map(|date| date.format("%d/%m/%Y").to_string())
        .unwrap_or_default();
    let login_url = format!("{}/login", config.frontend_url.trim_end_matches('/'));

    let sent = templates
        .signup(
            user.email.as_str(),
            user.name.as_str(),
            company.name.as_str(),
            &due_date,
            &login_url,
        )
        .and_then(|email| mailer.send(&email));
    if let Err(err) = sent {
        log::warn!("Failed to send welcome email to {}: {err}", user.email);
    }

    Ok((company, user))
}

pub fn login<R>(repo: &R, config: &ServerConfig, form: LoginForm) -> ServiceResult<LoginResponse>
where
    R: UserReader + CompanyReader + ?Sized,
{
    let email = UserEmail::new(form.email).map_err(|_| ServiceError::InvalidCredentials)?;

    let credentials = repo
        .get_user_credentials(&email)
        .map_err(log_repo_error("Failed to load credentials"))?
        .ok_or(ServiceError::InvalidCredentials)?;

    if !verify_password(&form.password, &credentials.password_hash) {
        return Err(ServiceError::InvalidCredentials);
    }

    let user = credentials.user;
    if !user.super_user {
        let company = repo.get_company_by_id(user.company_id)?;
        if company.is_some_and(|company| !company.status) {
            return Err(ServiceError::Forbidden(ERR_COMPANY_INACTIVE));
        }
    }

    let claims = AuthenticatedUser::from_user(&user, config.token_ttl_hours);
    let token = issue_token(&claims, &config.secret)?;

    Ok(LoginResponse { token, user })
}

/// Stores a reset token and emails the link. Unknown emails succeed silently.
pub fn recover_password<R, M>(
    repo: &R,
    mailer: &M,
    templates: &MailTemplates,
    config: &ServerConfig,
    form: RecoverPasswordForm,
    now: NaiveDateTime,
) -> ServiceResult<()>
where
    R: UserReader + UserWriter + ?Sized,
    M: Mailer + ?Sized,
{
    let email = non_blank(form.email).ok_or(ServiceError::EmailRequired)?;
    let Ok(email) = UserEmail::new(email) else {
        return Ok(());
    };

    let Some(credentials) = repo
        .get_user_credentials(&email)
        .map_err(log_repo_error("Failed to load user for recovery"))?
    else {
        log::info!("Password recovery requested for unknown email {email}");
        return Ok(());
    };
    let user = credentials.user;

    let token = ResetToken::new();
    repo.set_reset_token(user.id, &token, now + Duration::hours(RESET_TOKEN_VALID_HOURS))
        .map_err(log_repo_error("Failed to store reset token"))?;

    let reset_url = format!(
        "{}/reset-password?token={token}",
        config.frontend_url.trim_end_matches('/')
    );

    templates
        .recover_password(
            user.email.as_str(),
            user.name.as_str(),
            &reset_url,
            RESET_TOKEN_VALID_HOURS,
        )
        .and_then(|message| mailer.send(&message))
        .map_err(|err| {
            log::error!("Failed to send recovery email to {}: {err}", user.email);
            ServiceError::EmailSending
        })
}

/// Replaces the password of the user holding a live reset token.
pub fn reset_password<R>(repo: &R, form: ResetPasswordForm, now: NaiveDateTime) -> ServiceResult<()>
where
    R: UserReader + UserWriter + ?Sized,
{
    let (Some(token), Some(password), Some(confirm)) = (
        non_blank(form.token),
        unless_blank(form.password),
        unless_blank(form.confirm_password),
    ) else {
        return Err(ServiceError::MissingResetInfo);
    };

    if password != confirm {
        return Err(ServiceError::PasswordsDoNotMatch);
    }

    let token: ResetToken = token.parse().map_err(|_| ServiceError::InvalidResetToken)?;
    let password = PlainPassword::new(password).map_err(|_| FormError::InvalidPassword)?;

    let user = repo
        .get_user_by_reset_token(&token, now)
        .map_err(log_repo_error("Failed to look up reset token"))?
        .ok_or(ServiceError::InvalidResetToken)?;

    repo.set_user_password(user.id, &hash_password(&password)?)
        .map_err(log_repo_error("Failed to store new password"))?;

    log::info!("Password reset for user {}", user.id);

    Ok(())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::setting::Setting;
    use crate::domain::types::{CompanyEmail, CompanyId, CompanyName, UserId};
    use crate::domain::user::UserCredentials;
    use crate::mail::recording::RecordingMailer;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 30).unwrap()
    }

    fn now() -> NaiveDateTime {
        today().and_hms_opt(10, 0, 0).unwrap()
    }

    fn signup_form() -> SignupForm {
        SignupForm {
            name: "Ana".into(),
            email: "ana@acme.com".into(),
            password: "secret1".into(),
            company_name: "Acme".into(),
            phone: None,
            document: None,
            plan_id: None,
        }
    }

    fn company(id: i32, due_date: NaiveDate) -> Company {
        Company {
            id: CompanyId::new(id).unwrap(),
            name: CompanyName::new("Acme").unwrap(),
            email: CompanyEmail::new("ana@acme.com").unwrap(),
            phone: None,
            document: None,
            status: true,
            due_date: Some(due_date),
            recurrence: String::new(),
            plan_id: None,
            created_at: epoch(),
            updated_at: epoch(),
        }
    }

    fn credentials(password: &str) -> UserCredentials {
        UserCredentials {
            user: stored_user(4, 7, Profile::Admin),
            password_hash: hash_password(&PlainPassword::new(password).unwrap()).unwrap(),
        }
    }

    #[test]
    fn signup_is_refused_when_disabled() {
        let mut repo = MockRepository::new();
        repo.expect_get_setting().returning(|company_id, key| {
            Ok(Some(Setting {
                company_id,
                key: key.to_string(),
                value: "disabled".to_string(),
            }))
        });
        let mailer = RecordingMailer::default();
        let templates = MailTemplates::new().unwrap();

        let result = signup(&repo, &mailer, &templates, &config(), signup_form(), today());

        assert!(matches!(result, Err(ServiceError::UserCreationDisabled)));
    }

    #[test]
    fn signup_creates_trial_company_and_sends_welcome() {
        let mut repo = MockRepository::new();
        repo.expect_get_setting().returning(|_, _| Ok(None));
        repo.expect_get_user_credentials().returning(|_| Ok(None));
        repo.expect_create_company_with_admin()
            .withf(|company, admin| {
                company.due_date == NaiveDate::from_ymd_opt(2025, 2, 2).unwrap()
                    && admin.profile == Profile::Admin
            })
            .returning(|company, _| {
                Ok((
                    self::company(8, company.due_date),
                    stored_user(4, 8, Profile::Admin),
                ))
            });
        let mailer = RecordingMailer::default();
        let templates = MailTemplates::new().unwrap();

        let (company, _) =
            signup(&repo, &mailer, &templates, &config(), signup_form(), today()).unwrap();

        assert_eq!(company.id.get(), 8);
        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].html.contains("02/02/2025"));
    }

    #[test]
    fn signup_survives_mail_failure() {
        let mut repo = MockRepository::new();
        repo.expect_get_setting().returning(|_, _| Ok(None));
        repo.expect_get_user_credentials().returning(|_| Ok(None));
        repo.expect_create_company_with_admin().returning(|company, _| {
            Ok((
                self::company(8, company.due_date),
                stored_user(4, 8, Profile::Admin),
            ))
        });
        let mailer = RecordingMailer::failing();
        let templates = MailTemplates::new().unwrap();

        assert!(signup(&repo, &mailer, &templates, &config(), signup_form(), today()).is_ok());
    }

    #[test]
    fn login_rejects_wrong_password() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_credentials()
            .returning(|_| Ok(Some(credentials("secret1"))));

        let result = login(
            &repo,
            &config(),
            LoginForm {
                email: "user4@example.com".into(),
                password: "wrong".into(),
            },
        );

        assert!(matches!(result, Err(ServiceError::InvalidCredentials)));
    }

    #[test]
    fn login_issues_token_for_user() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_credentials()
            .returning(|_| Ok(Some(credentials("secret1"))));
        repo.expect_get_company_by_id()
            .returning(|_| Ok(Some(company(7, today()))));

        let response = login(
            &repo,
            &config(),
            LoginForm {
                email: "USER4@example.com".into(),
                password: "secret1".into(),
            },
        )
        .unwrap();

        let claims = crate::auth::decode_token(&response.token, &config().secret).unwrap();
        assert_eq!(claims.sub, "4");
        assert_eq!(claims.company_id, 7);
        assert_eq!(response.user.id.get(), 4);
    }

    #[test]
    fn recover_requires_email() {
        let repo = MockRepository::new();
        let mailer = RecordingMailer::default();
        let templates = MailTemplates::new().unwrap();

        let result = recover_password(
            &repo,
            &mailer,
            &templates,
            &config(),
            RecoverPasswordForm {
                email: Some(" ".into()),
            },
            now(),
        );

        assert!(matches!(result, Err(ServiceError::EmailRequired)));
    }

    #[test]
    fn recover_for_unknown_email_is_silent() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_credentials().returning(|_| Ok(None));
        repo.expect_set_reset_token().never();
        let mailer = RecordingMailer::default();
        let templates = MailTemplates::new().unwrap();

        let result = recover_password(
            &repo,
            &mailer,
            &templates,
            &config(),
            RecoverPasswordForm {
                email: Some("ghost@example.com".into()),
            },
            now(),
        );

        assert!(result.is_ok());
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn recover_stores_token_valid_for_a_day() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_credentials()
            .returning(|_| Ok(Some(credentials("secret1"))));
        repo.expect_set_reset_token()
            .withf(|id, _, expires| *id == UserId::new(4).unwrap() && *expires == now() + Duration::hours(24))
            .returning(|_, _, _| Ok(()));
        let mailer = RecordingMailer::default();
        let templates = MailTemplates::new().unwrap();

        recover_password(
            &repo,
            &mailer,
            &templates,
            &config(),
            RecoverPasswordForm {
                email: Some("user4@example.com".into()),
            },
            now(),
        )
        .unwrap();

        let sent = mailer.sent.lock().unwrap();
        assert!(sent[0].html.contains("http://localhost:3000/reset-password?token="));
    }

    #[test]
    fn recover_reports_send_failure() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_credentials()
            .returning(|_| Ok(Some(credentials("secret1"))));
        repo.expect_set_reset_token().returning(|_, _, _| Ok(()));
        let mailer = RecordingMailer::failing();
        let templates = MailTemplates::new().unwrap();

        let result = recover_password(
            &repo,
            &mailer,
            &templates,
            &config(),
            RecoverPasswordForm {
                email: Some("user4@example.com".into()),
            },
            now(),
        );

        assert!(matches!(result, Err(ServiceError::EmailSending)));
    }

    fn reset_form(password: &str, confirm: &str) -> ResetPasswordForm {
        ResetPasswordForm {
            token: Some(ResetToken::new().to_string()),
            password: Some(password.into()),
            confirm_password: Some(confirm.into()),
        }
    }

    #[test]
    fn reset_validates_inputs() {
        let repo = MockRepository::new();

        let missing = ResetPasswordForm {
            token: None,
            ..reset_form("secret1", "secret1")
        };
        assert!(matches!(
            reset_password(&repo, missing, now()),
            Err(ServiceError::MissingResetInfo)
        ));
        assert!(matches!(
            reset_password(&repo, reset_form("secret1", "secret2"), now()),
            Err(ServiceError::PasswordsDoNotMatch)
        ));
    }

    #[test]
    fn reset_with_expired_token_is_rejected() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_reset_token().returning(|_, _| Ok(None));
        repo.expect_set_user_password().never();

        let result = reset_password(&repo, reset_form("secret1", "secret1"), now());

        assert!(matches!(result, Err(ServiceError::InvalidResetToken)));
    }

    #[test]
    fn reset_stores_new_hash() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_reset_token()
            .withf(|_, at| *at == now())
            .returning(|_, _| Ok(Some(stored_user(4, 7, Profile::User))));
        repo.expect_set_user_password()
            .withf(|_, hash| crate::auth::verify_password("secret1", hash))
            .times(1)
            .returning(|_, _| Ok(()));

        reset_password(&repo, reset_form("secret1", "secret1"), now()).unwrap();
    }

    #[test]
    fn reset_hashes_password_as_typed() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_reset_token()
            .returning(|_, _| Ok(Some(stored_user(4, 7, Profile::User))));
        repo.expect_set_user_password()
            .withf(|_, hash| {
                crate::auth::verify_password(" secret1 ", hash)
                    && !crate::auth::verify_password("secret1", hash)
            })
            .times(1)
            .returning(|_, _| Ok(()));

        reset_password(&repo, reset_form(" secret1 ", " secret1 "), now()).unwrap();
    }
}
