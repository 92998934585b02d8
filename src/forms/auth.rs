//! Bodies of the signup, login and password recovery endpoints.

use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{
    CompanyEmail, CompanyName, PlainPassword, UserEmail, UserName,
};
use crate::forms::{FormError, non_blank};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub password: String,
    #[validate(length(min = 1))]
    pub company_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub document: Option<String>,
    #[serde(default)]
    pub plan_id: Option<i32>,
}

pub struct SignupPayload {
    pub name: UserName,
    pub email: UserEmail,
    pub password: PlainPassword,
    pub company_name: CompanyName,
    pub company_email: CompanyEmail,
    pub phone: Option<String>,
    pub document: Option<String>,
    pub plan_id: Option<i32>,
}

impl TryFrom<SignupForm> for SignupPayload {
    type Error = FormError;

    fn try_from(form: SignupForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            name: UserName::new(form.name).map_err(|_| FormError::InvalidName)?,
            email: UserEmail::new(form.email.as_str()).map_err(|_| FormError::InvalidEmail)?,
            password: PlainPassword::new(form.password).map_err(|_| FormError::InvalidPassword)?,
            company_name: CompanyName::new(form.company_name)
                .map_err(|_| FormError::InvalidName)?,
            company_email: CompanyEmail::new(form.email).map_err(|_| FormError::InvalidEmail)?,
            phone: non_blank(form.phone),
            document: non_blank(form.document),
            plan_id: form.plan_id,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecoverPasswordForm {
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordForm {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub confirm_password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> SignupForm {
        SignupForm {
            name: "Ana".into(),
            email: "Ana@Example.com".into(),
            password: "secret1".into(),
            company_name: "Acme".into(),
            phone: Some(" ".into()),
            document: None,
            plan_id: Some(2),
        }
    }

    #[test]
    fn signup_normalizes_email_and_blank_phone() {
        let payload = SignupPayload::try_from(form()).unwrap();
        assert_eq!(payload.email.as_str(), "ana@example.com");
        assert_eq!(payload.company_email.as_str(), "ana@example.com");
        assert_eq!(payload.phone, None);
        assert_eq!(payload.plan_id, Some(2));
    }

    #[test]
    fn signup_rejects_short_password() {
        let mut form = form();
        form.password = "123".into();
        assert!(matches!(
            SignupPayload::try_from(form),
            Err(FormError::InvalidPassword)
        ));
    }

    #[test]
    fn signup_rejects_bad_email() {
        let mut form = form();
        form.email = "nope".into();
        assert!(matches!(
            SignupPayload::try_from(form),
            Err(FormError::Validation(_))
        ));
    }
}
