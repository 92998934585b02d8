//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (e.g., positive identifiers,
//! normalized/validated email, E.164 phone numbers) so that once a value reaches
//! the domain layer it can be treated as trusted.
use std::{ops::Deref, str::FromStr};

use chrono::NaiveTime;
use phonenumber::{Mode, parse};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use uuid::Uuid;
use validator::ValidateEmail;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// Phone number did not meet expected format.
    #[error("invalid phone number")]
    InvalidPhone,
    /// Color is not a `#RRGGBB` hex string.
    #[error("invalid color")]
    InvalidColor,
    /// Time of day is not `HH:MM`.
    #[error("invalid time of day")]
    InvalidTime,
    /// Password is shorter than the minimum length.
    #[error("password too short")]
    PasswordTooShort,
    /// Provided uuid failed format validation.
    #[error("invalid uuid value")]
    InvalidUuid,
}

/// Normalizes and validates an email string.
fn normalize_email<S: Into<String>>(email: S) -> Result<String, TypeConstraintError> {
    let normalized = email.into().trim().to_lowercase();
    if normalized.validate_email() {
        Ok(normalized)
    } else {
        Err(TypeConstraintError::InvalidEmail)
    }
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(CompanyId, "Unique identifier for a company (tenant).");
id_newtype!(UserId, "Unique identifier for a user.");
id_newtype!(TagId, "Unique identifier for a tag.");
id_newtype!(ContactId, "Unique identifier for a contact.");
id_newtype!(TicketId, "Unique identifier for a ticket.");
id_newtype!(CampaignId, "Unique identifier for a campaign.");
id_newtype!(ScheduleId, "Unique identifier for a scheduled message.");
id_newtype!(QuickMessageId, "Unique identifier for a quick message.");
id_newtype!(ContactListId, "Unique identifier for a campaign contact list.");
id_newtype!(ContactListItemId, "Unique identifier for an entry of a contact list.");
id_newtype!(FlowId, "Unique identifier for a chatbot flow.");

/// The platform company. It owns platform-wide settings and cannot be deleted.
pub const PLATFORM_COMPANY_ID: CompanyId = CompanyId(1);

macro_rules! email_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            /// Validates and normalizes an email string.
            pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
                let normalized = normalize_email(email)?;
                Ok(Self(normalized))
            }

            /// Borrow the email as a `&str`.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Convert into the owned inner `String`.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

email_newtype!(UserEmail, "Lower-cased and validated login email.");
email_newtype!(
    CompanyEmail,
    "Lower-cased and validated company contact email."
);
email_newtype!(ContactEmail, "Lower-cased and validated contact email.");

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Borrow the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let inner = NonEmptyString::new(value)?;
                Ok(Self(inner.into_inner()))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

non_empty_string_newtype!(UserName, "User display name enforcing non-empty values.");
non_empty_string_newtype!(CompanyName, "Company name enforcing non-empty values.");
non_empty_string_newtype!(ContactName, "Contact name enforcing non-empty values.");
non_empty_string_newtype!(TagName, "Tag label enforcing trimmed, non-empty values.");
non_empty_string_newtype!(
    CampaignName,
    "Campaign name enforcing trimmed, non-empty values."
);
non_empty_string_newtype!(
    Shortcode,
    "Quick message shortcode enforcing trimmed, non-empty values."
);
non_empty_string_newtype!(
    ContactListName,
    "Contact list name enforcing trimmed, non-empty values."
);
non_empty_string_newtype!(FlowName, "Flow name enforcing trimmed, non-empty values.");

/// Message text that is sanitized, trimmed and non-empty.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageBody(String);

impl MessageBody {
    /// Constructs a sanitized, trimmed, non-empty value.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let sanitized = ammonia::clean(&value.into());
        let inner = NonEmptyString::new(sanitized)?;
        Ok(Self(inner.into_inner()))
    }

    /// Borrow the value as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for MessageBody {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for MessageBody {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for MessageBody {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MessageBody> for String {
    fn from(value: MessageBody) -> Self {
        value.0
    }
}

/// Normalizes a phone number string to E.164 format.
///
/// Numbers coming from WhatsApp are stored as bare digits with the country
/// code, so a missing `+` is added before parsing.
pub fn normalize_phone_to_e164(value: &str) -> Result<String, TypeConstraintError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TypeConstraintError::EmptyString);
    }
    let candidate = if trimmed.starts_with('+') {
        trimmed.to_string()
    } else {
        format!("+{trimmed}")
    };
    let parsed = parse(None, &candidate).map_err(|_| TypeConstraintError::InvalidPhone)?;
    Ok(parsed.format().mode(Mode::E164).to_string())
}

/// Normalized phone number wrapper (expected E.164).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Constructs a phone number ensuring it is valid and normalizes to E.164 format.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_phone_to_e164(&value.into())?;
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for PhoneNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for PhoneNumber {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}

/// Lower-cased `#rrggbb` color used by tags.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct HexColor(String);

impl HexColor {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = value.into().trim().to_lowercase();
        let digits = value
            .strip_prefix('#')
            .ok_or(TypeConstraintError::InvalidColor)?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TypeConstraintError::InvalidColor);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for HexColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for HexColor {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Time of day in `HH:MM` form bounding a user's working hours.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct WorkTime(String);

impl WorkTime {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = value.into().trim().to_string();
        let time = NaiveTime::parse_from_str(&value, "%H:%M")
            .map_err(|_| TypeConstraintError::InvalidTime)?;
        Ok(Self(time.format("%H:%M").to_string()))
    }

    /// `00:00`
    pub fn start_of_day() -> Self {
        Self("00:00".to_string())
    }

    /// `23:59`
    pub fn end_of_day() -> Self {
        Self("23:59".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for WorkTime {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Minimum accepted length for a plain-text password.
pub const MIN_PASSWORD_LENGTH: usize = 5;

/// Plain-text password as received from a form, before hashing.
///
/// Intentionally not `Serialize` and redacted in `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct PlainPassword(String);

impl PlainPassword {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        if value.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(TypeConstraintError::PasswordTooShort);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for PlainPassword {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("PlainPassword(***)")
    }
}

/// Opaque password reset token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResetToken(Uuid);

impl ResetToken {
    /// Generate a new random token.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for ResetToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ResetToken {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(
            Uuid::parse_str(s.trim()).map_err(|_| TypeConstraintError::InvalidUuid)?,
        ))
    }
}

impl Default for ResetToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Generates a string-backed enum with `as_str`, `FromStr` and serde support.
macro_rules! string_enum {
    ($name:ident, $doc:expr, { $($variant:ident => $value:literal),+ $(,)? }) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            /// Wire/database representation.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = TypeConstraintError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($value => Ok($name::$variant),)+
                    other => Err(TypeConstraintError::InvalidValue(other.to_string())),
                }
            }
        }
    };
}

string_enum!(Profile, "Permission profile of a user inside its company.", {
    Admin => "admin",
    User => "user",
});

string_enum!(TicketStatus, "Lifecycle state of a ticket.", {
    Open => "open",
    Pending => "pending",
    Closed => "closed",
});

string_enum!(CampaignStatus, "Lifecycle state of a campaign.", {
    Inactive => "INATIVA",
    Scheduled => "PROGRAMADA",
    InProgress => "EM_ANDAMENTO",
    Cancelled => "CANCELADA",
    Finished => "FINALIZADA",
});

string_enum!(ScheduleStatus, "Delivery state of a scheduled message.", {
    Pending => "PENDENTE",
    Scheduled => "AGENDADA",
    Sent => "ENVIADA",
    Failed => "ERRO",
});

string_enum!(ContactChannel, "Messaging channel a contact is reached through.", {
    Whatsapp => "whatsapp",
    Facebook => "facebook",
    Instagram => "instagram",
});

impl Default for ContactChannel {
    fn default() -> Self {
        ContactChannel::Whatsapp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_must_be_positive() {
        assert_eq!(UserId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(CompanyId::new(-3), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(TagId::new(7).map(TagId::get), Ok(7));
    }

    #[test]
    fn email_is_trimmed_and_lowercased() {
        let email = UserEmail::new("  Alice@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "alice@example.com");
        assert_eq!(
            UserEmail::new("not-an-email"),
            Err(TypeConstraintError::InvalidEmail)
        );
    }

    #[test]
    fn phone_without_plus_is_normalized() {
        let phone = PhoneNumber::new("5511999998888").unwrap();
        assert_eq!(phone.as_str(), "+5511999998888");
        assert!(PhoneNumber::new("abc").is_err());
    }

    #[test]
    fn message_body_is_sanitized() {
        let body = MessageBody::new("  hi <script>alert(1)</script> ").unwrap();
        assert_eq!(body.as_str(), "hi");
        assert_eq!(
            MessageBody::new("<script>x</script>"),
            Err(TypeConstraintError::EmptyString)
        );
    }

    #[test]
    fn hex_color_requires_six_digits() {
        assert_eq!(HexColor::new("#A1B2C3").unwrap().as_str(), "#a1b2c3");
        assert_eq!(HexColor::new("a1b2c3"), Err(TypeConstraintError::InvalidColor));
        assert_eq!(HexColor::new("#fff"), Err(TypeConstraintError::InvalidColor));
    }

    #[test]
    fn work_time_is_normalized() {
        assert_eq!(WorkTime::new("8:05").unwrap().as_str(), "08:05");
        assert_eq!(WorkTime::new("25:00"), Err(TypeConstraintError::InvalidTime));
    }

    #[test]
    fn password_has_minimum_length() {
        assert_eq!(
            PlainPassword::new("abcd"),
            Err(TypeConstraintError::PasswordTooShort)
        );
        assert!(PlainPassword::new("abcde").is_ok());
        assert_eq!(format!("{:?}", PlainPassword::new("secret").unwrap()), "PlainPassword(***)");
    }

    #[test]
    fn string_enums_round_trip_wire_values() {
        assert_eq!("EM_ANDAMENTO".parse::<CampaignStatus>(), Ok(CampaignStatus::InProgress));
        assert_eq!(CampaignStatus::Cancelled.as_str(), "CANCELADA");
        assert_eq!(
            serde_json::to_string(&Profile::Admin).unwrap(),
            "\"admin\""
        );
        assert!("archived".parse::<TicketStatus>().is_err());
    }

    #[test]
    fn reset_token_parses_uuid() {
        let token = ResetToken::new();
        let parsed: ResetToken = token.to_string().parse().unwrap();
        assert_eq!(parsed, token);
        assert_eq!(
            "nope".parse::<ResetToken>(),
            Err(TypeConstraintError::InvalidUuid)
        );
    }
}
