use serde::Serialize;

use crate::domain::user::User;

/// Reply to a profile image upload.
#[derive(Debug, Serialize)]
pub struct ProfileImageResponse {
    pub user: User,
    pub message: &'static str,
}

impl From<User> for ProfileImageResponse {
    fn from(user: User) -> Self {
        Self {
            user,
            message: "Imagem atualizada",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{CompanyId, Profile, UserEmail, UserId, UserName};
    use crate::domain::user::UserPreferences;

    #[test]
    fn upload_reply_wraps_user_with_message() {
        let epoch = chrono::DateTime::from_timestamp(0, 0).unwrap().naive_utc();
        let user = User {
            id: UserId::new(3).unwrap(),
            company_id: CompanyId::new(7).unwrap(),
            name: UserName::new("Ana").unwrap(),
            email: UserEmail::new("ana@example.com").unwrap(),
            profile: Profile::User,
            super_user: false,
            online: false,
            profile_image: Some("1_me.png".into()),
            preferences: UserPreferences::default(),
            created_at: epoch,
            updated_at: epoch,
        };

        let body = serde_json::to_value(ProfileImageResponse::from(user)).unwrap();

        assert_eq!(body["message"], "Imagem atualizada");
        assert_eq!(body["user"]["id"], 3);
        assert_eq!(body["user"]["profileImage"], "1_me.png");
    }
}
