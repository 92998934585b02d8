#![allow(dead_code)]

use chrono::NaiveDate;
use ojos_chat::db::{DbPool, establish_connection_pool, run_migrations};
use ojos_chat::domain::company::{Company, NewCompany};
use ojos_chat::domain::types::{CompanyEmail, CompanyName, Profile, UserEmail, UserName};
use ojos_chat::domain::user::{NewUser, User, UserPreferences};
use ojos_chat::repository::{CompanyWriter, DieselRepository, UserWriter};
use tempfile::TempDir;

/// Migrated SQLite database living in a temporary directory.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let pool = establish_connection_pool(path.to_str().expect("utf-8 path"))
            .expect("create pool");
        run_migrations(&pool).expect("run migrations");
        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
}

pub fn new_user(company: &Company, name: &str, email: &str, profile: Profile) -> NewUser {
    NewUser {
        company_id: company.id,
        name: UserName::new(name).unwrap(),
        email: UserEmail::new(email).unwrap(),
        password_hash: "not-a-real-hash".to_string(),
        profile,
        super_user: false,
        preferences: UserPreferences::default(),
    }
}

/// Creates a company with its admin through the signup transaction.
pub fn seed_company(repo: &DieselRepository, name: &str, admin_email: &str) -> (Company, User) {
    let company = NewCompany::trial(
        CompanyName::new(name).unwrap(),
        CompanyEmail::new(admin_email).unwrap(),
        None,
        None,
        None,
        today(),
        3,
    );
    let admin = NewUser {
        company_id: ojos_chat::domain::types::PLATFORM_COMPANY_ID,
        name: UserName::new(format!("{name} Admin")).unwrap(),
        email: UserEmail::new(admin_email).unwrap(),
        password_hash: "not-a-real-hash".to_string(),
        profile: Profile::Admin,
        super_user: false,
        preferences: UserPreferences::default(),
    };
    repo.create_company_with_admin(&company, &admin).unwrap()
}

pub fn seed_user(repo: &DieselRepository, company: &Company, name: &str, email: &str) -> User {
    repo.create_user(&new_user(company, name, email, Profile::User))
        .unwrap()
}
