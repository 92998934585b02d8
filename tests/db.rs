use ojos_chat::domain::types::PLATFORM_COMPANY_ID;
use ojos_chat::repository::{CompanyReader, SettingReader};

mod common;

#[test]
fn test_creates_and_removes_db_files() {
    let test_db = common::TestDb::new("test_creates_and_removes_db_files.db");
    let conn = test_db.pool().get();
    assert!(conn.is_ok());
}

#[test]
fn test_migrations_seed_platform_company() {
    let test_db = common::TestDb::new("test_migrations_seed_platform_company.db");
    let repo = test_db.repo();

    let platform = repo.get_company_by_id(PLATFORM_COMPANY_ID).unwrap().unwrap();
    assert!(platform.status);

    let setting = repo
        .get_setting(PLATFORM_COMPANY_ID, "userCreation")
        .unwrap()
        .unwrap();
    assert_eq!(setting.value, "enabled");
    assert!(!setting.is_disabled());
}
