//! Creates a platform super user: `create-super-user <name> <email> <password>`.

use std::env;

use dotenvy::dotenv;

use ojos_chat::auth::hash_password;
use ojos_chat::db::{establish_connection_pool, run_migrations};
use ojos_chat::domain::types::{PLATFORM_COMPANY_ID, PlainPassword, Profile, UserEmail, UserName};
use ojos_chat::domain::user::{NewUser, UserPreferences};
use ojos_chat::models::config::ServerConfig;
use ojos_chat::repository::{DieselRepository, UserReader, UserWriter};

fn fail(message: impl std::fmt::Display) -> ! {
    log::error!("{message}");
    std::process::exit(1);
}

fn main() {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let args: Vec<String> = env::args().skip(1).collect();
    let [name, email, password] = args.as_slice() else {
        fail("usage: create-super-user <name> <email> <password>");
    };

    let name = UserName::new(name.as_str()).unwrap_or_else(|e| fail(format!("Invalid name: {e}")));
    let email =
        UserEmail::new(email.as_str()).unwrap_or_else(|e| fail(format!("Invalid email: {e}")));
    let password = PlainPassword::new(password.as_str())
        .unwrap_or_else(|e| fail(format!("Invalid password: {e}")));

    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());
    let server_config = ServerConfig::load(&app_env)
        .unwrap_or_else(|e| fail(format!("Error loading server config: {e}")));

    let pool = establish_connection_pool(&server_config.database_url)
        .unwrap_or_else(|e| fail(format!("Failed to establish database connection: {e}")));
    if let Err(e) = run_migrations(&pool) {
        fail(format!("Failed to run migrations: {e}"));
    }
    let repo = DieselRepository::new(pool);

    match repo.get_user_credentials(&email) {
        Ok(Some(_)) => fail(format!("A user with email {email} already exists")),
        Ok(None) => {}
        Err(e) => fail(format!("Failed to look up user: {e}")),
    }

    let password_hash =
        hash_password(&password).unwrap_or_else(|e| fail(format!("Failed to hash password: {e}")));

    let new_user = NewUser {
        company_id: PLATFORM_COMPANY_ID,
        name,
        email,
        password_hash,
        profile: Profile::Admin,
        super_user: true,
        preferences: UserPreferences::default(),
    };

    match repo.create_user(&new_user) {
        Ok(user) => log::info!("Created super user {} ({})", user.id, user.email),
        Err(e) => fail(format!("Failed to create super user: {e}")),
    }
}
