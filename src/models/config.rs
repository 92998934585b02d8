//! Configuration model loaded from external sources.

use serde::Deserialize;

fn default_token_ttl_hours() -> i64 {
    24
}

fn default_trial_days() -> u64 {
    crate::domain::company::DEFAULT_TRIAL_DAYS
}

fn default_public_dir() -> String {
    "./public".to_string()
}

#[derive(Clone, Debug, Deserialize)]
/// Server configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// HMAC secret used to sign bearer tokens.
    pub secret: String,
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
    /// Base URL used to build password reset links.
    pub frontend_url: String,
    /// Endpoint the realtime event publisher connects to.
    pub zmq_events_pub: String,
    /// Endpoint of the mail relay.
    pub zmq_emailer_pub: String,
    #[serde(default = "default_public_dir")]
    pub public_dir: String,
    /// Demo deployments refuse signups and user creation.
    #[serde(default)]
    pub demo: bool,
    #[serde(default = "default_trial_days")]
    pub trial_days: u64,
}

#[cfg(feature = "server")]
impl ServerConfig {
    /// Layers `config/default.yaml`, `config/{app_env}.yaml` and `APP_*` variables.
    pub fn load(app_env: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(config::Environment::with_prefix("APP"))
            .build()?
            .try_deserialize::<ServerConfig>()
    }
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use super::*;
    use config::{Config, File, FileFormat};

    #[test]
    fn optional_fields_fall_back_to_defaults() {
        let yaml = r#"
address: 127.0.0.1
port: 8080
database_url: app.db
secret: change-me
frontend_url: http://localhost:3000
zmq_events_pub: tcp://127.0.0.1:5555
zmq_emailer_pub: tcp://127.0.0.1:5557
"#;
        let config: ServerConfig = Config::builder()
            .add_source(File::from_str(yaml, FileFormat::Yaml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.token_ttl_hours, 24);
        assert_eq!(config.public_dir, "./public");
        assert_eq!(config.trial_days, 3);
        assert!(!config.demo);
    }
}
