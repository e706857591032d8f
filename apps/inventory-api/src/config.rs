use axum_helpers::JwtConfig;
use core_config::{AppInfo, FromEnv, app_info, env_list, server::ServerConfig};
use database::mongodb::MongoConfig;

pub use core_config::Environment;

/// Application configuration, composed from the shared config components.
///
/// Beyond the shared components this reads `ADMIN_EMAILS`: a comma-separated
/// list of emails whose accounts are created as administrators.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub environment: Environment,
    pub admin_emails: Vec<String>,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            app: app_info!(),
            mongodb: MongoConfig::from_env()?,
            server: ServerConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            environment: Environment::from_env(),
            admin_emails: env_list("ADMIN_EMAILS"),
        })
    }
}
