use std::path::PathBuf;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::bin_constants::{DEFAULT_DATA_DIR, DEFAULT_SESSION_IDLE_TIMEOUT, DEFAULT_USER_DB};
use crate::config::hasher_config::ProductionHasherConfigData;

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AppConfig {
    #[serde(default = "app_config_default_data_directory")]
    pub data_directory: PathBuf,

    #[serde(default = "app_config_default_user_db")]
    pub user_db: PathBuf,

    /// Seconds a session may stay unused before it's forgotten.
    #[serde(default = "app_config_default_session_idle_timeout")]
    pub session_idle_timeout: u64,

    #[serde(flatten)]
    pub hasher_config: ProductionHasherConfigData,
}

impl AppConfig {
    pub fn session_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.session_idle_timeout)
    }
}

pub fn app_config_default_data_directory() -> PathBuf {
    DEFAULT_DATA_DIR.into()
}

pub fn app_config_default_user_db() -> PathBuf {
    DEFAULT_USER_DB.into()
}

pub fn app_config_default_session_idle_timeout() -> u64 {
    DEFAULT_SESSION_IDLE_TIMEOUT
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_directory: DEFAULT_DATA_DIR.into(),
            user_db: DEFAULT_USER_DB.into(),
            session_idle_timeout: DEFAULT_SESSION_IDLE_TIMEOUT,
            hasher_config: ProductionHasherConfigData::default(),
        }
    }
}
