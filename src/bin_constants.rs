pub const DEFAULT_CONFIG_FILE: &str = "/etc/jotathought/jotathought.toml";
pub const APP_CONFIG_ENV_PREFIX: &str = "JOTATHOUGHT_";
pub const DEFAULT_PORT: u16 = 5000;

pub const DEFAULT_USER_DB: &str = "/var/jotathought/users.toml";
pub const DEFAULT_DATA_DIR: &str = "/var/jotathought";
pub const DEFAULT_SESSION_IDLE_TIMEOUT: u64 = 60 * 60 * 24;
