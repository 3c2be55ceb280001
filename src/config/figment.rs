use std::path::Path;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use crate::bin_constants::{APP_CONFIG_ENV_PREFIX, DEFAULT_PORT};
use crate::config::app_config::AppConfig;

pub trait FigmentExt {
    fn setup_app_config(
        self,
        config_file: impl AsRef<Path>,
    ) -> Figment;

    fn setup_app_defaults(self) -> Figment;

    fn extract_app_config(&self) -> Result<AppConfig, figment::Error>;
}

impl FigmentExt for Figment {
    fn setup_app_config(self, config_file: impl AsRef<Path>) -> Figment {
        self.setup_app_defaults()
            .merge(Toml::file_exact(config_file))
            .merge(Env::prefixed(APP_CONFIG_ENV_PREFIX).global())
    }

    fn setup_app_defaults(self) -> Figment {
        self.merge(Serialized::default("port", DEFAULT_PORT))
            .merge(Serialized::defaults(AppConfig::default()))
    }

    fn extract_app_config(&self) -> Result<AppConfig, figment::Error> {
        self.extract()
    }
}
