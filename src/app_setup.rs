use std::sync::Arc;
use async_trait::async_trait;
use figment::Figment;
use log::{error, info};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::{Build, Rocket};
use crate::access_granter::{AccessGranter, ProductionAccessGranter};
use crate::config::app_config::AppConfig;
use crate::config::figment::FigmentExt;
use crate::hasher::{ProductionHasher, ProductionHasherConfig};
use crate::routes::WebRocketBuildExt;
use crate::session_storage::SessionStorage;
use crate::storage::IdeaStorage;
use crate::user_db::ProductionUserDb;

/// Builds the stores on ignition and mounts the web routes on top of them.
pub struct AppSetupFairing {
    app_config: AppConfig,
}

impl AppSetupFairing {
    pub fn new(app_config: AppConfig) -> Self {
        AppSetupFairing {
            app_config,
        }
    }
}

/// A rocket configured by `figment`, ready to be launched.
pub fn build_rocket(figment: Figment) -> Result<Rocket<Build>, figment::Error> {
    let app_config = figment.extract_app_config()?;
    Ok(
        rocket::custom(figment)
            .attach(AppSetupFairing::new(app_config))
    )
}

macro_rules! ok_or_bail {
    ($rocket:ident, $expr:expr, |$e:ident| $error_logger:expr) => ({
        match $expr {
            std::result::Result::Ok(ok) => ok,
            std::result::Result::Err(e) => {
                let $e = e;
                $error_logger;
                return std::result::Result::Err($rocket);
            },
        }
    });
}

#[async_trait]
impl Fairing for AppSetupFairing {
    fn info(&self) -> Info {
        Info {
            name: "app setup",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(
        &self,
        rocket: Rocket<Build>,
    ) -> rocket::fairing::Result {
        let hasher_config = ok_or_bail!(
            rocket,
            ProductionHasherConfig::read(&self.app_config.hasher_config).await,
            |e| error!("failed to read password hasher config: {e}")
        );
        let hasher = ok_or_bail!(
            rocket,
            ProductionHasher::new(hasher_config),
            |e| error!("{e}")
        );

        let user_db = ok_or_bail!(
            rocket,
            ProductionUserDb::new(&self.app_config, hasher).await,
            |e| error!(
                "failed to load user db at \"{}\": {e}",
                self.app_config.user_db.display(),
            )
        );

        let storage: IdeaStorage = ok_or_bail!(
            rocket,
            IdeaStorage::new(&self.app_config).await,
            |e| error!("idea storage initialization failed: {e}")
        );

        let sessions = Arc::new(
            SessionStorage::new(self.app_config.session_idle_timeout())
        );
        let access_granter: Box<dyn AccessGranter> = Box::new(
            ProductionAccessGranter::new(user_db, sessions.clone())
        );

        info!(
            "serving ideas from \"{}\"",
            IdeaStorage::get_ideas_dir(&self.app_config).display(),
        );
        Ok(
            rocket
                .manage(storage)
                .manage(sessions)
                .manage(access_granter)
                .install_jotathought_web()
        )
    }
}
