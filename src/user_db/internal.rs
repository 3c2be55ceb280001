use crate::config::app_config::AppConfig;
use crate::data::UserId;
use crate::email_string::EmailString;
use crate::hasher::{Hasher, ProductionHasher};
use crate::rng::make_uuid;
use crate::user_db::internal::io_trait::{ProductionUserDbIo, UserDbIo};
use crate::user_db::internal::user::User;
use crate::user_db::UserDbError;
use async_trait::async_trait;
use log::{debug, trace};
use std::sync::Arc;
use tokio::task::spawn_blocking;

mod data;
mod io_trait;
pub(super) mod user;

#[async_trait]
pub trait UserDb: Send + Sync {
    async fn check_user_credentials(
        &self,
        email: &EmailString,
        password: &str,
    ) -> Result<CredentialsCheck, UserDbError>;

    async fn register_user(
        &self,
        new_user: NewUser,
    ) -> Result<Registration, UserDbError>;
}

#[derive(Debug)]
pub enum CredentialsCheck {
    Valid(User),
    UnknownUser,
    WrongPassword,
}

#[derive(Debug)]
pub struct NewUser {
    pub name: String,
    pub email: EmailString,
    pub password: String,
}

#[derive(Debug)]
pub enum Registration {
    Registered(User),
    AlreadyRegistered,
}

#[allow(private_bounds)]
pub struct UserDbImpl<H: Hasher + 'static, Io: UserDbIo> {
    hasher: Arc<H>,
    io: Io,
}

#[async_trait]
impl<H: Hasher + 'static, Io: UserDbIo> UserDb for UserDbImpl<H, Io> {
    async fn check_user_credentials(
        &self,
        email: &EmailString,
        password: &str,
    ) -> Result<CredentialsCheck, UserDbError> {
        let user = self.io
            .get_user(email)
            .await?;
        trace!("checking credentials for \"{email}\"");
        match user {
            None => {
                trace!("user \"{email}\" does not exist");
                Ok(CredentialsCheck::UnknownUser)
            },
            Some(user) => {
                let hasher = self.hasher.clone();
                let hash = user.hash.clone();
                let password = password.to_owned();
                let is_valid = spawn_blocking(move ||
                    hasher.check_hash(hash.password_hash(), &password)
                ).await??;
                if is_valid {
                    trace!("user \"{email}\" correctly authenticated");
                    Ok(CredentialsCheck::Valid(user))
                } else {
                    trace!("user \"{email}\" not authenticated");
                    Ok(CredentialsCheck::WrongPassword)
                }
            }
        }
    }

    async fn register_user(
        &self,
        new_user: NewUser,
    ) -> Result<Registration, UserDbError> {
        if self.io.get_user(&new_user.email).await?.is_some() {
            debug!("\"{}\" is already registered", new_user.email);
            return Ok(Registration::AlreadyRegistered);
        }
        let hasher = self.hasher.clone();
        let password = new_user.password;
        let hash = spawn_blocking(move || hasher.generate_hash(&password)).await??;
        let user = User {
            id: UserId(make_uuid(&mut rand::rng())),
            name: new_user.name,
            email: new_user.email,
            hash,
        };
        // the email could've been taken while hashing
        if self.io.insert_user(user.clone()).await? {
            debug!("registered user \"{}\" as {}", user.email, user.id);
            Ok(Registration::Registered(user))
        } else {
            debug!("\"{}\" got registered concurrently", user.email);
            Ok(Registration::AlreadyRegistered)
        }
    }
}

pub type ProductionUserDb = UserDbImpl<ProductionHasher, ProductionUserDbIo>;

impl ProductionUserDb {
    pub async fn new(
        app_config: &AppConfig,
        hasher: ProductionHasher,
    ) -> Result<ProductionUserDb, UserDbError> {
        Ok(
            UserDbImpl {
                hasher: Arc::new(hasher),
                io: ProductionUserDbIo::new(&app_config.user_db).await?,
            }
        )
    }
}
