use crate::email_string::EmailString;
use crate::lib_constants::TMP_FILENAME_INFIX;
use crate::rng::make_uuid;
use crate::user_db::internal::data::{UserData, UsersData};
use crate::user_db::internal::user::User;
use crate::user_db::UserDbError;
use async_trait::async_trait;
use log::{debug, error, info, trace};
use std::collections::HashMap;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;

#[async_trait]
pub trait UserDbIo: Send + Sync {
    async fn get_user(
        &self,
        email: &EmailString,
    ) -> Result<Option<User>, UserDbError>;

    /// Returns `false` without touching the db if the email is taken.
    async fn insert_user(
        &self,
        user: User,
    ) -> Result<bool, UserDbError>;
}

pub struct ProductionUserDbIo {
    users: RwLock<HashMap<String, User>>,
    user_db_path: PathBuf,
}

impl ProductionUserDbIo {
    pub async fn new(
        user_db_path: impl AsRef<Path> + Send,
    ) -> Result<Self, UserDbError> {
        trace!("creating user storage");

        let user_db_path = user_db_path.as_ref().to_owned();
        debug!("reading user db at \"{}\"", user_db_path.display());
        let data = Self::read_data(&user_db_path).await?;
        info!(
            "user db at \"{}\" has {} users",
            user_db_path.display(),
            data.len(),
        );

        Ok(
            ProductionUserDbIo {
                users: RwLock::new(data),
                user_db_path,
            }
        )
    }

    async fn read_data(
        user_db_path: &Path,
    ) -> Result<HashMap<String, User>, UserDbError> {
        trace!("reading user db at \"{}\"", user_db_path.display());
        let db_str = match fs::read_to_string(&user_db_path).await {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(
                    "no user db at \"{}\", starting with an empty one",
                    user_db_path.display(),
                );
                return Ok(HashMap::new());
            },
            Err(e) => return Err(e.into()),
        };
        let parsed = toml::from_str::<UsersData>(&db_str)?;
        trace!("parsed user db data at \"{}\": {parsed:?}", user_db_path.display());
        Ok(
            HashMap::from_iter(
                parsed.users
                    .into_iter()
                    .map(|u|
                        (u.email.to_string(), u.into())
                    )
            )
        )
    }

    async fn write_data(
        &self,
        users: &HashMap<String, User>,
    ) -> Result<(), UserDbError> {
        let mut users: Vec<UserData> = users.values().map(UserData::from).collect();
        users.sort_by(|a, b| a.email.cmp(&b.email));
        let serialized = toml::to_string(&UsersData { users })?;

        if let Some(parent) = self.user_db_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let mut tmp_path = OsString::from(self.user_db_path.as_os_str());
        tmp_path.push(TMP_FILENAME_INFIX);
        tmp_path.push(make_uuid(&mut rand::rng()).hyphenated().to_string());
        let tmp_path = PathBuf::from(tmp_path);

        trace!("writing user db to \"{}\"", tmp_path.display());
        fs::write(&tmp_path, serialized).await?;
        if let Err(e) = fs::rename(&tmp_path, &self.user_db_path).await {
            error!(
                "failed to rename tmp user db \"{}\": {e}",
                tmp_path.display(),
            );
            if let Err(e) = fs::remove_file(&tmp_path).await {
                error!(
                    "failed to remove tmp user db \"{}\": {e}",
                    tmp_path.display(),
                );
            }
            return Err(e.into());
        }
        Ok(())
    }
}

#[async_trait]
impl UserDbIo for ProductionUserDbIo {
    async fn get_user(
        &self,
        email: &EmailString,
    ) -> Result<Option<User>, UserDbError> {
        Ok(self.users.read().await.get::<str>(email).cloned())
    }

    async fn insert_user(
        &self,
        user: User,
    ) -> Result<bool, UserDbError> {
        let mut users = self.users.write().await;
        if users.contains_key::<str>(&user.email) {
            return Ok(false);
        }
        let email = user.email.to_string();
        users.insert(email.clone(), user);
        if let Err(e) = self.write_data(&users).await {
            users.remove(&email);
            return Err(e);
        }
        debug!("added user \"{email}\" to the user db");
        Ok(true)
    }
}
