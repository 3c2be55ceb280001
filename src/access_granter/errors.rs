use thiserror::Error;
use crate::user_db::UserDbError;

#[derive(Debug, Error)]
pub enum AccessGranterError {
    #[error("no such user")]
    UnknownUser,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("email is already registered")]
    AlreadyRegistered,

    #[error(transparent)]
    UserDb(#[from] UserDbError),
}
