use std::io::Error as IoError;
use thiserror::Error;
use tokio::task::JoinError;
use crate::hasher::HasherError;

#[derive(Debug, Error)]
pub enum UserDbError {
    #[error(transparent)]
    Io(#[from] IoError),

    #[error("invalid user db file contents: {0}")]
    Parsing(#[from] toml::de::Error),

    #[error("cannot serialize user db: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error(transparent)]
    Hasher(#[from] HasherError),

    #[error("password hashing task failed: {0}")]
    HashingTask(#[from] JoinError),
}
