use thiserror::Error;
use tokio::io::Error as IoError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error(transparent)]
    Io(#[from] IoError),

    #[error("cannot parse idea document \"{name}\": {source}")]
    Parsing {
        name: String,
        source: toml::de::Error,
    },

    #[error("idea document \"{name}\" is not valid UTF-8")]
    Encoding {
        name: String,
    },

    #[error("cannot serialize idea document: {0}")]
    Serialization(#[from] toml::ser::Error),
}
