use std::error::Error;
use std::io;
use std::path::Path;
use argon2::password_hash::{PasswordHashString, SaltString};
use argon2::{Algorithm, Argon2, PasswordHash, PasswordHasher, Version};
use base64ct::{Base64, Encoding};
use log::debug;
use thiserror::Error;
use crate::config::hasher_config::ProductionHasherConfigData;
use crate::rng::make_salt_bytes;

pub trait Hasher: Send + Sync {
    fn generate_hash(&self, password: &str) -> Result<PasswordHashString, HasherError>;

    fn check_hash(
        &self,
        hash: PasswordHash<'_>,
        password: &str,
    ) -> Result<bool, HasherError>;
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProductionHasherConfig {
    pub argon2_params: argon2::Params,
    pub pepper: Option<Box<[u8]>>,
}

impl ProductionHasherConfig {
    pub async fn read(
        config: &ProductionHasherConfigData,
    ) -> Result<Self, HasherError> {
        let argon2_params = config.make_params()
            .map_err(|e| HasherError::Initialization(Box::new(e)))?;
        let pepper = match config.pepper_path {
            Some(ref path) => Some(read_pepper(path).await?),
            None => None,
        };
        Ok(
            ProductionHasherConfig {
                argon2_params,
                pepper,
            }
        )
    }
}

async fn read_pepper(path: &Path) -> Result<Box<[u8]>, HasherError> {
    debug!("reading pepper at \"{}\"", path.display());
    let encoded = tokio::fs::read_to_string(path).await?;
    Ok(
        Base64::decode_vec(encoded.trim_ascii_end())
            .map_err(HasherError::PepperDecode)?
            .into()
    )
}

pub struct ProductionHasher {
    argon2_params: argon2::Params,
    pepper: Box<[u8]>,
}

impl ProductionHasher {
    pub fn new(
        config: ProductionHasherConfig,
    ) -> Result<Self, HasherError> {
        let ret = ProductionHasher {
            argon2_params: config.argon2_params,
            pepper: config.pepper.unwrap_or_default(),
        };
        ret.get_hasher()
            .map_err(|e| HasherError::Initialization(Box::new(e)))?;
        Ok(ret)
    }

    fn get_hasher(&self) -> Result<Argon2<'_>, argon2::Error> {
        if self.pepper.is_empty() {
            Ok(
                Argon2::new(
                    Algorithm::Argon2id,
                    Version::V0x13,
                    self.argon2_params.clone(),
                )
            )
        } else {
            Argon2::new_with_secret(
                &self.pepper,
                Algorithm::Argon2id,
                Version::V0x13,
                self.argon2_params.clone(),
            )
        }
    }

    fn make_salt(&self) -> Result<SaltString, HasherError> {
        SaltString::encode_b64(&make_salt_bytes(&mut rand::rng()))
            .map_err(|e| HasherError::Hash(Box::new(e)))
    }
}

impl Hasher for ProductionHasher {
    fn generate_hash(&self, password: &str) -> Result<PasswordHashString, HasherError> {
        let salt = self.make_salt()?;
        let hasher = self.get_hasher()
            .map_err(|e| HasherError::Initialization(Box::new(e)))?;
        hasher.hash_password(password.as_bytes(), &salt)
            .map_err(|e| HasherError::Hash(Box::new(e)))
            .map(|v| v.serialize())
    }

    fn check_hash(&self, hash: PasswordHash<'_>, password: &str) -> Result<bool, HasherError> {
        let hasher = self.get_hasher()
            .map_err(|e| HasherError::Initialization(Box::new(e)))?;
        hash
            .verify_password(&[&hasher], password)
            .map(|_| true)
            .or_else(|e|
                if let argon2::password_hash::Error::Password = e {
                    Ok(false)
                } else {
                    Err(e)
                }
            )
            .map_err(|e| HasherError::Hash(Box::new(e)))
    }
}

#[derive(Debug, Error)]
pub enum HasherError {
    #[error("failed to initialize password hasher: {0}")]
    Initialization(Box<dyn Error + Send + Sync>),

    #[error("failed to hash password: {0}")]
    Hash(Box<dyn Error + Send + Sync>),

    #[error("failed to decode pepper: {0}")]
    PepperDecode(base64ct::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}
