use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use crate::lib_constants::{DEFAULT_ARGON2_M_COST, DEFAULT_ARGON2_OUTPUT_LEN, DEFAULT_ARGON2_P_COST, DEFAULT_ARGON2_T_COST};

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ProductionHasherConfigData {
    #[serde(default = "production_hasher_config_default_argon2_m_cost")]
    pub argon2_m_cost: u32,

    #[serde(default = "production_hasher_config_default_argon2_t_cost")]
    pub argon2_t_cost: u32,

    #[serde(default = "production_hasher_config_default_argon2_p_cost")]
    pub argon2_p_cost: u32,

    #[serde(default = "production_hasher_config_default_argon2_output_len")]
    pub argon2_output_len: Option<usize>,

    /// Base64 encoded secret mixed into every hash, if present.
    #[serde(default)]
    pub pepper_path: Option<PathBuf>,
}

pub fn production_hasher_config_default_argon2_m_cost() -> u32 {
    DEFAULT_ARGON2_M_COST
}

pub fn production_hasher_config_default_argon2_t_cost() -> u32 {
    DEFAULT_ARGON2_T_COST
}

pub fn production_hasher_config_default_argon2_p_cost() -> u32 {
    DEFAULT_ARGON2_P_COST
}

pub fn production_hasher_config_default_argon2_output_len() -> Option<usize> {
    DEFAULT_ARGON2_OUTPUT_LEN
}

impl ProductionHasherConfigData {
    pub fn make_params(&self) -> Result<argon2::Params, argon2::Error> {
        argon2::Params::new(
            self.argon2_m_cost,
            self.argon2_t_cost,
            self.argon2_p_cost,
            self.argon2_output_len,
        )
    }
}

impl Default for ProductionHasherConfigData {
    fn default() -> Self {
        ProductionHasherConfigData {
            argon2_m_cost: DEFAULT_ARGON2_M_COST,
            argon2_t_cost: DEFAULT_ARGON2_T_COST,
            argon2_p_cost: DEFAULT_ARGON2_P_COST,
            argon2_output_len: DEFAULT_ARGON2_OUTPUT_LEN,
            pepper_path: None,
        }
    }
}
