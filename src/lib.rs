pub mod access_granter;
pub mod app_setup;
pub mod bin_constants;
pub mod config;
pub mod data;
pub mod email_string;
pub mod hasher;
mod lib_constants;
pub mod logging;
pub mod rng;
pub mod routes;
pub mod serde;
pub mod session_storage;
pub mod storage;
pub mod user_db;
pub mod util;
