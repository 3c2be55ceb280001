// relative to the data directory
pub const IDEAS_DIRECTORY_PATH: &str = "ideas";
pub const IDEA_FILE_EXTENSION: &str = "toml";
pub const TMP_FILENAME_INFIX: &str = ".tmp.";

pub const SESSION_COOKIE_NAME: &str = "jotathought_session";

// the defaults are taken from the argon2 crate itself
pub const DEFAULT_ARGON2_M_COST: u32 = 19 * 1024;
pub const DEFAULT_ARGON2_T_COST: u32 = 2;
pub const DEFAULT_ARGON2_P_COST: u32 = 1;
pub const DEFAULT_ARGON2_OUTPUT_LEN: Option<usize> = Some(32);

pub const MIN_PASSWORD_LEN: usize = 4;
