mod errors;
mod internal;

pub use errors::UserDbError;
pub use internal::{CredentialsCheck, NewUser, ProductionUserDb, Registration, UserDb, UserDbImpl};
pub use internal::user::User;
