use argon2::password_hash::PasswordHashString;
use crate::data::{KnownUser, UserId};
use crate::email_string::EmailString;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: EmailString,
    pub hash: PasswordHashString,
}

impl From<&User> for KnownUser {
    fn from(value: &User) -> Self {
        KnownUser {
            id: value.id,
            name: value.name.clone(),
            email: value.email.clone(),
        }
    }
}
