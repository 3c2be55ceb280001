use argon2::password_hash::PasswordHashString;
use serde::{Deserialize, Serialize};
use crate::data::UserId;
use crate::email_string::EmailString;
use crate::user_db::internal::user::User;

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub(super) struct UserData {
    pub id: UserId,
    pub name: String,
    pub email: EmailString,

    #[serde(with = "crate::serde::password_hash_string")]
    pub hash: PasswordHashString,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub(super) struct UsersData {
    #[serde(rename = "user", default)]
    pub users: Vec<UserData>,
}

impl From<UserData> for User {
    fn from(value: UserData) -> Self {
        User {
            id: value.id,
            name: value.name,
            email: value.email,
            hash: value.hash,
        }
    }
}

impl From<&User> for UserData {
    fn from(value: &User) -> Self {
        UserData {
            id: value.id,
            name: value.name.clone(),
            email: value.email.clone(),
            hash: value.hash.clone(),
        }
    }
}
