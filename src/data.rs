use std::fmt::{Display, Formatter};
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;
use crate::email_string::EmailString;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct IdeaId(pub Uuid);

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

#[derive(Clone, Debug, PartialEq)]
pub struct Idea {
    pub id: IdeaId,
    pub title: String,
    pub details: String,
    pub owner: UserId,
    pub created_at: OffsetDateTime,
}

impl Idea {
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.owner == user
    }
}

/// Fields of an idea as submitted by its owner.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IdeaContents {
    pub title: String,
    pub details: String,
}

/// A logged in user, as remembered by the session.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct KnownUser {
    pub id: UserId,
    pub name: String,
    pub email: EmailString,
}

impl FromStr for IdeaId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::try_parse(s).map(IdeaId)
    }
}

impl Display for IdeaId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0.hyphenated(), f)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0.hyphenated(), f)
    }
}
