use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use crate::data::{Idea, IdeaId, UserId};

#[derive(Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub(super) struct IdeaData {
    pub title: String,
    pub details: String,
    pub owner: UserId,

    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl IdeaData {
    pub fn into_idea(self, id: IdeaId) -> Idea {
        Idea {
            id,
            title: self.title,
            details: self.details,
            owner: self.owner,
            created_at: self.created_at,
        }
    }
}

impl From<&Idea> for IdeaData {
    fn from(value: &Idea) -> Self {
        IdeaData {
            title: value.title.clone(),
            details: value.details.clone(),
            owner: value.owner,
            created_at: value.created_at,
        }
    }
}
