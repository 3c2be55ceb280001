use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde::de::Error;
use serde::de::Unexpected::Str;
use thiserror::Error;

/// A trimmed, lower-cased email address, used as the login name.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct EmailString(String);

#[derive(Debug, Error, Eq, PartialEq)]
pub enum EmailParseError {
    #[error("email is empty")]
    Empty,

    #[error("email is not valid")]
    Invalid,
}

impl FromStr for EmailString {
    type Err = EmailParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(EmailParseError::Empty);
        }
        match s.split_once('@') {
            Some((local, domain))
                if !local.is_empty()
                    && !domain.is_empty()
                    && !domain.contains('@')
                    && !s.chars().any(char::is_whitespace)
            => Ok(EmailString(s.to_lowercase())),
            _ => Err(EmailParseError::Invalid),
        }
    }
}

impl EmailString {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for EmailString {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Display for EmailString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for EmailString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EmailString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Visitor;
        impl<'de> serde::de::Visitor<'de> for Visitor {
            type Value = EmailString;

            fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
                formatter.write_str("string containing a valid email")
            }

            fn visit_str<E>(self, v: &str) -> Result<EmailString, E>
            where
                E: Error
            {
                EmailString::from_str(v)
                    .map_err(|_| Error::invalid_value(Str(v), &self))
            }
        }

        deserializer.deserialize_str(Visitor)
    }
}
