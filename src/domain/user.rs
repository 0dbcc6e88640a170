use serde::{Deserialize, Serialize};

use crate::domain::de;

pub const ANONYMOUS_NAME: &str = "Anonymous";
pub const ANONYMOUS_USERNAME: &str = "anonymous";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, deserialize_with = "de::opt_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "de::opt_count")]
    pub followers: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub profile_picture: Option<String>,
}

impl User {
    pub fn display_name(&self) -> &str {
        non_empty(self.name.as_deref()).unwrap_or(ANONYMOUS_NAME)
    }

    pub fn display_username(&self) -> &str {
        non_empty(self.username.as_deref()).unwrap_or(ANONYMOUS_USERNAME)
    }

    pub fn avatar(&self) -> Option<&str> {
        non_empty(self.profile_picture.as_deref())
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

/// Display attributes copied from a [`User`] onto each of their posts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(rename = "author")]
    pub name: String,
    #[serde(rename = "authorUsername")]
    pub username: String,
    #[serde(rename = "authorAvatar", skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl From<&User> for Author {
    fn from(user: &User) -> Self {
        Self {
            name: user.display_name().to_string(),
            username: user.display_username().to_string(),
            avatar: user.avatar().map(String::from),
        }
    }
}
