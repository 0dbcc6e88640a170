use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::de;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(default, deserialize_with = "de::opt_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "de::opt_id")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "de::opt_count")]
    pub likes: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_count")]
    pub views: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string_list")]
    pub hashtags: Option<Vec<String>>,
    /// Like count recorded for the previous period, used for growth.
    #[serde(default, deserialize_with = "de::opt_count")]
    pub previous_likes: Option<u64>,
    /// Comment count as embedded in the post record itself.
    #[serde(default, deserialize_with = "de::opt_count")]
    pub comments: Option<u64>,
}

impl Post {
    /// Posts without content never reach a derived view.
    pub fn has_content(&self) -> bool {
        self.content.as_deref().is_some_and(|c| !c.is_empty())
    }

    pub fn likes(&self) -> u64 {
        self.likes.unwrap_or(0)
    }

    pub fn views(&self) -> u64 {
        self.views.unwrap_or(0)
    }

    pub fn embedded_comments(&self) -> u64 {
        self.comments.unwrap_or(0)
    }

    pub fn hashtags(&self) -> &[String] {
        self.hashtags.as_deref().unwrap_or(&[])
    }
}
