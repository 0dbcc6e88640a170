use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{Author, Growth, Percent, Post, User};

/// A feed entry: the post, its author, and its comment-driven engagement.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedPost {
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub content: String,
    pub likes: u64,
    pub views: u64,
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hashtags: Option<Vec<String>>,
    #[serde(flatten)]
    pub author: Author,
    pub comments: u64,
    pub engagement: Percent,
}

impl EnrichedPost {
    pub fn new(post: Post, author: Author, comments: u64) -> Self {
        let engagement = Percent::of(post.likes() + comments, post.views());
        Self {
            likes: post.likes(),
            views: post.views(),
            id: post.id,
            user_id: post.user_id,
            content: post.content.unwrap_or_default(),
            timestamp: post.timestamp,
            category: post.category,
            hashtags: post.hashtags,
            author,
            comments,
            engagement,
        }
    }
}

/// A leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWithStats {
    #[serde(flatten)]
    pub user: User,
    pub posts_count: usize,
    pub total_engagement: u64,
    pub engagement: Percent,
    pub top_hashtags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingPost {
    pub id: String,
    pub content: String,
    pub likes: u64,
    pub views: u64,
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub author: Author,
    pub category: String,
    pub comments: u64,
    /// Raw likes plus fetched comments; the trending sort key.
    pub engagement: u64,
    pub engagement_rate: Percent,
    pub growth: Growth,
}

pub const DEFAULT_CATEGORY: &str = "General";
