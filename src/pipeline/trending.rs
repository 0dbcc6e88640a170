use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::Source;
use crate::domain::{Author, Growth, Percent, Post, TrendingPost, DEFAULT_CATEGORY};
use crate::fetcher::parallel::fan_out;
use crate::pipeline::{authored_posts, LoadError};

pub const TRENDING_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingView {
    pub posts: Vec<TrendingPost>,
    pub updated_at: DateTime<Utc>,
}

/// The five posts with the most raw engagement (likes plus fetched
/// comments). Ties keep flatten order.
pub async fn load<S>(source: &S) -> Result<TrendingView, LoadError>
where
    S: Source + Sync + ?Sized,
{
    let users = source.users().await;
    if users.is_empty() {
        return Err(LoadError::NoUsers);
    }

    let candidates: Vec<_> = authored_posts(source, &users)
        .await
        .into_iter()
        .filter(|(post, _)| post.has_content())
        .filter_map(|(post, author)| post.id.clone().map(|id| (id, post, author)))
        .collect();

    if candidates.is_empty() {
        return Err(LoadError::NoPosts);
    }

    let mut posts = fan_out(candidates, |(id, post, author)| async move {
        let comments = source.post_comments(&id).await.len() as u64;
        trending_post(id, post, author, comments)
    })
    .await;

    posts.sort_by(|a, b| b.engagement.cmp(&a.engagement));
    posts.truncate(TRENDING_LIMIT);

    tracing::info!("Trending loaded: top {} posts", posts.len());
    Ok(TrendingView {
        posts,
        updated_at: Utc::now(),
    })
}

pub fn trending_post(id: String, post: Post, author: Author, comments: u64) -> TrendingPost {
    let engagement = post.likes() + comments;

    TrendingPost {
        id,
        likes: post.likes(),
        views: post.views(),
        engagement_rate: Percent::of(engagement, post.views()),
        growth: Growth::from_baseline(engagement, post.previous_likes),
        category: post
            .category
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        content: post.content.unwrap_or_default(),
        timestamp: post.timestamp,
        author,
        comments,
        engagement,
    }
}
