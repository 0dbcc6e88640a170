use serde::Serialize;

use crate::api::Source;
use crate::domain::{Percent, Post, User, UserWithStats};
use crate::fetcher::parallel::fan_out;
use crate::pipeline::LoadError;

pub const TOP_HASHTAGS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopUsersView {
    pub users: Vec<UserWithStats>,
}

/// All users ranked by engagement relative to follower count.
///
/// Engagement here uses the comment count embedded in each post record;
/// no per-post comment fetch is made.
pub async fn load<S>(source: &S) -> Result<TopUsersView, LoadError>
where
    S: Source + Sync + ?Sized,
{
    let users = source.users().await;
    if users.is_empty() {
        return Err(LoadError::NoUsers);
    }

    let mut ranked = fan_out(users, |user| async move {
        let posts = match &user.id {
            Some(id) => source.user_posts(id).await,
            None => Vec::new(),
        };
        user_stats(user, &posts)
    })
    .await;
    ranked.sort_by(|a, b| a.engagement.cmp_desc(&b.engagement));

    if ranked.is_empty() {
        return Err(LoadError::NoData);
    }

    tracing::info!("Top users loaded: {} users", ranked.len());
    Ok(TopUsersView { users: ranked })
}

pub fn user_stats(user: User, posts: &[Post]) -> UserWithStats {
    let total_engagement: u64 = posts
        .iter()
        .map(|post| post.likes() + post.embedded_comments())
        .sum();
    let engagement = Percent::of(total_engagement, user.followers.unwrap_or(0));
    let top_hashtags = posts
        .iter()
        .flat_map(|post| post.hashtags().iter().cloned())
        .take(TOP_HASHTAGS)
        .collect();

    UserWithStats {
        user,
        posts_count: posts.len(),
        total_engagement,
        engagement,
        top_hashtags,
    }
}
