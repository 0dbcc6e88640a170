use chrono::Utc;
use serde::Serialize;

use crate::api::Source;
use crate::domain::EnrichedPost;
use crate::fetcher::parallel::fan_out;
use crate::pipeline::{authored_posts, comment_count, LoadError};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedView {
    pub posts: Vec<EnrichedPost>,
}

/// Every post with content, newest first, with comment counts and
/// engagement attached. Posts without a timestamp count as "now".
pub async fn load<S>(source: &S) -> Result<FeedView, LoadError>
where
    S: Source + Sync + ?Sized,
{
    let users = source.users().await;
    if users.is_empty() {
        return Err(LoadError::NoUsers);
    }

    let now = Utc::now();
    let mut posts: Vec<_> = authored_posts(source, &users)
        .await
        .into_iter()
        .filter(|(post, _)| post.has_content())
        .collect();
    posts.sort_by(|(a, _), (b, _)| b.timestamp.unwrap_or(now).cmp(&a.timestamp.unwrap_or(now)));

    if posts.is_empty() {
        return Err(LoadError::NoPosts);
    }

    let posts = fan_out(posts, |(post, author)| async move {
        let comments = comment_count(source, &post).await;
        EnrichedPost::new(post, author, comments)
    })
    .await;

    tracing::info!("Feed loaded: {} posts from {} users", posts.len(), users.len());
    Ok(FeedView { posts })
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::domain::{Post, User};
    use crate::test_utils::{post, user, FixtureSource};

    fn at(day: u32) -> Option<chrono::DateTime<Utc>> {
        Some(Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap())
    }

    fn dated(id: &str, content: &str, day: u32) -> Post {
        Post {
            timestamp: at(day),
            ..post(id, content, 10, 100)
        }
    }

    fn fixture() -> FixtureSource {
        FixtureSource::new()
            .with_user(
                user("1", "Ada", Some(100)),
                vec![dated("a1", "first", 1), dated("a2", "", 9), dated("a3", "third", 3)],
            )
            .with_user(
                user("2", "Bob", Some(50)),
                vec![dated("b1", "second", 2), dated("b2", "latest", 5)],
            )
            .with_comments("b2", 4)
            .with_comments("a1", 1)
    }

    #[tokio::test]
    async fn test_sorted_newest_first_without_empty_content() {
        let view = load(&fixture()).await.unwrap();

        let ids: Vec<_> = view.posts.iter().map(|p| p.id.clone().unwrap()).collect();
        assert_eq!(ids, vec!["b2", "a3", "b1", "a1"]);
        assert!(view.posts.iter().all(|p| !p.content.is_empty()));
        assert!(view
            .posts
            .windows(2)
            .all(|w| w[0].timestamp >= w[1].timestamp));
    }

    #[tokio::test]
    async fn test_engagement_and_authors_attached() {
        let view = load(&fixture()).await.unwrap();

        let latest = &view.posts[0];
        assert_eq!(latest.author.name, "Bob");
        assert_eq!(latest.author.username, "bob");
        assert_eq!(latest.comments, 4);
        // (10 + 4) / 100 * 100
        assert_eq!(latest.engagement.to_string(), "14.0%");

        let oldest = &view.posts[3];
        assert_eq!(oldest.comments, 1);
        assert_eq!(oldest.engagement.to_string(), "11.0%");
    }

    #[tokio::test]
    async fn test_missing_timestamp_sorts_as_now() {
        let source = fixture().with_user(user("3", "Cy", None), vec![post("c1", "undated", 0, 0)]);
        let view = load(&source).await.unwrap();
        assert_eq!(view.posts[0].id.as_deref(), Some("c1"));
    }

    #[tokio::test]
    async fn test_zero_views_treated_as_one() {
        let source = FixtureSource::new()
            .with_user(user("1", "Ada", None), vec![post("p", "hi", 2, 0)])
            .with_comments("p", 1);
        let view = load(&source).await.unwrap();
        assert_eq!(view.posts[0].engagement.to_string(), "300.0%");
    }

    #[tokio::test]
    async fn test_anonymous_author_defaults() {
        let source = FixtureSource::new().with_user(
            User {
                id: Some("9".into()),
                ..Default::default()
            },
            vec![post("p", "hi", 0, 1)],
        );
        let view = load(&source).await.unwrap();
        assert_eq!(view.posts[0].author.name, "Anonymous");
        assert_eq!(view.posts[0].author.username, "anonymous");
    }

    #[tokio::test]
    async fn test_no_users() {
        assert_eq!(load(&FixtureSource::new()).await, Err(LoadError::NoUsers));
    }

    #[tokio::test]
    async fn test_no_posts_with_content() {
        let source = FixtureSource::new().with_user(user("1", "Ada", None), vec![post("p", "", 1, 1)]);
        assert_eq!(load(&source).await, Err(LoadError::NoPosts));
    }

    #[tokio::test]
    async fn test_idempotent() {
        let source = fixture();
        let first = load(&source).await.unwrap();
        let second = load(&source).await.unwrap();
        assert_eq!(first, second);
    }
}
