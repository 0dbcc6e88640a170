//! View pipelines: users → posts → comments, joined and ranked.
//!
//! Each view runs its own pipeline from scratch on every load. Fan-out
//! stages issue all sub-requests at once and wait for the whole batch;
//! results keep submission order.

pub mod feed;
pub mod top_users;
pub mod trending;

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::api::Source;
use crate::domain::{Author, Post, User};
use crate::fetcher::parallel::fan_out;

pub use feed::FeedView;
pub use top_users::TopUsersView;
pub use trending::{TrendingView, TRENDING_LIMIT};

/// Why a view has nothing to show.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("No users found")]
    NoUsers,

    #[error("No posts available")]
    NoPosts,

    #[error("No user data available")]
    NoData,

    /// The run itself failed. The payload is for logs, not for display.
    #[error("Unable to load data. Please try again later.")]
    LoadFailed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Feed,
    TopUsers,
    Trending,
}

impl ViewKind {
    pub const ALL: [ViewKind; 3] = [ViewKind::Feed, ViewKind::TopUsers, ViewKind::Trending];

    pub fn title(self) -> &'static str {
        match self {
            ViewKind::Feed => "Social Feed",
            ViewKind::TopUsers => "Top Users",
            ViewKind::Trending => "Trending",
        }
    }

    pub fn index(self) -> usize {
        match self {
            ViewKind::Feed => 0,
            ViewKind::TopUsers => 1,
            ViewKind::Trending => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ViewData {
    Feed(FeedView),
    TopUsers(TopUsersView),
    Trending(TrendingView),
}

pub async fn load<S>(view: ViewKind, source: &S) -> Result<ViewData, LoadError>
where
    S: Source + Sync + ?Sized,
{
    match view {
        ViewKind::Feed => feed::load(source).await.map(ViewData::Feed),
        ViewKind::TopUsers => top_users::load(source).await.map(ViewData::TopUsers),
        ViewKind::Trending => trending::load(source).await.map(ViewData::Trending),
    }
}

/// Run a view's pipeline as its own task. A run that dies instead of
/// finishing is reported as [`LoadError::LoadFailed`].
pub async fn run<S>(view: ViewKind, source: Arc<S>) -> Result<ViewData, LoadError>
where
    S: Source + Send + Sync + ?Sized + 'static,
{
    let task = tokio::spawn(async move { load(view, source.as_ref()).await });

    match task.await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("{} pipeline failed: {}", view, e);
            Err(LoadError::LoadFailed(e.to_string()))
        }
    }
}

/// Fetch every user's posts concurrently and pair each post with its
/// author. Output is flattened in user order, then post order.
async fn authored_posts<S>(source: &S, users: &[User]) -> Vec<(Post, Author)>
where
    S: Source + Sync + ?Sized,
{
    let per_user = fan_out(users, |user| async move {
        let posts = match &user.id {
            Some(id) => source.user_posts(id).await,
            None => Vec::new(),
        };
        let author = Author::from(user);
        posts
            .into_iter()
            .map(|post| (post, author.clone()))
            .collect::<Vec<_>>()
    })
    .await;

    per_user.into_iter().flatten().collect()
}

async fn comment_count<S>(source: &S, post: &Post) -> u64
where
    S: Source + Sync + ?Sized,
{
    match &post.id {
        Some(id) => source.post_comments(id).await.len() as u64,
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::domain::Comment;
    use crate::test_utils::{post, user, FixtureSource};

    struct PanickingSource;

    #[async_trait]
    impl Source for PanickingSource {
        async fn users(&self) -> Vec<User> {
            panic!("backend exploded");
        }

        async fn user_posts(&self, _user_id: &str) -> Vec<Post> {
            Vec::new()
        }

        async fn post_comments(&self, _post_id: &str) -> Vec<Comment> {
            Vec::new()
        }
    }

    #[test]
    fn test_view_cycle() {
        assert_eq!(ViewKind::Feed.next(), ViewKind::TopUsers);
        assert_eq!(ViewKind::Trending.next(), ViewKind::Feed);
        assert_eq!(ViewKind::Feed.prev(), ViewKind::Trending);
        assert_eq!(ViewKind::TopUsers.prev(), ViewKind::Feed);
    }

    #[tokio::test]
    async fn test_every_view_reports_no_users() {
        let source = Arc::new(FixtureSource::new());
        for view in ViewKind::ALL {
            assert_eq!(run(view, source.clone()).await, Err(LoadError::NoUsers));
        }
    }

    #[tokio::test]
    async fn test_aborted_run_is_load_failure() {
        let source: Arc<dyn Source + Send + Sync> = Arc::new(PanickingSource);
        let result = run(ViewKind::Feed, source).await;
        assert!(matches!(result, Err(LoadError::LoadFailed(_))));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Unable to load data. Please try again later."
        );
    }

    #[tokio::test]
    async fn test_authored_posts_keep_user_order() {
        let source = FixtureSource::new()
            .with_user(user("1", "Ada", None), vec![post("a1", "x", 0, 0), post("a2", "y", 0, 0)])
            .with_user(user("2", "Bob", None), vec![post("b1", "z", 0, 0)]);

        let joined = authored_posts(&source, &source.users).await;
        let ids: Vec<_> = joined
            .iter()
            .map(|(p, a)| (p.id.clone().unwrap(), a.name.clone()))
            .collect();
        assert_eq!(
            ids,
            vec![
                ("a1".to_string(), "Ada".to_string()),
                ("a2".to_string(), "Ada".to_string()),
                ("b1".to_string(), "Bob".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_user_without_id_contributes_nothing() {
        let mut source = FixtureSource::new().with_user(user("1", "Ada", None), vec![post("a1", "x", 0, 0)]);
        source.users.push(User::default());

        let joined = authored_posts(&source, &source.users).await;
        assert_eq!(joined.len(), 1);
    }
}
