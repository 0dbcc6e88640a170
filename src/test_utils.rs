//! Test doubles for the transport and the domain source.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::Source;
use crate::app::{Result, TrendlineError};
use crate::domain::{Comment, Post, User};
use crate::fetcher::{Request, Response, Transport};

type Reply = std::result::Result<Response, String>;

/// Scripted transport keyed by request path.
///
/// Replies queued for a path are served in order; the last one repeats.
/// Paths with nothing queued answer `404`.
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    requests: Mutex<Vec<Request>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, path: &str, status: u16, body: &str) {
        self.push(
            path,
            Ok(Response {
                status,
                body: body.as_bytes().to_vec(),
            }),
        );
    }

    pub fn respond_json(&self, path: &str, status: u16, body: serde_json::Value) {
        self.respond(path, status, &body.to_string());
    }

    pub fn fail(&self, path: &str, message: &str) {
        self.push(path, Err(message.to_string()));
    }

    pub fn requests_to(&self, path: &str) -> Vec<Request> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.path == path)
            .cloned()
            .collect()
    }

    pub fn count(&self, path: &str) -> usize {
        self.requests_to(path).len()
    }

    fn push(&self, path: &str, reply: Reply) {
        self.replies
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(reply);
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: Request) -> Result<Response> {
        let path = request.path.clone();
        self.requests.lock().unwrap().push(request);

        let mut replies = self.replies.lock().unwrap();
        let reply = match replies.get_mut(&path) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };

        match reply {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(TrendlineError::Other(message)),
            None => Ok(Response {
                status: 404,
                body: Vec::new(),
            }),
        }
    }
}

/// In-memory source with per-entity fixtures.
#[derive(Default, Clone)]
pub struct FixtureSource {
    pub users: Vec<User>,
    pub posts: HashMap<String, Vec<Post>>,
    pub comments: HashMap<String, usize>,
}

impl FixtureSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user: User, posts: Vec<Post>) -> Self {
        if let Some(id) = &user.id {
            self.posts.entry(id.clone()).or_default().extend(posts);
        }
        self.users.push(user);
        self
    }

    pub fn with_comments(mut self, post_id: &str, count: usize) -> Self {
        self.comments.insert(post_id.to_string(), count);
        self
    }
}

#[async_trait]
impl Source for FixtureSource {
    async fn users(&self) -> Vec<User> {
        self.users.clone()
    }

    async fn user_posts(&self, user_id: &str) -> Vec<Post> {
        self.posts.get(user_id).cloned().unwrap_or_default()
    }

    async fn post_comments(&self, post_id: &str) -> Vec<Comment> {
        let count = self.comments.get(post_id).copied().unwrap_or(0);
        (0..count)
            .map(|i| Comment {
                id: Some(format!("{}-c{}", post_id, i)),
                post_id: Some(post_id.to_string()),
            })
            .collect()
    }
}

pub fn user(id: &str, name: &str, followers: Option<u64>) -> User {
    User {
        id: Some(id.to_string()),
        name: Some(name.to_string()),
        username: Some(name.to_lowercase()),
        followers,
        profile_picture: None,
    }
}

pub fn post(id: &str, content: &str, likes: u64, views: u64) -> Post {
    Post {
        id: Some(id.to_string()),
        content: Some(content.to_string()),
        likes: Some(likes),
        views: Some(views),
        ..Default::default()
    }
}
