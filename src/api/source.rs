//! Domain fetchers over the authenticated client.
//!
//! Every fetch degrades to an empty collection on failure. Errors stop here
//! and are only logged.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::client::ApiClient;
use crate::domain::{Comment, Post, User};

/// Where the pipelines read users, posts, and comments from.
///
/// Methods are infallible by signature: implementations absorb their own
/// failures and report them as "no data".
#[async_trait]
pub trait Source {
    async fn users(&self) -> Vec<User>;
    async fn user_posts(&self, user_id: &str) -> Vec<Post>;
    async fn post_comments(&self, post_id: &str) -> Vec<Comment>;
}

pub struct ApiSource {
    client: ApiClient,
}

impl ApiSource {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    async fn fetch_list<T: DeserializeOwned + Send>(&self, endpoint: &str, key: &str) -> Vec<T> {
        match self.client.request::<Value>(endpoint).await {
            Ok(body) => decode_list(body, key, endpoint),
            Err(e) => {
                tracing::warn!("Error fetching {}: {}", endpoint, e);
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl Source for ApiSource {
    async fn users(&self) -> Vec<User> {
        self.fetch_list("/users", "users").await
    }

    async fn user_posts(&self, user_id: &str) -> Vec<Post> {
        self.fetch_list(&format!("/users/{}/posts", user_id), "posts")
            .await
    }

    async fn post_comments(&self, post_id: &str) -> Vec<Comment> {
        self.fetch_list(&format!("/posts/{}/comments", post_id), "comments")
            .await
    }
}

/// Accept either a bare array or an object wrapping the array under `key`.
/// Records that fail to decode are skipped one by one.
fn decode_list<T: DeserializeOwned>(body: Value, key: &str, endpoint: &str) -> Vec<T> {
    let list = match body {
        Value::Object(mut map) => map.remove(key).unwrap_or(Value::Array(Vec::new())),
        other => other,
    };

    let records = match list {
        Value::Array(records) => records,
        other => {
            tracing::warn!("Expected a list from {}, got {}", endpoint, kind(&other));
            return Vec::new();
        }
    };

    records
        .into_iter()
        .enumerate()
        .filter_map(|(i, record)| match serde_json::from_value(record) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!("Skipping record {} from {}: {}", i, endpoint, e);
                None
            }
        })
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::api::client::{ClientCredentials, TOKEN_PATH};
    use crate::test_utils::MockTransport;

    fn source(transport: &Arc<MockTransport>) -> ApiSource {
        transport.respond_json(TOKEN_PATH, 200, json!({"access_token": "tok"}));
        ApiSource::new(ApiClient::new(transport.clone(), ClientCredentials::default()))
    }

    #[tokio::test]
    async fn test_users_bare_array() {
        let transport = Arc::new(MockTransport::new());
        transport.respond_json("/users", 200, json!([{"id": 1, "name": "Ada"}, {"id": 2}]));
        let source = source(&transport);

        let users = source.users().await;
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].display_name(), "Ada");
        assert_eq!(users[1].id.as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn test_wrapped_listing() {
        let transport = Arc::new(MockTransport::new());
        transport.respond_json(
            "/users/7/posts",
            200,
            json!({"posts": [{"id": 10, "content": "hi"}]}),
        );
        let source = source(&transport);

        let posts = source.user_posts("7").await;
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id.as_deref(), Some("10"));
    }

    #[tokio::test]
    async fn test_comments_endpoint() {
        let transport = Arc::new(MockTransport::new());
        transport.respond_json(
            "/posts/10/comments",
            200,
            json!([{"id": 1, "postId": 10}, {"id": 2, "postId": 10}]),
        );
        let source = source(&transport);

        assert_eq!(source.post_comments("10").await.len(), 2);
    }

    #[tokio::test]
    async fn test_server_error_degrades_to_empty() {
        let transport = Arc::new(MockTransport::new());
        transport.respond("/users/7/posts", 500, "boom");
        let source = source(&transport);

        assert!(source.user_posts("7").await.is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_degrades_to_empty() {
        let transport = Arc::new(MockTransport::new());
        transport.fail("/users", "connection refused");
        let source = source(&transport);

        assert!(source.users().await.is_empty());
    }

    #[tokio::test]
    async fn test_auth_failure_degrades_to_empty() {
        let transport = Arc::new(MockTransport::new());
        transport.respond(TOKEN_PATH, 401, "bad client");
        let source = ApiSource::new(ApiClient::new(transport.clone(), ClientCredentials::default()));

        assert!(source.users().await.is_empty());
        assert_eq!(transport.count("/users"), 0);
    }

    #[tokio::test]
    async fn test_odd_field_types_keep_the_record() {
        let transport = Arc::new(MockTransport::new());
        transport.respond_json("/users", 200, json!([{"id": 1, "name": "Ada"}, {"id": 2, "name": 42}]));
        transport.respond_json(
            "/users/1/posts",
            200,
            json!([
                {"id": 1, "content": "a", "hashtags": ["#x", null]},
                {"id": 2, "content": {"text": "b"}, "category": 7},
            ]),
        );
        let source = source(&transport);

        let users = source.users().await;
        assert_eq!(users.len(), 2);
        assert_eq!(users[1].display_name(), "42");

        let posts = source.user_posts("1").await;
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].hashtags(), ["#x"]);
        assert!(!posts[1].has_content());
    }

    #[tokio::test]
    async fn test_undecodable_record_is_skipped() {
        let transport = Arc::new(MockTransport::new());
        transport.respond_json("/posts/1/comments", 200, json!([{"id": 1}, "junk", {"id": 3}]));
        let source = source(&transport);

        let comments = source.post_comments("1").await;
        let ids: Vec<_> = comments.iter().map(|c| c.id.as_deref()).collect();
        assert_eq!(ids, vec![Some("1"), Some("3")]);
    }

    #[tokio::test]
    async fn test_malformed_records_degrade_to_empty() {
        let transport = Arc::new(MockTransport::new());
        transport.respond_json("/posts/1/comments", 200, json!({"comments": "nope"}));
        let source = source(&transport);

        assert!(source.post_comments("1").await.is_empty());
    }
}
