//! # Trendline
//!
//! A terminal client for a social-media evaluation service: a chronological
//! feed, a top-users leaderboard and a trending-posts list.
//!
//! ## Architecture
//!
//! ```text
//! Transport → ApiClient → Source → Pipeline → CLI / TUI
//! ```
//!
//! - [`fetcher`]: HTTP transport over reqwest
//! - [`api`]: bearer-token client and the users/posts/comments source
//! - [`pipeline`]: the feed, top-users and trending aggregations
//! - [`tui`]: Terminal user interface built with ratatui
//!
//! ## Quick Start
//!
//! ```bash
//! trendline feed
//! trendline top-users --json
//! trendline trending
//! trendline tui
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires the configured transport,
/// client and source together.
pub mod app;

/// Authenticated access to the service.
///
/// - [`ApiClient`](api::ApiClient): caches a bearer token, retries once on 401
/// - [`Source`](api::Source): users, posts per user and comments per post
pub mod api;

/// Command-line interface using clap.
///
/// - `feed` - Every post, newest first
/// - `top-users` - Users ranked by engagement
/// - `trending` - The five most engaging posts
/// - `tui` - Launch the TUI
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/trendline/config.toml`, with environment overrides.
pub mod config;

/// Core domain models and derived view records.
pub mod domain;

/// HTTP transport and concurrent fan-out.
///
/// - [`Transport`](fetcher::Transport): Async trait for sending requests
/// - [`HttpTransport`](fetcher::http_fetcher::HttpTransport): reqwest-based implementation
pub mod fetcher;

/// The three aggregation pipelines and their failure conditions.
pub mod pipeline;

/// Terminal user interface.
///
/// One tab per view. Tab or 1-3 switch views, j/k scroll, R reloads the
/// current view, q quits.
pub mod tui;

#[cfg(test)]
mod test_utils;
