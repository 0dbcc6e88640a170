use std::fmt::Write;

use crate::app::{AppContext, Result, TrendlineError};
use crate::domain::{Author, EnrichedPost, TrendingPost, UserWithStats};
use crate::pipeline::{self, FeedView, LoadError, TopUsersView, TrendingView, ViewData, ViewKind};

/// Run one view's pipeline and print the result.
pub async fn show_view(ctx: &AppContext, view: ViewKind, json: bool) -> Result<()> {
    let data = match pipeline::run(view, ctx.source.clone()).await {
        Ok(data) => data,
        Err(LoadError::LoadFailed(detail)) => {
            return Err(TrendlineError::Other(format!(
                "{} ({})",
                LoadError::LoadFailed(String::new()),
                detail
            )));
        }
        Err(condition) => {
            println!("{}", condition);
            return Ok(());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&data)?);
    } else {
        print!("{}", render(&data));
    }

    Ok(())
}

pub fn render(data: &ViewData) -> String {
    match data {
        ViewData::Feed(view) => render_feed(view),
        ViewData::TopUsers(view) => render_top_users(view),
        ViewData::Trending(view) => render_trending(view),
    }
}

pub fn render_feed(view: &FeedView) -> String {
    let mut out = String::new();
    for post in &view.posts {
        let _ = writeln!(out, "{}", feed_entry(post));
    }
    out
}

fn feed_entry(post: &EnrichedPost) -> String {
    let date = post
        .timestamp
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "          ".to_string());

    format!(
        "{} · {}  {} engagement\n  {}\n  likes {}  comments {}\n",
        byline(&post.author),
        date,
        post.engagement,
        post.content,
        post.likes,
        post.comments
    )
}

pub fn render_top_users(view: &TopUsersView) -> String {
    let mut out = String::new();
    for (rank, stats) in view.users.iter().enumerate() {
        let _ = writeln!(out, "{:>2}. {}", rank + 1, leaderboard_row(stats));
    }
    out
}

fn leaderboard_row(stats: &UserWithStats) -> String {
    let user = &stats.user;
    let mut row = format!(
        "{} (@{})  followers {}  posts {}  engagement {}",
        user.display_name(),
        user.display_username(),
        user.followers.unwrap_or(0),
        stats.posts_count,
        stats.engagement
    );

    if !stats.top_hashtags.is_empty() {
        let tags: Vec<String> = stats
            .top_hashtags
            .iter()
            .map(|t| format!("#{}", t.trim_start_matches('#')))
            .collect();
        row.push_str("  ");
        row.push_str(&tags.join(" "));
    }

    row
}

pub fn render_trending(view: &TrendingView) -> String {
    let mut out = String::new();
    for (rank, post) in view.posts.iter().enumerate() {
        let _ = writeln!(out, "{:>2}. {}", rank + 1, trending_entry(post));
    }
    let _ = writeln!(
        out,
        "Last updated: {}",
        view.updated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    out
}

fn trending_entry(post: &TrendingPost) -> String {
    format!(
        "[{}] {}  engagement {} ({})  growth {}\n    {}\n    likes {}  comments {}  views {}\n",
        post.category,
        byline(&post.author),
        post.engagement,
        post.engagement_rate,
        post.growth,
        post.content,
        post.likes,
        post.comments,
        post.views
    )
}

fn byline(author: &Author) -> String {
    format!("{} (@{})", author.name, author.username)
}
