use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::domain::{Author, EnrichedPost, TrendingPost, UserWithStats};
use crate::pipeline::{FeedView, LoadError, TopUsersView, TrendingView, ViewData, ViewKind};
use crate::tui::app::{TuiApp, ViewState};

pub fn render(frame: &mut Frame, app: &TuiApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(5),    // View body
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_tabs(frame, app, chunks[0]);
    render_body(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);
}

fn render_tabs(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let titles = ViewKind::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| format!("{}:{}", i + 1, view.title()));

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(" Trendline "))
        .select(app.active_view.index())
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

fn render_body(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", app.active_view.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let text = match app.active_state() {
        ViewState::Idle | ViewState::Loading => Text::from("Loading..."),
        ViewState::Failed(e) => failure_text(e),
        ViewState::Loaded(data) => view_text(data),
    };

    let paragraph = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.active_scroll(), 0));

    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let status = if app.is_loading() {
        format!("Loading {}...", app.active_view.title())
    } else if let Some(ref msg) = app.status_message {
        msg.clone()
    } else {
        "Tab/1-3:View  j/k:Scroll  n/p:Page  R:Refresh  q:Quit".to_string()
    };

    let paragraph =
        Paragraph::new(status).style(Style::default().fg(Color::White).bg(Color::DarkGray));

    frame.render_widget(paragraph, area);
}

fn failure_text(error: &LoadError) -> Text<'static> {
    Text::from(vec![
        Line::from(Span::styled(error.to_string(), Style::default().fg(Color::Red))),
        Line::from(""),
        Line::from(Span::styled(
            "Press R to retry",
            Style::default().fg(Color::DarkGray),
        )),
    ])
}

pub fn view_text(data: &ViewData) -> Text<'static> {
    match data {
        ViewData::Feed(view) => feed_text(view),
        ViewData::TopUsers(view) => top_users_text(view),
        ViewData::Trending(view) => trending_text(view),
    }
}

fn feed_text(view: &FeedView) -> Text<'static> {
    let mut lines = Vec::new();
    for post in &view.posts {
        lines.extend(feed_lines(post));
        lines.push(Line::from(""));
    }
    Text::from(lines)
}

fn feed_lines(post: &EnrichedPost) -> Vec<Line<'static>> {
    let date = post
        .timestamp
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();

    vec![
        Line::from(vec![
            author_span(&post.author),
            Span::styled(
                format!(" @{} · {}", post.author.username, date),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw("  "),
            Span::styled(
                format!("{} Engagement", post.engagement),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::from(post.content.clone()),
        Line::from(Span::styled(
            format!("♥ {}  💬 {}", post.likes, post.comments),
            Style::default().fg(Color::DarkGray),
        )),
    ]
}

fn top_users_text(view: &TopUsersView) -> Text<'static> {
    let mut lines = Vec::new();
    for (rank, stats) in view.users.iter().enumerate() {
        lines.extend(leaderboard_lines(rank + 1, stats));
        lines.push(Line::from(""));
    }
    Text::from(lines)
}

fn leaderboard_lines(rank: usize, stats: &UserWithStats) -> Vec<Line<'static>> {
    let user = &stats.user;
    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("{:>2}. ", rank), Style::default().fg(Color::Yellow)),
            Span::styled(
                user.display_name().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" @{}", user.display_username()),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(vec![
            Span::raw(format!(
                "    Followers {}  Posts {}  ",
                user.followers.unwrap_or(0),
                stats.posts_count
            )),
            Span::styled(
                format!("Engagement {}", stats.engagement),
                Style::default().fg(Color::Green),
            ),
        ]),
    ];

    if !stats.top_hashtags.is_empty() {
        let tags: Vec<String> = stats
            .top_hashtags
            .iter()
            .map(|t| format!("#{}", t.trim_start_matches('#')))
            .collect();
        lines.push(Line::from(Span::styled(
            format!("    {}", tags.join(" ")),
            Style::default().fg(Color::Cyan),
        )));
    }

    lines
}

fn trending_text(view: &TrendingView) -> Text<'static> {
    let mut lines = Vec::new();
    for (rank, post) in view.posts.iter().enumerate() {
        lines.extend(trending_lines(rank + 1, post));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        format!(
            "Last updated: {}",
            view.updated_at
                .with_timezone(&chrono::Local)
                .format("%H:%M:%S")
        ),
        Style::default().fg(Color::DarkGray),
    )));
    Text::from(lines)
}

fn trending_lines(rank: usize, post: &TrendingPost) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            Span::styled(format!("{:>2}. ", rank), Style::default().fg(Color::Yellow)),
            author_span(&post.author),
            Span::styled(
                format!(" @{}", post.author.username),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw("  "),
            Span::styled(
                format!("[{}]", post.category),
                Style::default().fg(Color::Magenta),
            ),
        ]),
        Line::from(format!("    {}", post.content)),
        Line::from(vec![
            Span::raw(format!(
                "    Engagement {} ({})  ",
                post.engagement, post.engagement_rate
            )),
            Span::styled(
                format!("Growth {}", post.growth),
                Style::default().fg(Color::Green),
            ),
        ]),
    ]
}

fn author_span(author: &Author) -> Span<'static> {
    Span::styled(
        author.name.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )
}
