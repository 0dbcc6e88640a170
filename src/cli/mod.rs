pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::pipeline::ViewKind;

#[derive(Parser)]
#[command(name = "trendline")]
#[command(about = "Feed, top users and trending posts from a social service", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/trendline/config.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the service base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show every post, newest first
    Feed {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Rank users by engagement relative to followers
    TopUsers {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show the five most engaging posts
    Trending {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Launch the TUI
    Tui,
}

impl Commands {
    /// The one-shot view this command prints, if any.
    pub fn view(&self) -> Option<(ViewKind, bool)> {
        match *self {
            Commands::Feed { json } => Some((ViewKind::Feed, json)),
            Commands::TopUsers { json } => Some((ViewKind::TopUsers, json)),
            Commands::Trending { json } => Some((ViewKind::Trending, json)),
            Commands::Tui => None,
        }
    }
}
