use std::path::PathBuf;

use clap::{Parser, Subcommand};
use overseas_board_shared::{like_state::DEFAULT_REFRESH_CONCURRENCY, Dimension, SortMode};

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";
pub const DEFAULT_STATE_FILE: &str = "./.overseas-board.json";

#[derive(Parser)]
#[command(name = "ob-cli", version, about = "Overseas knowledge board CLI")]
pub struct Cli {
    /// Backend base URL.
    #[arg(long, global = true, env = "OVERSEAS_BOARD_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// JSON file holding the session token and saved preferences.
    #[arg(long, global = true, env = "OVERSEAS_BOARD_STATE", default_value = DEFAULT_STATE_FILE)]
    pub state_file: PathBuf,

    /// Maximum like-status queries in flight while loading posts.
    #[arg(long, global = true, default_value_t = DEFAULT_REFRESH_CONCURRENCY)]
    pub like_concurrency: usize,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and keep the token in the state file.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "OVERSEAS_BOARD_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and sign in.
    Register {
        #[arg(long)]
        email: String,
        #[arg(long, env = "OVERSEAS_BOARD_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored token.
    Logout,
    /// Show the signed-in profile.
    Whoami,
    /// Read and write posts.
    #[command(subcommand)]
    Posts(PostCommands),
    /// Saved view filters (settings page document).
    #[command(subcommand)]
    Filters(FilterCommands),
    /// Saved posting defaults.
    #[command(subcommand)]
    Defaults(DefaultCommands),
    /// Filters of the standalone filter page.
    #[command(subcommand)]
    LegacyFilters(FilterCommands),
    /// Update the server-side profile.
    #[command(subcommand)]
    Profile(ProfileCommands),
    /// List the short codes of one or all dimensions.
    Labels {
        dimension: Option<Dimension>,
    },
}

#[derive(Subcommand)]
pub enum PostCommands {
    /// List posts through the saved view filters.
    List {
        #[arg(long, default_value_t = SortMode::Latest)]
        sort: SortMode,
        /// Ignore the saved view filters.
        #[arg(long)]
        all: bool,
        /// Only posts written by this user id.
        #[arg(long)]
        author: Option<i64>,
        /// Translate type codes to labels before matching.
        #[arg(long)]
        type_labels: bool,
    },
    /// Publish a post.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        /// Knowledge type code (defaults to the saved posting default).
        #[arg(long = "type")]
        type_code: Option<String>,
    },
    /// Delete one of your posts.
    Delete {
        id: i64,
    },
    /// Like a post, or remove your like.
    Like {
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum FilterCommands {
    Show,
    /// Select or deselect one code.
    Toggle {
        dimension: Dimension,
        code: String,
    },
    Reset,
}

#[derive(Subcommand)]
pub enum DefaultCommands {
    Show,
    /// Choose the default code of one dimension.
    Set {
        dimension: Dimension,
        code: String,
    },
    Reset,
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Send the posting defaults (and optionally a nickname) to the profile.
    Update {
        #[arg(long)]
        nickname: Option<String>,
    },
}
