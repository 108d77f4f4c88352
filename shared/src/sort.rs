//! Sort Engine for the post list.

use std::{cmp::Reverse, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::models::{parse_timestamp, Post};

/// Order of the post list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Newest first.
    #[default]
    Latest,
    /// Oldest first.
    Oldest,
    /// Most liked first.
    Popular,
}

impl SortMode {
    /// Every mode, in the order the sort select lists them.
    pub const ALL: [SortMode; 3] = [SortMode::Latest, SortMode::Popular, SortMode::Oldest];

    /// Value used by the select control and the CLI.
    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::Latest => "latest",
            SortMode::Oldest => "oldest",
            SortMode::Popular => "popular",
        }
    }

    /// Option label.
    pub fn label(self) -> &'static str {
        match self {
            SortMode::Latest => "新着順",
            SortMode::Oldest => "古い順",
            SortMode::Popular => "人気順",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "latest" => Ok(SortMode::Latest),
            "oldest" => Ok(SortMode::Oldest),
            "popular" => Ok(SortMode::Popular),
            other => Err(format!("unknown sort mode `{other}` (expected latest, oldest or popular)")),
        }
    }
}

/// Recency key: creation time in epoch milliseconds, else the numeric id as
/// a monotonic proxy, else 0.
pub fn recency_key(created_at: Option<&str>, id: Option<i64>) -> i64 {
    created_at
        .and_then(parse_timestamp)
        .map(|at| at.timestamp_millis())
        .or(id)
        .unwrap_or(0)
}

fn post_recency(post: &Post) -> i64 {
    recency_key(post.created_at.as_deref(), Some(post.id))
}

/// Return a sorted copy of `posts`. The sort is stable: ties keep their
/// current relative order.
pub fn sort_posts(posts: &[Post], mode: SortMode) -> Vec<Post> {
    let mut sorted = posts.to_vec();
    match mode {
        SortMode::Latest => sorted.sort_by_key(|post| Reverse(post_recency(post))),
        SortMode::Oldest => sorted.sort_by_key(post_recency),
        SortMode::Popular => sorted.sort_by_key(|post| Reverse(post.likes_count)),
    }
    sorted
}
