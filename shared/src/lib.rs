//! Engine of the overseas knowledge board client.
//!
//! Pure logic shared by the browser front end and the CLI: the data model,
//! the short-code label vocabulary, filtering, sorting, like state, the
//! persisted preference documents, the auth session and the board reducer.
//! Network and storage access go through [`api::BoardApi`] and
//! [`preferences::KeyValueStore`], implemented by the outer crates.

pub mod api;
pub mod board;
pub mod client;
pub mod error;
pub mod filter;
pub mod labels;
pub mod like_state;
pub mod models;
pub mod preferences;
pub mod session;
pub mod sort;

#[cfg(test)]
mod test_support;

pub use api::BoardApi;
pub use board::{compose_view, reduce, BoardEvent, BoardState};
pub use client::BoardClient;
pub use error::{BoardError, BoardResult};
pub use filter::{filter_posts, FilterSelection, FilterSummary, TypeMatching};
pub use labels::Dimension;
pub use like_state::{LikeStateCache, RefreshReport};
pub use models::{LikeStatus, NewPost, Post, PostDraft, PostView, Profile, ProfileUpdate};
pub use preferences::{
    DefaultsStatus, KeyValueStore, LegacyFilterStore, MemoryStore, PostDefaults, PreferenceStore, Preferences,
};
pub use session::{AuthSession, Session};
pub use sort::{sort_posts, SortMode};
