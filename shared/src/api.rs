//! Backend seam: the REST surface as a trait, plus the response
//! classification both HTTP adapters share.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;

use crate::{
    error::{BoardError, BoardResult},
    models::{Credentials, LikeStatus, NewPost, Post, Profile, ProfileUpdate, TokenResponse},
};

/// Request paths, relative to the configured base URL.
pub mod endpoints {
    /// `POST`: email and password for a token.
    pub const LOGIN: &str = "/api/auth/login";
    /// `POST`: new account, answers with a token.
    pub const REGISTER: &str = "/api/auth/register";
    /// `GET` / `PATCH`: the signed-in profile.
    pub const ME: &str = "/api/users/me";
    /// `GET` list, `POST` create.
    pub const POSTS: &str = "/api/posts";

    /// `DELETE`: one post.
    pub fn post(id: i64) -> String {
        format!("{POSTS}/{id}")
    }

    /// `GET` status, `POST` like, `DELETE` unlike.
    pub fn post_like(id: i64) -> String {
        format!("{POSTS}/{id}/like")
    }

    /// Join a base URL and a path without doubling the slash.
    pub fn url(base: &str, path: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), path)
    }
}

/// The backend REST API. Protected calls take the bearer token explicitly;
/// the caller owns the session.
#[async_trait(?Send)]
pub trait BoardApi {
    /// Sign in.
    async fn login(&self, credentials: &Credentials) -> BoardResult<TokenResponse>;

    /// Create an account.
    async fn register(&self, credentials: &Credentials) -> BoardResult<TokenResponse>;

    /// Profile behind `token`.
    async fn current_user(&self, token: &str) -> BoardResult<Profile>;

    /// Replace nickname, region and industry of the profile.
    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> BoardResult<Profile>;

    /// Every post, unauthenticated.
    async fn list_posts(&self) -> BoardResult<Vec<Post>>;

    /// Publish a post; the backend fills in author and region.
    async fn create_post(&self, token: &str, post: &NewPost) -> BoardResult<Post>;

    /// Delete one of the caller's posts.
    async fn delete_post(&self, token: &str, post_id: i64) -> BoardResult<()>;

    /// Whether the caller likes a post, with its current count.
    async fn like_status(&self, token: &str, post_id: i64) -> BoardResult<LikeStatus>;

    /// Add the caller's like.
    async fn like(&self, token: &str, post_id: i64) -> BoardResult<LikeStatus>;

    /// Remove the caller's like.
    async fn unlike(&self, token: &str, post_id: i64) -> BoardResult<LikeStatus>;
}

/// `Authorization` header value.
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Value,
}

/// Pull a readable message out of a FastAPI error body: `detail` is either a
/// string or a list of `{msg}` validation entries.
fn detail_message(body: &str) -> Option<String> {
    let detail = serde_json::from_str::<ErrorBody>(body).ok()?.detail;
    let message = match detail {
        Value::String(text) => text,
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.get("msg").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join(" / "),
        _ => String::new(),
    };
    let message = message.trim().to_string();
    (!message.is_empty()).then_some(message)
}

/// Classify a non-2xx response.
pub fn error_from_response(status: u16, body: &str) -> BoardError {
    let detail = detail_message(body);
    match status {
        401 | 403 => BoardError::Unauthorized,
        422 => BoardError::Validation(
            detail.unwrap_or_else(|| "入力内容を確認してください。".to_string()),
        ),
        _ => BoardError::Server {
            status,
            detail: detail.unwrap_or_else(|| format!("HTTP error: {status}")),
        },
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Decode a response body, classifying failures.
pub fn parse_response<T: DeserializeOwned>(status: u16, body: &str) -> BoardResult<T> {
    if !is_success(status) {
        return Err(error_from_response(status, body));
    }
    serde_json::from_str(body).map_err(|e| BoardError::Parse(e.to_string()))
}

/// Accept any 2xx response, ignoring its body.
pub fn parse_ack(status: u16, body: &str) -> BoardResult<()> {
    if is_success(status) {
        Ok(())
    } else {
        Err(error_from_response(status, body))
    }
}
