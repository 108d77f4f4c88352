//! Wire and view types: posts, profiles, credentials, drafts and like
//! status, plus timestamp parsing and date formatting.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    error::{BoardError, BoardResult},
    labels::{self, Dimension},
    preferences::PostDefaults,
};

/// Author name shown when a post carries no nickname.
pub const ANONYMOUS_AUTHOR: &str = "匿名";

/// A post as the backend serves it. Read-only on the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub country_region: String,
    #[serde(default)]
    pub industry_job: String,
    #[serde(default)]
    pub knowledge_type: String,
    #[serde(default)]
    pub author_id: i64,
    #[serde(default)]
    pub author_nickname: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub likes_count: u64,
}

impl Post {
    /// Nickname for display, falling back to [`ANONYMOUS_AUTHOR`].
    pub fn display_author(&self) -> &str {
        self.author_nickname
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(ANONYMOUS_AUTHOR)
    }

    /// Parsed creation time, if present and well-formed.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }
}

/// Deserialize `null` as the type's default (the pages write `null` and
/// omitted fields interchangeably).
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse an ISO-8601 timestamp. Values without an offset (the backend's
/// naive `datetime` output) are read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

/// `YYYY/MM/DD HH:MM` in the viewer's local time; empty for missing or
/// unparseable input.
pub fn format_post_date(raw: Option<&str>) -> String {
    format_post_date_in(raw, &Local)
}

/// [`format_post_date`] with an explicit time zone.
pub fn format_post_date_in<Tz>(raw: Option<&str>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    raw.and_then(parse_timestamp)
        .map(|at| at.with_timezone(tz).format("%Y/%m/%d %H:%M").to_string())
        .unwrap_or_default()
}

/// `GET /api/users/me` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub country_region: Option<String>,
    #[serde(default)]
    pub industry_job: Option<String>,
}

/// Login / register request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Presence check; the email is trimmed, the password kept verbatim.
    pub fn new(email: &str, password: &str) -> BoardResult<Self> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(BoardError::Validation(
                "メールアドレスとパスワードを入力してください。".to_string(),
            ));
        }
        Ok(Self {
            email: email.to_string(),
            password: password.to_string(),
        })
    }
}

/// `{access_token}` returned by login and register.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl TokenResponse {
    /// The bearer token, rejecting an empty one.
    pub fn into_token(self) -> BoardResult<String> {
        let token = self.access_token.trim().to_string();
        if token.is_empty() {
            return Err(BoardError::Parse("トークンが取得できませんでした。".to_string()));
        }
        Ok(token)
    }
}

/// What the user typed into the new-post form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    /// Knowledge type short code (e.g. `housing`).
    pub type_code: String,
    pub content: String,
}

impl PostDraft {
    /// Presence-check the draft and translate the type code into the
    /// backend label.
    pub fn validate(&self) -> BoardResult<NewPost> {
        let title = self.title.trim();
        let content = self.content.trim();
        let type_code = self.type_code.trim();
        if title.is_empty() || content.is_empty() || type_code.is_empty() {
            return Err(BoardError::Validation("すべての項目を入力してください。".to_string()));
        }
        let knowledge_type = labels::backend_label(Dimension::Type, type_code).ok_or_else(|| {
            BoardError::Validation(format!("知見の種類「{type_code}」は選択できません。"))
        })?;
        Ok(NewPost {
            knowledge_type: knowledge_type.to_string(),
            title: title.to_string(),
            content: content.to_string(),
        })
    }
}

/// `POST /api/posts` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPost {
    pub knowledge_type: String,
    pub title: String,
    pub content: String,
}

/// `PATCH /api/users/me` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    pub country_region: String,
    pub industry_job: String,
}

impl ProfileUpdate {
    /// Build the profile payload from the posting defaults. Both the country
    /// and the industry default must resolve to backend labels.
    pub fn from_defaults(nickname: Option<&str>, defaults: &PostDefaults) -> BoardResult<Self> {
        let country = labels::backend_label(Dimension::Country, &defaults.country);
        let industry = labels::backend_label(Dimension::Industry, &defaults.industry);
        let (Some(country_region), Some(industry_job)) = (country, industry) else {
            return Err(BoardError::Validation(
                "プロフィールの「国・地域」と「業界・職種」を設定してください。".to_string(),
            ));
        };
        Ok(Self {
            nickname: nickname
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string),
            country_region: country_region.to_string(),
            industry_job: industry_job.to_string(),
        })
    }
}

/// Like state of one post as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeStatus {
    pub liked: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub likes_count: u64,
}

/// A post ready for the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostView {
    pub post: Post,
    pub liked: bool,
    pub likes_count: u64,
    /// The signed-in viewer wrote this post and may delete it.
    pub is_own: bool,
}

impl PostView {
    /// Creation time as shown on the card.
    pub fn date_label(&self) -> String {
        format_post_date(self.post.created_at.as_deref())
    }

    pub fn author(&self) -> &str {
        self.post.display_author()
    }
}
