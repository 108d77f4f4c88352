//! Text and JSON rendering for command results.

use std::fmt::Write as _;

use anyhow::Result;
use overseas_board_shared::{
    labels, Dimension, FilterSelection, FilterSummary, PostDefaults, PostView, Profile,
};
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// JSON shape of one listed post.
#[derive(Debug, Serialize)]
pub struct PostRow<'a> {
    pub id: i64,
    pub title: &'a str,
    pub content: &'a str,
    pub author: &'a str,
    pub author_id: i64,
    pub created_at: Option<&'a str>,
    pub country_region: &'a str,
    pub knowledge_type: &'a str,
    pub industry_job: &'a str,
    pub likes_count: u64,
    pub liked: bool,
    pub is_own: bool,
}

impl<'a> From<&'a PostView> for PostRow<'a> {
    fn from(view: &'a PostView) -> Self {
        Self {
            id: view.post.id,
            title: &view.post.title,
            content: &view.post.content,
            author: view.author(),
            author_id: view.post.author_id,
            created_at: view.post.created_at.as_deref(),
            country_region: &view.post.country_region,
            knowledge_type: &view.post.knowledge_type,
            industry_job: &view.post.industry_job,
            likes_count: view.likes_count,
            liked: view.liked,
            is_own: view.is_own,
        }
    }
}

/// One block per post, heart and own-post marker first.
pub fn render_posts(views: &[PostView]) -> String {
    if views.is_empty() {
        return "投稿がありません。\n".to_string();
    }
    let mut out = String::new();
    for view in views {
        let heart = if view.liked { "♥" } else { "♡" };
        let own = if view.is_own { " (自分の投稿)" } else { "" };
        let _ = writeln!(out, "#{} {}{own}", view.post.id, view.post.title);
        let _ = writeln!(
            out,
            "   {} | {} | {} | {}",
            view.post.country_region, view.post.knowledge_type, view.post.industry_job, view.author()
        );
        let date = view.date_label();
        if date.is_empty() {
            let _ = writeln!(out, "   {heart} {}", view.likes_count);
        } else {
            let _ = writeln!(out, "   {heart} {}  {date}", view.likes_count);
        }
        for line in view.post.content.lines() {
            let _ = writeln!(out, "   > {line}");
        }
    }
    out
}

/// Status line followed by one line per dimension.
pub fn render_selection(selection: &FilterSelection) -> String {
    let summary = FilterSummary::of(selection);
    let mut out = format!("{}\n", summary.message());
    for dimension in Dimension::ALL {
        let chips: Vec<String> = selection
            .codes(dimension)
            .iter()
            .map(|code| labels::chip_label(dimension, code))
            .collect();
        let shown = if chips.is_empty() { "-".to_string() } else { chips.join(", ") };
        let _ = writeln!(out, "{}: {shown}", dimension.title());
    }
    out
}

pub fn render_defaults(defaults: &PostDefaults) -> String {
    let mut out = format!("{}\n", defaults.status().label());
    for dimension in Dimension::ALL {
        let code = defaults.get(dimension);
        let shown = if code.is_empty() {
            "未設定".to_string()
        } else {
            format!("{code} ({})", labels::chip_label(dimension, code))
        };
        let _ = writeln!(out, "{}: {shown}", dimension.title());
    }
    out
}

pub fn render_labels(dimension: Dimension) -> String {
    let mut out = format!("[{}] {}\n", dimension, dimension.title());
    for code in labels::codes(dimension) {
        let backend = labels::backend_label(dimension, code).unwrap_or_default();
        let _ = writeln!(out, "  {code:<14} {backend:<16} {}", labels::chip_label(dimension, code));
    }
    out
}

pub fn render_profile(profile: &Profile) -> String {
    let unset = || "-".to_string();
    format!(
        "id: {}\nemail: {}\nnickname: {}\n国・地域: {}\n業界・職種: {}\n",
        profile.id,
        profile.email,
        profile.nickname.clone().unwrap_or_else(unset),
        profile.country_region.clone().unwrap_or_else(unset),
        profile.industry_job.clone().unwrap_or_else(unset),
    )
}
