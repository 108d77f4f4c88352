//! Filter Engine: multi-select short codes per dimension, translated into the
//! backend vocabulary and applied to a post list.
//!
//! Semantics: AND across dimensions, OR inside one dimension. A dimension
//! whose codes all lack a label mapping imposes no constraint, and an empty
//! selection returns the input unchanged.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
    labels::{self, Dimension},
    models::{null_as_default, Post},
};

/// Codes chosen by the user, one duplicate-free list per dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    #[serde(default, deserialize_with = "null_as_default")]
    country: Vec<String>,
    #[serde(default, rename = "type", deserialize_with = "null_as_default")]
    knowledge_type: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    industry: Vec<String>,
}

impl FilterSelection {
    /// Build a selection from per-dimension code lists.
    pub fn from_codes<I, S>(country: I, knowledge_type: I, industry: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selection = Self::default();
        for (dimension, values) in [
            (Dimension::Country, country),
            (Dimension::Type, knowledge_type),
            (Dimension::Industry, industry),
        ] {
            for value in values {
                selection.insert(dimension, value);
            }
        }
        selection
    }

    /// Selected codes of one dimension, in selection order.
    pub fn codes(&self, dimension: Dimension) -> &[String] {
        match dimension {
            Dimension::Country => &self.country,
            Dimension::Type => &self.knowledge_type,
            Dimension::Industry => &self.industry,
        }
    }

    fn codes_mut(&mut self, dimension: Dimension) -> &mut Vec<String> {
        match dimension {
            Dimension::Country => &mut self.country,
            Dimension::Type => &mut self.knowledge_type,
            Dimension::Industry => &mut self.industry,
        }
    }

    /// Whether `code` is selected in `dimension`.
    pub fn contains(&self, dimension: Dimension, code: &str) -> bool {
        self.codes(dimension).iter().any(|value| value == code)
    }

    /// Add a code; returns `false` when it was already selected or blank.
    pub fn insert(&mut self, dimension: Dimension, code: impl Into<String>) -> bool {
        let code = code.into().trim().to_string();
        if code.is_empty() || self.contains(dimension, &code) {
            return false;
        }
        self.codes_mut(dimension).push(code);
        true
    }

    /// Remove a code; returns whether it was present.
    pub fn remove(&mut self, dimension: Dimension, code: &str) -> bool {
        let values = self.codes_mut(dimension);
        let before = values.len();
        values.retain(|value| value != code);
        values.len() != before
    }

    /// Flip a chip. Returns the new selected state.
    pub fn toggle(&mut self, dimension: Dimension, code: &str) -> bool {
        if self.remove(dimension, code) {
            false
        } else {
            self.insert(dimension, code)
        }
    }

    /// Drop every selected code.
    pub fn clear(&mut self) {
        self.country.clear();
        self.knowledge_type.clear();
        self.industry.clear();
    }

    /// No dimension has a selected code.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Number of selected codes across all dimensions.
    pub fn total(&self) -> usize {
        self.country.len() + self.knowledge_type.len() + self.industry.len()
    }

    /// Trim, drop blanks and collapse duplicates (persisted data may be
    /// hand-edited or written by an older page).
    pub fn normalized(self) -> Self {
        let mut cleaned = Self::default();
        for dimension in Dimension::ALL {
            for code in self.codes(dimension) {
                cleaned.insert(dimension, code.as_str());
            }
        }
        cleaned
    }
}

/// How the type dimension is matched against `knowledge_type`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeMatching {
    /// Compare raw short codes with the post label. This is what the post
    /// list has always done, so a type filter rarely matches anything.
    #[default]
    RawCode,
    /// Translate type codes through the type label map first.
    Label,
}

struct Constraint<'a> {
    dimension: Dimension,
    accepted: HashSet<&'a str>,
}

fn constraint<'a>(
    selection: &'a FilterSelection,
    dimension: Dimension,
    type_matching: TypeMatching,
) -> Option<Constraint<'a>> {
    let codes = selection.codes(dimension);
    let accepted: HashSet<&str> = if dimension == Dimension::Type && type_matching == TypeMatching::RawCode
    {
        codes.iter().map(String::as_str).collect()
    } else {
        codes
            .iter()
            .filter_map(|code| labels::backend_label(dimension, code))
            .collect()
    };
    (!accepted.is_empty()).then_some(Constraint {
        dimension,
        accepted,
    })
}

fn post_label(post: &Post, dimension: Dimension) -> &str {
    match dimension {
        Dimension::Country => &post.country_region,
        Dimension::Type => &post.knowledge_type,
        Dimension::Industry => &post.industry_job,
    }
}

/// Keep the posts matching `selection`, preserving input order.
pub fn filter_posts(posts: &[Post], selection: &FilterSelection, type_matching: TypeMatching) -> Vec<Post> {
    if selection.is_empty() {
        return posts.to_vec();
    }

    let constraints: Vec<Constraint<'_>> = Dimension::ALL
        .into_iter()
        .filter_map(|dimension| constraint(selection, dimension, type_matching))
        .collect();

    posts
        .iter()
        .filter(|post| {
            constraints
                .iter()
                .all(|c| c.accepted.contains(post_label(post, c.dimension)))
        })
        .cloned()
        .collect()
}

/// Status line and chips describing the active filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSummary {
    pub total: usize,
    /// `(dimension, code, chip label)` for each selected code.
    pub chips: Vec<(Dimension, String, String)>,
}

impl FilterSummary {
    /// Summarize a selection for display.
    pub fn of(selection: &FilterSelection) -> Self {
        let chips = Dimension::ALL
            .into_iter()
            .flat_map(|dimension| {
                selection
                    .codes(dimension)
                    .iter()
                    .map(move |code| (dimension, code.clone(), labels::chip_label(dimension, code)))
            })
            .collect::<Vec<_>>();
        Self {
            total: chips.len(),
            chips,
        }
    }

    /// `すべての投稿を表示中` or `N件のフィルターで絞り込み中`.
    pub fn message(&self) -> String {
        if self.total == 0 {
            "すべての投稿を表示中".to_string()
        } else {
            format!("{}件のフィルターで絞り込み中", self.total)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: i64, country: &str, knowledge_type: &str, industry: &str) -> Post {
        Post {
            id,
            title: format!("post {id}"),
            content: String::new(),
            country_region: country.to_string(),
            industry_job: industry.to_string(),
            knowledge_type: knowledge_type.to_string(),
            author_id: 1,
            author_nickname: None,
            created_at: None,
            likes_count: 0,
        }
    }

    fn sample() -> Vec<Post> {
        vec![
            post(1, "アメリカ合衆国", "住居", "IT・エンジニア"),
            post(2, "カナダ", "ビザ", "金融"),
            post(3, "アメリカ合衆国", "ビザ", "金融"),
            post(4, "ドイツ", "housing", "医療"),
        ]
    }

    fn ids(posts: &[Post]) -> Vec<i64> {
        posts.iter().map(|post| post.id).collect()
    }

    #[test]
    fn empty_selection_is_identity() {
        let posts = sample();
        let filtered = filter_posts(&posts, &FilterSelection::default(), TypeMatching::RawCode);
        assert_eq!(filtered, posts);
    }

    #[test]
    fn country_code_keeps_only_matching_label() {
        let posts = vec![post(1, "アメリカ合衆国", "住居", "金融"), post(2, "カナダ", "住居", "金融")];
        let selection = FilterSelection::from_codes(vec!["usa"], vec![], vec![]);
        assert_eq!(ids(&filter_posts(&posts, &selection, TypeMatching::RawCode)), vec![1]);
    }

    #[test]
    fn unmapped_codes_impose_no_constraint() {
        let posts = sample();
        let selection = FilterSelection::from_codes(vec!["atlantis"], vec![], vec!["astronaut"]);
        assert_eq!(filter_posts(&posts, &selection, TypeMatching::RawCode), posts);
    }

    #[test]
    fn and_across_dimensions_or_within() {
        let posts = sample();
        let selection = FilterSelection::from_codes(vec!["usa", "canada"], vec![], vec!["finance"]);
        assert_eq!(ids(&filter_posts(&posts, &selection, TypeMatching::RawCode)), vec![2, 3]);
    }

    #[test]
    fn type_dimension_compares_raw_codes_by_default() {
        let posts = sample();
        let selection = FilterSelection::from_codes(vec![], vec!["housing"], vec![]);
        assert_eq!(ids(&filter_posts(&posts, &selection, TypeMatching::RawCode)), vec![4]);
        assert_eq!(ids(&filter_posts(&posts, &selection, TypeMatching::Label)), vec![1]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let posts = sample();
        let selection = FilterSelection::from_codes(vec!["usa"], vec!["visa"], vec!["finance"]);
        for matching in [TypeMatching::RawCode, TypeMatching::Label] {
            let once = filter_posts(&posts, &selection, matching);
            assert_eq!(filter_posts(&once, &selection, matching), once);
        }
    }

    #[test]
    fn toggle_keeps_codes_unique() {
        let mut selection = FilterSelection::default();
        assert!(selection.toggle(Dimension::Country, "usa"));
        assert!(!selection.insert(Dimension::Country, "usa"));
        assert_eq!(selection.total(), 1);
        assert!(!selection.toggle(Dimension::Country, "usa"));
        assert!(selection.is_empty());
    }

    #[test]
    fn normalization_collapses_duplicates() {
        let raw: FilterSelection =
            serde_json::from_str(r#"{"country":["usa"," usa ","","uk"],"type":["visa"]}"#).expect("json");
        let cleaned = raw.normalized();
        assert_eq!(cleaned.codes(Dimension::Country), ["usa".to_string(), "uk".to_string()]);
        assert!(cleaned.codes(Dimension::Industry).is_empty());
    }

    #[test]
    fn summary_lists_chips_in_dimension_order() {
        let selection = FilterSelection::from_codes(vec!["usa"], vec!["visa"], vec!["robotics"]);
        let summary = FilterSummary::of(&selection);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.message(), "3件のフィルターで絞り込み中");
        let labels: Vec<&str> = summary.chips.iter().map(|(_, _, label)| label.as_str()).collect();
        assert_eq!(labels, vec!["🇺🇸 アメリカ", "📋 ビザ", "robotics"]);
        assert_eq!(FilterSummary::of(&FilterSelection::default()).message(), "すべての投稿を表示中");
    }
}
