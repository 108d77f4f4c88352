//! Preference Store: the two persisted filter documents.
//!
//! Both documents live in a browser-style key-value store. They are read and
//! written independently and are never reconciled with each other.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::{BoardError, BoardResult},
    filter::FilterSelection,
    labels::{self, Dimension},
    models::{null_as_default, Profile},
};

/// Key of the settings-page document (view filters + post defaults).
pub const PREFERENCES_KEY: &str = "overseasJobSettings";
/// Key of the legacy filter-page document.
pub const LEGACY_FILTERS_KEY: &str = "overseasJobFilters";

/// String key-value storage with `localStorage` semantics: one global
/// document per key, last write wins.
pub trait KeyValueStore {
    /// Stored value, or `None` when missing or unreadable.
    fn get(&self, key: &str) -> Option<String>;
    /// Replace the value under `key`.
    fn set(&self, key: &str, value: &str) -> BoardResult<()>;
    /// Delete `key`; missing keys are ignored.
    fn remove(&self, key: &str);
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> BoardResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

/// In-process store; clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> BoardResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// Single-choice posting defaults; an empty string means "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDefaults {
    #[serde(default, deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(default, rename = "type", deserialize_with = "null_as_default")]
    pub knowledge_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub industry: String,
}

/// How many posting defaults are filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultsStatus {
    NotSet,
    Partial(usize),
    Complete,
}

impl DefaultsStatus {
    /// Label shown next to the defaults section.
    pub fn label(self) -> String {
        match self {
            DefaultsStatus::NotSet => "未設定".to_string(),
            DefaultsStatus::Partial(count) => format!("{count}/3 項目設定済み"),
            DefaultsStatus::Complete => "✓ すべて設定済み".to_string(),
        }
    }
}

impl PostDefaults {
    /// Chosen code for a dimension (empty when unset).
    pub fn get(&self, dimension: Dimension) -> &str {
        match dimension {
            Dimension::Country => &self.country,
            Dimension::Type => &self.knowledge_type,
            Dimension::Industry => &self.industry,
        }
    }

    /// Choose `code` for a dimension; an empty code clears it.
    pub fn set(&mut self, dimension: Dimension, code: &str) {
        let slot = match dimension {
            Dimension::Country => &mut self.country,
            Dimension::Type => &mut self.knowledge_type,
            Dimension::Industry => &mut self.industry,
        };
        *slot = code.trim().to_string();
    }

    /// Fill unset country and industry choices from a server profile whose
    /// labels are in the vocabulary. Returns whether anything changed.
    pub fn fill_from_profile(&mut self, profile: &Profile) -> bool {
        let mut changed = false;
        for (dimension, label) in [
            (Dimension::Country, profile.country_region.as_deref()),
            (Dimension::Industry, profile.industry_job.as_deref()),
        ] {
            if !self.get(dimension).is_empty() {
                continue;
            }
            if let Some(code) = label.and_then(|label| labels::code_for_label(dimension, label.trim())) {
                self.set(dimension, code);
                changed = true;
            }
        }
        changed
    }

    /// Completeness of the three choices.
    pub fn status(&self) -> DefaultsStatus {
        let set = Dimension::ALL
            .into_iter()
            .filter(|dimension| !self.get(*dimension).is_empty())
            .count();
        match set {
            0 => DefaultsStatus::NotSet,
            3 => DefaultsStatus::Complete,
            n => DefaultsStatus::Partial(n),
        }
    }
}

fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PreferencesDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    view_filters: FilterSelection,
    #[serde(default, deserialize_with = "null_as_default")]
    post_defaults: PostDefaults,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    saved_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    nickname: Option<String>,
}

/// Everything restored from the settings document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    pub selection: FilterSelection,
    pub defaults: PostDefaults,
    /// Nickname last saved to the profile from this browser.
    pub nickname: Option<String>,
}

/// Read a JSON document; corrupt data is removed and reported as missing.
fn read_document<S, T>(store: &S, key: &str) -> Option<T>
where
    S: KeyValueStore,
    T: for<'de> Deserialize<'de>,
{
    let raw = store.get(key)?;
    match serde_json::from_str::<T>(&raw) {
        Ok(document) => Some(document),
        Err(err) => {
            tracing::warn!(key, "discarding corrupt stored document: {err}");
            store.remove(key);
            None
        },
    }
}

fn write_document<S, T>(store: &S, key: &str, document: &T) -> BoardResult<()>
where
    S: KeyValueStore,
    T: Serialize,
{
    let raw = serde_json::to_string(document).map_err(|e| BoardError::Storage(e.to_string()))?;
    store.set(key, &raw)
}

/// View filters and posting defaults of the settings page.
#[derive(Debug, Clone)]
pub struct PreferenceStore<S> {
    store: S,
}

impl<S: KeyValueStore> PreferenceStore<S> {
    /// Wrap a key-value store.
    pub fn new(store: S) -> Self {
        Self {
            store,
        }
    }

    /// Restore preferences. Never fails: missing or corrupt data yields
    /// empty filters and defaults.
    pub fn load(&self) -> Preferences {
        let document: PreferencesDocument =
            read_document(&self.store, PREFERENCES_KEY).unwrap_or_default();
        Preferences {
            selection: document.view_filters.normalized(),
            defaults: document.post_defaults,
            nickname: document.nickname,
        }
    }

    /// Persist both sections, stamping `savedAt`. A nickname remembered
    /// earlier is carried over.
    pub fn save(&self, selection: &FilterSelection, defaults: &PostDefaults) -> BoardResult<()> {
        let nickname = self.load().nickname;
        let document = PreferencesDocument {
            view_filters: selection.clone(),
            post_defaults: defaults.clone(),
            saved_at: Some(now_iso()),
            nickname,
        };
        write_document(&self.store, PREFERENCES_KEY, &document)
    }

    /// Keep the nickname last sent to the profile.
    pub fn remember_nickname(&self, nickname: &str) -> BoardResult<()> {
        let mut document: PreferencesDocument =
            read_document(&self.store, PREFERENCES_KEY).unwrap_or_default();
        let nickname = nickname.trim();
        document.nickname = (!nickname.is_empty()).then(|| nickname.to_string());
        write_document(&self.store, PREFERENCES_KEY, &document)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyFilterDocument {
    #[serde(flatten)]
    selection: FilterSelection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    saved_at: Option<String>,
}

/// Filters of the standalone filter page (no posting defaults).
#[derive(Debug, Clone)]
pub struct LegacyFilterStore<S> {
    store: S,
}

impl<S: KeyValueStore> LegacyFilterStore<S> {
    /// Wrap a key-value store.
    pub fn new(store: S) -> Self {
        Self {
            store,
        }
    }

    /// Restore the selection; corrupt data is discarded.
    pub fn load(&self) -> FilterSelection {
        read_document::<_, LegacyFilterDocument>(&self.store, LEGACY_FILTERS_KEY)
            .map(|document| document.selection.normalized())
            .unwrap_or_default()
    }

    /// Persist the selection.
    pub fn save(&self, selection: &FilterSelection) -> BoardResult<()> {
        let document = LegacyFilterDocument {
            selection: selection.clone(),
            saved_at: Some(now_iso()),
        };
        write_document(&self.store, LEGACY_FILTERS_KEY, &document)
    }

    /// Forget the selection entirely.
    pub fn reset(&self) {
        self.store.remove(LEGACY_FILTERS_KEY);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;

    fn selection() -> FilterSelection {
        FilterSelection::from_codes(vec!["usa", "uk"], vec!["visa"], vec![])
    }

    #[test]
    fn missing_document_loads_empty() {
        let prefs = PreferenceStore::new(MemoryStore::new());
        assert_eq!(prefs.load(), Preferences::default());
    }

    #[test]
    fn saved_document_has_the_persisted_shape() {
        let store = MemoryStore::new();
        let prefs = PreferenceStore::new(store.clone());
        let mut defaults = PostDefaults::default();
        defaults.set(Dimension::Country, "canada");
        prefs.save(&selection(), &defaults).expect("save");

        let raw = store.get(PREFERENCES_KEY).expect("stored");
        let json: Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(json["viewFilters"]["country"], serde_json::json!(["usa", "uk"]));
        assert_eq!(json["viewFilters"]["type"], serde_json::json!(["visa"]));
        assert_eq!(json["viewFilters"]["industry"], serde_json::json!([]));
        assert_eq!(json["postDefaults"]["country"], "canada");
        assert_eq!(json["postDefaults"]["type"], "");
        assert!(json["savedAt"].as_str().is_some_and(|at| at.ends_with('Z')));

        let loaded = prefs.load();
        assert_eq!(loaded.selection, selection());
        assert_eq!(loaded.defaults, defaults);
    }

    #[test]
    fn corrupt_document_is_discarded() {
        let store = MemoryStore::new();
        store.set(PREFERENCES_KEY, "{viewFilters: oops").expect("seed");
        let prefs = PreferenceStore::new(store.clone());
        assert_eq!(prefs.load(), Preferences::default());
        assert_eq!(store.get(PREFERENCES_KEY), None);
    }

    #[test]
    fn wrong_shapes_count_as_corruption() {
        let store = MemoryStore::new();
        store
            .set(PREFERENCES_KEY, r#"{"viewFilters":{"country":"usa"}}"#)
            .expect("seed");
        assert_eq!(PreferenceStore::new(store.clone()).load(), Preferences::default());
        assert_eq!(store.get(PREFERENCES_KEY), None);
    }

    #[test]
    fn partial_and_null_sections_default_to_empty() {
        let store = MemoryStore::new();
        store
            .set(
                PREFERENCES_KEY,
                r#"{"viewFilters":{"country":["usa","usa"],"type":null},"postDefaults":null}"#,
            )
            .expect("seed");
        let loaded = PreferenceStore::new(store).load();
        assert_eq!(loaded.selection.codes(Dimension::Country), ["usa".to_string()]);
        assert_eq!(loaded.defaults, PostDefaults::default());
    }

    #[test]
    fn nickname_survives_later_saves() {
        let store = MemoryStore::new();
        let prefs = PreferenceStore::new(store);
        prefs.remember_nickname(" taro ").expect("nickname");
        prefs
            .save(&FilterSelection::default(), &PostDefaults::default())
            .expect("save");
        assert_eq!(prefs.load().nickname.as_deref(), Some("taro"));
    }

    #[test]
    fn legacy_document_is_independent() {
        let store = MemoryStore::new();
        let prefs = PreferenceStore::new(store.clone());
        let legacy = LegacyFilterStore::new(store.clone());

        legacy.save(&selection()).expect("legacy save");
        let raw: Value =
            serde_json::from_str(&store.get(LEGACY_FILTERS_KEY).expect("stored")).expect("json");
        assert_eq!(raw["country"], serde_json::json!(["usa", "uk"]));
        assert!(raw.get("viewFilters").is_none());

        assert!(prefs.load().selection.is_empty());
        assert_eq!(legacy.load(), selection());

        legacy.reset();
        assert!(legacy.load().is_empty());
    }

    #[test]
    fn corrupt_legacy_document_is_removed() {
        let store = MemoryStore::new();
        store.set(LEGACY_FILTERS_KEY, "[1,2,3").expect("seed");
        assert!(LegacyFilterStore::new(store.clone()).load().is_empty());
        assert_eq!(store.get(LEGACY_FILTERS_KEY), None);
    }

    #[test]
    fn defaults_status_counts_choices() {
        let mut defaults = PostDefaults::default();
        assert_eq!(defaults.status(), DefaultsStatus::NotSet);
        defaults.set(Dimension::Type, "visa");
        assert_eq!(defaults.status().label(), "1/3 項目設定済み");
        defaults.set(Dimension::Country, "uk");
        defaults.set(Dimension::Industry, "it");
        assert_eq!(defaults.status(), DefaultsStatus::Complete);
        defaults.set(Dimension::Industry, "");
        assert_eq!(defaults.status(), DefaultsStatus::Partial(2));
    }

    #[test]
    fn profile_fills_only_unset_known_defaults() {
        let profile = Profile {
            id: 7,
            email: "a@b.c".to_string(),
            nickname: None,
            country_region: Some("カナダ".to_string()),
            industry_job: Some("宇宙飛行士".to_string()),
        };

        let mut defaults = PostDefaults::default();
        assert!(defaults.fill_from_profile(&profile));
        assert_eq!(defaults.get(Dimension::Country), "canada");
        assert_eq!(defaults.get(Dimension::Industry), "");
        assert_eq!(defaults.get(Dimension::Type), "");

        let mut chosen = PostDefaults::default();
        chosen.set(Dimension::Country, "uk");
        assert!(!chosen.fill_from_profile(&profile));
        assert_eq!(chosen.get(Dimension::Country), "uk");
    }
}
