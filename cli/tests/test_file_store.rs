use ob_cli::file_store::FileStore;
use overseas_board_shared::{
    preferences::{LEGACY_FILTERS_KEY, PREFERENCES_KEY},
    session::TOKEN_KEY,
    AuthSession, Dimension, FilterSelection, KeyValueStore, LegacyFilterStore, PostDefaults,
    PreferenceStore,
};

#[test]
fn values_survive_a_new_store_instance() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("state").join("board.json");

    let store = FileStore::new(&path);
    assert_eq!(store.get(TOKEN_KEY), None);
    store.set(TOKEN_KEY, "abc").expect("write token");

    let reopened = FileStore::new(&path);
    assert_eq!(reopened.get(TOKEN_KEY).as_deref(), Some("abc"));
    assert!(AuthSession::new(reopened.clone()).session().is_authenticated());

    reopened.remove(TOKEN_KEY);
    assert_eq!(store.get(TOKEN_KEY), None);
}

#[test]
fn documents_are_stored_as_json_strings() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("board.json");
    let store = FileStore::new(&path);

    let selection = FilterSelection::from_codes(vec!["uk"], vec![], vec!["it"]);
    let mut defaults = PostDefaults::default();
    defaults.set(Dimension::Type, "job");
    PreferenceStore::new(store.clone())
        .save(&selection, &defaults)
        .expect("save preferences");
    LegacyFilterStore::new(store.clone())
        .save(&FilterSelection::from_codes(vec!["france"], vec![], vec![]))
        .expect("save legacy filters");

    let raw = std::fs::read_to_string(&path).expect("read state file");
    let file: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&raw).expect("object");
    let document = file[PREFERENCES_KEY].as_str().expect("string value");
    let document: serde_json::Value = serde_json::from_str(document).expect("inner json");
    assert_eq!(document["postDefaults"]["type"], "job");
    assert!(file.contains_key(LEGACY_FILTERS_KEY));

    let loaded = PreferenceStore::new(store).load();
    assert_eq!(loaded.selection, selection);
    assert_eq!(loaded.defaults, defaults);
}

#[test]
fn corrupt_state_file_reads_as_empty_and_is_replaced() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("board.json");
    std::fs::write(&path, "{not json").expect("seed corrupt file");

    let store = FileStore::new(&path);
    assert_eq!(store.get(TOKEN_KEY), None);
    assert!(PreferenceStore::new(store.clone()).load().selection.is_empty());

    store.set(TOKEN_KEY, "fresh").expect("overwrite");
    assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("fresh"));
}

#[test]
fn corrupt_document_inside_a_valid_file_is_dropped() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("board.json");
    let store = FileStore::new(&path);
    store.set(PREFERENCES_KEY, "{\"viewFilters\":").expect("seed");
    store.set(TOKEN_KEY, "keep-me").expect("seed token");

    let prefs = PreferenceStore::new(store.clone()).load();
    assert!(prefs.selection.is_empty());
    assert_eq!(store.get(PREFERENCES_KEY), None);
    assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("keep-me"));
}
