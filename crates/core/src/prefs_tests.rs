use super::*;
use tempfile::tempdir;

#[test]
fn unknown_key_is_absent_not_error() {
    let prefs = Preferences::with_defaults();
    assert_eq!(prefs.get("nonexistent_key"), None);
}

#[test]
fn known_default_is_present() {
    let prefs = Preferences::with_defaults();
    assert_eq!(prefs.get("tree_show_root").and_then(PrefValue::as_bool), Some(true));
}

#[test]
fn set_then_get_round_trips() {
    let mut prefs = Preferences::with_defaults();
    prefs.set("prompt_length", PrefValue::Int(10)).unwrap();
    assert_eq!(prefs.get("prompt_length").and_then(PrefValue::as_int), Some(10));
}

#[test]
fn bookmarks_add_and_delete() {
    let mut prefs = Preferences::with_defaults();
    prefs.bookmark_add("here", "/a/x").unwrap();
    assert_eq!(prefs.bookmarks().get("here").map(String::as_str), Some("/a/x"));

    let existed = prefs.bookmark_del("here").unwrap();
    assert!(existed);
    assert!(prefs.bookmarks().get("here").is_none());

    let existed_again = prefs.bookmark_del("here").unwrap();
    assert!(!existed_again);
}

#[test]
fn autosave_persists_and_load_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("prefs.json");

    let mut prefs = Preferences::with_defaults();
    prefs.set_path(&path);
    prefs.set_autosave(true);
    prefs.set("prompt_length", PrefValue::Int(42)).unwrap();

    let reloaded = Preferences::load(&path, true).unwrap();
    assert_eq!(reloaded.get("prompt_length").and_then(PrefValue::as_int), Some(42));
}

#[test]
fn load_with_backend_uses_the_supplied_backend_instead_of_the_filesystem() {
    use std::cell::RefCell;
    use std::path::Path;
    use std::rc::Rc;

    #[derive(Default)]
    struct MemoryBackend {
        saved: Rc<RefCell<Option<HashMap<String, PrefValue>>>>,
    }

    impl PreferencesBackend for MemoryBackend {
        fn load(&self, _path: &Path) -> Result<HashMap<String, PrefValue>, ConfigShellError> {
            let mut seeded = HashMap::new();
            seeded.insert("prompt_length".to_string(), PrefValue::Int(7));
            Ok(seeded)
        }

        fn save(&self, _path: &Path, values: &HashMap<String, PrefValue>) -> Result<(), ConfigShellError> {
            *self.saved.borrow_mut() = Some(values.clone());
            Ok(())
        }
    }

    let saved = Rc::new(RefCell::new(None));
    let backend = MemoryBackend { saved: saved.clone() };
    let mut prefs =
        Preferences::load_with_backend("irrelevant/path.json", true, Box::new(backend)).unwrap();
    assert_eq!(prefs.get("prompt_length").and_then(PrefValue::as_int), Some(7));

    prefs.set("prompt_length", PrefValue::Int(8)).unwrap();
    let recorded = saved.borrow();
    assert_eq!(
        recorded.as_ref().and_then(|m| m.get("prompt_length")).and_then(PrefValue::as_int),
        Some(8)
    );
}

#[test]
fn missing_file_on_load_is_not_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("does-not-exist.json");
    let prefs = Preferences::load(&path, true).unwrap();
    assert_eq!(prefs.get("tree_show_root").and_then(PrefValue::as_bool), Some(true));
}

#[test]
fn record_path_truncates_forward_history_on_new_branch() {
    let mut prefs = Preferences::with_defaults();
    prefs.record_path("/a").unwrap();
    prefs.record_path("/a/x").unwrap();
    prefs.record_path("/a/y").unwrap();
    assert_eq!(prefs.path_history(), vec!["/a", "/a/x", "/a/y"]);

    // Step back twice, then branch: history after the current index is dropped.
    prefs.history_step(HistoryDirection::Back, |_| true).unwrap();
    prefs.history_step(HistoryDirection::Back, |_| true).unwrap();
    prefs.record_path("/b").unwrap();
    assert_eq!(prefs.path_history(), vec!["/a", "/b"]);
}

#[test]
fn history_back_then_forward_returns_to_same_path() {
    let mut prefs = Preferences::with_defaults();
    prefs.record_path("/a").unwrap();
    prefs.record_path("/a/x").unwrap();

    let back = prefs.history_step(HistoryDirection::Back, |_| true).unwrap();
    assert_eq!(back.as_deref(), Some("/a"));

    let forward = prefs.history_step(HistoryDirection::Forward, |_| true).unwrap();
    assert_eq!(forward.as_deref(), Some("/a/x"));
}

#[test]
fn history_step_skips_unresolvable_entries() {
    let mut prefs = Preferences::with_defaults();
    prefs.record_path("/a").unwrap();
    prefs.record_path("/gone").unwrap();
    prefs.record_path("/b").unwrap();

    let back = prefs
        .history_step(HistoryDirection::Back, |p| p != "/gone")
        .unwrap();
    assert_eq!(back.as_deref(), Some("/a"));
}

#[test]
fn history_step_past_the_end_stays_put() {
    let mut prefs = Preferences::with_defaults();
    prefs.record_path("/a").unwrap();
    let result = prefs.history_step(HistoryDirection::Forward, |_| true).unwrap();
    assert_eq!(result, None);
    assert_eq!(prefs.path_history_index(), 0);
}
