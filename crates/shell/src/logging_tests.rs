use super::*;
use configshell_core::{PrefValue, Preferences};
use serial_test::serial;

#[test]
#[serial]
fn init_with_logfile_returns_a_guard() {
    let tmp = tempfile::tempdir().unwrap();
    let logfile = tmp.path().join("log.txt");

    let mut prefs = Preferences::with_defaults();
    prefs.set("logfile", PrefValue::Str(logfile.to_string_lossy().to_string())).unwrap();

    let guard = init(&prefs);
    assert!(guard.is_some());
}

#[test]
fn file_appender_accepts_nested_directory_free_filename() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("log.txt");
    let (_appender, _guard) = file_appender(&path);
}
