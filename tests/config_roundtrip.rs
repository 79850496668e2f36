use taskdeck::config::Config;
use taskdeck::view::{Filter, SortMode};

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let config = Config {
        filter: Filter::Completed,
        sort: SortMode::Priority,
    };
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path);
    assert_eq!(loaded, config);
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = Config::load_from(&dir.path().join("nope.toml"));
    assert_eq!(loaded, Config::default());
}

#[test]
fn garbage_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "sort = 12\nfilter = [").unwrap();

    let loaded = Config::load_from(&path);
    assert_eq!(loaded, Config::default());
}

#[test]
fn save_leaves_no_tmp_file_behind() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    Config::default().save_to(&path).unwrap();

    assert!(path.exists());
    assert!(!path.with_extension("tmp").exists());
}
