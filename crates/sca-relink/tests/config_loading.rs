use std::{env, fs};

use sca_relink::{Action, RelinkError};
use sca_relink::config::loader::load_config;

#[test]
fn config_file_env_overrides_and_validation() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let path = dir.path().join("sca-relink.toml");

    let toml_content = r#"
[run]
action = "link"
live = false
account_id = "00000"

[files]
linked_projects = "exports/linked.csv"
legacy_apps = "exports/legacy.csv"

[logging]
level = "debug"
file = "relink.log"

[api]
base_url = "http://localhost:9999"
timeout_secs = 5
"#;
    fs::write(&path, toml_content).expect("write toml");

    // 1) Valid config parses
    let cfg = load_config(Some(path.as_path())).expect("should parse config");
    assert_eq!(cfg.run.action, Action::Link);
    assert!(!cfg.run.live);
    assert_eq!(cfg.run.account_id, "00000");
    assert_eq!(cfg.files.legacy_apps.to_str(), Some("exports/legacy.csv"));
    assert_eq!(cfg.logging.level, "debug");
    assert_eq!(cfg.api.base_url.as_deref(), Some("http://localhost:9999"));
    assert_eq!(cfg.api.timeout_secs, 5);
    assert!(cfg.validate().is_ok());

    // 2) Env override should win over file
    unsafe {
        env::set_var("SCA_RELINK__RUN__LIVE", "true");
    }
    let cfg_env = load_config(Some(path.as_path())).expect("should parse config with env overrides");
    assert!(cfg_env.run.live);
    unsafe {
        env::remove_var("SCA_RELINK__RUN__LIVE");
    }

    // 3) Account ids from env keep their leading zeros
    unsafe {
        env::set_var("SCA_RELINK__RUN__ACCOUNT_ID", "00000");
        env::set_var("SCA_RELINK__API__TIMEOUT_SECS", "12");
    }
    let no_account_in_file = dir.path().join("env_account.toml");
    fs::write(&no_account_in_file, "[run]\naction = \"unlink\"\n").expect("write toml");
    let cfg_account = load_config(Some(no_account_in_file.as_path())).expect("env account id");
    unsafe {
        env::remove_var("SCA_RELINK__RUN__ACCOUNT_ID");
        env::remove_var("SCA_RELINK__API__TIMEOUT_SECS");
    }
    assert_eq!(cfg_account.run.account_id, "00000");
    assert_eq!(cfg_account.api.timeout_secs, 12);
    assert!(cfg_account.validate().is_ok());

    // 4) Unknown action is rejected before any record is processed
    let bad_action = dir.path().join("bad_action.toml");
    fs::write(&bad_action, "[run]\naction = \"relink\"\naccount_id = \"1\"\n").expect("write toml");
    let err = load_config(Some(bad_action.as_path())).expect_err("unknown action");
    assert!(matches!(err, RelinkError::Config(ref msg) if msg.contains("deserialize")));

    // 5) Missing account id fails validation
    let no_account = dir.path().join("no_account.toml");
    fs::write(&no_account, "[run]\naction = \"unlink\"\n").expect("write toml");
    let cfg = load_config(Some(no_account.as_path())).expect("parses");
    assert!(cfg.validate().unwrap_err().contains("run.account_id"));

    // 6) Explicit path that does not exist is an error
    let missing = dir.path().join("missing.toml");
    let err = load_config(Some(missing.as_path())).unwrap_err();
    assert!(err.to_string().contains("not found"));
}
