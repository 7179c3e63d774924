// tests/config_test.rs
use serial_test::serial;
use std::io::Write;
use tempfile::NamedTempFile;
use tracker_publish::config::{
    load_build_config, load_settings, BuildConfig, ProjectId, TrackerSettings, TOKEN_ENV_VAR,
};
use tracker_publish::TrackerError;

fn write_temp(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_build_config_from_file() {
    let temp_file = write_temp(
        r#"
project_name = "MyProj"
version_number = "2.3.0"

[tracker]
project_id = 123456
url = "https://www.pivotaltracker.com"
"#,
    );

    let config = load_build_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.project_name, "MyProj");
    assert_eq!(config.version_number, "2.3.0");
    let stanza = config.tracker_stanza().unwrap();
    assert_eq!(stanza.project_id, Some(ProjectId::Number(123456)));
    assert_eq!(stanza.url.as_deref(), Some("https://www.pivotaltracker.com"));
}

#[test]
fn test_load_build_config_invalid_toml() {
    let temp_file = write_temp("project_name = [unclosed");
    let err = load_build_config(Some(temp_file.path().to_str().unwrap())).unwrap_err();
    assert!(matches!(err, TrackerError::ConfigParse(_)));
}

#[test]
fn test_load_settings_from_file() {
    let temp_file = write_temp("[tracker]\nurl = \"https://settings.test\"\n");
    let settings = load_settings(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(
        settings.tracker.and_then(|t| t.url).as_deref(),
        Some("https://settings.test")
    );
}

#[test]
fn test_default_build_config_is_empty() {
    let config = BuildConfig::default();
    assert!(config.tracker_stanza().is_none());
    assert!(config.project_name.is_empty());
}

#[test]
#[serial]
fn test_from_env_reads_token() {
    let build: BuildConfig = toml::from_str(
        r#"
project_name = "proj"
version_number = "1.0.0"

[tracker]
project_id = "55"
url = "https://tracker.test"
"#,
    )
    .unwrap();

    std::env::set_var(TOKEN_ENV_VAR, "env-token");
    let settings = TrackerSettings::from_env(&build, &Default::default());
    std::env::remove_var(TOKEN_ENV_VAR);

    let settings = settings.unwrap();
    assert_eq!(settings.token, "env-token");
    assert_eq!(settings.project_id, "55");
    assert_eq!(settings.project_name, "proj");
}

#[test]
#[serial]
fn test_from_env_without_token_is_fatal() {
    let build: BuildConfig =
        toml::from_str("[tracker]\nproject_id = 1\nurl = \"https://tracker.test\"\n").unwrap();

    std::env::remove_var(TOKEN_ENV_VAR);
    let err = TrackerSettings::from_env(&build, &Default::default()).unwrap_err();
    assert!(matches!(err, TrackerError::MissingToken { .. }));
    assert_eq!(err.exit_code(), 1);
}
