use crate::error::{Result, TrackerError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable holding the tracker API token.
pub const TOKEN_ENV_VAR: &str = "TRACKER_TOKEN";

/// Default build config file name, looked up in the current directory.
pub const BUILD_CONFIG_FILE: &str = "tracker-publish.toml";

/// Default settings file name.
pub const SETTINGS_FILE: &str = "settings.toml";

/// Project identifier as written in the build config.
///
/// Accepts both `project_id = 123` and `project_id = "123"`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ProjectId {
    Number(u64),
    Text(String),
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectId::Number(n) => write!(f, "{}", n),
            ProjectId::Text(s) => f.write_str(s),
        }
    }
}

/// The tracker stanza of the build config.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct TrackerStanza {
    #[serde(default)]
    pub project_id: Option<ProjectId>,

    #[serde(default)]
    pub url: Option<String>,
}

/// Newer layout nesting the tracker stanza under `project_tracking`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct ProjectTrackingConfig {
    #[serde(default)]
    pub tracker: Option<TrackerStanza>,
}

/// Represents the build configuration consumed by tracker-publish.
///
/// Carries the project identity used for release labels and the tracker
/// stanza, under either `[tracker]` or `[project_tracking.tracker]`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct BuildConfig {
    #[serde(default)]
    pub project_name: String,

    #[serde(default)]
    pub version_number: String,

    #[serde(default)]
    pub tracker: Option<TrackerStanza>,

    #[serde(default)]
    pub project_tracking: Option<ProjectTrackingConfig>,
}

impl BuildConfig {
    /// The tracker stanza, preferring the legacy top-level `[tracker]` name.
    pub fn tracker_stanza(&self) -> Option<&TrackerStanza> {
        self.tracker.as_ref().or_else(|| {
            self.project_tracking
                .as_ref()
                .and_then(|pt| pt.tracker.as_ref())
        })
    }
}

/// Machine-level settings; only supplies a fallback tracker url.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Settings {
    #[serde(default)]
    pub tracker: Option<SettingsTracker>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct SettingsTracker {
    #[serde(default)]
    pub url: Option<String>,
}

/// Fully resolved, immutable tracker configuration.
///
/// Built once at startup and borrowed by the fetcher and labeler.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerSettings {
    pub tracker_url: String,
    pub project_id: String,
    pub token: String,
    pub project_name: String,
    pub version_number: String,
}

impl TrackerSettings {
    /// Resolve settings from already-loaded sources.
    ///
    /// Resolution order:
    /// 1. token must be present and non-empty
    /// 2. project id from the build config tracker stanza
    /// 3. url from the build config, falling back to the settings file
    /// 4. project name and version number, both non-empty
    pub fn resolve(
        build: &BuildConfig,
        settings: &Settings,
        token: Option<String>,
    ) -> Result<Self> {
        let token = token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| TrackerError::MissingToken {
                var: TOKEN_ENV_VAR.to_string(),
            })?;

        let stanza = build.tracker_stanza().ok_or_else(|| {
            TrackerError::config(
                "The build config is missing the [tracker] or [project_tracking.tracker] table",
            )
        })?;

        let project_id = stanza
            .project_id
            .as_ref()
            .map(ProjectId::to_string)
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| missing_key("project_id"))?;

        let tracker_url = stanza
            .url
            .clone()
            .or_else(|| settings.tracker.as_ref().and_then(|t| t.url.clone()))
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                TrackerError::config("No tracker url found in build config or settings file.")
            })?;

        // Both feed the release label; an empty one would post junk labels
        let project_name = required(&build.project_name, "project_name")?;
        let version_number = required(&build.version_number, "version_number")?;

        Ok(TrackerSettings {
            tracker_url: tracker_url.trim().trim_end_matches('/').to_string(),
            project_id,
            token,
            project_name,
            version_number,
        })
    }

    /// Resolve settings, reading the token from `TRACKER_TOKEN`.
    pub fn from_env(build: &BuildConfig, settings: &Settings) -> Result<Self> {
        Self::resolve(build, settings, std::env::var(TOKEN_ENV_VAR).ok())
    }
}

fn missing_key(key: &str) -> TrackerError {
    TrackerError::config(format!("The build config tracker table is missing key {}", key))
}

fn required(value: &str, key: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(TrackerError::config(format!("The build config is missing key {}", key)));
    }
    Ok(value.to_string())
}

/// Loads the build configuration.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `tracker-publish.toml` in current directory
///
/// Unlike settings, a missing build config is an error: without it there
/// is no project id to talk to.
pub fn load_build_config(config_path: Option<&str>) -> Result<BuildConfig> {
    let path = config_path.unwrap_or(BUILD_CONFIG_FILE);
    if !Path::new(path).exists() {
        return Err(TrackerError::config(format!("Build config not found: {}", path)));
    }

    let config_str = fs::read_to_string(path)?;
    let config: BuildConfig = toml::from_str(&config_str)?;
    Ok(config)
}

/// Loads the settings file or returns empty settings.
///
/// Attempts to load settings in the following order:
/// 1. Custom path provided as parameter (must exist)
/// 2. `settings.toml` in current directory
/// 3. `<config dir>/tracker-publish/settings.toml`
/// 4. Empty settings if no file found
pub fn load_settings(settings_path: Option<&str>) -> Result<Settings> {
    let path = match settings_path {
        Some(path) => PathBuf::from(path),
        None => match default_settings_path() {
            Some(path) => path,
            None => return Ok(Settings::default()),
        },
    };

    let settings_str = fs::read_to_string(path)?;
    let settings: Settings = toml::from_str(&settings_str)?;
    Ok(settings)
}

fn default_settings_path() -> Option<PathBuf> {
    let local = PathBuf::from(SETTINGS_FILE);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("tracker-publish").join(SETTINGS_FILE))
        .filter(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(toml_str: &str) -> BuildConfig {
        toml::from_str(toml_str).unwrap()
    }

    #[test]
    fn test_legacy_stanza_preferred() {
        let config = build(
            r#"
[tracker]
project_id = 1

[project_tracking.tracker]
project_id = 2
"#,
        );
        assert_eq!(
            config.tracker_stanza().unwrap().project_id,
            Some(ProjectId::Number(1))
        );
    }

    #[test]
    fn test_nested_stanza() {
        let config = build(
            r#"
project_name = "proj"
version_number = "1.0.0"

[project_tracking.tracker]
project_id = "abc"
url = "https://tracker.test"
"#,
        );
        let settings =
            TrackerSettings::resolve(&config, &Settings::default(), Some("tok".to_string()))
                .unwrap();
        assert_eq!(settings.project_id, "abc");
        assert_eq!(settings.tracker_url, "https://tracker.test");
    }

    #[test]
    fn test_url_falls_back_to_settings() {
        let config = build(
            "project_name = \"proj\"\nversion_number = \"1.0.0\"\n[tracker]\nproject_id = 7\n",
        );
        let settings = Settings {
            tracker: Some(SettingsTracker {
                url: Some("https://fallback.test/".to_string()),
            }),
        };

        let resolved =
            TrackerSettings::resolve(&config, &settings, Some("tok".to_string())).unwrap();
        assert_eq!(resolved.tracker_url, "https://fallback.test");
        assert_eq!(resolved.project_id, "7");
    }

    #[test]
    fn test_missing_token() {
        let config = build("[tracker]\nproject_id = 7\nurl = \"u\"\n");
        let err = TrackerSettings::resolve(&config, &Settings::default(), None).unwrap_err();
        assert!(matches!(err, TrackerError::MissingToken { .. }));

        let err = TrackerSettings::resolve(&config, &Settings::default(), Some("  ".to_string()))
            .unwrap_err();
        assert!(matches!(err, TrackerError::MissingToken { .. }));
    }

    #[test]
    fn test_missing_project_id() {
        let config = build("[tracker]\nurl = \"https://tracker.test\"\n");
        let err = TrackerSettings::resolve(&config, &Settings::default(), Some("t".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("project_id"));
    }

    #[test]
    fn test_missing_project_name() {
        let config = build(
            "version_number = \"1.0.0\"\n[tracker]\nproject_id = 7\nurl = \"https://t.test\"\n",
        );
        let err = TrackerSettings::resolve(&config, &Settings::default(), Some("t".to_string()))
            .unwrap_err();
        assert!(matches!(err, TrackerError::Config(_)));
        assert!(err.to_string().contains("missing key project_name"));
    }

    #[test]
    fn test_missing_version_number() {
        let config = build(
            "project_name = \"proj\"\n[tracker]\nproject_id = 7\nurl = \"https://t.test\"\n",
        );
        let err = TrackerSettings::resolve(&config, &Settings::default(), Some("t".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("missing key version_number"));
    }

    #[test]
    fn test_blank_project_name_is_missing() {
        let config = build(
            r#"
project_name = "  "
version_number = "1.0.0"

[tracker]
project_id = 7
url = "u"
"#,
        );
        let err = TrackerSettings::resolve(&config, &Settings::default(), Some("t".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("project_name"));
    }

    #[test]
    fn test_missing_tracker_stanza() {
        let config = build("project_name = \"p\"\n");
        let err = TrackerSettings::resolve(&config, &Settings::default(), Some("t".to_string()))
            .unwrap_err();
        assert!(matches!(err, TrackerError::Config(_)));
        assert!(err.to_string().contains("[project_tracking.tracker]"));
    }

    #[test]
    fn test_missing_url_everywhere() {
        let config = build("[tracker]\nproject_id = 7\n");
        let err = TrackerSettings::resolve(&config, &Settings::default(), Some("t".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("No tracker url"));
    }

    #[test]
    fn test_load_build_config_missing_file() {
        let err = load_build_config(Some("/definitely/not/here.toml")).unwrap_err();
        assert!(err.to_string().contains("Build config not found"));
    }
}
