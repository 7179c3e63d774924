use std::fmt;

/// Release label attached to every story shipped in a build.
///
/// Built as `<project_name>-<version_number>`; the original casing is kept
/// for log output and only lower-cased at submission time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseLabel {
    text: String,
}

impl ReleaseLabel {
    pub fn new(text: impl Into<String>) -> Self {
        ReleaseLabel { text: text.into() }
    }

    /// Label for a project release, e.g. `MyProj` + `2.3.0` -> `MyProj-2.3.0`
    pub fn for_release(project_name: &str, version_number: &str) -> Self {
        ReleaseLabel::new(format!("{}-{}", project_name, version_number))
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The form posted to the tracker.
    pub fn submitted(&self) -> String {
        self.text.to_lowercase()
    }
}

impl fmt::Display for ReleaseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for ReleaseLabel {
    fn from(text: &str) -> Self {
        ReleaseLabel::new(text)
    }
}
