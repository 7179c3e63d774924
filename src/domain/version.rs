use crate::domain::BumpType;
use crate::error::{Result, TrackerError};
use semver::Version;

/// Parse a version number from the build config (e.g., "2.3.0" or "v2.3.0")
pub fn parse_version(raw: &str) -> Result<Version> {
    // Remove 'v' or 'V' prefix
    let clean = raw.trim().trim_start_matches('v').trim_start_matches('V');

    Version::parse(clean).map_err(|e| {
        TrackerError::version(format!(
            "Invalid version number '{}' - expected X.Y.Z: {}",
            raw, e
        ))
    })
}

/// Bump version according to bump type
///
/// Pre-release and build metadata are dropped from the result.
pub fn next_version(current: &Version, bump: BumpType) -> Version {
    match bump {
        BumpType::Major => Version::new(current.major + 1, 0, 0),
        BumpType::Minor => Version::new(current.major, current.minor + 1, 0),
        BumpType::Bug => Version::new(current.major, current.minor, current.patch + 1),
    }
}
