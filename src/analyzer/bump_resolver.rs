use crate::domain::{BumpType, StoryDetail};
use tracing::debug;

/// Label name that forces a major release regardless of anything else.
pub const MAJOR_LABEL: &str = "major";

/// Story types that call for a minor release.
pub const MINOR_STORY_TYPES: [&str; 3] = ["feature", "chore", "release"];

/// Story type that calls for a patch release.
pub const BUG_STORY_TYPE: &str = "bug";

/// Determine the semantic version bump from fetched story details
///
/// Single left-to-right pass:
/// - a `major` label on any story returns [BumpType::Major] at once
/// - a feature/chore/release story sets the running result to minor,
///   overwriting an earlier bug
/// - a bug story sets it to bug only while nothing has been decided yet,
///   so it never overwrites an earlier minor
///
/// With no decisive story the result is [BumpType::Minor].
pub fn resolve(details: &[StoryDetail]) -> BumpType {
    let mut bump_type: Option<BumpType> = None;

    for story in details {
        if story.label_names().any(|name| name == MAJOR_LABEL) {
            debug!(story = ?story.id(), "major label found");
            return BumpType::Major;
        }

        match story.story_type() {
            Some(kind) if MINOR_STORY_TYPES.contains(&kind) => bump_type = Some(BumpType::Minor),
            Some(BUG_STORY_TYPE) if bump_type.is_none() => bump_type = Some(BumpType::Bug),
            _ => {}
        }
    }

    // No stories, or none with a recognized type
    let bump_type = bump_type.unwrap_or_default();
    debug!(%bump_type, "bump type resolved");
    bump_type
}
