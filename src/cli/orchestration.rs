//! Main workflow orchestration logic
//!
//! Composes the fetcher, resolver and labeler into the release step a build
//! runs. Kept apart from argument parsing so it can be called as a library
//! function from another pipeline.

use semver::Version;
use tracing::info;

use crate::analyzer;
use crate::config::TrackerSettings;
use crate::domain::{next_version, parse_version, BumpType, ReleaseLabel, StoryId};
use crate::error::Result;
use crate::tracker::{StoryFetcher, StoryLabeler, TagSummary, Transport};

/// Arguments for the release workflow
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReleaseWorkflowArgs {
    /// Stories referenced by the commits being released
    pub story_ids: Vec<StoryId>,

    /// Resolve and report, but post no labels
    pub dry_run: bool,

    /// Skip the labeling step
    pub skip_tagging: bool,
}

/// Result of a successful release workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// Bump decided from the fetched stories
    pub bump: BumpType,

    /// Version number from the build config
    pub current_version: Version,

    /// Version after applying `bump`
    pub next_version: Version,

    /// Label attached (or that would be attached) to the stories
    pub label: ReleaseLabel,

    /// Number of stories the tracker returned
    pub fetched: usize,

    /// `None` when labeling was skipped
    pub tagging: Option<TagSummary>,
}

/// Fetch story details and resolve the bump type.
pub fn determine_bump<T: Transport>(
    settings: &TrackerSettings,
    transport: &T,
    story_ids: &[StoryId],
) -> Result<BumpType> {
    let details = StoryFetcher::new(settings, transport).fetch_all(story_ids)?;
    Ok(analyzer::resolve(&details))
}

/// Label stories with `<project_name>-<version_number>`.
pub fn tag_stories<T: Transport>(
    settings: &TrackerSettings,
    transport: &T,
    story_ids: &[StoryId],
) -> TagSummary {
    let label = ReleaseLabel::for_release(&settings.project_name, &settings.version_number);
    StoryLabeler::new(settings, transport).tag_all(story_ids, &label)
}

/// Main release workflow
///
/// 1. Parse the configured version number
/// 2. Fetch story details (fatal if the tracker is unreachable)
/// 3. Resolve the bump type and compute the next version
/// 4. Label the stories, unless `dry_run` or `skip_tagging`
pub fn run_release_workflow<T: Transport>(
    args: &ReleaseWorkflowArgs,
    settings: &TrackerSettings,
    transport: &T,
) -> Result<WorkflowResult> {
    let current_version = parse_version(&settings.version_number)?;

    let details = StoryFetcher::new(settings, transport).fetch_all(&args.story_ids)?;
    let bump = analyzer::resolve(&details);
    let next = next_version(&current_version, bump);
    info!(%bump, current = %current_version, next = %next, "release version decided");

    let label = ReleaseLabel::for_release(&settings.project_name, &settings.version_number);
    let tagging = if args.dry_run || args.skip_tagging {
        None
    } else {
        Some(StoryLabeler::new(settings, transport).tag_all(&args.story_ids, &label))
    };

    Ok(WorkflowResult {
        bump,
        current_version,
        next_version: next,
        label,
        fetched: details.len(),
        tagging,
    })
}
