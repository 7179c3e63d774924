//! User interface module.
//!
//! All output goes through `formatter`; the tool never prompts, since it runs
//! unattended inside a build.

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_bump_decision, display_error, display_status, display_story_ids,
    display_story_table, display_success, display_tag_summary, format_tag_summary,
};
