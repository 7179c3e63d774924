//! Command-line workflow entry points

pub mod orchestration;

pub use orchestration::{
    determine_bump, run_release_workflow, tag_stories, ReleaseWorkflowArgs, WorkflowResult,
};
