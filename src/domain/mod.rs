//! Domain logic - pure values and rules independent of the tracker transport

pub mod bump;
pub mod label;
pub mod reference;
pub mod story;
pub mod version;

pub use bump::BumpType;
pub use label::ReleaseLabel;
pub use reference::extract_story_ids;
pub use story::{StoryDetail, StoryId};
pub use version::{next_version, parse_version};
