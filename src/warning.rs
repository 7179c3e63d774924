use std::fmt;

/// Recoverable problems met while talking to the tracker.
/// These never stop the run; they are logged and reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum StoryWarning {
    /// Story fetch answered with a non-200 status; the story is skipped
    FetchRejected {
        url: String,
        status: u16,
        body: String,
    },
    /// Label post answered with a non-200 status
    LabelRejected {
        story_id: String,
        label: String,
        status: u16,
        body: String,
    },
    /// Tracker could not be reached while labeling
    LabelUnreachable {
        story_id: String,
        label: String,
        reason: String,
    },
    /// Any other failure while labeling
    LabelFailed {
        story_id: String,
        label: String,
        reason: String,
    },
}

impl StoryWarning {
    /// The story id the warning refers to, when known.
    pub fn story_id(&self) -> Option<&str> {
        match self {
            StoryWarning::FetchRejected { .. } => None,
            StoryWarning::LabelRejected { story_id, .. }
            | StoryWarning::LabelUnreachable { story_id, .. }
            | StoryWarning::LabelFailed { story_id, .. } => Some(story_id),
        }
    }
}

impl fmt::Display for StoryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoryWarning::FetchRejected { url, status, body } => {
                write!(
                    f,
                    "Failed retrieving story detail from call to {} (status {}). Response: {}",
                    url, status, body
                )
            }
            StoryWarning::LabelRejected {
                story_id,
                label,
                status,
                body,
            } => {
                write!(
                    f,
                    "Unable to tag story {} with label {} (status {}). Response: {}",
                    story_id, label, status, body
                )
            }
            StoryWarning::LabelUnreachable {
                story_id,
                label,
                reason,
            } => {
                write!(
                    f,
                    "Request to tracker timed out while tagging story {} with label {}: {}",
                    story_id, label, reason
                )
            }
            StoryWarning::LabelFailed {
                story_id,
                label,
                reason,
            } => {
                write!(
                    f,
                    "Unable to tag story {} with label {}: {}",
                    story_id, label, reason
                )
            }
        }
    }
}
