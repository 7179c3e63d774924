use crate::config::TrackerSettings;
use crate::domain::{ReleaseLabel, StoryId};
use crate::tracker::{labels_url, TrackerRequest, Transport, TransportError};
use crate::warning::StoryWarning;
use serde_json::json;
use tracing::{debug, info, warn};

/// Outcome of a labeling pass
///
/// Informational only: labeling is best-effort and a warning here never
/// fails the build.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagSummary {
    pub tagged: Vec<StoryId>,
    pub warnings: Vec<StoryWarning>,
}

impl TagSummary {
    pub fn attempted(&self) -> usize {
        self.tagged.len() + self.warnings.len()
    }
}

/// Attaches a release label to stories
///
/// Each story is attempted exactly once, with no retries. Labels are not
/// checked for existence first, so re-running may post a duplicate.
pub struct StoryLabeler<'a, T: Transport> {
    settings: &'a TrackerSettings,
    transport: &'a T,
}

impl<'a, T: Transport> StoryLabeler<'a, T> {
    pub fn new(settings: &'a TrackerSettings, transport: &'a T) -> Self {
        StoryLabeler {
            settings,
            transport,
        }
    }

    /// Label every story, continuing past any failure
    pub fn tag_all(&self, story_ids: &[StoryId], label: &ReleaseLabel) -> TagSummary {
        info!(count = story_ids.len(), %label, "tagging stories");

        let mut summary = TagSummary::default();
        for story_id in story_ids {
            match self.add_label(story_id, label) {
                Ok(()) => summary.tagged.push(story_id.clone()),
                Err(warning) => summary.warnings.push(warning),
            }
        }

        info!(
            tagged = summary.tagged.len(),
            skipped = summary.warnings.len(),
            "tagging finished"
        );
        summary
    }

    /// Post `label` (lower-cased) onto one story
    ///
    /// The warning has already been logged when `Err` is returned.
    pub fn add_label(&self, story_id: &StoryId, label: &ReleaseLabel) -> Result<(), StoryWarning> {
        let url = labels_url(self.settings, story_id);
        let body = json!({ "name": label.submitted() });
        debug!(%url, %body, "posting label");

        let request = TrackerRequest::post_json(url, &self.settings.token, &body);
        let warning = match self.transport.send(&request) {
            Ok(resp) if resp.is_ok() => {
                debug!(body = %resp.body, "label added");
                return Ok(());
            }
            Ok(resp) => StoryWarning::LabelRejected {
                story_id: story_id.to_string(),
                label: label.to_string(),
                status: resp.status,
                body: resp.body,
            },
            Err(TransportError::Connection(reason)) => StoryWarning::LabelUnreachable {
                story_id: story_id.to_string(),
                label: label.to_string(),
                reason,
            },
            Err(TransportError::Other(reason)) => StoryWarning::LabelFailed {
                story_id: story_id.to_string(),
                label: label.to_string(),
                reason,
            },
        };

        warn!("{}", warning);
        Err(warning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::{Method, MockTransport};

    fn settings() -> TrackerSettings {
        TrackerSettings {
            tracker_url: "https://tracker.test".to_string(),
            project_id: "42".to_string(),
            token: "secret".to_string(),
            project_name: "proj".to_string(),
            version_number: "1.0.0".to_string(),
        }
    }

    fn url(id: &str) -> String {
        format!(
            "https://tracker.test/services/v5/projects/42/stories/{}/labels",
            id
        )
    }

    #[test]
    fn test_add_label_posts_lowercase_name() {
        let mut transport = MockTransport::new();
        transport.respond(Method::Post, url("7"), 200, r#"{"id": 1}"#);
        let settings = settings();

        StoryLabeler::new(&settings, &transport)
            .add_label(&StoryId::from("7"), &ReleaseLabel::from("MyProj-2.3.0"))
            .unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Post);
        let body: serde_json::Value =
            serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"name": "myproj-2.3.0"}));
    }

    #[test]
    fn test_add_label_rejected() {
        let mut transport = MockTransport::new();
        transport.respond(Method::Post, url("7"), 403, "forbidden");
        let settings = settings();

        let warning = StoryLabeler::new(&settings, &transport)
            .add_label(&StoryId::from("7"), &ReleaseLabel::from("proj-1.0.0"))
            .unwrap_err();

        assert_eq!(
            warning,
            StoryWarning::LabelRejected {
                story_id: "7".to_string(),
                label: "proj-1.0.0".to_string(),
                status: 403,
                body: "forbidden".to_string(),
            }
        );
    }

    #[test]
    fn test_add_label_unreachable_is_warning() {
        let mut transport = MockTransport::new();
        transport.fail(
            Method::Post,
            url("7"),
            TransportError::Connection("timed out".to_string()),
        );
        let settings = settings();

        let warning = StoryLabeler::new(&settings, &transport)
            .add_label(&StoryId::from("7"), &ReleaseLabel::from("proj-1.0.0"))
            .unwrap_err();

        assert!(matches!(warning, StoryWarning::LabelUnreachable { .. }));
    }

    #[test]
    fn test_summary_attempted_counts_everything() {
        let summary = TagSummary {
            tagged: vec![StoryId::from("1")],
            warnings: vec![StoryWarning::LabelFailed {
                story_id: "2".to_string(),
                label: "l".to_string(),
                reason: "r".to_string(),
            }],
        };
        assert_eq!(summary.attempted(), 2);
    }
}
