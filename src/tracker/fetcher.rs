use crate::config::TrackerSettings;
use crate::domain::{StoryDetail, StoryId};
use crate::error::{Result, TrackerError};
use crate::tracker::{story_url, TrackerRequest, Transport, TransportError};
use crate::warning::StoryWarning;
use tracing::{debug, error, info, warn};

/// Retrieves story details from the tracker
///
/// A story that answers with a non-200 status is skipped. Losing the
/// tracker itself aborts the whole batch: a bump decision must not be made
/// on partial data.
pub struct StoryFetcher<'a, T: Transport> {
    settings: &'a TrackerSettings,
    transport: &'a T,
}

impl<'a, T: Transport> StoryFetcher<'a, T> {
    pub fn new(settings: &'a TrackerSettings, transport: &'a T) -> Self {
        StoryFetcher {
            settings,
            transport,
        }
    }

    /// Fetch every story in input order, omitting the ones the tracker rejected
    ///
    /// # Returns
    /// * `Ok(Vec<StoryDetail>)` - One entry per successfully fetched story
    /// * `Err(TrackerError::Unreachable)` - The tracker could not be reached
    /// * `Err(TrackerError::Request)` - Any other request failure
    /// * `Err(TrackerError::Decode)` - A 200 response that is not a JSON object
    pub fn fetch_all(&self, story_ids: &[StoryId]) -> Result<Vec<StoryDetail>> {
        info!(count = story_ids.len(), "fetching story details");

        let mut details = Vec::with_capacity(story_ids.len());
        for story_id in story_ids {
            if let Some(detail) = self.fetch_story(story_id)? {
                details.push(detail);
            }
        }

        info!(
            requested = story_ids.len(),
            fetched = details.len(),
            "story details fetched"
        );
        Ok(details)
    }

    /// Fetch one story; `Ok(None)` when the tracker answered with a non-200 status
    pub fn fetch_story(&self, story_id: &StoryId) -> Result<Option<StoryDetail>> {
        let url = story_url(self.settings, story_id);
        debug!(%url, "retrieving story detail");

        let request = TrackerRequest::get(url.as_str(), &self.settings.token);
        let resp = match self.transport.send(&request) {
            Ok(resp) => resp,
            Err(TransportError::Connection(reason)) => {
                error!(%url, %reason, "request to tracker timed out");
                return Err(TrackerError::unreachable(url, reason));
            }
            Err(TransportError::Other(reason)) => {
                error!(%url, %reason, "failed retrieving story detail");
                return Err(TrackerError::request(url, reason));
            }
        };

        if !resp.is_ok() {
            let warning = StoryWarning::FetchRejected {
                url,
                status: resp.status,
                body: resp.body,
            };
            warn!("{}", warning);
            return Ok(None);
        }

        debug!(body = %resp.body, "story detail received");
        let value: serde_json::Value =
            serde_json::from_str(&resp.body).map_err(|e| TrackerError::Decode {
                url: url.clone(),
                reason: e.to_string(),
            })?;
        let detail = StoryDetail::try_from(value).map_err(|other| TrackerError::Decode {
            url,
            reason: format!("expected a JSON object, got {}", other),
        })?;

        Ok(Some(detail))
    }
}
