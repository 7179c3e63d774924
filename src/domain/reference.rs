use crate::domain::StoryId;
use regex::Regex;

/// Extract tracker story references from commit messages.
///
/// Recognizes the bracketed forms the tracker's commit hooks understand:
/// - `[#123456]`
/// - `[finishes #123456]`, `[Fixes #123456]`, ...
/// - `[#123 #456]` (several ids in one bracket)
///
/// Ids are returned in first-seen order, each at most once.
pub fn extract_story_ids<S: AsRef<str>>(messages: &[S]) -> Vec<StoryId> {
    let (Ok(bracket), Ok(story)) = (Regex::new(r"\[([^\]]*)\]"), Regex::new(r"#(\d+)")) else {
        return Vec::new();
    };

    let mut ids: Vec<StoryId> = Vec::new();
    for message in messages {
        for group in bracket.captures_iter(message.as_ref()) {
            let Some(inner) = group.get(1) else { continue };
            for reference in story.captures_iter(inner.as_str()) {
                if let Some(m) = reference.get(1) {
                    let id = StoryId::new(m.as_str());
                    if !ids.contains(&id) {
                        ids.push(id);
                    }
                }
            }
        }
    }
    ids
}
