//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user interaction.

use console::style;

use crate::domain::{BumpType, StoryDetail, StoryId};
use crate::tracker::TagSummary;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// One-line description of a story: `id [type] name`.
pub fn format_story_line(detail: &StoryDetail) -> String {
    format!(
        "{} [{}] {}",
        detail.id().unwrap_or_else(|| "?".to_string()),
        detail.story_type().unwrap_or("unknown"),
        detail.name().unwrap_or("")
    )
    .trim_end()
    .to_string()
}

/// Display fetched stories, up to 10, with a count of the rest.
pub fn display_story_table(details: &[StoryDetail], requested: usize) {
    println!(
        "\n{}",
        style(format!("Fetched {} of {} stories", details.len(), requested)).bold()
    );

    for (i, detail) in details.iter().take(10).enumerate() {
        println!("  {}. {}", i + 1, format_story_line(detail));
    }

    if details.len() > 10 {
        println!("  ... and {} more stories", details.len() - 10);
    }
}

/// Display the resolved bump, and the next version when one was computed.
pub fn display_bump_decision(bump: BumpType, current: Option<&str>, next: Option<&str>) {
    println!("\n{} {}", style("Bump type:").bold(), style(bump).cyan());
    if let (Some(current), Some(next)) = (current, next) {
        println!("  From: {}", style(current).red());
        println!("  To:   {}", style(next).green());
    }
}

/// Count line for a tagging pass.
///
/// Individual warnings are not repeated here; the labeler already logs each one.
pub fn format_tag_summary(summary: &TagSummary, label: &str) -> String {
    format!(
        "Tagged {} of {} stories with label {}",
        summary.tagged.len(),
        summary.attempted(),
        label
    )
}

/// Display the result of a tagging pass.
pub fn display_tag_summary(summary: &TagSummary, label: &str) {
    display_success(&format_tag_summary(summary, label));
}

/// Display story ids, one per line, for scripting.
pub fn display_story_ids(ids: &[StoryId]) {
    for id in ids {
        println!("{}", id);
    }
}
