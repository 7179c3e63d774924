use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tracker_publish::cli::{self, ReleaseWorkflowArgs};
use tracker_publish::config::{self, TrackerSettings};
use tracker_publish::domain::{extract_story_ids, ReleaseLabel, StoryId};
use tracker_publish::tracker::{HttpTransport, StoryFetcher};
use tracker_publish::{analyzer, ui, TrackerError};

#[derive(Parser)]
#[command(
    name = "tracker-publish",
    version,
    about = "Tag tracker stories with a release label and decide the version bump"
)]
struct Args {
    #[arg(short, long, global = true, help = "Build configuration file path")]
    config: Option<String>,

    #[arg(short, long, global = true, help = "Settings file path (fallback tracker url)")]
    settings: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch stories and print the semantic version bump they call for
    Bump(StoryArgs),

    /// Label stories with <project_name>-<version_number>
    Tag(StoryArgs),

    /// Fetch, decide the bump, compute the next version and label the stories
    Release {
        #[command(flatten)]
        stories: StoryArgs,

        #[arg(long, help = "Preview the decision without labeling stories")]
        dry_run: bool,

        #[arg(long, help = "Decide the bump but do not label stories")]
        skip_tagging: bool,
    },

    /// Print story ids referenced in commit messages
    Scan {
        #[arg(short, long = "message", help = "Commit message to scan (repeatable)")]
        messages: Vec<String>,
    },
}

#[derive(ClapArgs)]
struct StoryArgs {
    #[arg(help = "Story ids")]
    story_ids: Vec<String>,

    #[arg(short, long = "message", help = "Commit message to scan for story ids (repeatable)")]
    messages: Vec<String>,
}

impl StoryArgs {
    /// Explicit ids first, then ids found in commit messages.
    fn collect(&self) -> Vec<StoryId> {
        let mut ids: Vec<StoryId> = self
            .story_ids
            .iter()
            .map(|id| StoryId::new(id.as_str()))
            .collect();
        ids.extend(extract_story_ids(&self.messages));
        ids
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "tracker_publish=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Command::Scan { messages } = &args.command {
        ui::display_story_ids(&extract_story_ids(messages));
        return Ok(());
    }

    // Resolve configuration before any request is made
    let settings = match resolve_settings(args.config.as_deref(), args.settings.as_deref()) {
        Ok(settings) => settings,
        Err(e) => fail(&e),
    };

    let transport = match HttpTransport::new() {
        Ok(transport) => transport,
        Err(e) => fail(&e),
    };

    match args.command {
        Command::Bump(stories) => {
            let story_ids = stories.collect();
            let details = match StoryFetcher::new(&settings, &transport).fetch_all(&story_ids) {
                Ok(details) => details,
                Err(e) => fail(&e),
            };
            ui::display_story_table(&details, story_ids.len());

            let bump = analyzer::resolve(&details);
            ui::display_bump_decision(bump, None, None);
        }
        Command::Tag(stories) => {
            let story_ids = stories.collect();
            let summary = cli::tag_stories(&settings, &transport, &story_ids);
            let label = ReleaseLabel::for_release(&settings.project_name, &settings.version_number);
            ui::display_tag_summary(&summary, &label.submitted());
        }
        Command::Release {
            stories,
            dry_run,
            skip_tagging,
        } => {
            let workflow_args = ReleaseWorkflowArgs {
                story_ids: stories.collect(),
                dry_run,
                skip_tagging,
            };

            let result = match cli::run_release_workflow(&workflow_args, &settings, &transport) {
                Ok(result) => result,
                Err(e) => fail(&e),
            };

            ui::display_bump_decision(
                result.bump,
                Some(result.current_version.to_string().as_str()),
                Some(result.next_version.to_string().as_str()),
            );

            match &result.tagging {
                Some(summary) => ui::display_tag_summary(summary, &result.label.submitted()),
                None if dry_run => ui::display_status(&format!(
                    "Dry run: would tag {} stories with label {}",
                    workflow_args.story_ids.len(),
                    result.label.submitted()
                )),
                None => ui::display_status("Skipped tagging stories"),
            }
        }
        // handled above
        Command::Scan { .. } => {}
    }

    Ok(())
}

fn resolve_settings(
    config_path: Option<&str>,
    settings_path: Option<&str>,
) -> tracker_publish::Result<TrackerSettings> {
    let build = config::load_build_config(config_path)?;
    let settings = config::load_settings(settings_path)?;
    TrackerSettings::from_env(&build, &settings)
}

/// Print the failing precondition and terminate with the error's exit code.
fn fail(err: &TrackerError) -> ! {
    ui::display_error(&err.to_string());
    std::process::exit(err.exit_code());
}
