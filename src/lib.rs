pub mod aggregate;
pub mod datetime;
pub mod error;
pub mod extract;
pub mod models;
pub mod rank;
pub mod reader;
pub mod report;

use crate::aggregate::{bucket_submissions, dedup_submissions, fill_gaps};
use crate::extract::extract_actions;
use crate::models::{ActionKind, Analysis, AnalyzeOptions, Message};
use crate::rank::rank_kind;

pub use crate::error::{Error, Result};

use std::fs::File;
use std::path::Path;
use memmap2::Mmap;

/// Leaderboards built by [`analyze_messages`], in output order.
pub const LEADERBOARDS: &[(&str, ActionKind)] = &[
    ("Maps created", ActionKind::Submit),
    ("Maps updated", ActionKind::Update),
    ("notes", ActionKind::NoteAdded),
    ("most verified", ActionKind::Verify),
    ("comments", ActionKind::CommentAdded),
];

/// Parses an in-memory export into the bot's messages.
pub fn parse_string(s: &str, options: Option<&AnalyzeOptions>) -> Result<Vec<Message>> {
    let default_options = AnalyzeOptions::default();
    let options = options.unwrap_or(&default_options);
    tracing::debug!(bytes = s.len(), bot = %options.bot_handle, "parsing export");
    reader::read_messages(s, options)
}

/// Memory-maps a chat export and parses it without copying its contents into
/// an intermediate `String`.
pub fn parse_file<P: AsRef<Path>>(path: P, options: Option<&AnalyzeOptions>) -> Result<Vec<Message>> {
    let file = File::open(path)?;
    let mmap = unsafe { Mmap::map(&file)? };
    let text = std::str::from_utf8(&mmap)?;
    parse_string(text, options)
}

/// Runs extraction, deduplication, bucketing and ranking over already parsed
/// messages.
pub fn analyze_messages(messages: &[Message], options: &AnalyzeOptions) -> Result<Analysis> {
    options.validate()?;
    Ok(run_pipeline(messages, options))
}

/// Parses an in-memory export and analyzes it. Options are checked before
/// anything is read.
pub fn analyze_str(s: &str, options: &AnalyzeOptions) -> Result<Analysis> {
    options.validate()?;
    let messages = parse_string(s, Some(options))?;
    Ok(run_pipeline(&messages, options))
}

/// Same as [`analyze_str`] for an export on disk. The file is memory-mapped
/// through [`parse_file`] and released before the analysis runs.
pub fn analyze_file<P: AsRef<Path>>(path: P, options: &AnalyzeOptions) -> Result<Analysis> {
    options.validate()?;
    let messages = parse_file(path, Some(options))?;
    Ok(run_pipeline(&messages, options))
}

fn run_pipeline(messages: &[Message], options: &AnalyzeOptions) -> Analysis {
    let actions = extract_actions(messages, options);
    let submissions = dedup_submissions(&actions);

    let mut buckets = bucket_submissions(&submissions, options.bucket_days);
    if options.fill_gaps {
        buckets = fill_gaps(&buckets, options.bucket_days);
    }

    let leaderboards = LEADERBOARDS
        .iter()
        .map(|&(title, kind)| {
            // Creators are counted once per mission, everything else per action.
            let source = if kind == ActionKind::Submit { &submissions } else { &actions };
            rank_kind(title, source, kind, options.leaderboard_size)
        })
        .collect();

    tracing::info!(
        messages = messages.len(),
        actions = actions.len(),
        missions = submissions.len(),
        buckets = buckets.len(),
        "analysis complete"
    );

    Analysis {
        actions,
        submissions,
        buckets,
        leaderboards,
    }
}
