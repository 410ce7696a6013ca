use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;

use crate::error::{Error, Result};

pub const DEFAULT_FILE_PATH: &str = "archub.csv";
pub const DEFAULT_BOT_HANDLE: &str = "ARCHUB#9901";
pub const DEFAULT_EXCLUDED_SUBJECT: &str = "ARCMF";
pub const DEFAULT_BUCKET_DAYS: u32 = 7;
pub const DEFAULT_LEADERBOARD_SIZE: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// 0-based line number in the export, counting every line read.
    pub row: usize,
    pub author: String,
    pub date: DateTime<Utc>,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Submit,
    Update,
    Verify,
    NoteAdded,
    CommentAdded,
    Unknown,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionKind::Submit => "submit",
            ActionKind::Update => "update",
            ActionKind::Verify => "verify",
            ActionKind::NoteAdded => "note",
            ActionKind::CommentAdded => "comment",
            ActionKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    /// Row of the message this action was extracted from.
    pub row: usize,
    /// The person the bot reports on, not the bot itself.
    pub author: String,
    pub kind: ActionKind,
    /// The mission (map) name.
    pub subject: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub period_start: NaiveDate,
    pub count: usize,
    /// Mission names submitted in this period, in submission order.
    pub subjects: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthorGroup {
    pub author: String,
    pub count: usize,
    pub members: Vec<Action>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub author: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Leaderboard {
    pub title: &'static str,
    pub kind: ActionKind,
    pub entries: Vec<LeaderboardEntry>,
}

/// Everything the pipeline produces for one export.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// All extracted actions, sentinel subject removed, sorted by date.
    pub actions: Vec<Action>,
    /// First submission of every mission.
    pub submissions: Vec<Action>,
    pub buckets: Vec<Bucket>,
    pub leaderboards: Vec<Leaderboard>,
}

impl Analysis {
    pub fn leaderboard(&self, kind: ActionKind) -> Option<&Leaderboard> {
        self.leaderboards.iter().find(|board| board.kind == kind)
    }

    /// `(period start, count)` pairs ready to be plotted.
    pub fn series(&self) -> Vec<(NaiveDate, usize)> {
        self.buckets
            .iter()
            .map(|bucket| (bucket.period_start, bucket.count))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Only lines written by this author are read.
    pub bot_handle: String,
    /// Actions on this mission name are dropped entirely.
    pub excluded_subject: String,
    /// Width of a chart bucket in days.
    pub bucket_days: u32,
    /// Maximum number of entries per leaderboard.
    pub leaderboard_size: usize,
    /// Insert zero-count buckets so the series has no holes.
    pub fill_gaps: bool,
    /// Specify if ambiguous numeric dates start with a day (`true`) or a month
    /// (`false`). Dates starting with a 4-digit year are never ambiguous.
    pub days_first: bool,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            bot_handle: DEFAULT_BOT_HANDLE.to_string(),
            excluded_subject: DEFAULT_EXCLUDED_SUBJECT.to_string(),
            bucket_days: DEFAULT_BUCKET_DAYS,
            leaderboard_size: DEFAULT_LEADERBOARD_SIZE,
            fill_gaps: false,
            days_first: false,
        }
    }
}

impl AnalyzeOptions {
    pub fn validate(&self) -> Result<()> {
        if self.bucket_days == 0 {
            return Err(Error::InvalidOptions(
                "bucket_days must be at least 1".to_string(),
            ));
        }
        if self.bot_handle.is_empty() {
            return Err(Error::InvalidOptions(
                "bot_handle must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
