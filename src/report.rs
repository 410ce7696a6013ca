use crate::models::{Bucket, Leaderboard, LeaderboardEntry};

const SUBJECT_SEPARATOR: &str = " | ";

impl Bucket {
    /// Chart label: the period start followed by the missions submitted in
    /// it, e.g. `2021-01-07 => MapA | MapB`.
    pub fn label(&self) -> String {
        let date = self.period_start.format("%Y-%m-%d");
        if self.subjects.is_empty() {
            date.to_string()
        } else {
            format!("{date} => {}", self.subjects.join(SUBJECT_SEPARATOR))
        }
    }
}

impl LeaderboardEntry {
    pub fn line(&self) -> String {
        format!("{}. {} | Count: {}", self.rank, self.author, self.count)
    }
}

/// Renders a leaderboard the way it is printed to the console: the title,
/// a blank line, then one line per entry.
pub fn format_leaderboard(board: &Leaderboard) -> String {
    let mut out = format!("{}\n\n", board.title);
    for entry in &board.entries {
        out.push_str(&entry.line());
        out.push('\n');
    }
    out
}
