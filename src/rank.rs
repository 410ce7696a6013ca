use crate::aggregate::group_by;
use crate::models::{Action, ActionKind, AuthorGroup, Leaderboard, LeaderboardEntry};

/// Groups the actions of one kind by the person who performed them.
pub fn group_by_author(actions: &[Action], kind: ActionKind) -> Vec<AuthorGroup> {
    let matching = actions.iter().filter(|action| action.kind == kind);

    group_by(matching, |action| action.author.clone())
        .into_iter()
        .map(|(author, members)| AuthorGroup {
            author,
            count: members.len(),
            members: members.into_iter().cloned().collect(),
        })
        .collect()
}

/// Ranks groups by size, biggest first, and keeps the top `size`. Equal
/// counts are ordered by author name so the output is deterministic.
pub fn leaderboard(groups: &[AuthorGroup], size: usize) -> Vec<LeaderboardEntry> {
    let mut ranked: Vec<&AuthorGroup> = groups.iter().collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.author.cmp(&b.author)));

    ranked
        .into_iter()
        .take(size)
        .enumerate()
        .map(|(i, group)| LeaderboardEntry {
            rank: i + 1,
            author: group.author.clone(),
            count: group.count,
        })
        .collect()
}

/// Builds a titled leaderboard for one kind of action.
pub fn rank_kind(title: &'static str, actions: &[Action], kind: ActionKind, size: usize) -> Leaderboard {
    let groups = group_by_author(actions, kind);
    tracing::debug!(%kind, authors = groups.len(), "ranking authors");

    Leaderboard {
        title,
        kind,
        entries: leaderboard(&groups, size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn action(row: usize, author: &str, kind: ActionKind) -> Action {
        Action {
            row,
            author: author.to_string(),
            kind,
            subject: format!("Map{row}"),
            date: Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_group_by_author() {
        let actions = vec![
            action(0, "Alice", ActionKind::CommentAdded),
            action(1, "Bob", ActionKind::CommentAdded),
            action(2, "Alice", ActionKind::Verify),
            action(3, "Alice", ActionKind::CommentAdded),
        ];
        let groups = group_by_author(&actions, ActionKind::CommentAdded);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].author, "Alice");
        assert_eq!(groups[0].count, 2);
        let rows: Vec<usize> = groups[0].members.iter().map(|a| a.row).collect();
        assert_eq!(rows, [0, 3]);
        assert_eq!(groups[1].author, "Bob");
        assert_eq!(groups[1].count, 1);
    }

    #[test]
    fn test_leaderboard_orders_and_breaks_ties_by_name() {
        let actions = vec![
            action(0, "Carl", ActionKind::Verify),
            action(1, "Bob", ActionKind::Verify),
            action(2, "Alice", ActionKind::Verify),
            action(3, "Bob", ActionKind::Verify),
        ];
        let entries = leaderboard(&group_by_author(&actions, ActionKind::Verify), 50);

        assert_eq!(
            entries,
            vec![
                LeaderboardEntry { rank: 1, author: "Bob".to_string(), count: 2 },
                LeaderboardEntry { rank: 2, author: "Alice".to_string(), count: 1 },
                LeaderboardEntry { rank: 3, author: "Carl".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_leaderboard_is_capped() {
        let actions: Vec<Action> = (0..120)
            .map(|i| action(i, &format!("author{:03}", i % 60), ActionKind::Submit))
            .collect();
        let groups = group_by_author(&actions, ActionKind::Submit);
        let entries = leaderboard(&groups, 50);

        assert_eq!(groups.len(), 60);
        assert_eq!(entries.len(), 50);
        assert_eq!(entries.last().map(|e| e.rank), Some(50));
    }

    #[test]
    fn test_leaderboard_ranks_and_counts_are_monotonic() {
        let actions: Vec<Action> = (0..40)
            .map(|i| action(i, &format!("author{}", i % 7 + i % 3), ActionKind::NoteAdded))
            .collect();
        let entries = leaderboard(&group_by_author(&actions, ActionKind::NoteAdded), 5);

        assert!(entries.len() <= 5);
        assert_eq!(entries.first().map(|e| e.rank), Some(1));
        assert!(entries.windows(2).all(|w| w[1].rank == w[0].rank + 1));
        assert!(entries.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn test_leaderboard_empty_and_zero_size() {
        assert!(leaderboard(&[], 50).is_empty());

        let groups = group_by_author(&[action(0, "Alice", ActionKind::Update)], ActionKind::Update);
        assert!(leaderboard(&groups, 0).is_empty());
    }

    #[test]
    fn test_rank_kind() {
        let actions = vec![
            action(0, "Alice", ActionKind::Update),
            action(1, "Bob", ActionKind::Submit),
        ];
        let board = rank_kind("Maps updated", &actions, ActionKind::Update, 50);

        assert_eq!(board.title, "Maps updated");
        assert_eq!(board.kind, ActionKind::Update);
        assert_eq!(board.entries.len(), 1);
        assert_eq!(board.entries[0].author, "Alice");
    }
}
