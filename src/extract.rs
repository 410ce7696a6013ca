use crate::models::{Action, ActionKind, AnalyzeOptions, Message};

/// Marker the bot wraps names in. Text between markers is what gets parsed.
pub const BOLD_MARKER: &str = "**";

/// Keyword to action kind, checked in order against the text between the
/// first two bold segments. First match wins and matching is case-sensitive.
pub const ACTION_RULES: &[(&str, ActionKind)] = &[
    ("commented", ActionKind::CommentAdded),
    ("note", ActionKind::NoteAdded),
    ("updated", ActionKind::Update),
    ("submitted", ActionKind::Submit),
    ("verified", ActionKind::Verify),
];

pub fn classify(text: &str) -> ActionKind {
    ACTION_RULES
        .iter()
        .find(|(keyword, _)| text.contains(keyword))
        .map_or(ActionKind::Unknown, |&(_, kind)| kind)
}

/// Extracts the action a bot message reports, e.g.
/// `**Alice** submitted **MyMap**`. Messages that do not split into at least
/// three non-empty segments are not action reports and yield `None`.
pub fn extract_action(message: &Message) -> Option<Action> {
    let mut segments = message
        .content
        .split(BOLD_MARKER)
        .filter(|segment| !segment.is_empty());

    let author = segments.next()?;
    let verb = segments.next()?;
    let subject = segments.next()?;

    Some(Action {
        row: message.row,
        author: author.to_string(),
        kind: classify(verb),
        subject: subject.to_string(),
        date: message.date,
    })
}

/// Extracts the actions of every message, drops the excluded subject and
/// sorts by date. The sort is stable, so simultaneous actions keep their
/// order in the export.
pub fn extract_actions<'m, I>(messages: I, options: &AnalyzeOptions) -> Vec<Action>
where
    I: IntoIterator<Item = &'m Message>,
{
    let mut actions: Vec<Action> = messages
        .into_iter()
        .filter_map(|message| {
            let action = extract_action(message);
            if action.is_none() {
                tracing::debug!(row = message.row, "message is not an action report");
            }
            action
        })
        .filter(|action| action.subject != options.excluded_subject)
        .collect();

    actions.sort_by_key(|action| action.date);
    actions
}
