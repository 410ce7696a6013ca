use std::io::{self, BufRead};

use crate::datetime::parse_timestamp;
use crate::error::{Error, Result};
use crate::models::{AnalyzeOptions, Message};

const FIELD_DELIMITER: &str = ";";
const MIN_FIELDS: usize = 3;

/// Lazily turns the lines of a chat export into [`Message`]s written by the
/// configured bot.
///
/// Iteration ends at the first empty line, at the end of input, or right
/// after the first error is yielded.
pub struct MessageReader<'o, L> {
    lines: L,
    options: &'o AnalyzeOptions,
    row: usize,
    done: bool,
}

impl<'o, L> MessageReader<'o, L> {
    pub fn new(lines: L, options: &'o AnalyzeOptions) -> Self {
        Self {
            lines,
            options,
            row: 0,
            done: false,
        }
    }
}

impl<L, S> Iterator for MessageReader<'_, L>
where
    L: Iterator<Item = io::Result<S>>,
    S: AsRef<str>,
{
    type Item = Result<Message>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let line = match self.lines.next() {
                None => break,
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
                Some(Ok(line)) => line,
            };
            let line = line.as_ref();
            let row = self.row;
            self.row += 1;

            if line.is_empty() {
                tracing::debug!(row, "empty line, stopping");
                break;
            }

            match parse_line(row, line, self.options) {
                Ok(Some(message)) => return Some(Ok(message)),
                Ok(None) => tracing::trace!(row, "skipping line from another author"),
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
        self.done = true;
        None
    }
}

/// Reads messages from anything line oriented.
pub fn read<R: BufRead>(reader: R, options: &AnalyzeOptions) -> MessageReader<'_, io::Lines<R>> {
    MessageReader::new(reader.lines(), options)
}

/// Reads messages from an in-memory export.
pub fn read_str<'a, 'o>(
    text: &'a str,
    options: &'o AnalyzeOptions,
) -> MessageReader<'o, impl Iterator<Item = io::Result<&'a str>>> {
    MessageReader::new(text.lines().map(Ok), options)
}

/// Collects every bot message of an in-memory export, failing on the first
/// malformed record.
pub fn read_messages(text: &str, options: &AnalyzeOptions) -> Result<Vec<Message>> {
    read_str(text, options).collect()
}

/// Parses one line. Returns `Ok(None)` when the line was written by someone
/// other than the bot.
pub fn parse_line(row: usize, line: &str, options: &AnalyzeOptions) -> Result<Option<Message>> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();

    if fields[0].trim_matches('"') != options.bot_handle {
        return Ok(None);
    }
    let author = unquote(row, fields[0])?;

    if fields.len() < MIN_FIELDS {
        return Err(Error::Format {
            row,
            reason: format!(
                "expected at least {MIN_FIELDS} '{FIELD_DELIMITER}'-separated fields, found {}",
                fields.len()
            ),
        });
    }

    let date_field = unquote(row, fields[1])?;
    let date = parse_timestamp(date_field, options.days_first).ok_or_else(|| Error::Parse {
        row,
        value: date_field.to_string(),
    })?;

    // Columns after the content (attachments, reactions) are ignored.
    let content = unquote(row, fields[2])?;

    Ok(Some(Message {
        row,
        author: author.to_string(),
        date,
        content: content.to_string(),
    }))
}

/// Strips surrounding double quotes. A field quoted on one side only cannot be
/// unquoted.
pub fn unquote(row: usize, field: &str) -> Result<&str> {
    let starts = field.starts_with('"');
    let ends = field.len() > 1 && field.ends_with('"');
    if starts != ends {
        return Err(Error::Format {
            row,
            reason: format!("unbalanced quotes in field {field:?}"),
        });
    }
    Ok(field.trim_matches('"'))
}
