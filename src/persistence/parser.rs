//! Save file reader.
//!
//! A save file holds one command per line:
//!
//! ```text
//! P x y rank state id     point
//! L p1 p2 id              completed link
//! I path id               image file
//! Ai point image          image shown by a point
//! At point text...        text of a point, rest of the line
//! ```
//!
//! Runs of spaces collapse to one, leading spaces are dropped, everything
//! from the first `#` is a comment, and blank lines are skipped.

use super::writer::is_encodable_text;
use crate::error::{Arity, GraphError, GraphResult, SyntaxIssue};
use crate::store::Store;
use crate::types::{GraphPos, ImageId, LinkId, PointId, ProgressState};
use std::path::PathBuf;
use std::str::FromStr;

/// One decoded save file command
#[derive(Debug, Clone, PartialEq)]
pub enum SaveCommand {
    Point {
        pos: GraphPos,
        rank: i32,
        state: ProgressState,
        id: PointId,
    },
    Link {
        p1: PointId,
        p2: PointId,
        id: LinkId,
    },
    Image {
        path: PathBuf,
        id: ImageId,
    },
    AttachImage {
        point: PointId,
        image: ImageId,
    },
    AttachText {
        point: PointId,
        text: String,
    },
}

/// A command with the 1-based line it came from
#[derive(Debug, Clone, PartialEq)]
pub struct SaveLine {
    pub line: usize,
    pub command: SaveCommand,
}

/// Collapse space runs, drop leading spaces and comments, trim the end
pub fn normalize_line(raw: &str) -> String {
    let mut line = String::with_capacity(raw.len());
    let mut prev = ' ';
    for c in raw.chars() {
        if c == '#' {
            break;
        }
        if c == ' ' && prev == ' ' {
            continue;
        }
        line.push(c);
        prev = c;
    }
    line.truncate(line.trim_end().len());
    line
}

/// Decode every command of a save file without touching any store.
pub fn parse(text: &str) -> GraphResult<Vec<SaveLine>> {
    decode_lines(text).collect()
}

fn decode_lines(text: &str) -> impl Iterator<Item = GraphResult<SaveLine>> + '_ {
    text.lines().enumerate().filter_map(|(index, raw)| {
        let normalized = normalize_line(raw);
        if normalized.is_empty() {
            return None;
        }
        let line = index + 1;
        let decoded = parse_command(&normalized)
            .map(|command| SaveLine { line, command })
            .map_err(|issue| GraphError::Syntax {
                line,
                raw: raw.to_string(),
                issue,
            });
        Some(decoded)
    })
}

fn parse_command(line: &str) -> Result<SaveCommand, SyntaxIssue> {
    let mut tokens = line.split(' ');
    let name = tokens.next().unwrap_or_default();
    let args: Vec<&str> = tokens.collect();

    let (command, arity): (&'static str, Arity) = match name {
        "P" => ("P", Arity::Exactly(5)),
        "L" => ("L", Arity::Exactly(3)),
        "I" => ("I", Arity::Exactly(2)),
        "Ai" => ("Ai", Arity::Exactly(2)),
        "At" => ("At", Arity::AtLeast(2)),
        other => return Err(SyntaxIssue::UnknownCommand(other.to_string())),
    };
    if !arity.accepts(args.len()) {
        return Err(SyntaxIssue::ArgumentCount {
            command,
            expected: arity,
            found: args.len(),
        });
    }

    Ok(match command {
        "P" => SaveCommand::Point {
            pos: GraphPos::new(coordinate(args[0])?, coordinate(args[1])?),
            rank: number(args[2])?,
            state: state(args[3])?,
            id: PointId(number(args[4])?),
        },
        "L" => SaveCommand::Link {
            p1: PointId(number(args[0])?),
            p2: PointId(number(args[1])?),
            id: LinkId(number(args[2])?),
        },
        "I" => SaveCommand::Image {
            path: PathBuf::from(args[0]),
            id: ImageId(number(args[1])?),
        },
        "Ai" => SaveCommand::AttachImage {
            point: PointId(number(args[0])?),
            image: ImageId(number(args[1])?),
        },
        _ => {
            // Text keeps its single spaces: everything after the point id.
            let mut parts = line.splitn(3, ' ');
            let point = PointId(number(parts.nth(1).unwrap_or_default())?);
            let text = parts.next().unwrap_or_default();
            if !is_encodable_text(text) {
                return Err(SyntaxIssue::InvalidText(text.to_string()));
            }
            SaveCommand::AttachText {
                point,
                text: text.to_string(),
            }
        }
    })
}

fn number<T: FromStr>(token: &str) -> Result<T, SyntaxIssue> {
    token
        .parse()
        .map_err(|_| SyntaxIssue::InvalidNumber(token.to_string()))
}

fn coordinate(token: &str) -> Result<f64, SyntaxIssue> {
    let value: f64 = number(token)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SyntaxIssue::InvalidNumber(token.to_string()))
    }
}

fn state(token: &str) -> Result<ProgressState, SyntaxIssue> {
    let code: i64 = number(token)?;
    ProgressState::from_code(code).ok_or(SyntaxIssue::InvalidState(code))
}

/// Replay decoded commands into `store`, in file order, with the file's ids.
///
/// Store failures are reported with the line that caused them.
pub fn apply(store: &mut Store, commands: &[SaveLine]) -> GraphResult<()> {
    commands.iter().try_for_each(|save_line| apply_line(store, save_line))
}

fn apply_line(store: &mut Store, SaveLine { line, command }: &SaveLine) -> GraphResult<()> {
    apply_command(store, command).map_err(|source| GraphError::AtLine {
        line: *line,
        source: Box::new(source),
    })
}

fn apply_command(store: &mut Store, command: &SaveCommand) -> GraphResult<()> {
    match command {
        SaveCommand::Point {
            pos,
            rank,
            state,
            id,
        } => store.create_point(*pos, *rank, *state, Some(*id)).map(drop),
        SaveCommand::Link { p1, p2, id } => store.create_link(*p1, Some(*p2), Some(*id)).map(drop),
        SaveCommand::Image { path, id } => store.create_image(path, Some(*id)).map(drop),
        SaveCommand::AttachImage { point, image } => store.attach_image(*point, *image),
        SaveCommand::AttachText { point, text } => store.attach_text(*point, text),
    }
}

/// Build a new store from save file text.
///
/// Each line is applied as soon as it is decoded, so the first bad line in
/// the file is the one reported.
pub fn replay(text: &str) -> GraphResult<Store> {
    let mut store = Store::new();
    for save_line in decode_lines(text) {
        apply_line(&mut store, &save_line?)?;
    }
    Ok(store)
}

/// Replace the contents of `store` with the graph in save file text.
///
/// On error `store` is left as it was.
pub fn read_into(store: &mut Store, text: &str) -> GraphResult<()> {
    *store = replay(text)?;
    Ok(())
}
