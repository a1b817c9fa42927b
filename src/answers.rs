//! The accumulated answer set.
//!
//! Answers are stored in an insertion-ordered JSON object. Question names may
//! use dotted and bracketed paths (`project.authors[0].name`), which place the
//! answer inside nested objects and arrays instead of under a flat key.

use crate::{
    constants::{FORBIDDEN_PATH_SEGMENTS, MAX_ANSWER_INDEX},
    error::{Error, Result},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One step of an answer path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Split `path` into map/array steps.
///
/// Dotted segments are always object keys. Bracketed segments are array
/// indices when they are all digits and object keys otherwise (quotes are
/// stripped, so `a["b.c"]` addresses the single key `b.c`). Indices above
/// [`MAX_ANSWER_INDEX`] are rejected.
pub fn parse_path(path: &str) -> Result<Vec<PathSegment>> {
    let invalid = || Error::InvalidAnswerPath { path: path.to_string() };
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars().peekable();
    // Set right after a `]`, where a new segment may start without a dot.
    let mut after_bracket = false;

    while let Some(c) = chars.next() {
        match c {
            '.' => {
                if current.is_empty() && !after_bracket {
                    return Err(invalid());
                }
                if !current.is_empty() {
                    segments.push(PathSegment::Key(std::mem::take(&mut current)));
                }
                after_bracket = false;
                if chars.peek().is_none() {
                    return Err(invalid());
                }
            }
            '[' => {
                if !current.is_empty() {
                    segments.push(PathSegment::Key(std::mem::take(&mut current)));
                }
                let mut inner = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == ']' {
                        closed = true;
                        break;
                    }
                    inner.push(c);
                }
                if !closed || inner.is_empty() {
                    return Err(invalid());
                }
                segments.push(bracket_segment(&inner).ok_or_else(invalid)?);
                after_bracket = true;
            }
            ']' => return Err(invalid()),
            _ => {
                if after_bracket {
                    return Err(invalid());
                }
                current.push(c);
            }
        }
    }
    if !current.is_empty() {
        segments.push(PathSegment::Key(current));
    }
    if segments.is_empty() {
        return Err(invalid());
    }

    let unsafe_segment = segments.iter().any(|segment| match segment {
        PathSegment::Key(key) => FORBIDDEN_PATH_SEGMENTS.contains(&key.as_str()),
        PathSegment::Index(_) => false,
    });
    if unsafe_segment {
        return Err(Error::UnsafeAnswerPath { path: path.to_string() });
    }

    Ok(segments)
}

fn bracket_segment(inner: &str) -> Option<PathSegment> {
    let inner = inner.trim();
    if inner.chars().all(|c| c.is_ascii_digit()) {
        return inner
            .parse()
            .ok()
            .filter(|index| *index <= MAX_ANSWER_INDEX)
            .map(PathSegment::Index);
    }
    let unquoted = ['"', '\'']
        .iter()
        .find_map(|q| inner.strip_prefix(*q).and_then(|rest| rest.strip_suffix(*q)))
        .unwrap_or(inner);
    if unquoted.is_empty() {
        None
    } else {
        Some(PathSegment::Key(unquoted.to_string()))
    }
}

/// Mapping from question name (or path) to the resolved answer.
///
/// Skipped questions are absent, never `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answers(Map<String, Value>);

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build answers from an arbitrary JSON value. Anything but an object
    /// yields an empty set.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    /// Place `value` at `path`, creating intermediate objects and arrays.
    pub fn set(&mut self, path: &str, value: Value) -> Result<()> {
        let segments = parse_path(path)?;
        let (head, rest) = match segments.split_first() {
            Some((PathSegment::Key(key), rest)) => (key.clone(), rest),
            Some((PathSegment::Index(index), rest)) => (index.to_string(), rest),
            None => return Err(Error::InvalidAnswerPath { path: path.to_string() }),
        };
        let slot = self.0.entry(head).or_insert(Value::Null);
        assign(slot, rest, value).ok_or_else(|| Error::InvalidAnswerPath { path: path.to_string() })
    }

    /// Look up the answer at `path`. Unparseable paths have no answer.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let segments = parse_path(path).ok()?;
        let (head, rest) = segments.split_first()?;
        let mut current = match head {
            PathSegment::Key(key) => self.0.get(key)?,
            PathSegment::Index(index) => self.0.get(&index.to_string())?,
        };
        for segment in rest {
            current = match (segment, current) {
                (PathSegment::Key(key), Value::Object(map)) => map.get(key)?,
                (PathSegment::Index(index), Value::Array(items)) => items.get(*index)?,
                _ => return None,
            };
        }
        Some(current)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// JSON view used as template context.
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Answers {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// `None` when an index cannot be addressed.
fn assign(slot: &mut Value, segments: &[PathSegment], value: Value) -> Option<()> {
    match segments.split_first() {
        None => {
            *slot = value;
            Some(())
        }
        Some((PathSegment::Key(key), rest)) => {
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            let Value::Object(map) = slot else { return None };
            assign(map.entry(key.clone()).or_insert(Value::Null), rest, value)
        }
        Some((PathSegment::Index(index), rest)) => {
            if !slot.is_array() {
                *slot = Value::Array(Vec::new());
            }
            if *index > MAX_ANSWER_INDEX {
                return None;
            }
            let Value::Array(items) = slot else { return None };
            if items.len() <= *index {
                items.resize(index.checked_add(1)?, Value::Null);
            }
            assign(items.get_mut(*index)?, rest, value)
        }
    }
}
