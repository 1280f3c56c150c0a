//! Selection expression parsing.
//!
//! Parsing is total and pure: it classifies text into [`Selector`] variants
//! and never consults the dataset. All availability checking happens later,
//! during resolution.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Axis, Error, ParseError};
use crate::selector::{CombinedSelector, Selector};

/// Maximum number of digits of an identifier on the given axis, matching the
/// zero-padded directory and file names (`0007/`, `000042-color.png`).
fn max_digits(axis: Axis) -> usize {
    match axis {
        Axis::Sequence => 4,
        Axis::Frame => 6,
    }
}

/// Parse one `<sequence>/<frame>` selection expression.
pub fn parse(expression: &str) -> Result<CombinedSelector, ParseError> {
    let slashes = expression.matches('/').count();
    if slashes == 0 {
        return Err(ParseError::NoDelimiter(expression.to_string()));
    }
    if slashes > 1 {
        return Err(ParseError::ExtraDelimiter(expression.to_string()));
    }

    let (sequence_part, frame_part) = expression.split_once('/').unwrap();
    let sequences = parse_part(sequence_part, Axis::Sequence, expression)?;
    let frames = parse_part(frame_part, Axis::Frame, expression)?;

    Ok(CombinedSelector {
        expression: expression.trim().to_string(),
        sequences,
        frames,
    })
}

/// Parse a batch of expressions, preserving order. The first malformed
/// expression aborts the batch, naming its index.
pub fn parse_all<S: AsRef<str>>(expressions: &[S]) -> Result<Vec<CombinedSelector>, ParseError> {
    if expressions.is_empty() {
        return Err(ParseError::EmptyExpressionList);
    }
    expressions
        .iter()
        .enumerate()
        .map(|(index, expression)| {
            parse(expression.as_ref()).map_err(|source| ParseError::AtIndex {
                index,
                source: Box::new(source),
            })
        })
        .collect()
}

/// Read selection expressions from a text file, one per line. Blank lines
/// and `#` comment lines are skipped.
pub fn parse_expression_file(path: &Path) -> Result<Vec<CombinedSelector>, Error> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut selectors = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let selector = parse(trimmed).map_err(|source| ParseError::InFile {
            path: path.to_path_buf(),
            line: number + 1,
            source: Box::new(source),
        })?;
        selectors.push(selector);
    }

    Ok(selectors)
}

fn parse_part(part: &str, axis: Axis, expression: &str) -> Result<Selector, ParseError> {
    let part = part.trim();
    if part.is_empty() {
        return Err(ParseError::EmptyPart {
            axis,
            expression: expression.to_string(),
        });
    }

    if axis == Axis::Sequence {
        match part {
            "data" => return Ok(Selector::AllRegular),
            "data_syn" => return Ok(Selector::SyntheticOnly),
            _ => {}
        }
    }

    if part == "*" {
        return Ok(Selector::Star);
    }
    if let Some(id) = parse_id(part, axis) {
        return Ok(Selector::Single(id));
    }
    if let Some(rest) = part.strip_prefix('[') {
        return parse_list(rest, axis, part);
    }
    if part.contains(':') {
        return parse_range(part, axis);
    }

    Err(ParseError::InvalidPart {
        axis,
        part: part.to_string(),
    })
}

/// An identifier is a plain digit string no longer than the axis width.
/// Leading zeros are allowed (`0042` equals `42`).
fn parse_id(token: &str, axis: Axis) -> Option<u32> {
    if token.is_empty()
        || token.len() > max_digits(axis)
        || !token.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    // at most 6 digits, cannot overflow
    Some(token.parse().unwrap())
}

fn parse_list(rest: &str, axis: Axis, part: &str) -> Result<Selector, ParseError> {
    let invalid = || ParseError::InvalidPart {
        axis,
        part: part.to_string(),
    };

    let inner = rest.strip_suffix(']').ok_or_else(invalid)?;
    let mut ids = Vec::new();
    for token in inner.split(',') {
        let id = parse_id(token.trim(), axis).ok_or_else(invalid)?;
        ids.push(id);
    }
    Ok(Selector::List(ids))
}

fn parse_range(part: &str, axis: Axis) -> Result<Selector, ParseError> {
    let invalid = || ParseError::InvalidPart {
        axis,
        part: part.to_string(),
    };

    let fields: Vec<&str> = part.split(':').map(str::trim).collect();
    if fields.len() < 2 || fields.len() > 3 {
        return Err(invalid());
    }

    let bound = |token: &str| -> Result<Option<u32>, ParseError> {
        if token.is_empty() {
            Ok(None)
        } else {
            parse_id(token, axis).map(Some).ok_or_else(invalid)
        }
    };

    let start = bound(fields[0])?;
    let stop = bound(fields[1])?;
    let step = match fields.get(2) {
        None => 1,
        Some(token) if token.is_empty() => 1,
        Some(&token) => {
            let (digits, sign) = match token.strip_prefix('-') {
                Some(rest) => (rest, -1),
                None => (token, 1),
            };
            let magnitude = parse_id(digits, axis).ok_or_else(invalid)?;
            sign * magnitude as i32
        }
    };

    if step == 0 {
        return Err(ParseError::ZeroStep(part.to_string()));
    }
    if let (Some(start), Some(stop)) = (start, stop) {
        if (step > 0 && start > stop) || (step < 0 && start < stop) {
            return Err(ParseError::InvertedRange(part.to_string()));
        }
    }

    Ok(Selector::Range { start, stop, step })
}
