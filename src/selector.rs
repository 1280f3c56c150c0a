use crate::error::{Axis, ResolveError};

/// One side of a parsed selection expression.
///
/// `AllRegular` (`data`) and `SyntheticOnly` (`data_syn`) are only legal on
/// the sequence axis; the parser rejects them on the frame axis, so the
/// numeric resolution path never sees them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Exactly one identifier.
    Single(u32),
    /// Explicit list, order and duplicates as written.
    List(Vec<u32>),
    /// Slice-style range over the available identifiers.
    Range {
        start: Option<u32>,
        stop: Option<u32>,
        step: i32,
    },
    /// All available elements.
    Star,
    /// Every regular sequence, synthetic excluded.
    AllRegular,
    /// Exactly the synthetic (`data_syn`) sequence.
    SyntheticOnly,
}

/// A full `<sequence>/<frame>` selection expression in structured form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedSelector {
    /// The expression text this selector was parsed from.
    pub expression: String,
    pub sequences: Selector,
    pub frames: Selector,
}

/// One identifier of the resolution domain together with its completeness.
/// Domains are ordered ascending by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element {
    pub id: u32,
    pub complete: bool,
}

impl Element {
    pub fn complete(id: u32) -> Self {
        Element { id, complete: true }
    }

    pub fn incomplete(id: u32) -> Self {
        Element {
            id,
            complete: false,
        }
    }
}

impl Selector {
    /// Resolve this selector against an ordered numeric domain.
    ///
    /// Named elements (single, list members, explicit range bounds) must be
    /// available and complete. `Star` silently drops incomplete ids. A range
    /// skips ids that are absent between its bounds, but fails on any id it
    /// selects that is present yet incomplete.
    pub fn select(&self, axis: Axis, domain: &[Element]) -> Result<Vec<u32>, ResolveError> {
        match self {
            Selector::Single(id) => {
                require_named(axis, *id, domain)?;
                Ok(vec![*id])
            }
            Selector::List(ids) => {
                for id in ids {
                    require_named(axis, *id, domain)?;
                }
                Ok(ids.clone())
            }
            Selector::Star => Ok(domain
                .iter()
                .filter(|element| element.complete)
                .map(|element| element.id)
                .collect()),
            Selector::Range { start, stop, step } => select_range(axis, domain, *start, *stop, *step),
            Selector::AllRegular | Selector::SyntheticOnly => {
                unreachable!("sequence-only selector on the numeric resolution path")
            }
        }
    }
}

/// A named element must exist in the domain and be complete.
fn require_named(axis: Axis, id: u32, domain: &[Element]) -> Result<(), ResolveError> {
    named_index(axis, id, domain).map(|_| ())
}

/// Like [`require_named`], but yields the element's position in the domain.
fn named_index(axis: Axis, id: u32, domain: &[Element]) -> Result<usize, ResolveError> {
    match domain.iter().position(|element| element.id == id) {
        None => Err(ResolveError::Unavailable { axis, id }),
        Some(index) if !domain[index].complete => Err(ResolveError::Incomplete { axis, id }),
        Some(index) => Ok(index),
    }
}

fn select_range(
    axis: Axis,
    domain: &[Element],
    start: Option<u32>,
    stop: Option<u32>,
    step: i32,
) -> Result<Vec<u32>, ResolveError> {
    debug_assert!(step != 0, "zero step is rejected at parse time");

    // Explicit bounds are named elements even though `stop` itself is never
    // part of the expansion.
    let start_index = match start {
        Some(id) => Some(named_index(axis, id, domain)?),
        None => None,
    };
    let stop_index = match stop {
        Some(id) => Some(named_index(axis, id, domain)?),
        None => None,
    };

    let mut expansion = Vec::new();
    if !domain.is_empty() {
        if step > 0 {
            let mut index = start_index.unwrap_or(0);
            let end = stop_index.unwrap_or(domain.len());
            while index < end {
                expansion.push(domain[index]);
                index += step as usize;
            }
        } else {
            let mut index = start_index.unwrap_or(domain.len() - 1) as isize;
            let end = stop_index.map(|i| i as isize).unwrap_or(-1);
            while index > end {
                expansion.push(domain[index as usize]);
                index += step as isize;
            }
        }
    }

    // start == stop, or a one-element domain stepped over, leaves nothing
    if expansion.is_empty() {
        return Err(ResolveError::Empty);
    }

    for element in &expansion {
        if !element.complete {
            return Err(ResolveError::Incomplete {
                axis,
                id: element.id,
            });
        }
    }

    Ok(expansion.into_iter().map(|element| element.id).collect())
}
