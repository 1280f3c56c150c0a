//! Combining resolved selectors into the final descriptor sequence.
//!
//! For each selector, in caller order: resolve its sequence side, then for
//! every resulting sequence resolve the frame side against that sequence's
//! own frame inventory, emitting `(sequence, frame)` pairs sequence-major.
//! Overlapping selectors may produce duplicate descriptors; nothing is
//! deduplicated. The first failing selector aborts the whole batch.

use std::collections::BTreeMap;

use crate::error::{Axis, Error, ResolveError, SelectError};
use crate::inventory::{FrameEntry, Inventory};
use crate::selector::{CombinedSelector, Element, Selector};
use crate::types::{Descriptor, FrameId, SequenceId};

/// Resolve a batch of selectors against an inventory snapshot into one
/// ordered descriptor list.
pub fn descriptors<I>(inventory: &I, selectors: &[CombinedSelector]) -> Result<Vec<Descriptor>, Error>
where
    I: Inventory + ?Sized,
{
    let mut result = Vec::new();
    for (index, selector) in selectors.iter().enumerate() {
        append_descriptors(inventory, index, selector, &mut result)?;
    }
    Ok(result)
}

fn append_descriptors<I>(
    inventory: &I,
    index: usize,
    selector: &CombinedSelector,
    result: &mut Vec<Descriptor>,
) -> Result<(), Error>
where
    I: Inventory + ?Sized,
{
    let sequences = select_sequences(inventory, &selector.sequences)
        .map_err(|error| sequence_error(index, selector, error))?;

    for sequence in sequences {
        let frames = inventory
            .frames(sequence)
            .expect("resolved sequence must be in the inventory");
        let domain: Vec<Element> = frames
            .iter()
            .map(|(&id, entry)| Element {
                id,
                complete: entry.is_complete(),
            })
            .collect();

        let selected = selector
            .frames
            .select(Axis::Frame, &domain)
            .map_err(|error| frame_error(index, selector, sequence, frames, error))?;

        result.extend(
            selected
                .into_iter()
                .map(|frame| Descriptor { sequence, frame }),
        );
    }

    Ok(())
}

/// Resolve the sequence side. The synthetic sequence participates only in
/// `Star` (ordered last), `SyntheticOnly`, and never in numeric selectors.
fn select_sequences<I>(inventory: &I, selector: &Selector) -> Result<Vec<SequenceId>, ResolveError>
where
    I: Inventory + ?Sized,
{
    let ids = inventory.sequences();
    let synthetic = ids.contains(&SequenceId::Synthetic);
    let regular: Vec<u32> = ids
        .iter()
        .filter_map(|id| match id {
            SequenceId::Regular(n) => Some(*n),
            SequenceId::Synthetic => None,
        })
        .collect();

    match selector {
        Selector::Star => {
            let mut selected: Vec<SequenceId> =
                regular.iter().copied().map(SequenceId::Regular).collect();
            if synthetic {
                selected.push(SequenceId::Synthetic);
            }
            Ok(selected)
        }
        Selector::AllRegular => Ok(regular.iter().copied().map(SequenceId::Regular).collect()),
        Selector::SyntheticOnly => {
            if synthetic {
                Ok(vec![SequenceId::Synthetic])
            } else {
                Err(ResolveError::SyntheticUnavailable)
            }
        }
        numeric => {
            // sequences carry no completeness of their own
            let domain: Vec<Element> = regular.iter().copied().map(Element::complete).collect();
            let selected = numeric.select(Axis::Sequence, &domain)?;
            Ok(selected.into_iter().map(SequenceId::Regular).collect())
        }
    }
}

fn sequence_error(index: usize, selector: &CombinedSelector, error: ResolveError) -> Error {
    let expression = selector.expression.clone();
    let select_error = match error {
        ResolveError::Unavailable { id, .. } | ResolveError::Incomplete { id, .. } => {
            SelectError::SequenceUnavailable {
                index,
                expression,
                sequence: SequenceId::Regular(id).to_string(),
            }
        }
        ResolveError::SyntheticUnavailable => SelectError::SequenceUnavailable {
            index,
            expression,
            sequence: SequenceId::Synthetic.to_string(),
        },
        ResolveError::Empty => SelectError::EmptySelection { index, expression },
    };
    select_error.into()
}

fn frame_error(
    index: usize,
    selector: &CombinedSelector,
    sequence: SequenceId,
    frames: &BTreeMap<FrameId, FrameEntry>,
    error: ResolveError,
) -> Error {
    let expression = selector.expression.clone();
    let select_error = match error {
        ResolveError::Unavailable { id, .. } => SelectError::FrameUnavailable {
            index,
            expression,
            sequence,
            frame: id,
        },
        ResolveError::Incomplete { id, .. } => SelectError::IncompleteFrame {
            index,
            expression,
            sequence,
            frame: id,
            missing: frames.get(&id).map(|entry| entry.missing.clone()).unwrap_or_default(),
        },
        ResolveError::Empty | ResolveError::SyntheticUnavailable => {
            SelectError::EmptySelection { index, expression }
        }
    };
    select_error.into()
}
