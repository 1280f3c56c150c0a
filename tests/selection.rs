mod common;

use std::error::Error as StdError;
use std::fs;

use common::DatasetFixture;
use ycbvideo::{Descriptor, Error, FileKind, Loader, SelectError, SequenceId};

fn mixed_dataset_fixture() -> DatasetFixture {
    // regular sequence 1 with frames 0..=2 complete, regular sequence 7 with
    // frame 42 complete and frame 43 missing its box file, synthetic
    // sequence with frame 1 complete
    let fixture = DatasetFixture::new();
    for frame in 0..3 {
        fixture.add_frame(1, frame);
    }
    fixture.add_frame(7, 42);
    fixture.add_frame_files(
        7,
        43,
        &[FileKind::Color, FileKind::Depth, FileKind::Label, FileKind::Meta],
    );
    fixture.add_frame(SequenceId::Synthetic, 1);
    fixture
}

// 1) Expression list resolves to descriptors in caller order
#[test]
fn expression_list_resolves_in_order() -> Result<(), Box<dyn StdError>> {
    let fixture = mixed_dataset_fixture();
    let loader = Loader::new(fixture.root())?;

    let collection = loader.frames(&["data_syn/1", "7/42"])?;
    assert_eq!(
        collection.descriptors(),
        &[
            Descriptor::new(SequenceId::Synthetic, 1),
            Descriptor::new(7, 42),
        ]
    );
    assert_eq!(collection.len(), 2);
    Ok(())
}

// 2) Selecting an incomplete frame by name fails, naming the frame and files
#[test]
fn incomplete_frame_selection_fails() -> Result<(), Box<dyn StdError>> {
    let fixture = mixed_dataset_fixture();
    let loader = Loader::new(fixture.root())?;

    match loader.frames(&["7/43"]) {
        Err(Error::Select(SelectError::IncompleteFrame {
            sequence,
            frame,
            missing,
            ..
        })) => {
            assert_eq!(sequence, SequenceId::Regular(7));
            assert_eq!(frame, 43);
            assert_eq!(missing, vec![FileKind::Box]);
        }
        other => panic!("unexpected result: {:?}", other.map(|c| c.len())),
    }
    Ok(())
}

// 3) A named frame missing from any selected sequence fails the whole batch
#[test]
fn unavailable_frame_fails_across_sequences() -> Result<(), Box<dyn StdError>> {
    let fixture = mixed_dataset_fixture();
    let loader = Loader::new(fixture.root())?;

    // sequence 1 has no frame 42 at all
    match loader.frames(&["data/42"]) {
        Err(Error::Select(SelectError::FrameUnavailable {
            sequence, frame, ..
        })) => {
            assert_eq!(sequence, SequenceId::Regular(1));
            assert_eq!(frame, 42);
        }
        other => panic!("unexpected result: {:?}", other.map(|c| c.len())),
    }
    Ok(())
}

// 4) Ranges skip absent in-between ids but refuse incomplete ones
#[test]
fn range_distinguishes_absent_from_incomplete() -> Result<(), Box<dyn StdError>> {
    let fixture = DatasetFixture::new();
    fixture.add_frame(3, 42);
    fixture.add_frame(3, 43);
    fixture.add_frame(3, 45); // 44 absent
    let loader = Loader::new(fixture.root())?;

    let collection = loader.frames(&["3/42:45"])?;
    assert_eq!(
        collection.descriptors(),
        &[Descriptor::new(3, 42), Descriptor::new(3, 43)]
    );

    // now 44 exists but is incomplete: the whole range must fail
    fixture.add_frame_files(3, 44, &[FileKind::Color]);
    match loader.frames(&["3/42:45"]) {
        Err(Error::Select(SelectError::IncompleteFrame { frame, .. })) => {
            assert_eq!(frame, 44);
        }
        other => panic!("unexpected result: {:?}", other.map(|c| c.len())),
    }
    Ok(())
}

// 5) Seeded shuffles are reproducible; unseeded ones preserve the set
#[test]
fn shuffle_behaviour() -> Result<(), Box<dyn StdError>> {
    let fixture = DatasetFixture::new();
    for frame in 0..16 {
        fixture.add_frame(2, frame);
    }
    let loader = Loader::new(fixture.root())?;

    let ordered = loader.frames(&["2/*"])?;
    let mut first = loader.frames(&["2/*"])?;
    let mut second = loader.frames(&["2/*"])?;
    first.shuffle(Some(7));
    second.shuffle(Some(7));
    assert_eq!(first.descriptors(), second.descriptors());

    let mut other_seed = loader.frames(&["2/*"])?;
    other_seed.shuffle(Some(8));
    assert_ne!(first.descriptors(), other_seed.descriptors());

    let mut unseeded = loader.frames(&["2/*"])?;
    unseeded.shuffle(None);
    let mut sorted = unseeded.descriptors().to_vec();
    sorted.sort_by_key(|descriptor| descriptor.frame);
    assert_eq!(sorted, ordered.descriptors());
    Ok(())
}

// 6) Expressions can come from a file, relative to the dataset root
#[test]
fn expressions_from_file() -> Result<(), Box<dyn StdError>> {
    let fixture = mixed_dataset_fixture();
    fs::write(
        fixture.root().join("selection.txt"),
        "# training selection\n\ndata_syn/1\n  7/42\n",
    )?;
    let loader = Loader::new(fixture.root())?;

    let collection = loader.frames_from_file("selection.txt")?;
    assert_eq!(
        collection.descriptors(),
        &[
            Descriptor::new(SequenceId::Synthetic, 1),
            Descriptor::new(7, 42),
        ]
    );

    assert!(matches!(
        loader.frames_from_file("missing.txt"),
        Err(Error::MissingPath(_))
    ));
    Ok(())
}

// 7) Overlapping selectors repeat descriptors; nothing is deduplicated
#[test]
fn duplicates_pass_through() -> Result<(), Box<dyn StdError>> {
    let fixture = mixed_dataset_fixture();
    let loader = Loader::new(fixture.root())?;

    let collection = loader.frames(&["7/42", "7/[42,42]"])?;
    assert_eq!(
        collection.descriptors(),
        &[
            Descriptor::new(7, 42),
            Descriptor::new(7, 42),
            Descriptor::new(7, 42),
        ]
    );
    Ok(())
}

// 8) Star never fails on incomplete frames, it just leaves them out
#[test]
fn star_ignores_incomplete_frames() -> Result<(), Box<dyn StdError>> {
    let fixture = mixed_dataset_fixture();
    let loader = Loader::new(fixture.root())?;

    let collection = loader.frames(&["7/*"])?;
    assert_eq!(collection.descriptors(), &[Descriptor::new(7, 42)]);
    Ok(())
}

// 9) Batch errors carry the index of the offending selector
#[test]
fn batch_error_names_selector_index() -> Result<(), Box<dyn StdError>> {
    let fixture = mixed_dataset_fixture();
    let loader = Loader::new(fixture.root())?;

    match loader.frames(&["1/*", "data_syn/1", "1/99"]) {
        Err(Error::Select(SelectError::FrameUnavailable { index, .. })) => {
            assert_eq!(index, 2);
        }
        other => panic!("unexpected result: {:?}", other.map(|c| c.len())),
    }
    Ok(())
}

// 10) Loader refuses a root that is not a directory
#[test]
fn loader_validates_root() {
    assert!(matches!(
        Loader::new("/definitely/not/here"),
        Err(Error::MissingPath(_))
    ));
}
