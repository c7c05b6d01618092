//! Property-based tests for the region tag store.

use proptest::prelude::*;
use regiontags_store::{RegionTagError, RegionTagSet, Shift, Tag};

#[derive(Clone, Debug, Default, PartialEq)]
struct Red(u32);

#[derive(Clone, Debug, Default, PartialEq)]
struct Blue(u32);

/// Coordinates stay small so that operations collide often.
const SPACE: u32 = 64;

#[derive(Clone, Debug)]
enum Op {
    AddRed { offset: u32, length: u32 },
    AddBlueWhereAbsent { offset: u32, length: u32 },
    Clear { offset: u32, length: u32 },
    CopyWithin { source: u32, offset: u32, length: u32 },
    ShiftForward(u32),
    ShiftBackward(u32),
    RemoveRed { offset: u32, length: u32 },
    MutateBlue { offset: u32, length: u32 },
}

fn range() -> impl Strategy<Value = (u32, u32)> {
    (0..SPACE, 1..16u32)
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        range().prop_map(|(offset, length)| Op::AddRed { offset, length }),
        range().prop_map(|(offset, length)| Op::AddBlueWhereAbsent { offset, length }),
        range().prop_map(|(offset, length)| Op::Clear { offset, length }),
        (0..SPACE, range()).prop_map(|(source, (offset, length))| Op::CopyWithin {
            source,
            offset,
            length
        }),
        (0..8u32).prop_map(Op::ShiftForward),
        (0..8u32).prop_map(Op::ShiftBackward),
        range().prop_map(|(offset, length)| Op::RemoveRed { offset, length }),
        range().prop_map(|(offset, length)| Op::MutateBlue { offset, length }),
    ]
}

/// Only typed operations and raw operations that cannot introduce a partial
/// same-type overlap are generated, so no exact query may ever be ambiguous
/// unless a previous typed query already was.
fn apply(tags: &mut RegionTagSet<u32>, op: &Op) {
    match *op {
        Op::AddRed { offset, length } => {
            let _ = tags.add_if_absent::<Red>(offset, length);
        }
        Op::AddBlueWhereAbsent { offset, length } => {
            tags.add_where_absent::<Blue>(offset, length);
        }
        Op::Clear { offset, length } => tags.clear(offset, length),
        Op::CopyWithin {
            source,
            offset,
            length,
        } => tags.copy_within(source, offset, length),
        Op::ShiftForward(delta) => {
            let _ = tags.shift(Shift::Forward(delta));
        }
        Op::ShiftBackward(delta) => {
            let _ = tags.shift(Shift::Backward(delta));
        }
        Op::RemoveRed { offset, length } => {
            let _ = tags.remove_if_present::<Red>(offset, length);
        }
        Op::MutateBlue { offset, length } => {
            tags.for_each_tag_mut::<Blue, _>(offset, length, |_, _, blue| blue.0 += 1)
        }
    }
}

fn is_sorted(tags: &RegionTagSet<u32>) -> bool {
    tags.iter()
        .zip(tags.iter().skip(1))
        .all(|(a, b)| a.offset <= b.offset)
}

/// Every unit covered by tags of type `T`, with the values covering it.
fn coverage<T: Tag + Clone + PartialEq>(tags: &RegionTagSet<u32>, offset: u32, length: u32) -> Vec<Vec<T>> {
    (offset..offset + length)
        .map(|unit| {
            tags.tags::<T>(unit, 1)
                .into_iter()
                .map(|r| r.tag)
                .collect()
        })
        .collect()
}

/// Same-type regions are pairwise disjoint or identical.
fn same_type_disjoint<T: Tag>(tags: &RegionTagSet<u32>) -> bool {
    let regions: Vec<(u32, u32)> = tags
        .iter()
        .filter(|r| r.as_tag().is::<T>())
        .map(|r| (r.offset, r.offset + r.length))
        .collect();
    regions.iter().enumerate().all(|(i, a)| {
        regions[i + 1..]
            .iter()
            .all(|b| a == b || a.1 <= b.0 || b.1 <= a.0)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn regions_stay_sorted(ops in prop::collection::vec(arbitrary_op(), 1..40)) {
        let mut tags = RegionTagSet::new();
        for op in &ops {
            apply(&mut tags, op);
            prop_assert!(is_sorted(&tags), "unsorted after {:?}", op);
        }
    }

    #[test]
    fn same_type_regions_never_partially_overlap(ops in prop::collection::vec(arbitrary_op(), 1..40)) {
        let mut tags = RegionTagSet::new();
        for op in &ops {
            apply(&mut tags, op);
            prop_assert!(same_type_disjoint::<Red>(&tags));
            prop_assert!(same_type_disjoint::<Blue>(&tags));
        }
    }

    #[test]
    fn copy_onto_itself_is_noop(
        ops in prop::collection::vec(arbitrary_op(), 1..30),
        (offset, length) in range(),
    ) {
        let mut tags = RegionTagSet::new();
        for op in &ops {
            apply(&mut tags, op);
        }
        let reds = coverage::<Red>(&tags, 0, SPACE * 2);
        let blues = coverage::<Blue>(&tags, 0, SPACE * 2);
        tags.copy_within(offset, offset, length);
        prop_assert_eq!(coverage::<Red>(&tags, 0, SPACE * 2), reds);
        prop_assert_eq!(coverage::<Blue>(&tags, 0, SPACE * 2), blues);
    }

    #[test]
    fn add_where_absent_is_idempotent(
        ops in prop::collection::vec(arbitrary_op(), 0..30),
        (offset, length) in range(),
    ) {
        let mut tags = RegionTagSet::new();
        for op in &ops {
            apply(&mut tags, op);
        }
        tags.add_where_absent::<Blue>(offset, length);
        let covered = coverage::<Blue>(&tags, offset, length);
        prop_assert!(covered.iter().all(|values| values.len() == 1));
        prop_assert!(tags.add_where_absent::<Blue>(offset, length).is_empty());
        prop_assert_eq!(coverage::<Blue>(&tags, offset, length), covered);
    }

    #[test]
    fn partial_same_type_overlap_is_ambiguous(
        (offset, length) in range(),
        delta in 1..16u32,
    ) {
        prop_assume!(delta < length);
        let mut tags = RegionTagSet::new();
        tags.add::<Red>(offset, length).unwrap();
        tags.insert(offset + delta, length, Box::new(Red(1)));
        let result = tags.get::<Red>(offset + delta, length);
        prop_assert!(matches!(result, Err(RegionTagError::AmbiguousOverlap { .. })), "{:?}", result);
    }
}
