//! Address stability and deep-copy independence.

use chunkvec::ChunkVec;
use chunkvec_test_utils::{layout, numbered, reference_records, Record};

#[test]
fn addresses_do_not_move_across_chunk_allocations() {
    let mut cv = ChunkVec::new();
    let mut addresses = Vec::new();
    for i in 0..1000u64 {
        let slot = cv.push(i);
        addresses.push(slot as *const u64);
    }
    for (i, &addr) in addresses.iter().enumerate() {
        assert_eq!(&cv[i] as *const u64, addr, "element {i} moved");
        assert_eq!(cv[i], i as u64);
    }
}

#[test]
fn values_survive_later_pushes() {
    let mut cv = numbered(5);
    let snapshot: Vec<usize> = cv.iter().copied().collect();
    cv.extend(1000..5000);
    let prefix: Vec<usize> = cv.iter().take(5).copied().collect();
    assert_eq!(prefix, snapshot);
}

#[test]
fn appending_to_copy_leaves_original_untouched() {
    let original = reference_records();
    let mut copy = original.clone();
    copy.push(Record::new(-1));
    copy[0].a = 77;

    assert_eq!(original.len(), 103);
    assert_eq!(original[0].a, 1);
    assert_eq!(original.last().unwrap().a, 99);
    assert_eq!(copy.len(), 104);
    assert_eq!(copy.last().unwrap().a, -1);
}

#[test]
fn appending_to_original_leaves_copy_untouched() {
    let mut original = reference_records();
    let copy = original.clone();
    for a in 200..300 {
        original.push(Record::new(a));
    }
    assert_eq!(copy.len(), 103);
    assert_eq!(copy, reference_records());
    assert_ne!(layout(&copy), layout(&original));
}

#[test]
fn copy_keeps_capacity_so_it_grows_like_the_original() {
    let original = numbered(3);
    let mut copy = original.clone();
    assert_eq!(layout(&copy), vec![(2, 2), (4, 1)]);
    copy.extend([3, 4, 5]);
    assert_eq!(layout(&copy), vec![(2, 2), (4, 4)]);
    copy.push(6);
    assert_eq!(layout(&copy), vec![(2, 2), (4, 4), (8, 1)]);
}

#[test]
fn clone_from_is_a_deep_copy() {
    let source = numbered(40);
    let mut target = numbered(3);
    target.clone_from(&source);
    target.push(40);
    assert_eq!(source.len(), 40);
    assert_eq!(target.len(), 41);
    let prefix: Vec<usize> = target.iter().take(40).copied().collect();
    assert_eq!(prefix, (0..40).collect::<Vec<_>>());
}
