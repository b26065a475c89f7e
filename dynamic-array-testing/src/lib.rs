#![cfg(test)]

mod probe;

mod exception_safety;

mod model;

mod alloc_failure;

use dynamic_array::{DynamicArray, dynarray};
use probe::{Probe, Stats};
use serde::{Deserialize, Serialize};
use std::mem;

fn values(array: &DynamicArray<Probe>) -> Vec<u32> {
    array.iter().map(|p| p.0).collect()
}

#[test]
pub fn push_insert_erase_scenario() {
    let mut array = DynamicArray::new();
    array.push(1);
    array.push(2);
    assert_eq!(array, [1, 2]);
    array.insert(1, 5);
    assert_eq!(array, [1, 5, 2]);
    array.erase(0);
    assert_eq!(array, [5, 2]);
}

#[test]
pub fn reserve_on_empty_constructs_nothing() {
    let stats = Stats::reset();
    let mut array = DynamicArray::<Probe>::new();
    array.reserve(10);
    assert_eq!(array.capacity(), 10);
    assert_eq!(array.len(), 0);
    assert_eq!(stats.constructed(), 0);
}

#[test]
pub fn reserve_relocates_without_cloning() {
    let mut array = DynamicArray::from_fn(3, |i| Probe(i as u32));
    let stats = Stats::reset();
    array.reserve(100);
    assert_eq!(values(&array), [0, 1, 2]);
    assert_eq!(array.capacity(), 100);
    assert_eq!(stats.clones(), 0);
    assert_eq!(stats.drops(), 0);
}

#[test]
pub fn sized_construct_default_initializes() {
    let stats = Stats::reset();
    let array = DynamicArray::<Probe>::with_len(4);
    assert_eq!(values(&array), [0, 0, 0, 0]);
    assert_eq!(array.capacity(), 4);
    assert_eq!(stats.defaults(), 4);
}

#[test]
pub fn clone_is_independent() {
    let source = DynamicArray::from_fn(4, |i| Probe(i as u32));
    let mut copy = source.clone();
    assert_eq!(copy, source);
    assert_eq!(copy.capacity(), 4);

    copy[0].0 = 99;
    copy.push(Probe(7));
    assert_eq!(values(&source), [0, 1, 2, 3]);
    assert_eq!(values(&copy), [99, 1, 2, 3, 7]);
}

#[test]
pub fn move_construct_copies_nothing() {
    let mut source = DynamicArray::from_fn(3, |i| Probe(i as u32));
    let stats = Stats::reset();
    let moved = mem::take(&mut source);
    assert_eq!(source.len(), 0);
    assert_eq!(source.capacity(), 0);
    assert_eq!(values(&moved), [0, 1, 2]);
    assert_eq!(stats.clones(), 0);
    assert_eq!(stats.drops(), 0);
}

#[test]
pub fn move_assign_swaps_contents() {
    let mut a = DynamicArray::from_fn(2, |i| Probe(i as u32));
    let mut b = DynamicArray::from_fn(3, |i| Probe(10 + i as u32));
    let stats = Stats::reset();
    a.swap_with(&mut b);
    assert_eq!(values(&a), [10, 11, 12]);
    assert_eq!(values(&b), [0, 1]);

    let mut empty = DynamicArray::new();
    empty.swap_with(&mut a);
    assert_eq!(a.len(), 0);
    assert_eq!(values(&empty), [10, 11, 12]);
    assert_eq!(stats.clones(), 0);
    assert_eq!(stats.drops(), 0);
}

#[test]
pub fn clone_from_into_larger_capacity() {
    let mut dst = DynamicArray::with_capacity(8);
    dst.extend((0..5).map(Probe));
    let src = DynamicArray::from_fn(3, |i| Probe(20 + i as u32));
    let ptr = dst.as_ptr();

    let stats = Stats::reset();
    dst.clone_from(&src);
    assert_eq!(values(&dst), [20, 21, 22]);
    assert_eq!(dst.as_ptr(), ptr);
    // Three assigned over the prefix, replacing their old values, and two
    // surplus dropped
    assert_eq!(stats.clones(), 3);
    assert_eq!(stats.drops(), 5);

    let longer = DynamicArray::from_fn(6, |i| Probe(40 + i as u32));
    dst.clone_from(&longer);
    assert_eq!(values(&dst), [40, 41, 42, 43, 44, 45]);
    assert_eq!(dst.as_ptr(), ptr);
}

#[test]
pub fn insert_shifts_later_elements() {
    for index in 0..=4 {
        let mut array: DynamicArray<_> = (0..4).collect();
        let mut expected: Vec<_> = (0..4).collect();
        array.insert(index, 100);
        expected.insert(index, 100);
        assert_eq!(array, expected);
        assert_eq!(array.len(), 5);
    }
}

#[test]
pub fn erase_shifts_later_elements() {
    for index in 0..4 {
        let mut array = dynarray![10, 11, 12, 13];
        array.erase(index);
        let mut expected = vec![10, 11, 12, 13];
        expected.remove(index);
        assert_eq!(array, expected);
    }
}

#[test]
pub fn resize_truncates_and_extends() {
    let mut array = DynamicArray::from_fn(5, |i| Probe(i as u32));
    let stats = Stats::reset();
    array.resize(2);
    assert_eq!(values(&array), [0, 1]);
    assert_eq!(stats.drops(), 3);
    assert_eq!(array.capacity(), 5);

    array.resize(2);
    assert_eq!(values(&array), [0, 1]);

    array.resize(7);
    assert_eq!(values(&array), [0, 1, 0, 0, 0, 0, 0]);
    assert_eq!(stats.defaults(), 5);
    assert_eq!(array.capacity(), 7);
}

#[test]
pub fn every_live_element_dropped_once() {
    let stats = Stats::reset();
    {
        let mut array = DynamicArray::new();
        for i in 0..10 {
            array.push(Probe(i));
        }
        array.insert(3, Probe(100));
        array.erase(0);
        drop(array.pop());
        array.truncate(6);
    }
    assert_eq!(stats.drops(), 11);
}

#[test]
pub fn into_iter_drops_unconsumed() {
    let array = DynamicArray::from_fn(5, |i| Probe(i as u32));
    let stats = Stats::reset();
    let mut iter = array.into_iter();
    assert_eq!(iter.next().map(|p| p.0), Some(0));
    assert_eq!(stats.drops(), 1);
    drop(iter);
    assert_eq!(stats.drops(), 5);
}

#[test]
pub fn iteration_is_restartable() {
    let mut array = dynarray![1, 2, 3];
    assert_eq!(array.iter().sum::<i32>(), 6);
    for el in &mut array {
        *el *= 10;
    }
    assert_eq!(array.iter().copied().collect::<Vec<_>>(), [10, 20, 30]);
    array.push(40);
    assert_eq!((&array).into_iter().count(), 4);

    let range = array.as_ptr_range();
    assert_eq!(unsafe { range.end.offset_from(range.start) }, 4);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Point {
    x: i32,
    y: i32,
}

#[test]
pub fn serde_round_trip() {
    let array = dynarray![Point { x: 1, y: 2 }, Point { x: -3, y: 4 }];
    let json = serde_json::to_string(&array).unwrap();
    assert_eq!(json, r#"[{"x":1,"y":2},{"x":-3,"y":4}]"#);
    let back: DynamicArray<Point> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, array);
}

#[test]
pub fn serde_rejects_non_sequence() {
    let result = serde_json::from_str::<DynamicArray<u8>>(r#"{"a":1}"#);
    assert!(result.is_err());
}
