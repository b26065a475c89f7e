use crate::{
    probe::{PANIC_MESSAGE, Probe, ProbeError, Stats},
    values,
};
use dynamic_array::{ConstructError, DynamicArray, TryReserveError};
use std::panic::{self, AssertUnwindSafe};

/// Everything observable about an array that a failed operation must keep.
#[derive(Debug, PartialEq)]
struct Snapshot {
    len: usize,
    capacity: usize,
    ptr: *const Probe,
    values: Vec<u32>,
}

impl Snapshot {
    fn of(array: &DynamicArray<Probe>) -> Self {
        Self {
            len: array.len(),
            capacity: array.capacity(),
            ptr: array.as_ptr(),
            values: values(array),
        }
    }
}

fn assert_panicked<R>(f: impl FnOnce() -> R) {
    let err = match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(_) => panic!("expected the operation to fail"),
        Err(err) => err,
    };
    let message = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied());
    assert_eq!(message, Some(PANIC_MESSAGE));
}

fn sample(len: usize) -> DynamicArray<Probe> {
    DynamicArray::from_fn(len, |i| Probe(i as u32 + 1))
}

#[test]
pub fn failed_clone_leaves_source_and_leaks_nothing() {
    let source = sample(5);
    let before = Snapshot::of(&source);
    let stats = Stats::reset();
    stats.fail_after(2);
    assert_panicked(|| source.clone());
    assert_eq!(Snapshot::of(&source), before);
    assert_eq!(stats.clones(), 2);
    assert_eq!(stats.drops(), 2);
}

#[test]
pub fn failed_sized_construct_drops_built_prefix() {
    for fail_at in 0..4 {
        let stats = Stats::reset();
        stats.fail_after(fail_at);
        assert_panicked(|| DynamicArray::<Probe>::with_len(4));
        assert_eq!(stats.defaults(), fail_at);
        assert_eq!(stats.drops(), fail_at);
    }
}

#[test]
pub fn failed_try_from_fn_reports_error() {
    let stats = Stats::reset();
    stats.fail_after(3);
    let result = DynamicArray::try_from_fn(5, |i| Probe::try_new(i as u32));
    assert_eq!(result.unwrap_err(), ConstructError::Element(ProbeError));
    assert_eq!(stats.drops(), 3);
}

#[test]
pub fn failed_reserve_leaves_array() {
    let mut array = sample(3);
    let before = Snapshot::of(&array);
    assert_eq!(
        array.try_reserve(usize::MAX),
        Err(TryReserveError::CapacityOverflow)
    );
    assert_eq!(Snapshot::of(&array), before);
}

#[test]
#[should_panic(expected = "capacity overflow")]
pub fn reserve_overflow_panics() {
    let mut array = sample(1);
    array.reserve(usize::MAX);
}

#[test]
pub fn failed_reallocating_emplace_leaves_array() {
    for index in 0..=4 {
        let mut array = sample(4);
        assert_eq!(array.len(), array.capacity());
        let before = Snapshot::of(&array);

        let stats = Stats::reset();
        stats.fail_after(0);
        assert_panicked(|| {
            array.emplace(index, Probe::default);
        });
        assert_eq!(Snapshot::of(&array), before);
        assert_eq!(stats.drops(), 0);

        let result = array.try_emplace(index, || Probe::try_new(9));
        assert_eq!(result.unwrap_err(), ConstructError::Element(ProbeError));
        assert_eq!(Snapshot::of(&array), before);
    }
}

#[test]
pub fn failed_in_place_emplace_leaves_array() {
    let mut array = DynamicArray::with_capacity(8);
    array.extend((1..=4).map(Probe));
    let before = Snapshot::of(&array);

    let stats = Stats::reset();
    stats.fail_after(0);
    assert_panicked(|| {
        array.emplace(1, Probe::default);
    });
    assert_eq!(Snapshot::of(&array), before);

    let result = array.try_emplace_back(|| Probe::try_new(5));
    assert!(matches!(result, Err(ConstructError::Element(ProbeError))));
    assert_eq!(Snapshot::of(&array), before);

    stats.disarm();
    assert_eq!(array.try_emplace_back(|| Probe::try_new(5)).unwrap().0, 5);
    assert_eq!(values(&array), [1, 2, 3, 4, 5]);
}

#[test]
pub fn failed_copy_and_swap_leaves_destination() {
    let mut dst = sample(2);
    let src = DynamicArray::from_fn(6, |i| Probe(100 + i as u32));
    assert!(src.len() > dst.capacity());
    let before = Snapshot::of(&dst);

    let stats = Stats::reset();
    stats.fail_after(4);
    assert_panicked(|| dst.clone_from(&src));
    assert_eq!(Snapshot::of(&dst), before);
    assert_eq!(stats.clones(), 4);
    assert_eq!(stats.drops(), 4);
}

#[test]
pub fn failed_in_place_clone_from_stays_valid() {
    let mut dst = DynamicArray::with_capacity(8);
    dst.extend((0..2).map(Probe));
    let src = DynamicArray::from_fn(5, |i| Probe(100 + i as u32));

    let stats = Stats::reset();
    stats.fail_after(3);
    assert_panicked(|| dst.clone_from(&src));
    // The prefix stays assigned while the partly cloned tail is dropped again
    assert_eq!(values(&dst), [100, 101]);
    assert_eq!(dst.capacity(), 8);
    assert_eq!(stats.clones(), 3);
    assert_eq!(stats.drops(), 3);
}

#[test]
pub fn failed_resize_keeps_length() {
    let mut array = sample(2);
    let stats = Stats::reset();
    stats.fail_after(3);
    assert_panicked(|| array.resize(10));
    assert_eq!(values(&array), [1, 2]);
    assert_eq!(stats.drops(), 3);
    assert!(array.capacity() >= 10);
}

#[test]
pub fn panicking_drop_during_erase_keeps_array_consistent() {
    struct Bomb(bool);

    impl Drop for Bomb {
        fn drop(&mut self) {
            if self.0 {
                panic!("{PANIC_MESSAGE}");
            }
        }
    }

    let mut array = DynamicArray::from([Bomb(false), Bomb(true), Bomb(false)]);
    assert_panicked(|| array.erase(1));
    assert_eq!(array.len(), 2);
    assert!(array.iter().all(|b| !b.0));
}
