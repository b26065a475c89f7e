//! A global allocator that can be told to refuse large requests on the
//! current thread, so that allocation failure can be observed directly.

use dynamic_array::{ConstructError, DynamicArray, TryReserveError, dynarray};
use std::{
    alloc::{GlobalAlloc, Layout, System},
    cell::Cell,
    ptr,
};

thread_local! {
    static MAX_BYTES: Cell<Option<usize>> = const { Cell::new(None) };
}

struct Refusing;

unsafe impl GlobalAlloc for Refusing {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let refused = MAX_BYTES
            .try_with(|max| max.get().is_some_and(|max| layout.size() > max))
            .unwrap_or(false);
        if refused {
            ptr::null_mut()
        } else {
            // SAFETY: Forwarded unchanged
            unsafe { System.alloc(layout) }
        }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        // SAFETY: Every allocation came from System
        unsafe { System.dealloc(ptr, layout) }
    }
}

#[global_allocator]
static ALLOCATOR: Refusing = Refusing;

/// Refuses allocations over `max_bytes` on this thread until dropped.
struct Limit;

impl Limit {
    fn bytes(max_bytes: usize) -> Self {
        MAX_BYTES.with(|max| max.set(Some(max_bytes)));
        Self
    }
}

impl Drop for Limit {
    fn drop(&mut self) {
        MAX_BYTES.with(|max| max.set(None));
    }
}

#[test]
pub fn refused_reserve_leaves_array() {
    let mut array = dynarray![1u64, 2, 3];
    let (capacity, ptr) = (array.capacity(), array.as_ptr());

    let limit = Limit::bytes(1024);
    let err = array.try_reserve(1024).unwrap_err();
    drop(limit);

    let layout = Layout::array::<u64>(1024).unwrap();
    assert_eq!(err, TryReserveError::AllocFailed { layout });
    assert_eq!(array, [1, 2, 3]);
    assert_eq!(array.capacity(), capacity);
    assert_eq!(array.as_ptr(), ptr);

    array.try_reserve(1024).unwrap();
    assert_eq!(array.capacity(), 1024);
    assert_eq!(array, [1, 2, 3]);
}

#[test]
pub fn refused_growth_skips_constructor() {
    let mut array = DynamicArray::<[u8; 64]>::from_elem([7; 64], 4);
    assert_eq!(array.capacity(), 4);
    let ptr = array.as_ptr();
    let called = Cell::new(false);

    let limit = Limit::bytes(256);
    let result = array.try_emplace_back(|| {
        called.set(true);
        Ok::<_, ()>([9; 64])
    });
    let err = result.map(|_| ()).unwrap_err();
    drop(limit);

    let layout = Layout::array::<[u8; 64]>(8).unwrap();
    assert_eq!(err, ConstructError::Reserve(TryReserveError::AllocFailed { layout }));
    assert!(!called.get());
    assert_eq!(array.len(), 4);
    assert_eq!(array.capacity(), 4);
    assert_eq!(array.as_ptr(), ptr);
    assert!(array.iter().all(|e| *e == [7; 64]));
}

#[test]
pub fn refused_sized_construct_builds_nothing() {
    let calls = Cell::new(0);

    let limit = Limit::bytes(1024);
    let result = DynamicArray::<u64>::try_from_fn(4096, |i| {
        calls.set(calls.get() + 1);
        Ok::<_, ()>(i as u64)
    });
    drop(limit);

    assert!(matches!(
        result,
        Err(ConstructError::Reserve(TryReserveError::AllocFailed { .. }))
    ));
    assert_eq!(calls.get(), 0);
}
