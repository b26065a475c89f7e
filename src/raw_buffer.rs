use crate::TryReserveError;
use std::{
    alloc::{self, Layout},
    fmt::{self, Debug, Formatter},
    marker::PhantomData,
    mem,
    ptr::{self, NonNull},
};

/// A low-level utility providing the storage needed by [`DynamicArray`].
///
/// In particular, it owns one allocation with room for exactly `capacity`
/// values of `T`. It has no notion of which slots hold live values: none of
/// them are assumed to. Consequently, this type will **never** drop any `T`
/// when it is dropped. It only returns the memory to the allocator. The owner
/// must destroy any live values first.
///
/// A buffer with capacity 0 never allocates. Neither does a buffer of a
/// zero-sized `T`, which still records the requested capacity.
///
/// Buffers are not [`Clone`], since copying untyped slots is meaningless.
/// They can be moved, [`take`]n, or [`swap`]ped in O(1).
///
/// [`DynamicArray`]: crate::DynamicArray
/// [`take`]: RawBuffer::take
/// [`swap`]: RawBuffer::swap
pub struct RawBuffer<T> {
    ptr: NonNull<T>,
    capacity: usize,
    _marker: PhantomData<T>,
}

unsafe impl<T> Send for RawBuffer<T> where T: Send {}
unsafe impl<T> Sync for RawBuffer<T> where T: Sync {}

impl<T> RawBuffer<T> {
    /// Creates an empty buffer without allocating.
    pub const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            capacity: 0,
            _marker: PhantomData,
        }
    }

    /// Allocates room for `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if the allocation size overflows `isize::MAX` bytes, and aborts
    /// through [`handle_alloc_error`] if the allocator fails.
    ///
    /// [`handle_alloc_error`]: std::alloc::handle_alloc_error
    pub fn with_capacity(capacity: usize) -> Self {
        Self::try_with_capacity(capacity).unwrap_or_else(|e| e.bail())
    }

    /// Allocates room for `capacity` slots, reporting failure instead of
    /// panicking.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
        let layout = Self::layout(capacity)?;
        if layout.size() == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                capacity,
                _marker: PhantomData,
            });
        }

        // SAFETY: layout has a nonzero size
        let ptr = unsafe { alloc::alloc(layout) };
        let Some(ptr) = NonNull::new(ptr) else {
            return Err(TryReserveError::AllocFailed { layout });
        };

        Ok(Self {
            ptr: ptr.cast(),
            capacity,
            _marker: PhantomData,
        })
    }

    fn layout(capacity: usize) -> Result<Layout, TryReserveError> {
        // Rejects sizes over isize::MAX
        Layout::array::<T>(capacity).map_err(|_| TryReserveError::CapacityOverflow)
    }

    /// Returns the number of slots in the allocation.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns a pointer to the first slot.
    ///
    /// The pointer is dangling, but well aligned, when no memory is allocated.
    pub const fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Returns a mutable pointer to the first slot.
    pub const fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Returns a pointer to the slot at `offset`.
    ///
    /// One-past-the-end is allowed so that callers can form the end of a
    /// range. Bounds are only checked in debug builds.
    ///
    /// # Safety
    ///
    /// The caller must ensure that
    ///
    /// - `offset <= self.capacity()`
    ///
    /// Dereferencing the result additionally requires `offset <
    /// self.capacity()` and, for reads, that the slot holds a live value.
    pub unsafe fn slot(&self, offset: usize) -> *mut T {
        debug_assert!(
            offset <= self.capacity,
            "slot offset (is {offset}) should be <= capacity (is {})",
            self.capacity
        );
        // SAFETY: Caller ensures offset is within the allocation or one past it
        unsafe { self.ptr.as_ptr().add(offset) }
    }

    /// Exchanges the allocations of two buffers. No slot is touched.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.ptr, &mut other.ptr);
        mem::swap(&mut self.capacity, &mut other.capacity);
    }

    /// Moves the allocation out, leaving an empty buffer behind.
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    /// Moves `count` live values from `src[src_offset..]` into the raw slots
    /// `self[dst_offset..]`.
    ///
    /// Relocation is a bitwise move, which cannot fail for any `T`. A growth
    /// operation therefore never has to roll a half-relocated buffer back:
    /// once the new storage exists, the move always completes. Afterwards the
    /// source slots must be treated as raw.
    ///
    /// # Safety
    ///
    /// The caller must ensure that
    ///
    /// - `src_offset + count <= src.capacity()` and those slots are live
    /// - `dst_offset + count <= self.capacity()` and those slots are raw
    pub(crate) unsafe fn relocate_from(
        &mut self,
        src: &Self,
        src_offset: usize,
        dst_offset: usize,
        count: usize,
    ) {
        debug_assert!(src_offset + count <= src.capacity);
        debug_assert!(dst_offset + count <= self.capacity);
        // SAFETY: Distinct buffers never overlap and the caller ensures both
        // ranges are within their allocations
        unsafe { ptr::copy_nonoverlapping(src.slot(src_offset), self.slot(dst_offset), count) }
    }
}

impl<T> Drop for RawBuffer<T> {
    fn drop(&mut self) {
        // Only frees the allocation. Live values are the owner's business.
        if let Ok(layout) = Self::layout(self.capacity) {
            if layout.size() > 0 {
                // SAFETY: ptr came from alloc with this same layout
                unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), layout) }
            }
        }
    }
}

impl<T> Default for RawBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Debug for RawBuffer<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawBuffer")
            .field("ptr", &self.ptr)
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_capacity_does_not_allocate() {
        let buffer = RawBuffer::<u32>::with_capacity(0);
        assert_eq!(buffer.capacity(), 0);
        assert_eq!(buffer.as_ptr(), NonNull::<u32>::dangling().as_ptr().cast_const());
    }

    #[test]
    fn slots_are_writable() {
        let mut buffer = RawBuffer::<u32>::with_capacity(4);
        unsafe {
            for i in 0..4 {
                buffer.slot(i).write(i as u32 * 10);
            }
            assert_eq!(*buffer.slot(3), 30);
            assert_eq!(buffer.slot(4), buffer.as_mut_ptr().add(4));
        }
    }

    #[test]
    fn swap_exchanges_allocations() {
        let mut a = RawBuffer::<u8>::with_capacity(3);
        let mut b = RawBuffer::<u8>::new();
        let a_ptr = a.as_ptr();
        a.swap(&mut b);
        assert_eq!(a.capacity(), 0);
        assert_eq!(b.capacity(), 3);
        assert_eq!(b.as_ptr(), a_ptr);
    }

    #[test]
    fn take_leaves_empty() {
        let mut a = RawBuffer::<String>::with_capacity(2);
        let b = a.take();
        assert_eq!(a.capacity(), 0);
        assert_eq!(b.capacity(), 2);
    }

    #[test]
    fn relocate_moves_values() {
        let src = RawBuffer::<String>::with_capacity(2);
        let mut dst = RawBuffer::<String>::with_capacity(4);
        unsafe {
            src.slot(0).write("a".to_string());
            src.slot(1).write("b".to_string());
            dst.relocate_from(&src, 0, 2, 2);
            assert_eq!(*dst.slot(2), "a");
            assert_eq!(*dst.slot(3), "b");
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(dst.slot(2), 2));
        }
    }

    #[test]
    fn zero_sized_tracks_capacity() {
        let buffer = RawBuffer::<()>::with_capacity(100);
        assert_eq!(buffer.capacity(), 100);
    }

    #[test]
    fn overflow_is_reported() {
        let buffer = RawBuffer::<u64>::try_with_capacity(8).unwrap();
        assert_eq!(buffer.capacity(), 8);
        assert_eq!(
            RawBuffer::<u64>::try_with_capacity(usize::MAX).unwrap_err(),
            TryReserveError::CapacityOverflow
        );
        assert_eq!(
            RawBuffer::<u64>::try_with_capacity(usize::MAX / 4).unwrap_err(),
            TryReserveError::CapacityOverflow
        );
    }
}
