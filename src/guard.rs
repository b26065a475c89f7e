use crate::RawBuffer;
use std::{mem, ptr};

/// Tracks a run of values being constructed into consecutive raw slots.
///
/// If the guard is dropped before [`InitGuard::commit`], every value it
/// constructed is dropped again, so an early return or a panic from an element
/// constructor never leaks the values built so far. The buffer itself is left
/// to its owner.
pub(crate) struct InitGuard<'a, T> {
    buffer: &'a mut RawBuffer<T>,
    start: usize,
    initialized: usize,
}

impl<'a, T> InitGuard<'a, T> {
    /// Starts a run at slot `start`.
    pub(crate) fn new(buffer: &'a mut RawBuffer<T>, start: usize) -> Self {
        Self {
            buffer,
            start,
            initialized: 0,
        }
    }

    /// Writes `value` into the next raw slot.
    ///
    /// # Safety
    ///
    /// The caller must ensure that
    ///
    /// - the next slot is within capacity
    /// - the next slot is raw
    pub(crate) unsafe fn push(&mut self, value: T) {
        let offset = self.start + self.initialized;
        debug_assert!(offset < self.buffer.capacity());
        // SAFETY: Caller ensures the slot is in bounds and raw
        unsafe { self.buffer.slot(offset).write(value) };
        self.initialized += 1;
    }

    /// Hands the constructed values over to the caller and returns how many
    /// there are.
    pub(crate) fn commit(self) -> usize {
        let initialized = self.initialized;
        mem::forget(self);
        initialized
    }
}

impl<T> Drop for InitGuard<'_, T> {
    fn drop(&mut self) {
        // SAFETY: Exactly these slots were written by push and not committed
        unsafe {
            let first = self.buffer.slot(self.start);
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(first, self.initialized));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::Cell, rc::Rc};

    struct Counted(Rc<Cell<usize>>);

    impl Drop for Counted {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn uncommitted_values_are_dropped() {
        let drops = Rc::new(Cell::new(0));
        let mut buffer = RawBuffer::with_capacity(4);
        {
            let mut guard = InitGuard::new(&mut buffer, 1);
            unsafe {
                guard.push(Counted(drops.clone()));
                guard.push(Counted(drops.clone()));
            }
        }
        assert_eq!(drops.get(), 2);
    }

    #[test]
    fn committed_values_survive() {
        let drops = Rc::new(Cell::new(0));
        let mut buffer = RawBuffer::with_capacity(2);
        let mut guard = InitGuard::new(&mut buffer, 0);
        unsafe { guard.push(Counted(drops.clone())) };
        assert_eq!(guard.commit(), 1);
        assert_eq!(drops.get(), 0);
        unsafe { ptr::drop_in_place(buffer.slot(0)) };
        assert_eq!(drops.get(), 1);
    }
}
