use crate::RawBuffer;
use std::{
    fmt::{self, Debug, Formatter},
    iter::FusedIterator,
    ptr, slice,
};

/// An iterator that moves out of a [`DynamicArray`].
///
/// This struct is created by the [`into_iter`] method, provided by the
/// [`IntoIterator`] trait.
///
/// [`DynamicArray`]: crate::DynamicArray
/// [`into_iter`]: crate::DynamicArray::into_iter
pub struct IntoIter<T> {
    pub(crate) buffer: RawBuffer<T>,
    pub(crate) start: usize,
    pub(crate) end: usize,
}

impl<T> IntoIter<T> {
    /// Returns the remaining elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: Slots start..end are live
        unsafe { slice::from_raw_parts(self.buffer.slot(self.start), self.end - self.start) }
    }

    /// Returns the remaining elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: Slots start..end are live
        unsafe { slice::from_raw_parts_mut(self.buffer.slot(self.start), self.end - self.start) }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            None
        } else {
            // SAFETY: start < end, so the slot is live. It is raw once start
            // moves past it.
            let out = unsafe { self.buffer.slot(self.start).read() };
            self.start += 1;
            Some(out)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.start;
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            None
        } else {
            self.end -= 1;
            // SAFETY: The slot was live and is now past the end
            Some(unsafe { self.buffer.slot(self.end).read() })
        }
    }
}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        // SAFETY: Only the remaining slots are live. The buffer releases the
        // memory afterwards.
        unsafe { ptr::drop_in_place(self.as_mut_slice()) }
    }
}

impl<T> Debug for IntoIter<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T> FusedIterator for IntoIter<T> {}
impl<T> ExactSizeIterator for IntoIter<T> {}

#[cfg(test)]
mod tests {
    use crate::DynamicArray;

    #[test]
    fn both_ends() {
        let array = DynamicArray::from([1, 2, 3, 4]);
        let mut iter = array.into_iter();
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.next_back(), Some(4));
        assert_eq!(iter.as_slice(), [2, 3]);
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.collect::<Vec<_>>(), [2, 3]);
    }

    #[test]
    fn drops_remaining() {
        let array = DynamicArray::from(["a", "b", "c"].map(String::from));
        let mut iter = array.into_iter();
        assert_eq!(iter.next().as_deref(), Some("a"));
        drop(iter);
    }
}
