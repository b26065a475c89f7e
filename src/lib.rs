//! A growable, contiguous array built directly over manually managed raw
//! storage.
//!
//! The crate has two layers. A private `RawBuffer` owns one untyped
//! allocation sized for a fixed number of slots and knows nothing about
//! which of them hold values. [`DynamicArray`] owns exactly one `RawBuffer`
//! plus a length, and implements construction, growth and positional
//! insertion and removal on top of it.
//!
//! Every operation that can fail partway (allocation, or an element
//! constructor returning an error or panicking) either completes or leaves
//! the array exactly as it was. New storage is prepared off to the side and
//! only exchanged in once it is complete.
//!
//! ```
//! use dynamic_array::{DynamicArray, dynarray};
//!
//! let mut array = dynarray![1, 2];
//! array.insert(1, 5);
//! assert_eq!(array, [1, 5, 2]);
//! array.erase(0);
//! assert_eq!(array, [5, 2]);
//!
//! let mut empty = DynamicArray::<String>::new();
//! empty.reserve(10);
//! assert_eq!((empty.len(), empty.capacity()), (0, 10));
//! ```

mod dynamic_array;
pub use dynamic_array::DynamicArray;

mod raw_buffer;
use raw_buffer::RawBuffer;

mod error;
pub use error::{ConstructError, TryReserveError};

mod into_iter;
pub use into_iter::IntoIter;

mod guard;

mod eq_impl;

mod macros;

#[cfg(doctest)]
mod visibility_tests;

#[cfg(feature = "serde")]
mod serde;

#[cfg(test)]
mod tests {
    use crate::{DynamicArray, dynarray};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct El {
        foo: u64,
        bar: u8,
        baz: [u32; 2],
    }

    const A: El = El {
        foo: 0,
        bar: 1,
        baz: [2, 3],
    };

    const B: El = El {
        foo: 4,
        bar: 5,
        baz: [6, 7],
    };

    const C: El = El {
        foo: 8,
        bar: 9,
        baz: [10, 11],
    };

    const D: El = El {
        foo: 12,
        bar: 13,
        baz: [14, 15],
    };

    const E: El = El {
        foo: 16,
        bar: 17,
        baz: [18, 19],
    };

    const ELEMENTS: [El; 5] = [A, B, C, D, E];
    const ALL_A: [El; 3] = [A, A, A];

    #[test]
    pub fn push_and_pop() {
        let mut array = DynamicArray::new();
        for element in ELEMENTS.into_iter() {
            array.push(element);
        }
        for element in ELEMENTS.into_iter().rev() {
            assert_eq!(Some(element), array.pop());
        }
        assert_eq!(None, array.pop());
    }

    #[test]
    pub fn insert() {
        test_insert(0, [B, A, A, A]);
        test_insert(1, [A, B, A, A]);
        test_insert(2, [A, A, B, A]);
        test_insert(3, [A, A, A, B]);
    }

    fn test_insert(index: usize, expected: [El; 4]) {
        // Once with spare capacity, once forcing a reallocation
        for capacity in [8, 3] {
            let mut array = DynamicArray::with_capacity(capacity);
            for element in ALL_A.into_iter() {
                array.push(element);
            }
            assert_eq!(*array.insert(index, B), B);
            assert_eq!(array, expected);
        }
    }

    #[test]
    pub fn remove() {
        test_remove(0, A, [B, C, D, E]);
        test_remove(1, B, [A, C, D, E]);
        test_remove(2, C, [A, B, D, E]);
        test_remove(3, D, [A, B, C, E]);
        test_remove(4, E, [A, B, C, D]);
    }

    fn test_remove(index: usize, expected_return: El, expected_contents: [El; 4]) {
        let mut array = DynamicArray::new();
        for element in ELEMENTS.into_iter() {
            array.push(element);
        }
        assert_eq!(expected_return, array.remove(index));
        for element in expected_contents.into_iter().rev() {
            assert_eq!(Some(element), array.pop());
        }
    }

    #[test]
    pub fn macro_forms() {
        let empty: DynamicArray<El> = dynarray![];
        assert!(empty.is_empty());
        assert_eq!(dynarray![A; 3], ALL_A);
        assert_eq!(dynarray![A, B, C, D, E,], ELEMENTS);
    }
}
