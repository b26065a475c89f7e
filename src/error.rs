use std::{
    alloc::{Layout, handle_alloc_error},
    error::Error,
    fmt::{self, Display, Formatter},
};

/// The error type for the `try_` family of allocating methods.
///
/// Returned by [`DynamicArray::try_reserve`] and the other `try_` methods
/// when storage for the requested number of slots cannot be obtained. The
/// array is left exactly as it was.
///
/// [`DynamicArray::try_reserve`]: crate::DynamicArray::try_reserve
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TryReserveError {
    /// The requested capacity exceeds the maximum allocation size.
    CapacityOverflow,
    /// The allocator returned an error.
    AllocFailed {
        /// The layout of the allocation request that failed.
        layout: Layout,
    },
}

impl TryReserveError {
    /// Escalates the error the way the infallible std collection methods do.
    pub(crate) fn bail(self) -> ! {
        match self {
            Self::CapacityOverflow => panic!("capacity overflow"),
            Self::AllocFailed { layout } => handle_alloc_error(layout),
        }
    }
}

impl Display for TryReserveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityOverflow => {
                write!(f, "memory allocation failed because the computed capacity exceeded the collection's maximum")
            }
            Self::AllocFailed { layout } => {
                write!(
                    f,
                    "memory allocation of {} bytes (align {}) failed",
                    layout.size(),
                    layout.align()
                )
            }
        }
    }
}

impl Error for TryReserveError {}

/// The error type for fallible element construction.
///
/// Returned by [`DynamicArray::try_from_fn`], [`DynamicArray::try_emplace`]
/// and [`DynamicArray::try_emplace_back`]. In every case the array (or, for
/// `try_from_fn`, the allocation) is left as it was before the call.
///
/// [`DynamicArray::try_from_fn`]: crate::DynamicArray::try_from_fn
/// [`DynamicArray::try_emplace`]: crate::DynamicArray::try_emplace
/// [`DynamicArray::try_emplace_back`]: crate::DynamicArray::try_emplace_back
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConstructError<E> {
    /// Storage for the new element could not be allocated.
    Reserve(TryReserveError),
    /// The element constructor reported a failure.
    Element(E),
}

impl<E> ConstructError<E> {
    /// Returns the element constructor's error, if that is what failed.
    pub fn into_element(self) -> Option<E> {
        match self {
            Self::Reserve(_) => None,
            Self::Element(e) => Some(e),
        }
    }
}

impl<E> From<TryReserveError> for ConstructError<E> {
    fn from(value: TryReserveError) -> Self {
        Self::Reserve(value)
    }
}

impl<E> Display for ConstructError<E>
where
    E: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reserve(e) => write!(f, "{e}"),
            Self::Element(e) => write!(f, "element construction failed: {e}"),
        }
    }
}

impl<E> Error for ConstructError<E>
where
    E: Error + 'static,
{
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Reserve(e) => Some(e),
            Self::Element(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(
            TryReserveError::CapacityOverflow.to_string(),
            "memory allocation failed because the computed capacity exceeded the collection's maximum"
        );
        let layout = Layout::from_size_align(64, 8).unwrap();
        assert_eq!(
            TryReserveError::AllocFailed { layout }.to_string(),
            "memory allocation of 64 bytes (align 8) failed"
        );
        let e: ConstructError<fmt::Error> = ConstructError::Element(fmt::Error);
        assert_eq!(
            e.to_string(),
            "element construction failed: an error occurred when formatting an argument"
        );
    }

    #[test]
    fn source_chain() {
        let e: ConstructError<fmt::Error> = TryReserveError::CapacityOverflow.into();
        assert!(e.source().is_some());
        assert_eq!(e.into_element(), None);
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn bail_overflow() {
        TryReserveError::CapacityOverflow.bail();
    }
}
