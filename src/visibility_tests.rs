/// ```
/// use dynamic_array::DynamicArray;
/// let mut array = DynamicArray::<u64>::new();
/// array.try_reserve(8).unwrap();
/// assert_eq!(array.capacity(), 8);
/// ```
mod storage_is_private {
    /// ```compile_fail
    /// use dynamic_array::RawBuffer;
    /// let buffer = RawBuffer::<u64>::with_capacity(8);
    /// ```
    mod fail {}
}
