/// Creates a [`DynamicArray`] containing the arguments.
///
/// Mirrors [`vec!`]: either a list of elements, or an element and a length,
/// in which case the element is cloned.
///
/// # Examples
///
/// ```
/// # use dynamic_array::dynarray;
/// let array = dynarray![1, 2, 3];
/// assert_eq!(array, [1, 2, 3]);
///
/// let zeros = dynarray![0u8; 4];
/// assert_eq!(zeros, [0, 0, 0, 0]);
/// ```
///
/// [`DynamicArray`]: crate::DynamicArray
#[macro_export]
macro_rules! dynarray {
    () => {
        $crate::DynamicArray::new()
    };

    ($element:expr; $len:expr) => {
        $crate::DynamicArray::from_elem($element, $len)
    };

    ($($element:expr),+ $(,)?) => {
        $crate::DynamicArray::from([$($element),+])
    };
}
