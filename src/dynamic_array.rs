use crate::{ConstructError, IntoIter, RawBuffer, TryReserveError, eq_impl, guard::InitGuard};
use std::{
    borrow::{Borrow, BorrowMut},
    cmp::Ordering,
    convert::Infallible,
    fmt::{self, Debug, Formatter},
    hash::{Hash, Hasher},
    mem::ManuallyDrop,
    ops::{Deref, DerefMut, Index, IndexMut},
    ptr,
    slice::{self, SliceIndex},
};

/// A growable, contiguous array built directly over one raw allocation.
///
/// Slots `0..len` of the buffer hold live values and slots `len..capacity` are
/// raw. Storage is never resized in place: growth allocates a new buffer,
/// relocates the live values into it and exchanges it in, so an operation that
/// fails before that exchange leaves the array exactly as it was.
///
/// Capacity doubles whenever it is exhausted, starting from 1, which makes
/// appending amortized O(1).
///
/// Failures come in two kinds. Allocation failure is reported by the `try_`
/// methods as a [`TryReserveError`] and escalated by the others the way std
/// collections do. Element construction failure is either an `Err` returned
/// from the constructor passed to a `try_` method, reported as
/// [`ConstructError::Element`], or a panic from `Clone`, `Default` or a
/// constructor closure. Unless documented otherwise, either kind of failure
/// leaves the array's length, capacity and contents untouched.
///
/// # Examples
///
/// ```
/// # use dynamic_array::DynamicArray;
/// let mut array = DynamicArray::new();
/// array.push(1);
/// array.push(2);
/// array.insert(1, 5);
/// assert_eq!(array, [1, 5, 2]);
/// array.remove(0);
/// assert_eq!(array, [5, 2]);
/// ```
pub struct DynamicArray<T> {
    buffer: RawBuffer<T>,
    len: usize,
}

impl<T> DynamicArray<T> {
    /// Constructs a new, empty `DynamicArray<T>`.
    ///
    /// The array will not allocate until elements are pushed onto it.
    ///
    /// # Examples
    /// ```
    /// # use dynamic_array::DynamicArray;
    /// let array = DynamicArray::<u8>::new();
    /// assert_eq!(array.len(), 0);
    /// assert_eq!(array.capacity(), 0);
    /// ```
    pub const fn new() -> Self {
        Self {
            buffer: RawBuffer::new(),
            len: 0,
        }
    }

    /// Constructs a new, empty `DynamicArray<T>` with room for exactly
    /// `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: RawBuffer::with_capacity(capacity),
            len: 0,
        }
    }

    /// Constructs an array of `len` default values.
    ///
    /// The capacity is exactly `len`. If `T::default` panics, the values
    /// built so far are dropped and the allocation is released before the
    /// panic continues.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dynamic_array::DynamicArray;
    /// let array = DynamicArray::<u32>::with_len(3);
    /// assert_eq!(array, [0, 0, 0]);
    /// assert_eq!(array.capacity(), 3);
    /// ```
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        Self::from_fn(len, |_| T::default())
    }

    /// Constructs an array of `len` clones of `element`.
    pub fn from_elem(element: T, len: usize) -> Self
    where
        T: Clone,
    {
        Self::from_fn(len, |_| element.clone())
    }

    /// Constructs an array of `len` elements, in order, where element `i` is
    /// `f(i)`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dynamic_array::DynamicArray;
    /// let squares = DynamicArray::from_fn(4, |i| i * i);
    /// assert_eq!(squares, [0, 1, 4, 9]);
    /// ```
    pub fn from_fn<F>(len: usize, mut f: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        let mut buffer = RawBuffer::with_capacity(len);
        let mut guard = InitGuard::new(&mut buffer, 0);
        for i in 0..len {
            let element = f(i);
            // SAFETY: i < len == capacity and slot i is raw
            unsafe { guard.push(element) };
        }
        let len = guard.commit();
        Self { buffer, len }
    }

    /// Like [`from_fn`], except that construction may fail.
    ///
    /// If allocation fails or `f` returns an error, every element constructed
    /// so far is dropped and no array comes into existence.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dynamic_array::{ConstructError, DynamicArray};
    /// let parsed = DynamicArray::try_from_fn(3, |i| ["1", "2", "3"][i].parse::<u8>());
    /// assert_eq!(parsed.unwrap(), [1, 2, 3]);
    ///
    /// let parsed = DynamicArray::try_from_fn(3, |i| ["1", "x", "3"][i].parse::<u8>());
    /// assert!(matches!(parsed, Err(ConstructError::Element(_))));
    /// ```
    ///
    /// [`from_fn`]: DynamicArray::from_fn
    pub fn try_from_fn<F, E>(len: usize, mut f: F) -> Result<Self, ConstructError<E>>
    where
        F: FnMut(usize) -> Result<T, E>,
    {
        let mut buffer = RawBuffer::try_with_capacity(len)?;
        let mut guard = InitGuard::new(&mut buffer, 0);
        for i in 0..len {
            let element = f(i).map_err(ConstructError::Element)?;
            // SAFETY: i < len == capacity and slot i is raw
            unsafe { guard.push(element) };
        }
        let len = guard.commit();
        Ok(Self { buffer, len })
    }

    /// Returns the number of elements in the array, also referred to as its
    /// length.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the array contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements the array can hold without
    /// reallocating.
    pub const fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Returns a raw pointer to the array's buffer.
    pub const fn as_ptr(&self) -> *const T {
        self.buffer.as_ptr()
    }

    /// Returns a raw mutable pointer to the array's buffer.
    pub const fn as_mut_ptr(&mut self) -> *mut T {
        self.buffer.as_mut_ptr()
    }

    /// Extracts a slice containing the entire array.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: Slots 0..len are live and the pointer is aligned and
        // nonnull even when nothing is allocated
        unsafe { slice::from_raw_parts(self.buffer.as_ptr(), self.len) }
    }

    /// Extracts a mutable slice containing the entire array.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: As for as_slice, and self is borrowed uniquely
        unsafe { slice::from_raw_parts_mut(self.buffer.as_mut_ptr(), self.len) }
    }

    /// Ensures that the capacity is at least `capacity`.
    ///
    /// Note that the argument is the desired total capacity rather than an
    /// additional amount. Does nothing if the capacity is already sufficient.
    /// Otherwise the array reallocates to exactly `capacity`.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity overflows `isize::MAX` bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dynamic_array::DynamicArray;
    /// let mut array = DynamicArray::<String>::new();
    /// array.reserve(10);
    /// assert_eq!(array.capacity(), 10);
    /// assert_eq!(array.len(), 0);
    /// array.reserve(5);
    /// assert_eq!(array.capacity(), 10);
    /// ```
    pub fn reserve(&mut self, capacity: usize) {
        self.try_reserve(capacity).unwrap_or_else(|e| e.bail())
    }

    /// Like [`reserve`], except that allocation failure is returned instead
    /// of panicking. On failure the array is unchanged.
    ///
    /// [`reserve`]: DynamicArray::reserve
    pub fn try_reserve(&mut self, capacity: usize) -> Result<(), TryReserveError> {
        if capacity <= self.capacity() {
            return Ok(());
        }
        let mut buffer = RawBuffer::try_with_capacity(capacity)?;
        // SAFETY: The new buffer is larger than len and entirely raw
        unsafe { buffer.relocate_from(&self.buffer, 0, 0, self.len) };
        self.buffer.swap(&mut buffer);
        // The old allocation is released here. Its slots were moved out, so
        // nothing is dropped.
        Ok(())
    }

    fn grown_capacity(&self) -> Result<usize, TryReserveError> {
        match self.capacity() {
            0 => Ok(1),
            capacity => capacity
                .checked_mul(2)
                .ok_or(TryReserveError::CapacityOverflow),
        }
    }

    /// Makes room for `additional` more elements, at least doubling the
    /// capacity whenever it grows.
    fn reserve_additional(&mut self, additional: usize) {
        let Some(required) = self.len.checked_add(additional) else {
            TryReserveError::CapacityOverflow.bail();
        };
        if required <= self.capacity() {
            return;
        }
        let doubled = self.grown_capacity().unwrap_or(required);
        self.reserve(required.max(doubled));
    }

    /// Shortens the array, keeping the first `len` elements and dropping the
    /// rest. Has no effect if `len` is not less than the current length. The
    /// capacity is unchanged.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let count = self.len - len;
        // Shrink first so that a panicking destructor cannot cause a double
        // drop.
        self.len = len;
        // SAFETY: Slots len..len + count were live and are now past the end
        unsafe {
            let tail = ptr::slice_from_raw_parts_mut(self.buffer.slot(len), count);
            ptr::drop_in_place(tail);
        }
    }

    /// Drops all elements, keeping the capacity.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Resizes the array in place so that its length is `new_len`.
    ///
    /// If `new_len` is less than the length, the array is truncated.
    /// Otherwise it is reserved to at least `new_len` and the new slots are
    /// filled with values returned by calling `f`, in order. Should `f`
    /// panic, the values it already produced are dropped and the length is
    /// unchanged, though the capacity may have grown.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dynamic_array::DynamicArray;
    /// let mut array = DynamicArray::from([1, 2]);
    /// let mut next = 10;
    /// array.resize_with(4, || {
    ///     next += 1;
    ///     next
    /// });
    /// assert_eq!(array, [1, 2, 11, 12]);
    /// array.resize_with(1, || unreachable!());
    /// assert_eq!(array, [1]);
    /// ```
    pub fn resize_with<F>(&mut self, new_len: usize, mut f: F)
    where
        F: FnMut() -> T,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return;
        }
        self.reserve(new_len);
        let mut guard = InitGuard::new(&mut self.buffer, self.len);
        for _ in self.len..new_len {
            let element = f();
            // SAFETY: Slots len..new_len are raw and new_len <= capacity
            unsafe { guard.push(element) };
        }
        self.len += guard.commit();
    }

    /// Resizes the array in place so that its length is `new_len`, filling
    /// any new slots with `T::default()`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dynamic_array::DynamicArray;
    /// let mut array = DynamicArray::from([7, 8, 9]);
    /// array.resize(5);
    /// assert_eq!(array, [7, 8, 9, 0, 0]);
    /// array.resize(2);
    /// assert_eq!(array, [7, 8]);
    /// ```
    pub fn resize(&mut self, new_len: usize)
    where
        T: Default,
    {
        self.resize_with(new_len, T::default);
    }

    /// Appends an element to the back of the array.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity overflows `isize::MAX` bytes.
    pub fn push(&mut self, element: T) {
        self.emplace_back(|| element);
    }

    /// Constructs an element at the back of the array from `f` and returns a
    /// reference to it.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dynamic_array::DynamicArray;
    /// let mut array = DynamicArray::new();
    /// let name = array.emplace_back(|| String::from("dyn"));
    /// name.push_str("amic");
    /// assert_eq!(array, ["dynamic"]);
    /// ```
    pub fn emplace_back<F>(&mut self, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        let len = self.len;
        self.emplace(len, f)
    }

    /// Like [`emplace_back`], except that construction may fail.
    ///
    /// [`emplace_back`]: DynamicArray::emplace_back
    pub fn try_emplace_back<F, E>(&mut self, f: F) -> Result<&mut T, ConstructError<E>>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let len = self.len;
        self.try_emplace(len, f)
    }

    /// Removes the last element and returns it, or [`None`] if the array is
    /// empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            self.len -= 1;
            // SAFETY: Slot len was live and is now past the end
            Some(unsafe { self.buffer.slot(self.len).read() })
        }
    }

    /// Inserts an element at position `index`, shifting all elements after
    /// it to the right, and returns a reference to it.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dynamic_array::DynamicArray;
    /// let mut array = DynamicArray::from([1, 2, 3]);
    /// array.insert(1, 4);
    /// assert_eq!(array, [1, 4, 2, 3]);
    /// array.insert(4, 5);
    /// assert_eq!(array, [1, 4, 2, 3, 5]);
    /// ```
    pub fn insert(&mut self, index: usize, element: T) -> &mut T {
        self.emplace(index, || element)
    }

    /// Constructs an element from `f` at position `index`, shifting all
    /// elements after it to the right, and returns a reference to it.
    ///
    /// When the array is full, `f` is only called once the larger buffer
    /// exists, and the new element goes straight into its final slot there.
    /// A panic from `f` then leaves the array untouched.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn emplace<F>(&mut self, index: usize, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        match self.try_emplace(index, || Ok::<_, Infallible>(f())) {
            Ok(element) => element,
            Err(ConstructError::Reserve(e)) => e.bail(),
            Err(ConstructError::Element(never)) => match never {},
        }
    }

    /// Like [`emplace`], except that construction may fail.
    ///
    /// On any error the array's length, capacity and contents are unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dynamic_array::{ConstructError, DynamicArray};
    /// let mut array = DynamicArray::from([1, 3]);
    /// let inserted = array.try_emplace(1, || "2".parse::<i32>()).unwrap();
    /// assert_eq!(*inserted, 2);
    ///
    /// let failed = array.try_emplace(0, || "zero".parse::<i32>());
    /// assert!(matches!(failed, Err(ConstructError::Element(_))));
    /// assert_eq!(array, [1, 2, 3]);
    /// ```
    ///
    /// [`emplace`]: DynamicArray::emplace
    pub fn try_emplace<F, E>(&mut self, index: usize, f: F) -> Result<&mut T, ConstructError<E>>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let len = self.len;
        if index > len {
            panic!("insertion index (is {index}) should be <= len (is {len})");
        }

        if len == self.capacity() {
            let mut buffer = RawBuffer::<T>::try_with_capacity(self.grown_capacity()?)?;
            let element = f().map_err(ConstructError::Element)?;
            // SAFETY: The new buffer has room for len + 1 elements and is
            // entirely raw. The old slots are treated as raw once moved out
            // and are released without dropping when the buffers are
            // exchanged.
            unsafe {
                buffer.slot(index).write(element);
                buffer.relocate_from(&self.buffer, 0, 0, index);
                buffer.relocate_from(&self.buffer, index, index + 1, len - index);
            }
            self.buffer.swap(&mut buffer);
        } else {
            let element = f().map_err(ConstructError::Element)?;
            // SAFETY: len < capacity, so shifting index..len up by one stays
            // in bounds and leaves slot index logically raw
            unsafe {
                let slot = self.buffer.slot(index);
                if index < len {
                    ptr::copy(slot, slot.add(1), len - index);
                }
                slot.write(element);
            }
        }

        self.len += 1;
        // SAFETY: Slot index was just written
        Ok(unsafe { &mut *self.buffer.slot(index) })
    }

    /// Removes and returns the element at position `index`, shifting all
    /// elements after it to the left. Relative order is preserved.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dynamic_array::DynamicArray;
    /// let mut array = DynamicArray::from(['a', 'b', 'c']);
    /// assert_eq!(array.remove(1), 'b');
    /// assert_eq!(array, ['a', 'c']);
    /// ```
    pub fn remove(&mut self, index: usize) -> T {
        let len = self.len;
        if index >= len {
            panic!("removal index (is {index}) should be < len (is {len})");
        }
        // SAFETY: index < len, so the element is live and the shifted range
        // index + 1..len is in bounds
        unsafe {
            let slot = self.buffer.slot(index);
            let element = slot.read();
            ptr::copy(slot.add(1), slot, len - index - 1);
            self.len = len - 1;
            element
        }
    }

    /// Removes and drops the element at position `index`, shifting all
    /// elements after it to the left.
    ///
    /// The array is already consistent when the element is dropped, so a
    /// panicking destructor does not corrupt it.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn erase(&mut self, index: usize) {
        drop(self.remove(index));
    }

    /// Exchanges the entire contents of two arrays in O(1).
    ///
    /// # Examples
    ///
    /// ```
    /// # use dynamic_array::DynamicArray;
    /// let mut a = DynamicArray::from([1, 2]);
    /// let mut b = DynamicArray::new();
    /// a.swap_with(&mut b);
    /// assert!(a.is_empty());
    /// assert_eq!(b, [1, 2]);
    /// ```
    pub fn swap_with(&mut self, other: &mut Self) {
        self.buffer.swap(&mut other.buffer);
        std::mem::swap(&mut self.len, &mut other.len);
    }
}

impl<T> Drop for DynamicArray<T> {
    fn drop(&mut self) {
        // SAFETY: Slots 0..len are live. The buffer releases the memory
        // afterwards.
        unsafe { ptr::drop_in_place(self.as_mut_slice()) }
    }
}

impl<T> Clone for DynamicArray<T>
where
    T: Clone,
{
    /// Clones every element into a new allocation of exactly `len` slots.
    ///
    /// If a clone panics, the clones made so far are dropped and the source
    /// is unaffected.
    fn clone(&self) -> Self {
        Self::from_fn(self.len, |i| self[i].clone())
    }

    /// Replaces the contents with clones of `source`.
    ///
    /// If `source` does not fit into the current capacity, a full copy is
    /// built first and then exchanged in, so a panicking clone leaves `self`
    /// untouched. Otherwise the existing allocation is reused: the common
    /// prefix is assigned element by element, then the surplus is dropped or
    /// cloned in place. A panicking clone on that path leaves `self` valid
    /// but partially assigned.
    fn clone_from(&mut self, source: &Self) {
        if source.len > self.capacity() {
            let mut copy = source.clone();
            self.swap_with(&mut copy);
            return;
        }

        let common = self.len.min(source.len);
        self[..common].clone_from_slice(&source[..common]);
        if source.len < self.len {
            self.truncate(source.len);
        } else {
            let mut guard = InitGuard::new(&mut self.buffer, self.len);
            for element in &source[self.len..] {
                // SAFETY: source.len <= capacity and slots len..source.len
                // are raw
                unsafe { guard.push(element.clone()) };
            }
            self.len += guard.commit();
        }
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for DynamicArray<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> DerefMut for DynamicArray<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T, I> Index<I> for DynamicArray<T>
where
    I: SliceIndex<[T]>,
{
    type Output = I::Output;

    fn index(&self, index: I) -> &Self::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, I> IndexMut<I> for DynamicArray<T>
where
    I: SliceIndex<[T]>,
{
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<T> AsRef<[T]> for DynamicArray<T> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T> AsMut<[T]> for DynamicArray<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T> Borrow<[T]> for DynamicArray<T> {
    fn borrow(&self) -> &[T] {
        self
    }
}

impl<T> BorrowMut<[T]> for DynamicArray<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T> Debug for DynamicArray<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self.as_slice(), f)
    }
}

impl<T> Hash for DynamicArray<T>
where
    T: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        Hash::hash(self.as_slice(), state)
    }
}

impl<T> PartialOrd for DynamicArray<T>
where
    T: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        PartialOrd::partial_cmp(self.as_slice(), other.as_slice())
    }
}

impl<T> Ord for DynamicArray<T>
where
    T: Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        Ord::cmp(self.as_slice(), other.as_slice())
    }
}

eq_impl::impl_for!(DynamicArray);

impl<T> Extend<T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.reserve_additional(lower);
        for element in iter {
            self.push(element);
        }
    }
}

impl<'a, T> Extend<&'a T> for DynamicArray<T>
where
    T: 'a + Copy,
{
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut out = Self::new();
        out.extend(iter);
        out
    }
}

impl<T, const N: usize> From<[T; N]> for DynamicArray<T> {
    fn from(value: [T; N]) -> Self {
        value.into_iter().collect()
    }
}

impl<T> From<Vec<T>> for DynamicArray<T> {
    fn from(value: Vec<T>) -> Self {
        value.into_iter().collect()
    }
}

impl<T> From<&[T]> for DynamicArray<T>
where
    T: Clone,
{
    fn from(value: &[T]) -> Self {
        Self::from_fn(value.len(), |i| value[i].clone())
    }
}

impl<T> IntoIterator for DynamicArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let mut me = ManuallyDrop::new(self);
        IntoIter {
            buffer: me.buffer.take(),
            start: 0,
            end: me.len,
        }
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynamicArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn growth_doubles() {
        let mut array = DynamicArray::new();
        let mut capacities = vec![];
        for i in 0..17 {
            array.push(i);
            capacities.push(array.capacity());
        }
        assert_eq!(
            capacities,
            [1, 2, 4, 4, 8, 8, 8, 8, 16, 16, 16, 16, 16, 16, 16, 16, 32]
        );
    }

    #[test]
    fn reserve_constructs_nothing() {
        let mut array = DynamicArray::<Box<u8>>::new();
        array.reserve(10);
        assert_eq!(array.capacity(), 10);
        assert_eq!(array.len(), 0);
    }

    #[test]
    fn emplace_in_place_shifts_right() {
        let mut array = DynamicArray::with_capacity(8);
        array.extend(["a", "b", "c"].map(String::from));
        array.emplace(0, || String::from("z"));
        assert_eq!(array.capacity(), 8);
        assert_eq!(array, ["z", "a", "b", "c"]);
    }

    #[test]
    fn emplace_reallocating_places_element() {
        let mut array = DynamicArray::from([1, 2, 3, 4]);
        assert_eq!(array.capacity(), 4);
        *array.emplace(2, || 9) += 1;
        assert_eq!(array.capacity(), 8);
        assert_eq!(array, [1, 2, 10, 3, 4]);
    }

    #[test]
    fn failed_emplace_changes_nothing() {
        let mut array = DynamicArray::from([1, 2]);
        let ptr = array.as_ptr();
        let result = array.try_emplace(1, || Err::<i32, _>("nope"));
        assert_eq!(result, Err(ConstructError::Element("nope")));
        assert_eq!(array, [1, 2]);
        assert_eq!(array.capacity(), 2);
        assert_eq!(array.as_ptr(), ptr);
    }

    #[test]
    #[should_panic(expected = "insertion index (is 3) should be <= len (is 2)")]
    fn insert_past_end() {
        let mut array = DynamicArray::from([1, 2]);
        array.insert(3, 0);
    }

    #[test]
    #[should_panic(expected = "removal index (is 2) should be < len (is 2)")]
    fn remove_past_end() {
        let mut array = DynamicArray::from([1, 2]);
        array.remove(2);
    }

    #[test]
    fn pop_empty() {
        let mut array = DynamicArray::<u8>::new();
        assert_eq!(array.pop(), None);
        assert_eq!(array.len(), 0);
    }

    #[test]
    fn clone_from_reuses_allocation() {
        let mut dst = DynamicArray::with_capacity(6);
        dst.extend(["x", "y", "z"].map(String::from));
        let ptr = dst.as_ptr();

        let longer = DynamicArray::from(["1", "2", "3", "4", "5"].map(String::from));
        dst.clone_from(&longer);
        assert_eq!(dst, longer);
        assert_eq!(dst.as_ptr(), ptr);

        let shorter = DynamicArray::from(["only"].map(String::from));
        dst.clone_from(&shorter);
        assert_eq!(dst, shorter);
        assert_eq!(dst.capacity(), 6);
    }

    #[test]
    fn clone_from_reallocates_when_too_small() {
        let mut dst = DynamicArray::from([0u8]);
        let src = DynamicArray::from([1u8, 2, 3]);
        dst.clone_from(&src);
        assert_eq!(dst, [1, 2, 3]);
        assert_eq!(dst.capacity(), 3);
    }

    #[test]
    fn zero_sized_elements() {
        let mut array = DynamicArray::new();
        for _ in 0..5 {
            array.push(());
        }
        array.insert(2, ());
        assert_eq!(array.len(), 6);
        assert_eq!(array.capacity(), 8);
        array.erase(0);
        assert_eq!(array.into_iter().count(), 5);
    }

    #[test]
    fn extend_from_refs() {
        let mut array = DynamicArray::from([1]);
        array.extend(&[2, 3]);
        assert_eq!(array, [1, 2, 3]);
    }

    proptest! {
        #[test]
        fn push_keeps_order_and_bounds_capacity(values in proptest::collection::vec(any::<i32>(), 0..200)) {
            let mut array = DynamicArray::new();
            for &value in &values {
                array.push(value);
            }
            prop_assert_eq!(array.len(), values.len());
            prop_assert!(array.capacity() >= values.len());
            prop_assert!(array.capacity() <= (2 * values.len()).max(1));
            prop_assert_eq!(&array[..], &values[..]);
        }

        #[test]
        fn resize_matches_vec(start in 0usize..40, target in 0usize..40) {
            let mut array = DynamicArray::from_fn(start, |i| i);
            let mut model: Vec<_> = (0..start).collect();
            array.resize(target);
            model.resize(target, 0);
            prop_assert_eq!(array, model);
        }
    }
}
