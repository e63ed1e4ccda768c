use crate::{Exponential, GrowthPolicy, IntoIter, LenType, RawBuffer, Tight};
use std::{
    cmp::Ordering,
    fmt::{self, Formatter},
    hash::{Hash, Hasher},
    marker::PhantomData,
    mem::{self, ManuallyDrop},
    ops::{Deref, DerefMut},
    ptr, slice,
};

/// A contiguous growable array with configurable growth policy and index
/// width.
///
/// `LocalVec` stores its elements in a single exclusively-owned buffer, like
/// [`Vec`], but exposes the two memory-management knobs engine-style code
/// tends to want:
///
/// - `P`: the [`GrowthPolicy`]. [`Exponential`] (the default) rounds every
///   growth up to a power of two; [`Tight`] allocates exactly what is asked
///   for. See [`TightLocalVec`].
/// - `L`: the [`LenType`], the integer width used for the length and
///   capacity. The default `u32` keeps the header small on 64-bit targets;
///   use `usize` for full-range vectors or `u8`/`u16` to shrink further.
///
/// Slice operations such as indexing, iteration, [`sort_unstable`],
/// [`reverse`], and [`binary_search`] are available through
/// `Deref<Target = [T]>`.
///
/// # Fatal errors
///
/// Out-of-range indices passed to [`insert`], [`remove`], [`swap_remove`], or
/// the indexing operators are caller bugs and panic; they are never reported
/// through return values. Allocation failure aborts the process via
/// [`handle_alloc_error`]. The only recoverable "failure" is absence, which
/// [`find`], [`pop`], and [`remove_value`] report as `None`.
///
/// # Pointer invalidation
///
/// Any operation that can change the capacity ([`push`], [`insert`],
/// [`reserve`], [`resize`]) or that deallocates ([`reset`], drop) invalidates
/// pointers previously obtained from [`as_ptr`] as well as outstanding
/// iterators; the borrow checker enforces this for safe code.
///
/// # Examples
///
/// ```
/// use local_vec::LocalVec;
///
/// let mut vec = LocalVec::<i32>::new();
/// vec.push(3);
/// vec.push(1);
/// vec.push(2);
/// vec.sort_unstable();
/// assert_eq!(vec, [1, 2, 3]);
/// ```
///
/// [`sort_unstable`]: slice::sort_unstable
/// [`reverse`]: slice::reverse
/// [`binary_search`]: slice::binary_search
/// [`insert`]: LocalVec::insert
/// [`remove`]: LocalVec::remove
/// [`swap_remove`]: LocalVec::swap_remove
/// [`find`]: LocalVec::find
/// [`pop`]: LocalVec::pop
/// [`remove_value`]: LocalVec::remove_value
/// [`push`]: LocalVec::push
/// [`reserve`]: LocalVec::reserve
/// [`resize`]: LocalVec::resize
/// [`reset`]: LocalVec::reset
/// [`as_ptr`]: LocalVec::as_ptr
/// [`handle_alloc_error`]: std::alloc::handle_alloc_error
pub struct LocalVec<T, L = u32, P = Exponential>
where
    L: LenType,
    P: GrowthPolicy,
{
    len: L,
    cap: L,
    raw: RawBuffer<T>,
    marker: PhantomData<P>,
}

/// A [`LocalVec`] that grows strictly as much as needed.
pub type TightLocalVec<T, L = u32> = LocalVec<T, L, Tight>;

unsafe impl<T, L, P> Send for LocalVec<T, L, P>
where
    T: Send,
    L: LenType,
    P: GrowthPolicy,
{
}

unsafe impl<T, L, P> Sync for LocalVec<T, L, P>
where
    T: Sync,
    L: LenType,
    P: GrowthPolicy,
{
}

impl<T, L, P> LocalVec<T, L, P>
where
    L: LenType,
    P: GrowthPolicy,
{
    /// Constructs a new, empty vector.
    ///
    /// Nothing is allocated until the first element is pushed.
    ///
    /// # Examples
    /// ```
    /// # use local_vec::LocalVec;
    /// let vec = LocalVec::<u8>::new();
    /// assert_eq!(vec.capacity(), 0);
    /// ```
    pub const fn new() -> Self {
        Self {
            len: L::ZERO,
            // Zero-sized elements never allocate; the whole index space is
            // usable from the start.
            cap: if mem::size_of::<T>() == 0 {
                L::MAX
            } else {
                L::ZERO
            },
            raw: RawBuffer::dangling(),
            marker: PhantomData,
        }
    }

    /// Constructs an empty vector with room for at least `capacity`
    /// elements, rounded up by the growth policy.
    ///
    /// # Examples
    /// ```
    /// # use local_vec::{LocalVec, TightLocalVec};
    /// assert_eq!(LocalVec::<u8>::with_capacity(5).capacity(), 8);
    /// assert_eq!(TightLocalVec::<u8>::with_capacity(5).capacity(), 5);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        let mut vec = Self::new();
        vec.reserve(capacity);
        vec
    }

    /// Returns the number of elements in the vector.
    pub fn len(&self) -> usize {
        self.len.as_usize()
    }

    /// Returns true if the vector contains no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of elements the vector can hold without
    /// reallocating.
    pub fn capacity(&self) -> usize {
        self.cap.as_usize()
    }

    /// Ensures the capacity is at least `min_capacity`.
    ///
    /// Under [`Exponential`] the new capacity is the smallest power of two
    /// that fits the request; under [`Tight`] it is exactly the request.
    /// Does nothing if the current capacity is already sufficient; the
    /// capacity never shrinks short of [`reset`].
    ///
    /// # Panics
    ///
    /// Panics if `min_capacity` does not fit in `L`.
    ///
    /// # Examples
    /// ```
    /// # use local_vec::LocalVec;
    /// let mut vec = LocalVec::<u8>::new();
    /// vec.reserve(5);
    /// assert_eq!(vec.capacity(), 8);
    /// vec.reserve(3);
    /// assert_eq!(vec.capacity(), 8);
    /// ```
    ///
    /// [`reset`]: LocalVec::reset
    pub fn reserve(&mut self, min_capacity: usize) {
        if min_capacity > self.capacity() {
            self.grow_to(min_capacity);
        }
    }

    // Cold path of reserve and push.
    fn grow_to(&mut self, min_capacity: usize) {
        if min_capacity > L::MAX_USIZE {
            panic!("capacity overflow");
        }
        let old_cap = self.capacity();
        // Clamp so policy rounding cannot leave the index width.
        let new_cap = P::grow(old_cap, min_capacity).min(L::MAX_USIZE);
        debug_assert!(new_cap >= min_capacity);
        // SAFETY: zero-sized types start at full capacity and never get
        // here, and old_cap is the live capacity.
        unsafe { self.raw.grow(old_cap, new_cap) };
        self.cap = L::from_usize(new_cap);
    }

    /// Appends `value` to the back of the vector. Amortized O(1) under
    /// [`Exponential`].
    ///
    /// # Examples
    /// ```
    /// # use local_vec::LocalVec;
    /// let mut vec = LocalVec::<i32>::new();
    /// vec.push(1);
    /// vec.push(2);
    /// assert_eq!(vec, [1, 2]);
    /// ```
    pub fn push(&mut self, value: T) {
        let len = self.len();
        if len == self.capacity() {
            // Exponential doubles (minimum 1); Tight adds a single slot.
            self.grow_to(len + 1);
        }
        // SAFETY: slot len is within capacity and unoccupied.
        unsafe { self.raw.write(len, value) };
        self.len = L::from_usize(len + 1);
    }

    /// Removes and returns the last element, or `None` if the vector is
    /// empty.
    pub fn pop(&mut self) -> Option<T> {
        let len = self.len();
        if len == 0 {
            None
        } else {
            self.len = L::from_usize(len - 1);
            // SAFETY: the slot was initialized; shrinking len first hands
            // its ownership to the caller.
            Some(unsafe { self.raw.read(len - 1) })
        }
    }

    /// Inserts `value` at `index`, shifting everything after it up one slot.
    /// O(`len` − `index`).
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    ///
    /// # Examples
    /// ```
    /// # use local_vec::local_vec;
    /// let mut vec = local_vec![1, 2, 3];
    /// vec.insert(1, 99);
    /// assert_eq!(vec, [1, 99, 2, 3]);
    /// ```
    pub fn insert(&mut self, index: usize, value: T) {
        let len = self.len();
        assert!(index <= len, "index out of bounds");
        if len == self.capacity() {
            self.grow_to(len + 1);
        }
        // SAFETY: capacity fits len + 1; the tail is shifted as raw bytes
        // before the slot is overwritten.
        unsafe {
            self.raw.copy(index, index + 1, len - index);
            self.raw.write(index, value);
        }
        self.len = L::from_usize(len + 1);
    }

    /// Removes and returns the element at `index`, shifting everything after
    /// it down one slot. Preserves the order of the remaining elements;
    /// O(`len` − `index`).
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    ///
    /// # Examples
    /// ```
    /// # use local_vec::local_vec;
    /// let mut vec = local_vec![1, 2, 3];
    /// assert_eq!(vec.remove(1), 2);
    /// assert_eq!(vec, [1, 3]);
    /// ```
    pub fn remove(&mut self, index: usize) -> T {
        let len = self.len();
        assert!(index < len, "index out of bounds");
        self.len = L::from_usize(len - 1);
        // SAFETY: the element is read out before its slot is reused by the
        // shift.
        unsafe {
            let out = self.raw.read(index);
            self.raw.copy(index + 1, index, len - index - 1);
            out
        }
    }

    /// Removes and returns the element at `index` in O(1) by moving the last
    /// element into its place. Generally faster than [`remove`], but does
    /// not preserve order.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    ///
    /// # Examples
    /// ```
    /// # use local_vec::local_vec;
    /// let mut vec = local_vec![1, 2, 3];
    /// assert_eq!(vec.swap_remove(0), 1);
    /// assert_eq!(vec, [3, 2]);
    /// ```
    ///
    /// [`remove`]: LocalVec::remove
    pub fn swap_remove(&mut self, index: usize) -> T {
        let len = self.len();
        assert!(index < len, "index out of bounds");
        self.len = L::from_usize(len - 1);
        // SAFETY: the element is read out, then the vacated last slot
        // backfills its place when it isn't already last.
        unsafe {
            let out = self.raw.read(index);
            if index < len - 1 {
                self.raw.copy(len - 1, index, 1);
            }
            out
        }
    }

    /// Removes the first element equal to `value`, preserving the order of
    /// the rest. Returns the removed element, or `None` if there was no
    /// match.
    ///
    /// # Examples
    /// ```
    /// # use local_vec::local_vec;
    /// let mut vec = local_vec![1, 2, 3];
    /// assert_eq!(vec.remove_value(&2), Some(2));
    /// assert_eq!(vec.remove_value(&2), None);
    /// assert_eq!(vec, [1, 3]);
    /// ```
    pub fn remove_value(&mut self, value: &T) -> Option<T>
    where
        T: PartialEq,
    {
        let index = self.find(value)?;
        Some(self.remove(index))
    }

    /// Returns the index of the first element equal to `value`, or `None`.
    ///
    /// # Examples
    /// ```
    /// # use local_vec::local_vec;
    /// let vec = local_vec![7, 8, 7];
    /// assert_eq!(vec.find(&7), Some(0));
    /// assert_eq!(vec.find(&9), None);
    /// ```
    pub fn find(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.find_from(value, 0)
    }

    /// Like [`find`], but starts the scan at `from`. A starting point past
    /// the end is not an error and reports no match.
    ///
    /// # Examples
    /// ```
    /// # use local_vec::local_vec;
    /// let vec = local_vec![7, 8, 7];
    /// assert_eq!(vec.find_from(&7, 1), Some(2));
    /// assert_eq!(vec.find_from(&7, 10), None);
    /// ```
    ///
    /// [`find`]: LocalVec::find
    pub fn find_from(&self, value: &T, from: usize) -> Option<usize>
    where
        T: PartialEq,
    {
        let tail = self.as_slice().get(from..)?;
        tail.iter()
            .position(|element| element == value)
            .map(|index| index + from)
    }

    /// Inserts `value` before the first element it compares less than, which
    /// keeps an ascending vector ascending.
    ///
    /// The scan is linear from the front; when insertions dominate, prefer
    /// [`binary_search`] plus [`insert`].
    ///
    /// # Examples
    /// ```
    /// # use local_vec::local_vec;
    /// let mut vec = local_vec![1, 3, 5];
    /// vec.insert_ordered(4);
    /// assert_eq!(vec, [1, 3, 4, 5]);
    /// ```
    ///
    /// [`binary_search`]: slice::binary_search
    /// [`insert`]: LocalVec::insert
    pub fn insert_ordered(&mut self, value: T)
    where
        T: Ord,
    {
        let index = self
            .iter()
            .position(|element| value < *element)
            .unwrap_or(self.len());
        self.insert(index, value);
    }

    /// Shortens the vector to `len` elements, dropping the tail. Does
    /// nothing if the vector is already short enough. The capacity is
    /// retained.
    pub fn truncate(&mut self, len: usize) {
        let old_len = self.len();
        if len >= old_len {
            return;
        }
        self.len = L::from_usize(len);
        if mem::needs_drop::<T>() {
            // SAFETY: the tail is initialized, and len was cut first so a
            // panicking Drop cannot expose it again.
            unsafe {
                let tail = slice::from_raw_parts_mut(self.raw.as_ptr().add(len), old_len - len);
                ptr::drop_in_place(tail);
            }
        }
    }

    /// Resizes the vector to `len` elements, filling new slots with
    /// `T::default()` and dropping surplus ones.
    ///
    /// # Examples
    /// ```
    /// # use local_vec::local_vec;
    /// let mut vec = local_vec![1, 2, 3];
    /// vec.resize(5);
    /// assert_eq!(vec, [1, 2, 3, 0, 0]);
    /// vec.resize(2);
    /// assert_eq!(vec, [1, 2]);
    /// ```
    pub fn resize(&mut self, len: usize)
    where
        T: Default,
    {
        self.resize_with(len, T::default);
    }

    /// Resizes the vector to `len` elements, filling new slots with values
    /// from `f`.
    pub fn resize_with<F>(&mut self, len: usize, mut f: F)
    where
        F: FnMut() -> T,
    {
        let old_len = self.len();
        if len <= old_len {
            self.truncate(len);
            return;
        }
        self.reserve(len);
        for index in old_len..len {
            // SAFETY: within capacity, above the current length. The length
            // counts up as slots fill so a panicking constructor drops only
            // what exists.
            unsafe { self.raw.write(index, f()) };
            self.len = L::from_usize(index + 1);
        }
    }

    /// Drops every element but keeps the allocation.
    ///
    /// # Examples
    /// ```
    /// # use local_vec::local_vec;
    /// let mut vec = local_vec![1, 2, 3];
    /// vec.clear();
    /// assert!(vec.is_empty());
    /// assert_eq!(vec.capacity(), 4);
    /// ```
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Drops every element and releases the allocation, returning the
    /// vector to its unallocated state.
    ///
    /// # Examples
    /// ```
    /// # use local_vec::local_vec;
    /// let mut vec = local_vec![1, 2, 3];
    /// vec.reset();
    /// assert!(vec.is_empty());
    /// assert_eq!(vec.capacity(), 0);
    /// ```
    pub fn reset(&mut self) {
        self.clear();
        // SAFETY: no live elements remain.
        unsafe { self.raw.dealloc(self.capacity()) };
        if mem::size_of::<T>() > 0 {
            self.cap = L::ZERO;
        }
    }

    /// Clones and appends every element of `other`.
    ///
    /// # Panics
    ///
    /// Panics if the combined length does not fit in `L`.
    pub fn extend_from_slice(&mut self, other: &[T])
    where
        T: Clone,
    {
        let Some(required) = self.len().checked_add(other.len()) else {
            panic!("capacity overflow");
        };
        self.reserve(required);
        for value in other {
            self.push(value.clone());
        }
    }

    /// Returns a slice of the live elements.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: the first len slots are initialized.
        unsafe { slice::from_raw_parts(self.raw.as_ptr(), self.len()) }
    }

    /// Returns a mutable slice of the live elements.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: the first len slots are initialized, and &mut self grants
        // exclusive access.
        unsafe { slice::from_raw_parts_mut(self.raw.as_ptr(), self.len()) }
    }

    /// Returns a pointer to the buffer, valid until the next
    /// capacity-changing operation or deallocation.
    pub fn as_ptr(&self) -> *const T {
        self.raw.as_ptr()
    }

    /// Returns a mutable pointer to the buffer, valid until the next
    /// capacity-changing operation or deallocation.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.raw.as_ptr()
    }

    /// Copies the elements out as their raw byte representation, for handing
    /// to byte-oriented consumers such as GPU upload buffers.
    ///
    /// The result is `len * size_of::<T>()` bytes in element order; the
    /// vector is unchanged.
    ///
    /// # Examples
    /// ```
    /// # use local_vec::local_vec;
    /// let vec = local_vec![1u16, 2u16];
    /// assert_eq!(vec.to_byte_vec().len(), 4);
    /// ```
    pub fn to_byte_vec(&self) -> Vec<u8>
    where
        T: Copy,
    {
        let size = mem::size_of_val(self.as_slice());
        let mut bytes = Vec::with_capacity(size);
        // SAFETY: the reservation fits size bytes, and every bit pattern is
        // a valid u8.
        unsafe {
            ptr::copy_nonoverlapping(self.as_ptr().cast::<u8>(), bytes.as_mut_ptr(), size);
            bytes.set_len(size);
        }
        bytes
    }
}

impl<T, L, P> Deref for LocalVec<T, L, P>
where
    L: LenType,
    P: GrowthPolicy,
{
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T, L, P> DerefMut for LocalVec<T, L, P>
where
    L: LenType,
    P: GrowthPolicy,
{
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T, L, P> Drop for LocalVec<T, L, P>
where
    L: LenType,
    P: GrowthPolicy,
{
    fn drop(&mut self) {
        if mem::needs_drop::<T>() {
            // SAFETY: the live prefix has not been dropped yet.
            unsafe { ptr::drop_in_place(self.as_mut_slice()) };
        }
        // SAFETY: elements are gone; dealloc ignores zero-sized types.
        unsafe { self.raw.dealloc(self.cap.as_usize()) };
    }
}

impl<T, L, P> Default for LocalVec<T, L, P>
where
    L: LenType,
    P: GrowthPolicy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, L, P> Clone for LocalVec<T, L, P>
where
    T: Clone,
    L: LenType,
    P: GrowthPolicy,
{
    /// Deep copy: the clone owns an independent buffer and clones each
    /// element individually.
    fn clone(&self) -> Self {
        let mut out = Self::with_capacity(self.len());
        out.extend_from_slice(self);
        out
    }
}

impl<T, L, P> fmt::Debug for LocalVec<T, L, P>
where
    T: fmt::Debug,
    L: LenType,
    P: GrowthPolicy,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_slice(), f)
    }
}

impl<T, L, P> Hash for LocalVec<T, L, P>
where
    T: Hash,
    L: LenType,
    P: GrowthPolicy,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        Hash::hash(self.as_slice(), state)
    }
}

impl<T, L1, P1, L2, P2> PartialOrd<LocalVec<T, L2, P2>> for LocalVec<T, L1, P1>
where
    T: PartialOrd,
    L1: LenType,
    P1: GrowthPolicy,
    L2: LenType,
    P2: GrowthPolicy,
{
    fn partial_cmp(&self, other: &LocalVec<T, L2, P2>) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T, L, P> Ord for LocalVec<T, L, P>
where
    T: Ord,
    L: LenType,
    P: GrowthPolicy,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T, L, P> FromIterator<T> for LocalVec<T, L, P>
where
    L: LenType,
    P: GrowthPolicy,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let iter = iter.into_iter();
        let mut out = Self::with_capacity(iter.size_hint().0);
        for value in iter {
            out.push(value);
        }
        out
    }
}

impl<T, L, P> Extend<T> for LocalVec<T, L, P>
where
    L: LenType,
    P: GrowthPolicy,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        let iter = iter.into_iter();
        self.reserve(self.len() + iter.size_hint().0);
        for value in iter {
            self.push(value);
        }
    }
}

impl<'a, T, L, P> Extend<&'a T> for LocalVec<T, L, P>
where
    T: Copy + 'a,
    L: LenType,
    P: GrowthPolicy,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = &'a T>,
    {
        self.extend(iter.into_iter().copied());
    }
}

impl<T, L, P> From<&[T]> for LocalVec<T, L, P>
where
    T: Clone,
    L: LenType,
    P: GrowthPolicy,
{
    fn from(slice: &[T]) -> Self {
        let mut out = Self::with_capacity(slice.len());
        out.extend_from_slice(slice);
        out
    }
}

impl<T, L, P, const N: usize> From<[T; N]> for LocalVec<T, L, P>
where
    L: LenType,
    P: GrowthPolicy,
{
    fn from(array: [T; N]) -> Self {
        array.into_iter().collect()
    }
}

impl<T, L, P> From<Vec<T>> for LocalVec<T, L, P>
where
    L: LenType,
    P: GrowthPolicy,
{
    fn from(vec: Vec<T>) -> Self {
        vec.into_iter().collect()
    }
}

impl<T, L, P> From<LocalVec<T, L, P>> for Vec<T>
where
    L: LenType,
    P: GrowthPolicy,
{
    /// Hands the allocation over without copying elements.
    fn from(vec: LocalVec<T, L, P>) -> Self {
        let vec = ManuallyDrop::new(vec);
        let (ptr, len, cap) = (vec.raw.as_ptr(), vec.len.as_usize(), vec.cap.as_usize());
        // SAFETY: for sized T the buffer came from the global allocator with
        // the array layout Vec expects; for zero-sized T the pointer is
        // dangling and the capacity is ignored.
        unsafe {
            Vec::from_raw_parts(ptr, len, if mem::size_of::<T>() == 0 { len } else { cap })
        }
    }
}

impl<T, L, P> IntoIterator for LocalVec<T, L, P>
where
    L: LenType,
    P: GrowthPolicy,
{
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let vec = ManuallyDrop::new(self);
        IntoIter {
            raw: vec.raw,
            cap: vec.cap.as_usize(),
            start: 0,
            end: vec.len.as_usize(),
        }
    }
}

impl<'a, T, L, P> IntoIterator for &'a LocalVec<T, L, P>
where
    L: LenType,
    P: GrowthPolicy,
{
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, L, P> IntoIterator for &'a mut LocalVec<T, L, P>
where
    L: LenType,
    P: GrowthPolicy,
{
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
