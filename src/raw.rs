use std::{
    alloc::{self, Layout, handle_alloc_error},
    mem,
    ptr::{self, NonNull},
};

/// A handle to a vector's backing allocation.
///
/// `RawBuffer` is a bare pointer plus the operations the container needs over
/// it. It tracks no length or capacity and will **neither** deallocate its
/// memory **nor** drop its contents when it is dropped; [`LocalVec`] and
/// [`IntoIter`] carry the bookkeeping and are responsible for calling
/// [`dealloc`]. The capacity passed to each method must be the one the handle
/// was last grown to.
///
/// Growth relocates elements as a raw byte image rather than moving them one
/// by one. Rust moves are untyped byte copies, so this is sound for every
/// owned element type.
///
/// [`LocalVec`]: crate::LocalVec
/// [`IntoIter`]: crate::IntoIter
/// [`dealloc`]: RawBuffer::dealloc
pub(crate) struct RawBuffer<T> {
    ptr: NonNull<T>,
}

impl<T> Clone for RawBuffer<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RawBuffer<T> {}

// The handle is only ever reached through a LocalVec or IntoIter, which hand
// out references according to the usual borrow rules.
unsafe impl<T> Send for RawBuffer<T> where T: Send {}
unsafe impl<T> Sync for RawBuffer<T> where T: Sync {}

impl<T> RawBuffer<T> {
    /// Creates a handle with a dangling pointer and no allocation.
    pub const fn dangling() -> Self {
        Self {
            ptr: NonNull::dangling(),
        }
    }

    pub const fn as_ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Reallocates from `old_capacity` to `new_capacity` slots, preserving
    /// the byte image of the occupied slots at their offsets.
    ///
    /// # Panics
    ///
    /// Panics if `new_capacity` does not exceed `old_capacity` (the caller
    /// decides growth; this is never called defensively) or if the new
    /// allocation size overflows. Aborts the process if the allocator cannot
    /// satisfy the request.
    ///
    /// # Safety
    ///
    /// The caller must ensure that
    ///
    /// - `size_of::<T>() > 0`
    /// - `old_capacity` is the capacity of the current allocation, or 0 if
    ///   there is none
    pub unsafe fn grow(&mut self, old_capacity: usize, new_capacity: usize) {
        assert!(
            new_capacity > old_capacity,
            "grow requires a capacity increase"
        );
        debug_assert!(mem::size_of::<T>() > 0);

        let Ok(new_layout) = Layout::array::<T>(new_capacity) else {
            panic!("capacity overflow");
        };
        let ptr = if old_capacity == 0 {
            unsafe { alloc::alloc(new_layout) }
        } else {
            // SAFETY: this layout fit when the buffer grew to old_capacity.
            let old_layout = unsafe { Layout::array::<T>(old_capacity).unwrap_unchecked() };
            unsafe { alloc::realloc(self.ptr.as_ptr().cast(), old_layout, new_layout.size()) }
        };
        self.ptr = match NonNull::new(ptr.cast()) {
            Some(ptr) => ptr,
            None => handle_alloc_error(new_layout),
        };
    }

    /// Releases the allocation and returns the handle to its dangling state.
    /// No-op when nothing was allocated or `T` is zero-sized.
    ///
    /// # Safety
    ///
    /// `capacity` is the capacity of the current allocation, and any live
    /// elements have already been dropped or moved out.
    pub unsafe fn dealloc(&mut self, capacity: usize) {
        if capacity == 0 || mem::size_of::<T>() == 0 {
            return;
        }
        // SAFETY: this layout fit when the buffer grew to this capacity.
        let layout = unsafe { Layout::array::<T>(capacity).unwrap_unchecked() };
        unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), layout) };
        self.ptr = NonNull::dangling();
    }

    /// Moves the value out of slot `index`.
    ///
    /// # Safety
    ///
    /// Slot `index` is within capacity and initialized, and the caller treats
    /// it as uninitialized afterward.
    pub unsafe fn read(&self, index: usize) -> T {
        unsafe { ptr::read(self.as_ptr().add(index)) }
    }

    /// Writes `value` into slot `index` without dropping the slot's previous
    /// contents.
    ///
    /// # Safety
    ///
    /// Slot `index` is within capacity and treated as uninitialized.
    pub unsafe fn write(&self, index: usize, value: T) {
        unsafe { ptr::write(self.as_ptr().add(index), value) }
    }

    /// Copies `count` slots from `src` to `dst` as raw bytes. The ranges may
    /// overlap.
    ///
    /// # Safety
    ///
    /// Both ranges are within capacity, and the `src` range is initialized.
    pub unsafe fn copy(&self, src: usize, dst: usize, count: usize) {
        unsafe { ptr::copy(self.as_ptr().add(src), self.as_ptr().add(dst), count) }
    }
}
