use crate::RawBuffer;
use std::{
    fmt::{self, Debug, Formatter},
    iter::FusedIterator,
    slice,
};

/// An iterator that moves out of a [`LocalVec`].
///
/// This struct is created by the [`into_iter`] method, provided by the
/// [`IntoIterator`] trait.
///
/// [`LocalVec`]: crate::LocalVec
/// [`into_iter`]: crate::LocalVec::into_iter
pub struct IntoIter<T> {
    pub(crate) raw: RawBuffer<T>,
    pub(crate) cap: usize,
    pub(crate) start: usize,
    pub(crate) end: usize,
}

unsafe impl<T> Send for IntoIter<T> where T: Send {}
unsafe impl<T> Sync for IntoIter<T> where T: Sync {}

impl<T> IntoIter<T> {
    /// Returns a slice of the elements that have not been yielded yet.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: the slots between the cursors are initialized.
        unsafe { slice::from_raw_parts(self.raw.as_ptr().add(self.start), self.end - self.start) }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start >= self.end {
            None
        } else {
            // SAFETY: the slot is initialized and the cursor moves past it.
            let out = unsafe { self.raw.read(self.start) };
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
        if self.start >= self.end {
            None
        } else {
            self.end -= 1;
            // SAFETY: the slot is initialized and now outside the cursors.
            Some(unsafe { self.raw.read(self.end) })
        }
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        for _ in self.by_ref() {}
        // SAFETY: every element was yielded or just dropped.
        unsafe { self.raw.dealloc(self.cap) };
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
