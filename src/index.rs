use crate::{GrowthPolicy, LenType, LocalVec};
use std::{
    ops::{Index, IndexMut},
    slice::SliceIndex,
};

impl<T, L, P, I> Index<I> for LocalVec<T, L, P>
where
    L: LenType,
    P: GrowthPolicy,
    I: SliceIndex<[T]>,
{
    type Output = I::Output;

    /// # Panics
    ///
    /// Panics if the index is out of bounds. Out-of-range access is a caller
    /// bug, never a recoverable condition; use [`get`] for the checked
    /// variant.
    ///
    /// [`get`]: slice::get
    fn index(&self, index: I) -> &Self::Output {
        self.as_slice().index(index)
    }
}

impl<T, L, P, I> IndexMut<I> for LocalVec<T, L, P>
where
    L: LenType,
    P: GrowthPolicy,
    I: SliceIndex<[T]>,
{
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        self.as_mut_slice().index_mut(index)
    }
}
