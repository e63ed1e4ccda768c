use std::fmt::Debug;

mod sealed {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
    impl Sealed for usize {}
}

/// The unsigned integer a vector uses for its length and capacity.
///
/// Narrow widths keep the container header small when many vectors are
/// embedded in other structures, at the cost of capping how many elements
/// each one can hold. Growing past `MAX` panics with a capacity overflow.
///
/// This trait is sealed; the available widths are `u8`, `u16`, `u32`, and
/// `usize`.
pub trait LenType:
    sealed::Sealed + Copy + PartialEq + Eq + PartialOrd + Ord + Debug + Send + Sync + 'static
{
    /// Zero, the length of an empty vector.
    const ZERO: Self;

    /// The largest representable length.
    const MAX: Self;

    /// [`Self::MAX`] widened to `usize`.
    const MAX_USIZE: usize;

    /// Narrows from `usize`. The caller has already checked the value fits.
    fn from_usize(n: usize) -> Self;

    fn as_usize(self) -> usize;
}

macro_rules! impl_len_type {
    ($($t:ty),*) => {
        $(
            impl LenType for $t {
                const ZERO: Self = 0;
                const MAX: Self = <$t>::MAX;
                const MAX_USIZE: usize = <$t>::MAX as usize;

                fn from_usize(n: usize) -> Self {
                    debug_assert!(n <= Self::MAX_USIZE);
                    n as $t
                }

                fn as_usize(self) -> usize {
                    self as usize
                }
            }
        )*
    };
}

impl_len_type!(u8, u16, u32, usize);
