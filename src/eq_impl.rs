use crate::{GrowthPolicy, LenType, LocalVec};

impl<T, L1, P1, L2, P2> PartialEq<LocalVec<T, L2, P2>> for LocalVec<T, L1, P1>
where
    T: PartialEq,
    L1: LenType,
    P1: GrowthPolicy,
    L2: LenType,
    P2: GrowthPolicy,
{
    fn eq(&self, other: &LocalVec<T, L2, P2>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, L, P> Eq for LocalVec<T, L, P>
where
    T: Eq,
    L: LenType,
    P: GrowthPolicy,
{
}

macro_rules! uni {
    ($u:ty $(, $($b:tt)+)?) => {
        impl<T, L, P $(, $($b)+)?> PartialEq<$u> for LocalVec<T, L, P>
        where
            T: PartialEq,
            L: LenType,
            P: GrowthPolicy,
        {
            fn eq(&self, other: &$u) -> bool {
                self.as_slice()[..] == other[..]
            }
        }
    };
}

macro_rules! bi {
    ($u:ty $(, $($b:tt)+)?) => {
        uni!($u $(, $($b)+)?);

        impl<T, L, P $(, $($b)+)?> PartialEq<LocalVec<T, L, P>> for $u
        where
            T: PartialEq,
            L: LenType,
            P: GrowthPolicy,
        {
            fn eq(&self, other: &LocalVec<T, L, P>) -> bool {
                self[..] == other.as_slice()[..]
            }
        }
    };
}

bi!(Vec<T>);
bi!([T]);
bi!([T; N], const N: usize);
uni!(&[T]);
uni!(&mut [T]);
uni!(&[T; N], const N: usize);
