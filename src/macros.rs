/// Creates a [`LocalVec`] containing the arguments.
///
/// Analogous to [`vec!`]: a list of elements, or `element; count` to repeat
/// a clonable value. The result always uses the default index width and
/// growth policy; construct other parameterizations with [`LocalVec::from`]
/// or `collect`.
///
/// # Examples
///
/// ```
/// use local_vec::{LocalVec, local_vec};
///
/// let vec = local_vec![1, 2, 3];
/// assert_eq!(vec, [1, 2, 3]);
///
/// let vec = local_vec![0u8; 4];
/// assert_eq!(vec, [0, 0, 0, 0]);
///
/// let vec: LocalVec<i32> = local_vec![];
/// assert!(vec.is_empty());
/// ```
///
/// [`LocalVec`]: crate::LocalVec
#[macro_export]
macro_rules! local_vec {
    () => {
        $crate::LocalVec::<_, u32, $crate::Exponential>::new()
    };
    ($element:expr; $count:expr) => {{
        let value = $element;
        let mut vec = $crate::LocalVec::<_, u32, $crate::Exponential>::with_capacity($count);
        vec.resize_with($count, || ::std::clone::Clone::clone(&value));
        vec
    }};
    ($($element:expr),+ $(,)?) => {
        $crate::LocalVec::<_, u32, $crate::Exponential>::from([$($element),+])
    };
}
