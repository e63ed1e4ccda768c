//! A growable array with configurable growth policy and index width.
//!
//! [`LocalVec<T, L, P>`] owns a contiguous buffer of elements, like [`Vec`],
//! but exposes its memory-management strategy as type parameters:
//!
//! - The [`GrowthPolicy`] `P` decides how much to allocate when the buffer
//!   must expand. [`Exponential`] (the default) rounds every growth up to a
//!   power of two, which keeps `push` amortized O(1). [`Tight`] allocates
//!   exactly what was asked for, which suits fill-once containers that are
//!   held for a long time; [`TightLocalVec`] is an alias for it.
//! - The [`LenType`] `L` selects the integer width of the length and
//!   capacity (`u8`, `u16`, `u32`, or `usize`). The `u32` default keeps the
//!   header at 16 bytes on 64-bit targets, which adds up when vectors are
//!   embedded in bulk.
//!
//! Growth reallocates the buffer in place where possible and otherwise
//! relocates elements as a raw byte image rather than moving them one by
//! one; Rust's move semantics make that sound for every owned element type.
//!
//! The container panics on out-of-range indices and aborts on allocation
//! failure rather than returning errors: both indicate a caller bug or an
//! unrecoverable environment, and a low-level primitive should not tax every
//! call site with checks for them. Expected absence is reported with
//! `Option` ([`find`], [`pop`], [`remove_value`]).
//!
//! # Examples
//!
//! ```
//! use local_vec::{LocalVec, local_vec};
//!
//! let mut vec = local_vec![3, 1, 2];
//! vec.sort_unstable();
//! assert_eq!(vec, [1, 2, 3]);
//!
//! vec.insert_ordered(2);
//! assert_eq!(vec, [1, 2, 2, 3]);
//!
//! assert_eq!(vec.swap_remove(0), 1);
//! assert_eq!(vec, [3, 2, 2]);
//! ```
//!
//! Slice operations come through `Deref`:
//!
//! ```
//! # use local_vec::local_vec;
//! let mut vec = local_vec![1, 2, 3];
//! vec.reverse();
//! assert_eq!(vec[0], 3);
//! assert_eq!(vec.iter().sum::<i32>(), 6);
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize` and `Deserialize` as a sequence.
//!
//! [`find`]: LocalVec::find
//! [`pop`]: LocalVec::pop
//! [`remove_value`]: LocalVec::remove_value

mod eq_impl;
mod growth;
mod index;
mod into_iter;
mod len_type;
mod macros;
mod raw;
#[cfg(feature = "serde")]
mod serde;
mod vec;

#[cfg(test)]
mod tests;

pub use growth::{Exponential, GrowthPolicy, Tight};
pub use into_iter::IntoIter;
pub use len_type::LenType;
pub use vec::{LocalVec, TightLocalVec};

pub(crate) use raw::RawBuffer;
