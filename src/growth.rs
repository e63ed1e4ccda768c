/// Decides the new capacity when a vector's buffer must expand.
///
/// The two provided policies are [`Exponential`] (the default, and what you
/// want in most cases) and [`Tight`]. The trait is open, so callers with
/// unusual allocation patterns can supply their own.
pub trait GrowthPolicy {
    /// Returns the capacity to allocate for a buffer of `current` slots that
    /// must fit at least `required`.
    ///
    /// Only called when `required > current`; the result must be at least
    /// `required`.
    fn grow(current: usize, required: usize) -> usize;
}

/// Grows to the smallest power of two that fits the request.
///
/// Every capacity this policy produces is a power of two, so growing one
/// element at a time doubles the buffer and keeps `push` amortized O(1).
#[derive(Debug, Clone, Copy)]
pub struct Exponential;

impl GrowthPolicy for Exponential {
    fn grow(_current: usize, required: usize) -> usize {
        required.checked_next_power_of_two().unwrap_or(usize::MAX)
    }
}

/// Grows to exactly the requested capacity.
///
/// Trades amortized push performance for a buffer with no slack, which suits
/// containers that are filled once and then held for a long time.
#[derive(Debug, Clone, Copy)]
pub struct Tight;

impl GrowthPolicy for Tight {
    fn grow(_current: usize, required: usize) -> usize {
        required
    }
}
