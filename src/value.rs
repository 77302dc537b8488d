use rand::distributions::uniform::SampleUniform;

/// An integer type that can be used as the domain of a selector.
///
/// `prev` and `next` wrap at the type's extremes; callers only step a bound
/// after comparisons have established that it cannot wrap.
pub trait Value: Copy + Ord + SampleUniform {
    fn prev(self) -> Self;

    fn next(self) -> Self;

    /// Number of values in `[lo, hi]`. Wraps to zero only for a range
    /// spanning an entire 64-bit type, whose cardinality does not fit in a
    /// `u64`.
    fn span(lo: Self, hi: Self) -> u64;
}

macro_rules! impl_value {
    ($($t:ty => $u:ty),*) => {
        $(
            impl Value for $t {
                #[inline]
                fn prev(self) -> Self {
                    self.wrapping_sub(1)
                }

                #[inline]
                fn next(self) -> Self {
                    self.wrapping_add(1)
                }

                #[inline]
                fn span(lo: Self, hi: Self) -> u64 {
                    // The difference is reduced modulo the type's width, so
                    // it must be read back through the unsigned type of the
                    // same width before widening.
                    (hi.wrapping_sub(lo) as $u as u64).wrapping_add(1)
                }
            }
        )*
    }
}

impl_value! {
    i8 => u8,
    i16 => u16,
    i32 => u32,
    i64 => u64,
    isize => usize,
    u8 => u8,
    u16 => u16,
    u32 => u32,
    u64 => u64,
    usize => usize
}
