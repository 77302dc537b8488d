use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

/// Seed used by the convenience constructors, so that a freshly built
/// selector draws a reproducible sequence until reseeded.
pub const DEFAULT_SEED: u64 = 5489;

pub fn new_rng(seed: u64) -> XorShiftRng {
    XorShiftRng::seed_from_u64(seed)
}
