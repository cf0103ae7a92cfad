//! Deterministic randomness for per-unit keep rolls.
//!
//! Rolls are derived from a seed built out of the world seed, the tick and
//! the stack being evaluated, so replaying the same death yields the same
//! kept counts.

/// RNG oracle producing values from an explicit seed.
///
/// Implementations must be deterministic: the same seed always produces the
/// same value.
pub trait RngOracle: Send + Sync {
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform value in `[0, 1)` with 24 bits of precision.
    fn unit_f32(&self, seed: u64) -> f32 {
        (self.next_u32(seed) >> 8) as f32 / (1u32 << 24) as f32
    }
}

/// PCG-XSH-RR generator: 64-bit LCG state, 32-bit permuted output.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Mixes seed components into a single roll seed.
///
/// * `world_seed` - host world seed
/// * `tick` - tick of the death being processed
/// * `actor` - folded actor id
/// * `context` - distinguishes rolls within one death (drop index, unit index)
pub fn compute_seed(world_seed: u64, tick: u64, actor: u32, context: u32) -> u64 {
    let mut hash = world_seed;
    hash ^= tick.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= u64::from(actor).wrapping_mul(0x517cc1b727220a95);
    hash ^= u64::from(context).wrapping_mul(0x85ebca6b);

    // avalanche
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}
