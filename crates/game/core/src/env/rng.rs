//! RNG oracle for deterministic random number generation.
//!
//! Critical and direct-hit rolls draw from an injectable [`RngOracle`] keyed by
//! an explicit seed, so the same cast against the same world snapshot always
//! produces the same outcome.
//!
//! # Determinism
//!
//! All RNG implementations must be deterministic: given the same seed,
//! they must produce the same value. Tests rely on this to hold severity
//! rolls constant while varying other inputs.

/// Denominator for basis-point rolls (10 000 = 100 %).
pub const BASIS_POINTS: u32 = 10_000;

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll in basis points (0-9999 inclusive).
    ///
    /// A roll succeeds against a rate `r` (in basis points) when `roll < r`.
    fn roll_basis_points(&self, seed: u64) -> u32 {
        self.next_u32(seed) % BASIS_POINTS
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// This implementation uses PCG-XSH-RR, which produces 32-bit output from
/// 64-bit state. Being stateless per call, it maps each seed to one output.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Advance the PCG state by one step.
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

/// RNG that returns the same value for every seed.
///
/// `FixedRng(0)` makes every rate-based roll succeed (when the rate is
/// non-zero); `FixedRng(u32::MAX)` makes them fail.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedRng(pub u32);

impl RngOracle for FixedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.0
    }

    fn roll_basis_points(&self, _seed: u64) -> u32 {
        self.0.min(BASIS_POINTS - 1)
    }
}

/// Compute deterministic seed from cast components.
///
/// # Arguments
///
/// * `zone_seed` - Base seed configured for the zone
/// * `sequence` - Client-assigned cast sequence number
/// * `caster` - Entity performing the cast
/// * `context` - Distinguishes independent rolls within one cast
///
/// # Context Values
///
/// The outcome calculator derives one context per (target, roll) pair so the
/// critical and direct-hit rolls for a target never share a seed.
pub fn compute_seed(zone_seed: u64, sequence: u64, caster: u32, context: u32) -> u64 {
    // SplitMix64 / FxHash style mixing
    let mut hash = zone_seed;

    hash ^= sequence.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (caster as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}
