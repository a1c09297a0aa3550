//! RNG seed derivation utilities for deterministic games.
//!
//! Successive rounds and AI seats get distinct but reproducible seeds from a
//! single game seed.

/// Seed for dealing round `round_no`.
pub fn derive_dealing_seed(game_seed: u64, round_no: u32) -> u64 {
    game_seed
        .wrapping_add(u64::from(round_no).wrapping_mul(1_000_000))
        .wrapping_add(2)
}

/// Seed for an AI seat's choices in round `round_no`.
pub fn derive_ai_seed(game_seed: u64, round_no: u32, seat: u8) -> u64 {
    game_seed
        .wrapping_add(u64::from(round_no).wrapping_mul(10_000))
        .wrapping_add(u64::from(seat).wrapping_mul(100))
        .wrapping_add(1)
}
