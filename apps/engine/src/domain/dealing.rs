//! Deterministic card dealing logic.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::domain::cards_catalog::full_deck_ids;
use crate::domain::cards_types::CardId;
use crate::domain::rules::{HAND_SIZE, PLAYERS, POT_SIZE};

/// Four hands plus the pot, in deal order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    pub hands: [Vec<CardId>; PLAYERS],
    pub pot: Vec<CardId>,
}

/// Shuffle the deck with `seed` and deal 8 cards to each seat.
///
/// Hands are sorted for convenience; the pot keeps shuffled order, which is
/// the order Kai Chong draws it in.
pub fn deal_round(seed: u64) -> Deal {
    let mut deck = full_deck_ids();
    let mut rng = StdRng::seed_from_u64(seed);
    deck.shuffle(&mut rng);

    let hands: [Vec<CardId>; PLAYERS] = std::array::from_fn(|seat| {
        let start = seat * HAND_SIZE;
        let mut hand = deck[start..start + HAND_SIZE].to_vec();
        hand.sort();
        hand
    });
    let pot_start = PLAYERS * HAND_SIZE;
    let pot = deck[pot_start..pot_start + POT_SIZE].to_vec();

    Deal { hands, pot }
}
