//! Fixed table constants.

pub const PLAYERS: usize = 4;
/// Cards dealt to each player.
pub const HAND_SIZE: usize = 8;
/// Cards left in the pot after dealing.
pub const POT_SIZE: usize = 8;
/// A player holding this many Shang in the captured pile holds the brocade.
pub const BROCADE_SHANG: usize = 3;
