//! Table-size and card constants shared across the game core.

/// Maximum seats at a single room's table.
pub const MAX_PLAYERS: usize = 10;

/// Cards in a standard deck.
pub const DECK_SIZE: usize = 52;

/// Hole cards dealt to each active player.
pub const HOLE_CARDS: usize = 2;

/// Community cards on a complete board.
pub const BOARD_SIZE: usize = 5;

/// Cards revealed on the flop.
pub const FLOP_SIZE: usize = 3;
