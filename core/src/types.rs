/// Identifier of a square, unique within its board and assigned in creation order.
pub type SquareId = u16;

/// Square values and targets.
pub type Number = u32;

/// Multiplier used in multiplication moves.
pub type TimesTable = u8;

/// Identifier of a reward image in the catalogue.
pub type ImageNumber = u8;

/// Linear dimension of the square board.
pub type BoardSize = u8;

/// Identifies one play-through, used to drop reveals scheduled for an abandoned session.
pub type SessionId = u32;
