use serde::{Deserialize, Serialize};

use crate::*;

/// One cell of the board: a value hidden over the reward image.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Square {
    id: SquareId,
    value: Number,
    revealed: bool,
}

impl Square {
    pub const fn new(id: SquareId, value: Number) -> Self {
        Self {
            id,
            value,
            revealed: false,
        }
    }

    pub const fn id(&self) -> SquareId {
        self.id
    }

    pub const fn value(&self) -> Number {
        self.value
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Returns whether the square was hidden before.
    pub(crate) fn reveal(&mut self) -> bool {
        !core::mem::replace(&mut self.revealed, true)
    }
}
