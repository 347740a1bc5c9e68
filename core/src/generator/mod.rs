use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

pub trait BoardGenerator {
    fn generate<R: Rng + ?Sized>(self, config: &GameConfig, rng: &mut R) -> Result<Board>;
}

/// Post-processing applied to a freshly generated board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BoardArrangement {
    /// Values stay where they were drawn.
    #[default]
    Unsorted,
    /// Sort ascending only for big boards with big numbers, where finding values is hardest.
    SortedWhenLarge,
    /// Always sort ascending by value.
    Sorted,
}

impl BoardArrangement {
    const LARGE_BOARD_SIZE: BoardSize = 6;
    const LARGE_MAX_NUMBER: Number = 12;

    pub const fn sorts(self, board_size: BoardSize, max_number: Number) -> bool {
        match self {
            Self::Unsorted => false,
            Self::SortedWhenLarge => {
                board_size > Self::LARGE_BOARD_SIZE && max_number > Self::LARGE_MAX_NUMBER
            }
            Self::Sorted => true,
        }
    }

    pub fn apply(self, mut board: Board, max_number: Number) -> Board {
        if self.sorts(board.size(), max_number) {
            log::debug!("Sorting {}x{} board by value", board.size(), board.size());
            board.sort_by_value();
        }
        board
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted_when_large_uses_size_and_number_thresholds() {
        use BoardArrangement::*;

        assert!(!Unsorted.sorts(10, 100));
        assert!(Sorted.sorts(4, 1));
        assert!(SortedWhenLarge.sorts(8, 13));
        assert!(!SortedWhenLarge.sorts(6, 100));
        assert!(!SortedWhenLarge.sorts(10, 12));
    }
}
