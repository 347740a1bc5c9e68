use alloc::vec::Vec;

use super::*;

/// Draws every value independently and uniformly from `[1, max_number]`, then applies the
/// configured arrangement.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RandomBoardGenerator;

impl BoardGenerator for RandomBoardGenerator {
    fn generate<R: Rng + ?Sized>(self, config: &GameConfig, rng: &mut R) -> Result<Board> {
        let board = create_board(rng, config.board_size, config.max_number)?;
        Ok(config.arrangement.apply(board, config.max_number))
    }
}

/// Builds `board_size * board_size` hidden squares with ids in creation order.
pub fn create_board<R: Rng + ?Sized>(
    rng: &mut R,
    board_size: BoardSize,
    max_number: Number,
) -> Result<Board> {
    let total = usize::from(board_size) * usize::from(board_size);
    let values: Vec<Number> = (0..total)
        .map(|_| random_int(rng, NUMBER_RANGE_MIN, max_number.max(NUMBER_RANGE_MIN)))
        .collect();
    Board::from_values(board_size, &values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn every_supported_config_produces_a_full_hidden_board() {
        let mut rng = SmallRng::seed_from_u64(0xf00d);

        for board_size in (BOARD_SIZE_MIN..=BOARD_SIZE_MAX).step_by(BOARD_SIZE_STEP.into()) {
            for max_number in [1, 2, 12, 57, 100] {
                let board = create_board(&mut rng, board_size, max_number).unwrap();
                let total = usize::from(board_size).pow(2);

                assert_eq!(board.len(), total);
                let ids: Vec<_> = board.iter().map(Square::id).collect();
                let expected: Vec<_> = (0..total).map(|id| id as SquareId).collect();
                assert_eq!(ids, expected);
                assert!(board.iter().all(|square| !square.is_revealed()));
                assert!(board.iter().all(|square| (1..=max_number).contains(&square.value())));
            }
        }
    }

    #[test]
    fn generator_applies_sorted_arrangement() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut config = GameConfig::new(OperationMode::Addition, 100, 8, []);
        config.set_arrangement(BoardArrangement::Sorted);

        let board = RandomBoardGenerator.generate(&config, &mut rng).unwrap();
        let values: Vec<_> = board.iter().map(Square::value).collect();

        assert!(values.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(board.len(), 64);
    }
}
