use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Square grid of one session, rows first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    squares: Array2<Square>,
}

impl Board {
    /// Lays `squares` out row by row into a `size` x `size` grid.
    pub fn from_squares(size: BoardSize, squares: Vec<Square>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        if !squares.iter().all(|square| seen.insert(square.id())) {
            return Err(GameError::InvalidBoardShape);
        }

        let size = usize::from(size);
        let squares = Array2::from_shape_vec((size, size), squares)
            .map_err(|_| GameError::InvalidBoardShape)?;
        Ok(Self { squares })
    }

    /// Builds a hidden board whose ids follow the order of `values`.
    pub fn from_values(size: BoardSize, values: &[Number]) -> Result<Self> {
        let squares = values
            .iter()
            .enumerate()
            .map(|(id, &value)| {
                let id = SquareId::try_from(id).map_err(|_| GameError::InvalidBoardShape)?;
                Ok(Square::new(id, value))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_squares(size, squares)
    }

    pub fn size(&self) -> BoardSize {
        BoardSize::try_from(self.squares.nrows()).unwrap_or(BoardSize::MAX)
    }

    pub fn len(&self) -> usize {
        self.squares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Square> {
        self.squares.iter()
    }

    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = &Square>> {
        self.squares.rows().into_iter().map(|row| row.into_iter())
    }

    pub fn square(&self, id: SquareId) -> Option<&Square> {
        self.iter().find(|square| square.id() == id)
    }

    /// Squares that are still hidden and can take part in a move.
    pub fn available(&self) -> impl Iterator<Item = &Square> {
        self.iter().filter(|square| !square.is_revealed())
    }

    pub fn available_count(&self) -> usize {
        self.available().count()
    }

    pub fn revealed_count(&self) -> usize {
        self.len() - self.available_count()
    }

    pub fn is_fully_revealed(&self) -> bool {
        self.iter().all(Square::is_revealed)
    }

    /// Reveals every square listed in `ids`, returning how many were newly revealed.
    pub(crate) fn reveal(&mut self, ids: &[SquareId]) -> usize {
        self.squares
            .iter_mut()
            .filter(|square| ids.contains(&square.id()))
            .map(Square::reveal)
            .filter(|&newly_revealed| newly_revealed)
            .count()
    }

    pub(crate) fn reveal_all(&mut self) -> usize {
        self.squares
            .iter_mut()
            .map(Square::reveal)
            .filter(|&newly_revealed| newly_revealed)
            .count()
    }

    /// Reorders squares ascending by value, ids travel with their squares.
    pub(crate) fn sort_by_value(&mut self) {
        match self.squares.as_slice_mut() {
            Some(squares) => squares.sort_by_key(Square::value),
            None => log::warn!("Board layout is not contiguous, left unsorted"),
        }
    }
}
