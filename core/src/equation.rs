use core::fmt;

use crate::*;

/// One side of the equation shown to the player.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operand {
    /// Filled by a board square, `None` until the player selects one.
    Square(Option<Number>),
    /// Fixed multiplier of a multiplication move.
    Table(TimesTable),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Square(Some(value)) => write!(f, "{value}"),
            Self::Square(None) => f.write_str("?"),
            Self::Table(table) => write!(f, "{table}"),
        }
    }
}

/// The equation the player is solving in the current move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Equation {
    pub left: Operand,
    pub operation: Operation,
    pub right: Operand,
    pub target: Number,
}

impl Equation {
    pub fn from_game(game: &ActiveGame) -> Self {
        let values = game.selected_values();
        let first = Operand::Square(values.first().copied());

        let (left, right) = match game.multiplication_table() {
            Some(table) if game.current_operation() == Operation::Multiplication => {
                if game.multiplication_swap_order() {
                    (Operand::Table(table), first)
                } else {
                    (first, Operand::Table(table))
                }
            }
            _ => (first, Operand::Square(values.get(1).copied())),
        };

        Self {
            left,
            operation: game.current_operation(),
            right,
            target: game.target(),
        }
    }

    /// Hint line shown under the equation.
    pub const fn prompt(&self) -> &'static str {
        match self.operation {
            Operation::Multiplication => "Click the square that makes the equation correct!",
            Operation::Addition | Operation::Subtraction => {
                "Click squares on the board to fill in the ?s"
            }
        }
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} = {}",
            self.left,
            self.operation.symbol(),
            self.right,
            self.target
        )
    }
}
