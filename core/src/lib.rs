#![no_std]

extern crate alloc;

use alloc::collections::BTreeSet;
use serde::{Deserialize, Deserializer, Serialize};

pub use answer::*;
pub use board::*;
pub use engine::*;
pub use equation::*;
pub use error::*;
pub use generator::*;
pub use random::*;
pub use reward::*;
pub use square::*;
pub use storage::*;
pub use target::*;
pub use types::*;

mod answer;
mod board;
mod engine;
mod equation;
mod error;
mod generator;
mod random;
mod reward;
mod square;
mod storage;
mod target;
mod types;

pub const BOARD_SIZE_MIN: BoardSize = 4;
pub const BOARD_SIZE_MAX: BoardSize = 10;
pub const BOARD_SIZE_STEP: BoardSize = 2;
pub const NUMBER_RANGE_MIN: Number = 1;
pub const NUMBER_RANGE_MAX: Number = 100;
pub const TIMES_TABLE_MIN: TimesTable = 2;
pub const TIMES_TABLE_MAX: TimesTable = 12;
pub const DEFAULT_TIMES_TABLES: [TimesTable; 3] = [2, 5, 10];

/// Operation mode chosen in the config screen.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationMode {
    #[default]
    Addition,
    Subtraction,
    Multiplication,
    /// Mixed mode, the concrete operation is resolved on every move.
    All,
}

impl OperationMode {
    pub const fn needs_times_tables(self) -> bool {
        matches!(self, Self::Multiplication | Self::All)
    }

    /// The fixed operation for this mode, `None` for mixed mode.
    pub const fn fixed_operation(self) -> Option<Operation> {
        match self {
            Self::Addition => Some(Operation::Addition),
            Self::Subtraction => Some(Operation::Subtraction),
            Self::Multiplication => Some(Operation::Multiplication),
            Self::All => None,
        }
    }
}

/// Arithmetic relation in force for a single move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Addition,
    Subtraction,
    Multiplication,
}

impl Operation {
    /// How many squares make up a complete answer.
    pub const fn max_selections(self) -> usize {
        match self {
            Self::Multiplication => 1,
            Self::Addition | Self::Subtraction => 2,
        }
    }

    /// Combines two operands; subtraction is the absolute difference so operand order never matters.
    pub fn apply(self, a: Number, b: Number) -> Number {
        match self {
            Self::Addition => a.saturating_add(b),
            Self::Subtraction => a.abs_diff(b),
            Self::Multiplication => a.saturating_mul(b),
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Addition => "+",
            Self::Subtraction => "-",
            Self::Multiplication => "×",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    pub mode: OperationMode,
    pub max_number: Number,
    pub board_size: BoardSize,
    // older saved configs predate times tables or store them as null
    #[serde(
        default = "GameConfig::default_times_tables",
        deserialize_with = "times_tables_or_default"
    )]
    pub selected_times_tables: BTreeSet<TimesTable>,
    #[serde(default)]
    pub arrangement: BoardArrangement,
}

impl GameConfig {
    pub fn new(
        mode: OperationMode,
        max_number: Number,
        board_size: BoardSize,
        selected_times_tables: impl IntoIterator<Item = TimesTable>,
    ) -> Self {
        Self {
            mode,
            max_number: Self::clamp_max_number(max_number),
            board_size: Self::clamp_board_size(board_size),
            selected_times_tables: Self::filter_times_tables(selected_times_tables),
            arrangement: BoardArrangement::default(),
        }
    }

    pub fn default_times_tables() -> BTreeSet<TimesTable> {
        DEFAULT_TIMES_TABLES.into_iter().collect()
    }

    pub const fn total_squares(&self) -> usize {
        let size = self.board_size as usize;
        size * size
    }

    pub fn set_mode(&mut self, mode: OperationMode) {
        self.mode = mode;
    }

    pub fn set_max_number(&mut self, max_number: Number) {
        self.max_number = Self::clamp_max_number(max_number);
    }

    pub fn set_board_size(&mut self, board_size: BoardSize) {
        self.board_size = Self::clamp_board_size(board_size);
    }

    pub fn set_times_tables(&mut self, tables: impl IntoIterator<Item = TimesTable>) {
        self.selected_times_tables = Self::filter_times_tables(tables);
    }

    pub fn set_arrangement(&mut self, arrangement: BoardArrangement) {
        self.arrangement = arrangement;
    }

    /// Brings every field back into its allowed range, used after loading a saved config.
    pub fn normalized(mut self) -> Self {
        self.max_number = Self::clamp_max_number(self.max_number);
        self.board_size = Self::clamp_board_size(self.board_size);
        self.selected_times_tables =
            Self::filter_times_tables(core::mem::take(&mut self.selected_times_tables));
        self
    }

    /// Whether a session may start with this config.
    pub fn has_required_times_tables(&self) -> bool {
        !self.mode.needs_times_tables() || !self.selected_times_tables.is_empty()
    }

    fn clamp_max_number(max_number: Number) -> Number {
        max_number.clamp(NUMBER_RANGE_MIN, NUMBER_RANGE_MAX)
    }

    // odd sizes round up so the board always holds an even number of squares
    fn clamp_board_size(board_size: BoardSize) -> BoardSize {
        let size = board_size.clamp(BOARD_SIZE_MIN, BOARD_SIZE_MAX);
        if size % 2 == 1 {
            (size + 1).min(BOARD_SIZE_MAX)
        } else {
            size
        }
    }

    fn filter_times_tables(tables: impl IntoIterator<Item = TimesTable>) -> BTreeSet<TimesTable> {
        tables
            .into_iter()
            .filter(|table| (TIMES_TABLE_MIN..=TIMES_TABLE_MAX).contains(table))
            .collect()
    }
}

fn times_tables_or_default<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> core::result::Result<BTreeSet<TimesTable>, D::Error> {
    let tables = Option::<BTreeSet<TimesTable>>::deserialize(deserializer)?;
    Ok(tables.unwrap_or_else(GameConfig::default_times_tables))
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: OperationMode::Addition,
            max_number: 12,
            board_size: 6,
            selected_times_tables: Self::default_times_tables(),
            arrangement: BoardArrangement::default(),
        }
    }
}
