use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Target and operation for the next move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetResult {
    pub target: Number,
    pub operation: Operation,
    /// Set only for multiplication moves.
    pub multiplication_table: Option<TimesTable>,
    /// Display hint: show the times table before the board operand.
    pub multiplication_swap_order: bool,
}

/// Resolves the concrete operation for a move.
///
/// Mixed mode only offers operations that can still clear the board: a single square left
/// forces multiplication, two squares left exclude it.
pub fn resolve_operation<R: Rng + ?Sized>(
    rng: &mut R,
    mode: OperationMode,
    available_count: usize,
) -> Operation {
    use Operation::*;

    if let Some(operation) = mode.fixed_operation() {
        return operation;
    }

    let choices: &[Operation] = match available_count {
        1 => &[Multiplication],
        2 => &[Addition, Subtraction],
        _ => &[Addition, Subtraction, Multiplication],
    };
    pick_random(rng, choices).copied().unwrap_or(Addition)
}

/// Picks a solvable target for the hidden squares of `board`.
///
/// `None` means the board is exhausted for this mode: nothing is hidden anymore, no times
/// table is available for a multiplication move, or fewer than two squares remain for an
/// addition or subtraction move.
pub fn generate_target<R: Rng + ?Sized>(
    rng: &mut R,
    board: &Board,
    mode: OperationMode,
    times_tables: &BTreeSet<TimesTable>,
) -> Option<TargetResult> {
    let available: Vec<&Square> = board.available().collect();
    if available.is_empty() {
        return None;
    }

    let operation = resolve_operation(rng, mode, available.len());

    if operation == Operation::Multiplication {
        let tables: Vec<TimesTable> = times_tables.iter().copied().collect();
        let square = pick_random(rng, &available)?;
        let &table = pick_random(rng, &tables)?;

        return Some(TargetResult {
            target: Operation::Multiplication.apply(square.value(), Number::from(table)),
            operation,
            multiplication_table: Some(table),
            multiplication_swap_order: rng.random_bool(0.5),
        });
    }

    if available.len() < 2 {
        return None;
    }

    // a uniform pair makes values reachable by several pairs proportionally more likely
    let first = rng.random_range(0..available.len());
    let mut second = rng.random_range(0..available.len() - 1);
    if second >= first {
        second += 1;
    }

    Some(TargetResult {
        target: operation.apply(available[first].value(), available[second].value()),
        operation,
        multiplication_table: None,
        multiplication_swap_order: false,
    })
}
