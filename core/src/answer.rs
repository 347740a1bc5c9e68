use crate::*;

/// Checks the values of the selected squares against the current target.
///
/// Operand order never matters: addition and multiplication commute and subtraction compares
/// the absolute difference. A selection of the wrong size is simply not correct.
pub fn check_answer(
    selected_values: &[Number],
    target: Number,
    operation: Operation,
    multiplication_table: Option<TimesTable>,
) -> bool {
    match (operation, multiplication_table, selected_values) {
        (Operation::Multiplication, Some(table), &[value]) => {
            value.checked_mul(Number::from(table)) == Some(target)
        }
        (Operation::Multiplication, _, _) => false,
        (Operation::Addition | Operation::Subtraction, _, &[first, second]) => {
            operation.apply(first, second) == target
        }
        _ => false,
    }
}
