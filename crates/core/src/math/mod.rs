use crate::domain::Operator;

/// Applies an operator to two values, `larger >= smaller`.
///
/// This is the complete validity gate for a single reduction. `None` means the
/// combination is pruned: it either leaves the positive integers, is a no-op
/// (`x * 1`, `x / 1`), is an inexact division, or overflows.
pub fn apply(op: Operator, larger: u64, smaller: u64) -> Option<u64> {
    debug_assert!(larger >= smaller);

    match op {
        Operator::Add => larger.checked_add(smaller),
        Operator::Multiply => {
            if larger > 1 && smaller > 1 {
                larger.checked_mul(smaller)
            } else {
                None
            }
        }
        Operator::Subtract => {
            // Zero results are not allowed
            if larger != smaller {
                larger.checked_sub(smaller)
            } else {
                None
            }
        }
        Operator::Divide => {
            if smaller > 1 && larger % smaller == 0 {
                larger.checked_div(smaller)
            } else {
                None
            }
        }
    }
}

/// Evaluates an operator on an ordered pair without pruning no-op steps.
///
/// Used to re-check a finished tree independently of the search: results
/// must still be positive integers, but `x * 1` is accepted here.
pub fn evaluate(op: Operator, left: u64, right: u64) -> Option<u64> {
    let value = match op {
        Operator::Add => left.checked_add(right)?,
        Operator::Subtract => left.checked_sub(right)?,
        Operator::Multiply => left.checked_mul(right)?,
        Operator::Divide => {
            if right == 0 || left % right != 0 {
                return None;
            }
            left / right
        }
    };

    if value == 0 {
        None
    } else {
        Some(value)
    }
}

/// Absolute difference between a value and the target
pub fn distance(value: u64, target: u64) -> u64 {
    value.abs_diff(target)
}
