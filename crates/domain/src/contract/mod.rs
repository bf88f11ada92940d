//! Contract checks over response captures.
//!
//! Checks are pure predicates: they observe a [`ResponseCapture`] and
//! produce a pass/fail outcome with a human-readable mismatch, never
//! touching I/O. Within a scenario they evaluate in declared order and
//! stop at the first failure so failure reports stay unambiguous.

mod check;
mod outcome;

pub use check::{Check, FieldType, ItemCheck};
pub use outcome::CheckOutcome;

use crate::response::ResponseCapture;

/// Evaluates checks in declared order, stopping at the first failure.
///
/// The returned outcomes cover every check up to and including the first
/// failing one; checks after a failure are not evaluated.
#[must_use]
pub fn verify(checks: &[Check], response: &ResponseCapture) -> Vec<CheckOutcome> {
    let mut outcomes = Vec::with_capacity(checks.len());
    for check in checks {
        let outcome = check.evaluate(response);
        let failed = !outcome.passed;
        outcomes.push(outcome);
        if failed {
            break;
        }
    }
    outcomes
}
