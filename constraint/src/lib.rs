//! Veto Constraint
//!
//! Validate instances against the declared constraint set.
//!
//! Responsibilities:
//! - Pair every rule identity with a validation function
//! - Check field, element, parameter, and return-value constraints
//! - Invoke instance-method hooks at the right points
//! - Produce violation reports with resolved messages

mod checker;
mod country;
mod error;
mod message;
mod validators;
mod violation;

pub use checker::ConstraintChecker;
pub use error::{ConstraintError, ConstraintResult, WiringError};
pub use validators::{ValidatorFn, Validators};
pub use violation::{Violation, Violations};
