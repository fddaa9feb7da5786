//! Veto Hook
//!
//! Instance-method validation: named checks over a validated instance,
//! invoked by the checker at well-defined points in the pipeline.
//!
//! Responsibilities:
//! - Carry the pass/fail result an instance check reports
//! - Register checks by (type, method) name

mod result;
mod set;

pub use result::HookResult;
pub use set::{HookFn, HookSet};
