//! Veto Core Types
//!
//! This crate provides the foundational types used throughout the Veto
//! workspace:
//! - Identity types (TypeId, ConstraintId)
//! - Value types (the Value enum for validated data and rule parameters)
//! - Declaration paths (Path, PathSegment) for violation reporting

mod id;
mod path;
mod value;

pub use id::{ConstraintId, TypeId};
pub use path::{Path, PathSegment};
pub use value::{Attributes, Value};
