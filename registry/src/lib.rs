//! Veto Registry
//!
//! The constraint definition set: a catalog of named validation rules and
//! the types they attach to, built once and read-only afterwards.
//!
//! Responsibilities:
//! - Declare the vocabulary of rules and their parameter schemas
//! - Attach constraints to fields, methods, parameters, and return values
//! - Reject invalid declarations at build time
//! - Serve immutable lookups to the checker

mod builder;
mod catalog;
mod registry;
mod types;

pub use builder::{RegistryBuilder, RegistryError, TypeBuilder};
pub use catalog::{
    builtin_rules, COUNTRY_CODE, METHOD_VALIDATION, ONE_OF, POST_CONSTRUCT_VALIDATION, UUID,
};
pub use registry::Registry;
pub use types::{
    Backing, Constraint, ConstraintDef, FieldDef, HookTiming, MethodDef, ParamDef, ParamKind,
    RuleDef, Site, TypeDef,
};
