//! The Registry - immutable constraint lookup.

use std::collections::HashMap;
use veto_core::TypeId;

use crate::types::{ConstraintDef, RuleDef, Site, TypeDef};

/// The Registry provides runtime lookup of rule and constraint definitions.
/// It is immutable after construction.
#[derive(Debug)]
pub struct Registry {
    /// Rule catalog.
    rules: Vec<RuleDef>,
    /// Rule index lookup by name.
    rule_names: HashMap<String, usize>,

    /// Type definitions by ID.
    types: HashMap<TypeId, TypeDef>,
    /// Type ID lookup by name.
    type_names: HashMap<String, TypeId>,

    /// Constraint definitions.
    constraints: Vec<ConstraintDef>,
    /// Constraints indexed by type ID.
    constraints_by_type: HashMap<TypeId, Vec<usize>>,
}

impl Registry {
    /// Create a registry (use RegistryBuilder for construction).
    pub(crate) fn new(
        rules: Vec<RuleDef>,
        rule_names: HashMap<String, usize>,
        types: HashMap<TypeId, TypeDef>,
        type_names: HashMap<String, TypeId>,
        constraints: Vec<ConstraintDef>,
        constraints_by_type: HashMap<TypeId, Vec<usize>>,
    ) -> Self {
        Self {
            rules,
            rule_names,
            types,
            type_names,
            constraints,
            constraints_by_type,
        }
    }

    // ==================== Rule Lookups ====================

    /// Get a rule definition by identity.
    pub fn rule(&self, name: &str) -> Option<&RuleDef> {
        self.rule_names.get(name).map(|&i| &self.rules[i])
    }

    /// Get all rule definitions.
    pub fn all_rules(&self) -> impl Iterator<Item = &RuleDef> {
        self.rules.iter()
    }

    /// Get the number of cataloged rules.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    // ==================== Type Lookups ====================

    /// Get a type definition by name.
    pub fn get_type_by_name(&self, name: &str) -> Option<&TypeDef> {
        self.type_names.get(name).and_then(|id| self.types.get(id))
    }

    /// Get a type definition by ID.
    pub fn get_type(&self, id: TypeId) -> Option<&TypeDef> {
        self.types.get(&id)
    }

    /// Get a type ID by name.
    pub fn get_type_id(&self, name: &str) -> Option<TypeId> {
        self.type_names.get(name).copied()
    }

    /// Get all type definitions.
    pub fn all_types(&self) -> impl Iterator<Item = &TypeDef> {
        self.types.values()
    }

    /// Get the number of types.
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    // ==================== Constraint Lookups ====================

    /// Get all constraints for a type, in declaration order.
    pub fn constraints_for_type(&self, type_id: TypeId) -> Vec<&ConstraintDef> {
        self.constraints_by_type
            .get(&type_id)
            .map(|indices| indices.iter().map(|&i| &self.constraints[i]).collect())
            .unwrap_or_default()
    }

    /// Get all constraints at one declaration site.
    pub fn constraints_for_site(&self, type_id: TypeId, site: &Site) -> Vec<&ConstraintDef> {
        self.constraints_for_type(type_id)
            .into_iter()
            .filter(|c| &c.site == site)
            .collect()
    }

    /// Get all constraints.
    pub fn all_constraints(&self) -> impl Iterator<Item = &ConstraintDef> {
        self.constraints.iter()
    }

    /// Get the number of constraint attachments.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }
}
