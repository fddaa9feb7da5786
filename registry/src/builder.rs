//! RegistryBuilder for constructing an immutable Registry.
//!
//! All configuration errors surface here, at definition time: an attachment
//! that survives `build()` is guaranteed to reference a cataloged rule, to
//! carry parameters matching that rule's schema, and to respect the rule's
//! site and repeatability contracts.

use std::collections::{HashMap, HashSet};
use thiserror::Error;
use veto_core::{ConstraintId, TypeId};

use crate::catalog::builtin_rules;
use crate::registry::Registry;
use crate::types::{
    Backing, Constraint, ConstraintDef, FieldDef, MethodDef, ParamKind, RuleDef, Site, TypeDef,
};

/// Errors that can occur during registry construction.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Duplicate type name: {0}")]
    DuplicateTypeName(String),

    #[error("Duplicate rule name: {0}")]
    DuplicateRuleName(String),

    #[error("Duplicate field '{field}' on type {type_name}")]
    DuplicateFieldName { type_name: String, field: String },

    #[error("Duplicate method '{method}' on type {type_name}")]
    DuplicateMethodName { type_name: String, method: String },

    #[error("Unknown rule '{rule}' at {type_name}, {site}")]
    UnknownRule {
        rule: String,
        type_name: String,
        site: String,
    },

    #[error("Rule '{rule}' is missing required parameter '{param}'")]
    MissingParameter { rule: String, param: String },

    #[error("Parameter '{param}' of rule '{rule}' expects {expected}")]
    ParameterKind {
        rule: String,
        param: String,
        expected: &'static str,
    },

    #[error("Parameter '{param}' of rule '{rule}' must not be empty")]
    EmptyParameterList { rule: String, param: String },

    #[error("Unknown parameter '{param}' for rule '{rule}'")]
    UnknownParameter { rule: String, param: String },

    #[error("Rule '{rule}' references unknown field '{field}' on type {type_name}")]
    UnknownFieldReference {
        rule: String,
        type_name: String,
        field: String,
    },

    #[error("Rule '{rule}' cannot attach at {type_name}, {site}")]
    SiteMismatch {
        rule: String,
        type_name: String,
        site: String,
    },

    #[error("Non-repeatable rule '{rule}' attached twice at {type_name}, {site}")]
    RepeatedConstraint {
        rule: String,
        type_name: String,
        site: String,
    },

    #[error("Empty message override for rule '{rule}' at {type_name}, {site}")]
    EmptyMessage {
        rule: String,
        type_name: String,
        site: String,
    },

    #[error("Parameter index {index} out of range for method '{method}' on type {type_name}")]
    ParameterIndexOutOfRange {
        type_name: String,
        method: String,
        index: usize,
    },
}

/// Builder for constructing an immutable Registry.
///
/// Starts pre-loaded with the built-in rule catalog.
#[derive(Debug)]
pub struct RegistryBuilder {
    /// Next type ID to allocate.
    next_type_id: u32,
    /// Rule catalog being built.
    rules: Vec<RuleDef>,
    /// Types being built.
    types: Vec<TypeDef>,
    /// Type name to ID mapping.
    type_names: HashMap<String, TypeId>,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryBuilder {
    /// Create a new builder with the built-in rules.
    pub fn new() -> Self {
        Self {
            next_type_id: 0,
            rules: builtin_rules(),
            types: Vec::new(),
            type_names: HashMap::new(),
        }
    }

    /// Register a custom rule in the catalog.
    pub fn add_rule(&mut self, rule: RuleDef) -> Result<&mut Self, RegistryError> {
        if self.rules.iter().any(|r| r.name == rule.name) {
            return Err(RegistryError::DuplicateRuleName(rule.name));
        }
        self.rules.push(rule);
        Ok(self)
    }

    /// Add a type definition.
    pub fn add_type(&mut self, name: impl Into<String>) -> TypeBuilder<'_> {
        let name = name.into();
        let id = TypeId::new(self.next_type_id);
        self.next_type_id += 1;

        TypeBuilder {
            builder: self,
            id,
            name,
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Build the immutable Registry, validating every attachment.
    pub fn build(self) -> Result<Registry, RegistryError> {
        let rule_names: HashMap<String, usize> = self
            .rules
            .iter()
            .enumerate()
            .map(|(i, r)| (r.name.clone(), i))
            .collect();

        let mut constraints: Vec<ConstraintDef> = Vec::new();
        let mut constraints_by_type: HashMap<TypeId, Vec<usize>> = HashMap::new();

        for type_def in &self.types {
            let attachments = collect_attachments(type_def)?;
            let mut non_repeatable_seen: HashSet<(Site, String)> = HashSet::new();

            for (site, attachment) in attachments {
                let rule = match rule_names.get(&attachment.rule) {
                    Some(&i) => &self.rules[i],
                    None => {
                        return Err(RegistryError::UnknownRule {
                            rule: attachment.rule.clone(),
                            type_name: type_def.name.clone(),
                            site: site.to_string(),
                        })
                    }
                };

                check_site(rule, &site, type_def)?;
                check_params(rule, attachment, type_def)?;

                if let Some(message) = &attachment.message {
                    if message.is_empty() {
                        return Err(RegistryError::EmptyMessage {
                            rule: rule.name.clone(),
                            type_name: type_def.name.clone(),
                            site: site.to_string(),
                        });
                    }
                }

                if !rule.repeatable
                    && !non_repeatable_seen.insert((site.clone(), rule.name.clone()))
                {
                    return Err(RegistryError::RepeatedConstraint {
                        rule: rule.name.clone(),
                        type_name: type_def.name.clone(),
                        site: site.to_string(),
                    });
                }

                let index = constraints.len();
                constraints.push(ConstraintDef {
                    id: ConstraintId::new(index as u32),
                    type_id: type_def.id,
                    site,
                    rule: rule.name.clone(),
                    message_template: attachment
                        .message
                        .clone()
                        .or_else(|| rule.message_template.clone()),
                    groups: attachment.groups.clone(),
                    payload: attachment.payload.clone(),
                    params: attachment.params.clone(),
                });
                constraints_by_type
                    .entry(type_def.id)
                    .or_default()
                    .push(index);
            }
        }

        let types: HashMap<TypeId, TypeDef> =
            self.types.into_iter().map(|t| (t.id, t)).collect();

        Ok(Registry::new(
            self.rules,
            rule_names,
            types,
            self.type_names,
            constraints,
            constraints_by_type,
        ))
    }
}

/// Flatten a type's declared constraints into (site, attachment) pairs,
/// in declaration order.
fn collect_attachments(
    type_def: &TypeDef,
) -> Result<Vec<(Site, &Constraint)>, RegistryError> {
    let mut attachments = Vec::new();

    for field in &type_def.fields {
        for constraint in &field.constraints {
            attachments.push((Site::Field(field.name.clone()), constraint));
        }
        for constraint in &field.element_constraints {
            attachments.push((Site::Element(field.name.clone()), constraint));
        }
    }

    for method in &type_def.methods {
        for (index, constraint) in &method.param_constraints {
            if *index >= method.params.len() {
                return Err(RegistryError::ParameterIndexOutOfRange {
                    type_name: type_def.name.clone(),
                    method: method.name.clone(),
                    index: *index,
                });
            }
            attachments.push((
                Site::Parameter {
                    method: method.name.clone(),
                    index: *index,
                },
                constraint,
            ));
        }
        for constraint in &method.cross_constraints {
            attachments.push((Site::Parameters(method.name.clone()), constraint));
        }
        for constraint in &method.return_constraints {
            attachments.push((Site::ReturnValue(method.name.clone()), constraint));
        }
        for constraint in &method.hooks {
            attachments.push((Site::Method(method.name.clone()), constraint));
        }
    }

    Ok(attachments)
}

/// Hook-backed rules attach to methods; validator-backed rules to values.
fn check_site(rule: &RuleDef, site: &Site, type_def: &TypeDef) -> Result<(), RegistryError> {
    let at_method = matches!(site, Site::Method(_));
    let valid = match rule.backing {
        Backing::Hook(_) => at_method,
        Backing::Validator => !at_method,
    };
    if valid {
        Ok(())
    } else {
        Err(RegistryError::SiteMismatch {
            rule: rule.name.clone(),
            type_name: type_def.name.clone(),
            site: site.to_string(),
        })
    }
}

/// Validate an attachment's parameters against the rule's schema.
fn check_params(
    rule: &RuleDef,
    attachment: &Constraint,
    type_def: &TypeDef,
) -> Result<(), RegistryError> {
    for param in &rule.params {
        let value = match attachment.params.get(&param.name) {
            Some(v) => v,
            None if param.required => {
                return Err(RegistryError::MissingParameter {
                    rule: rule.name.clone(),
                    param: param.name.clone(),
                })
            }
            None => continue,
        };

        let kind_error = || RegistryError::ParameterKind {
            rule: rule.name.clone(),
            param: param.name.clone(),
            expected: param.kind.describe(),
        };

        match param.kind {
            ParamKind::Int => {
                if !value.is_int() {
                    return Err(kind_error());
                }
            }
            ParamKind::Text => {
                if !value.is_string() {
                    return Err(kind_error());
                }
            }
            ParamKind::TextList => {
                let items = value.as_list().ok_or_else(kind_error)?;
                if items.iter().any(|v| !v.is_string()) {
                    return Err(kind_error());
                }
                if items.is_empty() {
                    return Err(RegistryError::EmptyParameterList {
                        rule: rule.name.clone(),
                        param: param.name.clone(),
                    });
                }
            }
            ParamKind::FieldList => {
                let items = value.as_list().ok_or_else(kind_error)?;
                for item in items {
                    let field = item.as_str().ok_or_else(kind_error)?;
                    if !type_def.has_field(field) {
                        return Err(RegistryError::UnknownFieldReference {
                            rule: rule.name.clone(),
                            type_name: type_def.name.clone(),
                            field: field.to_string(),
                        });
                    }
                }
            }
        }
    }

    for name in attachment.params.keys() {
        if rule.get_param(name).is_none() {
            return Err(RegistryError::UnknownParameter {
                rule: rule.name.clone(),
                param: name.clone(),
            });
        }
    }

    Ok(())
}

/// Builder for a type definition.
pub struct TypeBuilder<'a> {
    builder: &'a mut RegistryBuilder,
    id: TypeId,
    name: String,
    fields: Vec<FieldDef>,
    methods: Vec<MethodDef>,
}

impl<'a> TypeBuilder<'a> {
    /// Add a field declaration.
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Add a method declaration.
    pub fn method(mut self, method: MethodDef) -> Self {
        self.methods.push(method);
        self
    }

    /// Finish the type and hand it to the builder.
    pub fn done(self) -> Result<(), RegistryError> {
        if self.builder.type_names.contains_key(&self.name) {
            return Err(RegistryError::DuplicateTypeName(self.name));
        }

        let mut field_names: HashSet<&str> = HashSet::new();
        for field in &self.fields {
            if !field_names.insert(&field.name) {
                return Err(RegistryError::DuplicateFieldName {
                    type_name: self.name.clone(),
                    field: field.name.clone(),
                });
            }
        }

        let mut method_names: HashSet<&str> = HashSet::new();
        for method in &self.methods {
            if !method_names.insert(&method.name) {
                return Err(RegistryError::DuplicateMethodName {
                    type_name: self.name.clone(),
                    method: method.name.clone(),
                });
            }
        }

        self.builder.type_names.insert(self.name.clone(), self.id);
        self.builder.types.push(TypeDef {
            id: self.id,
            name: self.name,
            fields: self.fields,
            methods: self.methods,
        });
        Ok(())
    }
}
