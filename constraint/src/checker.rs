//! Constraint checking.

use veto_core::{Attributes, Path, Value};
use veto_hook::{HookResult, HookSet};
use veto_registry::{Backing, ConstraintDef, HookTiming, Registry, Site, TypeDef};

use crate::error::{ConstraintError, ConstraintResult, WiringError};
use crate::message;
use crate::validators::Validators;
use crate::violation::{Violation, Violations};

static NULL: Value = Value::Null;

/// Constraint checker: evaluates declared constraints against instances.
///
/// Construction verifies wiring: every validator-backed rule attached in the
/// registry must have a validator, and every hook designation must have a
/// registered hook.
pub struct ConstraintChecker<'r> {
    registry: &'r Registry,
    validators: Validators,
    hooks: HookSet,
}

impl<'r> ConstraintChecker<'r> {
    /// Create a new constraint checker, verifying wiring.
    pub fn new(
        registry: &'r Registry,
        validators: Validators,
        hooks: HookSet,
    ) -> Result<Self, WiringError> {
        for constraint in registry.all_constraints() {
            match registry.rule(&constraint.rule).map(|r| r.backing) {
                Some(Backing::Hook(_)) => {
                    let type_name = match registry.get_type(constraint.type_id) {
                        Some(t) => t.name.as_str(),
                        None => continue,
                    };
                    let method = match constraint.site.method_name() {
                        Some(m) => m,
                        None => continue,
                    };
                    if !hooks.contains(type_name, method) {
                        return Err(WiringError::MissingHook {
                            type_name: type_name.to_string(),
                            method: method.to_string(),
                        });
                    }
                }
                _ => {
                    if !validators.contains(&constraint.rule) {
                        return Err(WiringError::MissingValidator {
                            rule: constraint.rule.clone(),
                        });
                    }
                }
            }
        }

        Ok(Self {
            registry,
            validators,
            hooks,
        })
    }

    /// Validate an instance: field and element constraints of the default
    /// pass, then method-validation hooks once the structural checks pass.
    pub fn validate(
        &self,
        type_name: &str,
        instance: &Attributes,
    ) -> ConstraintResult<Violations> {
        self.validate_with_groups(type_name, instance, &[])
    }

    /// Validate an instance for an explicit group pass.
    pub fn validate_with_groups(
        &self,
        type_name: &str,
        instance: &Attributes,
        groups: &[&str],
    ) -> ConstraintResult<Violations> {
        let type_def = self.type_def(type_name)?;
        let mut violations = self.check_fields(type_def, instance, groups)?;
        if violations.is_empty() {
            violations.merge(self.run_hooks(
                type_def,
                instance,
                groups,
                HookTiming::EveryValidation,
            )?);
        }
        Ok(violations)
    }

    /// Validate a freshly constructed instance: field and element
    /// constraints, then post-construct hooks, once.
    pub fn validate_constructed(
        &self,
        type_name: &str,
        instance: &Attributes,
    ) -> ConstraintResult<Violations> {
        let type_def = self.type_def(type_name)?;
        let mut violations = self.check_fields(type_def, instance, &[])?;
        if violations.is_empty() {
            violations.merge(self.run_hooks(
                type_def,
                instance,
                &[],
                HookTiming::PostConstruct,
            )?);
        }
        Ok(violations)
    }

    /// Validate the arguments of a method call.
    pub fn validate_parameters(
        &self,
        type_name: &str,
        method: &str,
        args: &[Value],
    ) -> ConstraintResult<Violations> {
        let type_def = self.type_def(type_name)?;
        let method_def = type_def
            .get_method(method)
            .ok_or_else(|| ConstraintError::unknown_method(&type_def.name, method))?;
        if args.len() != method_def.params.len() {
            return Err(ConstraintError::ArityMismatch {
                type_name: type_def.name.clone(),
                method: method.to_string(),
                expected: method_def.params.len(),
                actual: args.len(),
            });
        }

        let mut violations = Violations::new();
        for constraint in self.registry.constraints_for_type(type_def.id) {
            if !constraint.applies_to_groups(&[]) {
                continue;
            }
            match &constraint.site {
                Site::Parameter { method: m, index } if m == method => {
                    let path = Path::root(&type_def.name)
                        .method(method)
                        .parameter(&method_def.params[*index], *index);
                    self.check_value(constraint, &args[*index], path, &mut violations)?;
                }
                Site::Parameters(m) if m == method => {
                    let tuple = Value::List(args.to_vec());
                    let path = Path::root(&type_def.name).method(method);
                    self.check_value(constraint, &tuple, path, &mut violations)?;
                }
                _ => {}
            }
        }
        Ok(violations)
    }

    /// Validate a method's return value.
    pub fn validate_return_value(
        &self,
        type_name: &str,
        method: &str,
        value: &Value,
    ) -> ConstraintResult<Violations> {
        let type_def = self.type_def(type_name)?;
        if type_def.get_method(method).is_none() {
            return Err(ConstraintError::unknown_method(&type_def.name, method));
        }

        let mut violations = Violations::new();
        for constraint in self.registry.constraints_for_type(type_def.id) {
            if !constraint.applies_to_groups(&[]) {
                continue;
            }
            if let Site::ReturnValue(m) = &constraint.site {
                if m == method {
                    let path = Path::root(&type_def.name).method(method).return_value();
                    self.check_value(constraint, value, path, &mut violations)?;
                }
            }
        }
        Ok(violations)
    }

    // ========== Internal checking methods ==========

    fn type_def(&self, type_name: &str) -> ConstraintResult<&TypeDef> {
        self.registry
            .get_type_by_name(type_name)
            .ok_or_else(|| ConstraintError::unknown_type(type_name))
    }

    /// Check field and element constraints for one pass.
    fn check_fields(
        &self,
        type_def: &TypeDef,
        instance: &Attributes,
        groups: &[&str],
    ) -> ConstraintResult<Violations> {
        let mut violations = Violations::new();

        for constraint in self.registry.constraints_for_type(type_def.id) {
            if !constraint.applies_to_groups(groups) {
                continue;
            }
            match &constraint.site {
                Site::Field(field) => {
                    let value = instance.get(field).unwrap_or(&NULL);
                    let path = Path::root(&type_def.name).field(field);
                    self.check_value(constraint, value, path, &mut violations)?;
                }
                Site::Element(field) => {
                    let value = instance.get(field).unwrap_or(&NULL);
                    match value {
                        Value::Null => {}
                        Value::List(items) => {
                            for (i, item) in items.iter().enumerate() {
                                let path = Path::root(&type_def.name).field(field).index(i);
                                self.check_value(constraint, item, path, &mut violations)?;
                            }
                        }
                        other => {
                            let path = Path::root(&type_def.name).field(field);
                            self.check_value(constraint, other, path, &mut violations)?;
                        }
                    }
                }
                _ => {}
            }
        }

        Ok(violations)
    }

    /// Evaluate one constraint against one value, recording a violation
    /// with a resolved message when the rule is not satisfied.
    fn check_value(
        &self,
        constraint: &ConstraintDef,
        value: &Value,
        path: Path,
        violations: &mut Violations,
    ) -> ConstraintResult<()> {
        let validator = match self.validators.get(&constraint.rule) {
            Some(v) => v,
            None => return Ok(()),
        };

        if !validator(value, &constraint.params)? {
            let template = constraint.message_template.as_deref().unwrap_or("invalid value");
            let resolved = message::interpolate(template, Some(value), &constraint.params);
            violations.push(
                Violation::new(&constraint.rule, path, resolved)
                    .with_value(value.clone())
                    .with_groups(constraint.groups.clone())
                    .with_payload(constraint.payload.clone()),
            );
        }
        Ok(())
    }

    /// Invoke hook designations of one timing, attributing failures to the
    /// hook's declared fields.
    fn run_hooks(
        &self,
        type_def: &TypeDef,
        instance: &Attributes,
        groups: &[&str],
        timing: HookTiming,
    ) -> ConstraintResult<Violations> {
        let mut violations = Violations::new();

        for constraint in self.registry.constraints_for_type(type_def.id) {
            if !constraint.applies_to_groups(groups) {
                continue;
            }
            let Site::Method(method) = &constraint.site else {
                continue;
            };
            let rule_timing = match self.registry.rule(&constraint.rule).map(|r| r.backing) {
                Some(Backing::Hook(t)) => t,
                _ => continue,
            };
            if rule_timing != timing {
                continue;
            }
            let hook = match self.hooks.get(&type_def.name, method) {
                Some(h) => h,
                None => continue,
            };

            if let HookResult::Invalid { message, payload } = hook(instance) {
                let message = if message.is_empty() {
                    constraint
                        .message_template
                        .clone()
                        .unwrap_or_else(|| format!("instance check '{}' failed", method))
                } else {
                    message
                };
                let mut tags = constraint.payload.clone();
                if let Some(tag) = payload {
                    tags.push(tag);
                }

                let fields = constraint.fields_param();
                if fields.is_empty() {
                    violations.push(
                        Violation::new(
                            &constraint.rule,
                            Path::root(&type_def.name).method(method),
                            message,
                        )
                        .with_groups(constraint.groups.clone())
                        .with_payload(tags),
                    );
                } else {
                    for field in fields {
                        let mut violation = Violation::new(
                            &constraint.rule,
                            Path::root(&type_def.name).field(field),
                            message.clone(),
                        )
                        .with_groups(constraint.groups.clone())
                        .with_payload(tags.clone());
                        if let Some(value) = instance.get(field) {
                            violation = violation.with_value(value.clone());
                        }
                        violations.push(violation);
                    }
                }
            }
        }

        Ok(violations)
    }
}
