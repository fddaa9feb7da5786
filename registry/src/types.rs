//! Rule and constraint descriptor types.

use std::fmt;
use veto_core::{Attributes, ConstraintId, TypeId, Value};

use crate::catalog;

/// How a rule is executed by the checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backing {
    /// A pure validation function keyed by the rule identity.
    Validator,
    /// A named method on the validated instance.
    Hook(HookTiming),
}

/// When a hook-backed rule is invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookTiming {
    /// After the field constraints of a validation pass.
    EveryValidation,
    /// Once, immediately after construction.
    PostConstruct,
}

/// Expected kind of a rule parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// 64-bit signed integer.
    Int,
    /// A single string.
    Text,
    /// A non-empty list of strings.
    TextList,
    /// A list of field names on the constrained type.
    FieldList,
}

impl ParamKind {
    /// Human-readable description for configuration errors.
    pub fn describe(&self) -> &'static str {
        match self {
            ParamKind::Int => "a 64-bit integer",
            ParamKind::Text => "a string",
            ParamKind::TextList => "a non-empty list of strings",
            ParamKind::FieldList => "a list of field names",
        }
    }
}

/// Parameter declaration within a rule.
#[derive(Debug, Clone)]
pub struct ParamDef {
    /// Parameter name.
    pub name: String,
    /// Expected kind.
    pub kind: ParamKind,
    /// Whether an attachment must supply this parameter.
    pub required: bool,
}

impl ParamDef {
    pub fn new(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// Rule definition: one named entry in the constraint vocabulary.
#[derive(Debug, Clone)]
pub struct RuleDef {
    /// Rule identity, unique within the catalog.
    pub name: String,
    /// Default failure message template. None for hook-backed rules,
    /// whose message comes from the hook result.
    pub message_template: Option<String>,
    /// Whether several attachments of this rule may share one site.
    pub repeatable: bool,
    /// How the rule is executed.
    pub backing: Backing,
    /// Parameter schema.
    pub params: Vec<ParamDef>,
}

impl RuleDef {
    /// Create a validator-backed, non-repeatable rule with no parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message_template: None,
            repeatable: false,
            backing: Backing::Validator,
            params: Vec::new(),
        }
    }

    /// Set the default failure message template.
    pub fn with_message(mut self, template: impl Into<String>) -> Self {
        self.message_template = Some(template.into());
        self
    }

    /// Allow multiple attachments of this rule on one site.
    pub fn repeatable(mut self) -> Self {
        self.repeatable = true;
        self
    }

    /// Make this rule hook-backed with the given timing.
    pub fn hook(mut self, timing: HookTiming) -> Self {
        self.backing = Backing::Hook(timing);
        self
    }

    /// Add a parameter to the schema.
    pub fn param(mut self, param: ParamDef) -> Self {
        self.params.push(param);
        self
    }

    /// Look up a parameter declaration by name.
    pub fn get_param(&self, name: &str) -> Option<&ParamDef> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Whether this rule designates an instance method.
    pub fn is_hook(&self) -> bool {
        matches!(self.backing, Backing::Hook(_))
    }
}

/// Where a constraint attaches within a type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Site {
    /// A field value.
    Field(String),
    /// Each element of a list-valued field.
    Element(String),
    /// One method parameter.
    Parameter { method: String, index: usize },
    /// The full argument tuple of a method (cross-parameter rules).
    Parameters(String),
    /// A method return value.
    ReturnValue(String),
    /// The method itself (hook designation).
    Method(String),
}

impl Site {
    /// The method name this site belongs to, if any.
    pub fn method_name(&self) -> Option<&str> {
        match self {
            Site::Parameter { method, .. }
            | Site::Parameters(method)
            | Site::ReturnValue(method)
            | Site::Method(method) => Some(method),
            _ => None,
        }
    }

    /// The field name this site belongs to, if any.
    pub fn field_name(&self) -> Option<&str> {
        match self {
            Site::Field(name) | Site::Element(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Site::Field(name) => write!(f, "field '{}'", name),
            Site::Element(name) => write!(f, "elements of '{}'", name),
            Site::Parameter { method, index } => {
                write!(f, "parameter {} of '{}'", index, method)
            }
            Site::Parameters(method) => write!(f, "parameters of '{}'", method),
            Site::ReturnValue(method) => write!(f, "return value of '{}'", method),
            Site::Method(method) => write!(f, "method '{}'", method),
        }
    }
}

/// A constraint attachment as declared, before registry resolution.
#[derive(Debug, Clone)]
pub struct Constraint {
    /// Identity of the rule this attachment invokes.
    pub rule: String,
    /// Message template override. None uses the rule's default.
    pub message: Option<String>,
    /// Groups this attachment belongs to. Empty means the default pass.
    pub groups: Vec<String>,
    /// Opaque payload tags, passed through to violation reports.
    pub payload: Vec<String>,
    /// Rule parameters.
    pub params: Attributes,
}

impl Constraint {
    /// Attach a rule by identity.
    pub fn rule(name: impl Into<String>) -> Self {
        Self {
            rule: name.into(),
            message: None,
            groups: Vec::new(),
            payload: Vec::new(),
            params: Attributes::new(),
        }
    }

    /// The annotated value must equal one of the given values.
    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::rule(catalog::ONE_OF).param(
            "values",
            Value::List(values.into_iter().map(|v| Value::String(v.into())).collect()),
        )
    }

    /// The annotated string must be a canonically formatted UUID.
    pub fn uuid() -> Self {
        Self::rule(catalog::UUID)
    }

    /// The annotated string must be an ISO 3166-1 alpha-2 country code.
    pub fn country_code() -> Self {
        Self::rule(catalog::COUNTRY_CODE)
    }

    /// Designate an instance method as a validation hook, attributing
    /// failures to the given fields.
    pub fn method_validation<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::rule(catalog::METHOD_VALIDATION).param(
            "fields",
            Value::List(fields.into_iter().map(|v| Value::String(v.into())).collect()),
        )
    }

    /// Designate an instance method as a post-construction hook,
    /// attributing failures to the given fields.
    pub fn post_construct_validation<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::rule(catalog::POST_CONSTRUCT_VALIDATION).param(
            "fields",
            Value::List(fields.into_iter().map(|v| Value::String(v.into())).collect()),
        )
    }

    /// Set a rule parameter.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Override the failure message template.
    pub fn message(mut self, template: impl Into<String>) -> Self {
        self.message = Some(template.into());
        self
    }

    /// Add a group tag.
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }

    /// Add a payload tag.
    pub fn payload(mut self, tag: impl Into<String>) -> Self {
        self.payload.push(tag.into());
        self
    }
}

/// Field declaration within a validated type.
#[derive(Debug, Clone)]
pub struct FieldDef {
    /// Field name.
    pub name: String,
    /// Constraints on the field value.
    pub constraints: Vec<Constraint>,
    /// Constraints on each element of a list-valued field.
    pub element_constraints: Vec<Constraint>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraints: Vec::new(),
            element_constraints: Vec::new(),
        }
    }

    /// Attach a constraint to the field value.
    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Attach a constraint to each element of the field's list value.
    pub fn element_constraint(mut self, constraint: Constraint) -> Self {
        self.element_constraints.push(constraint);
        self
    }
}

/// Method declaration within a validated type.
#[derive(Debug, Clone)]
pub struct MethodDef {
    /// Method name.
    pub name: String,
    /// Ordered parameter names.
    pub params: Vec<String>,
    /// Constraints on single parameters, by position.
    pub param_constraints: Vec<(usize, Constraint)>,
    /// Cross-parameter constraints, applied to the argument tuple.
    pub cross_constraints: Vec<Constraint>,
    /// Constraints on the return value.
    pub return_constraints: Vec<Constraint>,
    /// Hook designations on the method itself.
    pub hooks: Vec<Constraint>,
}

impl MethodDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            param_constraints: Vec::new(),
            cross_constraints: Vec::new(),
            return_constraints: Vec::new(),
            hooks: Vec::new(),
        }
    }

    /// Declare the next parameter by name.
    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.params.push(name.into());
        self
    }

    /// Attach a constraint to the parameter at the given position.
    pub fn param_constraint(mut self, index: usize, constraint: Constraint) -> Self {
        self.param_constraints.push((index, constraint));
        self
    }

    /// Attach a cross-parameter constraint.
    pub fn cross_constraint(mut self, constraint: Constraint) -> Self {
        self.cross_constraints.push(constraint);
        self
    }

    /// Attach a constraint to the return value.
    pub fn return_constraint(mut self, constraint: Constraint) -> Self {
        self.return_constraints.push(constraint);
        self
    }

    /// Designate this method as a validation hook.
    pub fn hook(mut self, constraint: Constraint) -> Self {
        self.hooks.push(constraint);
        self
    }
}

/// A validated type: named fields and methods with attached constraints.
#[derive(Debug, Clone)]
pub struct TypeDef {
    /// Unique identifier.
    pub id: TypeId,
    /// Type name.
    pub name: String,
    /// Field declarations, in declaration order.
    pub fields: Vec<FieldDef>,
    /// Method declarations, in declaration order.
    pub methods: Vec<MethodDef>,
}

impl TypeDef {
    /// Get a field declaration by name.
    pub fn get_field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Check if this type declares a field.
    pub fn has_field(&self, name: &str) -> bool {
        self.get_field(name).is_some()
    }

    /// Get a method declaration by name.
    pub fn get_method(&self, name: &str) -> Option<&MethodDef> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Get all field names.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }
}

/// A constraint attachment resolved into the registry.
#[derive(Debug, Clone)]
pub struct ConstraintDef {
    /// Unique identifier.
    pub id: ConstraintId,
    /// Type this constraint belongs to.
    pub type_id: TypeId,
    /// Declaration site within the type.
    pub site: Site,
    /// Identity of the rule.
    pub rule: String,
    /// Message template in effect: attachment override or rule default.
    pub message_template: Option<String>,
    /// Groups this constraint belongs to.
    pub groups: Vec<String>,
    /// Payload tags.
    pub payload: Vec<String>,
    /// Rule parameters.
    pub params: Attributes,
}

impl ConstraintDef {
    /// Whether this constraint is in scope for a validation pass.
    ///
    /// An empty request selects the default pass: constraints with no
    /// groups. A named request selects constraints whose group set
    /// intersects it.
    pub fn applies_to_groups(&self, requested: &[&str]) -> bool {
        if requested.is_empty() {
            self.groups.is_empty()
        } else {
            self.groups.iter().any(|g| requested.contains(&g.as_str()))
        }
    }

    /// The `fields` parameter as a name list, empty when absent.
    pub fn fields_param(&self) -> Vec<&str> {
        match self.params.get("fields") {
            Some(Value::List(items)) => items.iter().filter_map(|v| v.as_str()).collect(),
            _ => Vec::new(),
        }
    }
}
