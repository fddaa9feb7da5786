//! Catalog, configuration, wiring, and introspection scenarios.

use veto_constraint::{ConstraintChecker, Validators, WiringError};
use veto_core::{fields, Value};
use veto_hook::HookSet;
use veto_registry::{
    builtin_rules, Backing, Constraint, FieldDef, MethodDef, RegistryBuilder, RegistryError,
    RuleDef, Site,
};
use veto_tests::fixtures;

#[test]
fn test_every_declared_default_message_is_nonempty() {
    // GIVEN - the built-in catalog plus the booking rules
    let mut rules = builtin_rules();
    rules.extend(fixtures::booking_rules());

    // THEN
    for rule in rules {
        if let Some(template) = &rule.message_template {
            assert!(!template.is_empty(), "rule '{}' declares an empty message", rule.name);
        } else {
            // only method-designating rules may omit a default
            assert!(matches!(rule.backing, Backing::Hook(_)), "rule '{}'", rule.name);
        }
    }
}

#[test]
fn test_custom_rule_without_required_parameter_fails_at_build() {
    // GIVEN - passenger_count attached without its max bound
    let mut builder = RegistryBuilder::new();
    for rule in fixtures::booking_rules() {
        builder.add_rule(rule).unwrap();
    }
    builder
        .add_type("Car")
        .field(
            FieldDef::new("passenger_count")
                .constraint(Constraint::rule(fixtures::PASSENGER_COUNT)),
        )
        .done()
        .unwrap();

    // WHEN
    let result = builder.build();

    // THEN
    assert!(matches!(result, Err(RegistryError::MissingParameter { .. })));
}

#[test]
fn test_registering_a_rule_twice_fails() {
    // GIVEN
    let mut builder = RegistryBuilder::new();
    for rule in fixtures::booking_rules() {
        builder.add_rule(rule).unwrap();
    }

    // WHEN
    let result = builder.add_rule(RuleDef::new(fixtures::PASSENGER_COUNT));

    // THEN
    assert!(matches!(result, Err(RegistryError::DuplicateRuleName(_))));
}

#[test]
fn test_unbacked_rule_fails_wiring_at_startup() {
    // GIVEN - a cataloged rule nobody implements
    let mut builder = RegistryBuilder::new();
    builder
        .add_rule(RuleDef::new("quantum_parity").with_message("parity is off"))
        .unwrap();
    builder
        .add_type("Qubit")
        .field(FieldDef::new("spin").constraint(Constraint::rule("quantum_parity")))
        .done()
        .unwrap();
    let registry = builder.build().unwrap();

    // WHEN
    let result = ConstraintChecker::new(&registry, Validators::builtin(), HookSet::new());

    // THEN
    let error = match result {
        Err(error) => error,
        Ok(_) => panic!("expected wiring failure"),
    };
    assert!(matches!(
        error,
        WiringError::MissingValidator { rule } if rule == "quantum_parity"
    ));
}

#[test]
fn test_missing_hook_fails_wiring_at_startup() {
    // GIVEN - a hook designation with nothing registered behind it
    let registry = fixtures::booking_registry();

    // WHEN
    let result =
        ConstraintChecker::new(&registry, fixtures::booking_validators(), HookSet::new());

    // THEN
    assert!(matches!(result, Err(WiringError::MissingHook { .. })));
}

#[test]
fn test_element_constraints_are_reported_when_declared() {
    // GIVEN - two otherwise-identical types, one declaring element
    // constraints and one not
    let mut builder = RegistryBuilder::new();
    builder
        .add_type("TaggedBatch")
        .field(FieldDef::new("codes").element_constraint(Constraint::uuid()))
        .done()
        .unwrap();
    builder
        .add_type("PlainBatch")
        .field(FieldDef::new("codes"))
        .done()
        .unwrap();
    let registry = builder.build().unwrap();

    // WHEN
    let tagged = registry.get_type_id("TaggedBatch").unwrap();
    let plain = registry.get_type_id("PlainBatch").unwrap();
    let site = Site::Element("codes".into());

    // THEN - introspection reports exactly what each declaration carries
    assert_eq!(registry.constraints_for_site(tagged, &site).len(), 1);
    assert_eq!(registry.constraints_for_site(plain, &site).len(), 0);
}

#[test]
fn test_element_constraints_validate_each_element() {
    // GIVEN
    let mut builder = RegistryBuilder::new();
    builder
        .add_type("TaggedBatch")
        .field(FieldDef::new("codes").element_constraint(Constraint::uuid()))
        .done()
        .unwrap();
    let registry = builder.build().unwrap();
    let checker =
        ConstraintChecker::new(&registry, Validators::builtin(), HookSet::new()).unwrap();

    let batch = fields! {
        "codes" => Value::List(vec![
            Value::from("123e4567-e89b-12d3-a456-426614174000"),
            Value::from("not-a-uuid"),
            Value::from("123e4567-e89b-12d3-a456-426614174001"),
        ]),
    };

    // WHEN
    let violations = checker.validate("TaggedBatch", &batch).unwrap();

    // THEN - only the offending element is reported, by position
    assert_eq!(violations.paths(), vec!["TaggedBatch.codes[1]"]);
}

#[test]
fn test_method_designating_rules_cannot_repeat_on_one_site() {
    // GIVEN
    let mut builder = RegistryBuilder::new();
    builder
        .add_type("Car")
        .field(FieldDef::new("year"))
        .method(
            MethodDef::new("validate_year")
                .hook(Constraint::post_construct_validation(["year"]))
                .hook(Constraint::post_construct_validation(["year"])),
        )
        .done()
        .unwrap();

    // WHEN
    let result = builder.build();

    // THEN
    assert!(matches!(result, Err(RegistryError::RepeatedConstraint { .. })));
}
