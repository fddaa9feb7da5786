//! Instance-method hook scenarios.

use veto_constraint::{ConstraintChecker, Validators};
use veto_core::{fields, Value};
use veto_hook::{HookResult, HookSet};
use veto_registry::{Constraint, FieldDef, MethodDef, RegistryBuilder};
use veto_tests::fixtures;

#[test]
fn test_method_validation_attributes_failure_to_fields() {
    // GIVEN - more passengers than seats
    let registry = fixtures::booking_registry();
    let checker = ConstraintChecker::new(
        &registry,
        fixtures::booking_validators(),
        fixtures::booking_hooks(),
    )
    .unwrap();
    let mut car = fixtures::valid_car();
    car.insert("passenger_count".to_string(), Value::from(4i64));
    car.insert("seats".to_string(), Value::from(2i64));

    // WHEN
    let violations = checker.validate("Car", &car).unwrap();

    // THEN - one violation per attributed field, carrying its value
    assert_eq!(
        violations.paths(),
        vec!["Car.passenger_count", "Car.seats"]
    );
    for violation in &violations {
        assert_eq!(violation.message, "4 passenger(s) exceed 2 seat(s)");
        assert_eq!(violation.rule, "method_validation");
    }
    assert_eq!(violations.all()[0].invalid_value, Some(Value::from(4i64)));
    assert_eq!(violations.all()[1].invalid_value, Some(Value::from(2i64)));
}

#[test]
fn test_hooks_run_only_after_structural_checks_pass() {
    // GIVEN - a structural violation and a failing hook at once
    let registry = fixtures::booking_registry();
    let checker = ConstraintChecker::new(
        &registry,
        fixtures::booking_validators(),
        fixtures::booking_hooks(),
    )
    .unwrap();
    let mut car = fixtures::valid_car();
    car.insert("id".to_string(), Value::from("not-a-uuid"));
    car.insert("seats".to_string(), Value::from(0i64));

    // WHEN
    let violations = checker.validate("Car", &car).unwrap();

    // THEN - only the structural violation is reported
    assert_eq!(violations.len(), 1);
    assert_eq!(violations.all()[0].rule, "uuid");
}

#[test]
fn test_post_construct_hook_runs_only_in_construction_pass() {
    // GIVEN - a year no car could carry
    let registry = fixtures::booking_registry();
    let checker = ConstraintChecker::new(
        &registry,
        fixtures::booking_validators(),
        fixtures::booking_hooks(),
    )
    .unwrap();
    let mut car = fixtures::valid_car();
    car.insert("year".to_string(), Value::from(1492i64));

    // WHEN
    let ordinary_pass = checker.validate("Car", &car).unwrap();
    let construction_pass = checker.validate_constructed("Car", &car).unwrap();

    // THEN
    assert!(ordinary_pass.is_empty());
    assert_eq!(construction_pass.paths(), vec!["Car.year"]);
    assert_eq!(
        construction_pass.messages(),
        vec!["year predates the automobile"]
    );
}

#[test]
fn test_method_validation_hook_skipped_in_construction_pass() {
    // GIVEN - capacity exceeded, year fine
    let registry = fixtures::booking_registry();
    let checker = ConstraintChecker::new(
        &registry,
        fixtures::booking_validators(),
        fixtures::booking_hooks(),
    )
    .unwrap();
    let mut car = fixtures::valid_car();
    car.insert("seats".to_string(), Value::from(1i64));

    // WHEN
    let construction_pass = checker.validate_constructed("Car", &car).unwrap();
    let ordinary_pass = checker.validate("Car", &car).unwrap();

    // THEN
    assert!(construction_pass.is_empty());
    assert_eq!(ordinary_pass.len(), 2);
}

#[test]
fn test_hook_payload_flows_into_report() {
    // GIVEN - a hook that reports a payload tag
    let mut builder = RegistryBuilder::new();
    builder
        .add_type("Ledger")
        .field(FieldDef::new("balance"))
        .method(
            MethodDef::new("check_balance")
                .hook(Constraint::method_validation(["balance"]).payload("finance")),
        )
        .done()
        .unwrap();
    let registry = builder.build().unwrap();

    let mut hooks = HookSet::new();
    hooks.register("Ledger", "check_balance", |instance| {
        let balance = instance.get("balance").and_then(Value::as_int).unwrap_or(0);
        if balance < 0 {
            HookResult::invalid_with_payload("balance is negative", "overdraft")
        } else {
            HookResult::Valid
        }
    });

    let checker = ConstraintChecker::new(&registry, Validators::builtin(), hooks).unwrap();

    // WHEN
    let violations = checker
        .validate("Ledger", &fields! { "balance" => -20i64 })
        .unwrap();

    // THEN - declared payload tags and the hook's tag are both in effect
    assert_eq!(violations.len(), 1);
    assert_eq!(
        violations.all()[0].payload,
        vec!["finance".to_string(), "overdraft".to_string()]
    );
}

#[test]
fn test_hook_without_fields_reports_at_method_path() {
    // GIVEN
    let mut builder = RegistryBuilder::new();
    let no_fields: [&str; 0] = [];
    builder
        .add_type("Ledger")
        .field(FieldDef::new("balance"))
        .method(
            MethodDef::new("check_balance")
                .hook(Constraint::method_validation(no_fields)),
        )
        .done()
        .unwrap();
    let registry = builder.build().unwrap();

    let mut hooks = HookSet::new();
    hooks.register("Ledger", "check_balance", |_| {
        HookResult::invalid("books do not balance")
    });

    let checker = ConstraintChecker::new(&registry, Validators::builtin(), hooks).unwrap();

    // WHEN
    let violations = checker
        .validate("Ledger", &fields! { "balance" => 1i64 })
        .unwrap();

    // THEN
    assert_eq!(violations.paths(), vec!["Ledger.check_balance"]);
}
