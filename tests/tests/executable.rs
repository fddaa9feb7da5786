//! Method parameter and return-value scenarios.

use veto_constraint::{ConstraintChecker, ConstraintError, Validators};
use veto_core::Value;
use veto_hook::HookSet;
use veto_registry::{Constraint, MethodDef, RegistryBuilder};
use veto_tests::fixtures;

fn booking_checker(
    registry: &veto_registry::Registry,
) -> ConstraintChecker<'_> {
    ConstraintChecker::new(
        registry,
        fixtures::booking_validators(),
        fixtures::booking_hooks(),
    )
    .unwrap()
}

#[test]
fn test_cross_parameter_rule_accepts_ordered_dates() {
    // GIVEN
    let registry = fixtures::booking_registry();
    let checker = booking_checker(&registry);

    // WHEN - start strictly before end
    let violations = checker
        .validate_parameters(
            "Car",
            "reserve",
            &[Value::Timestamp(1_000), Value::Timestamp(2_000)],
        )
        .unwrap();

    // THEN
    assert!(violations.is_empty());
}

#[test]
fn test_cross_parameter_rule_rejects_reversed_dates() {
    // GIVEN
    let registry = fixtures::booking_registry();
    let checker = booking_checker(&registry);

    // WHEN - start at or after end
    let reversed = checker
        .validate_parameters(
            "Car",
            "reserve",
            &[Value::Timestamp(2_000), Value::Timestamp(1_000)],
        )
        .unwrap();
    let equal = checker
        .validate_parameters(
            "Car",
            "reserve",
            &[Value::Timestamp(1_000), Value::Timestamp(1_000)],
        )
        .unwrap();

    // THEN
    assert_eq!(reversed.paths(), vec!["Car.reserve"]);
    assert_eq!(reversed.messages(), vec!["start is not before end"]);
    assert_eq!(equal.len(), 1);
}

#[test]
fn test_cross_parameter_rule_rejects_unexpected_signature() {
    // GIVEN
    let registry = fixtures::booking_registry();
    let checker = booking_checker(&registry);

    // WHEN - second argument is not a timestamp
    let result = checker.validate_parameters(
        "Car",
        "reserve",
        &[Value::Timestamp(1_000), Value::from("tomorrow")],
    );

    // THEN
    assert!(matches!(
        result,
        Err(ConstraintError::InvalidArguments { .. })
    ));
}

#[test]
fn test_arity_mismatch_is_an_error() {
    // GIVEN
    let registry = fixtures::booking_registry();
    let checker = booking_checker(&registry);

    // WHEN
    let result = checker.validate_parameters("Car", "reserve", &[Value::Timestamp(1_000)]);

    // THEN
    assert!(matches!(result, Err(ConstraintError::ArityMismatch { .. })));
}

#[test]
fn test_unknown_method_is_an_error() {
    // GIVEN
    let registry = fixtures::booking_registry();
    let checker = booking_checker(&registry);

    // WHEN
    let result = checker.validate_parameters("Car", "launch", &[]);

    // THEN
    assert!(matches!(result, Err(ConstraintError::UnknownMethod { .. })));
}

#[test]
fn test_return_value_bound_is_inclusive() {
    // GIVEN
    let registry = fixtures::booking_registry();
    let checker = booking_checker(&registry);

    // THEN - 0..=4 accepted
    for count in 0..=4i64 {
        let violations = checker
            .validate_return_value("Car", "capacity", &Value::from(count))
            .unwrap();
        assert!(violations.is_empty(), "{} should pass", count);
    }

    // 5 and negatives rejected, at the return-value path
    for bad in [5i64, -3] {
        let violations = checker
            .validate_return_value("Car", "capacity", &Value::from(bad))
            .unwrap();
        assert_eq!(violations.paths(), vec!["Car.capacity.<return value>"]);
    }
}

#[test]
fn test_single_parameter_constraint_checks_matching_argument() {
    // GIVEN - a one_of constraint on the first parameter only
    let mut builder = RegistryBuilder::new();
    builder
        .add_type("Router")
        .method(
            MethodDef::new("forward")
                .param("protocol")
                .param("target")
                .param_constraint(0, Constraint::one_of(["tcp", "udp"])),
        )
        .done()
        .unwrap();
    let registry = builder.build().unwrap();
    let checker =
        ConstraintChecker::new(&registry, Validators::builtin(), HookSet::new()).unwrap();

    // WHEN
    let good = checker
        .validate_parameters(
            "Router",
            "forward",
            &[Value::from("tcp"), Value::from("10.0.0.1")],
        )
        .unwrap();
    let bad = checker
        .validate_parameters(
            "Router",
            "forward",
            &[Value::from("icmp"), Value::from("10.0.0.1")],
        )
        .unwrap();

    // THEN - the violation names the parameter, not the tuple
    assert!(good.is_empty());
    assert_eq!(bad.paths(), vec!["Router.forward.protocol"]);
}
