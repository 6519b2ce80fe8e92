//! Unit tests for form input coercion and validation.

use trackpin::workouts::{
    coerce_number, ElevationPolicy, Field, KindInput, RawInput, ValidationError, WorkoutKind,
};

fn raw(kind: WorkoutKind, distance: &str, duration: &str, variant: &str) -> RawInput {
    let mut raw = RawInput {
        kind,
        distance: distance.to_string(),
        duration: duration.to_string(),
        ..Default::default()
    };
    match kind {
        WorkoutKind::Running => raw.cadence = variant.to_string(),
        WorkoutKind::Cycling => raw.elevation = variant.to_string(),
    }
    raw
}

#[test]
fn test_coerce_number() {
    assert_eq!(coerce_number("5"), 5.0);
    assert_eq!(coerce_number(" 2.5 "), 2.5);
    assert_eq!(coerce_number(""), 0.0);
    assert_eq!(coerce_number("   "), 0.0);
    assert!(coerce_number("abc").is_nan());
}

#[test]
fn test_valid_run() {
    let fields = raw(WorkoutKind::Running, "5", "25", "150")
        .parse(ElevationPolicy::default())
        .unwrap();

    assert_eq!(fields.distance_km, 5.0);
    assert_eq!(fields.duration_min, 25.0);
    assert_eq!(fields.input, KindInput::Running { cadence: 150.0 });
}

#[test]
fn test_zero_distance_rejected() {
    let err = raw(WorkoutKind::Cycling, "0", "60", "100")
        .parse(ElevationPolicy::default())
        .unwrap_err();

    assert_eq!(
        err,
        ValidationError::NotPositive {
            field: Field::Distance
        }
    );
}

#[test]
fn test_non_numeric_reported_before_range() {
    let err = raw(WorkoutKind::Running, "-1", "abc", "150")
        .parse(ElevationPolicy::default())
        .unwrap_err();

    assert_eq!(
        err,
        ValidationError::NotANumber {
            field: Field::Duration
        }
    );
}

#[test]
fn test_empty_cadence_rejected() {
    let err = raw(WorkoutKind::Running, "5", "25", "")
        .parse(ElevationPolicy::default())
        .unwrap_err();

    assert_eq!(
        err,
        ValidationError::NotPositive {
            field: Field::Cadence
        }
    );
}

#[test]
fn test_hidden_field_ignored() {
    let mut input = raw(WorkoutKind::Cycling, "20", "60", "300");
    input.cadence = "not a number".to_string();

    let fields = input.parse(ElevationPolicy::default()).unwrap();
    assert_eq!(
        fields.input,
        KindInput::Cycling {
            elevation_gain: 300.0
        }
    );
}

#[test]
fn test_elevation_policies() {
    let descent = raw(WorkoutKind::Cycling, "20", "60", "-50");
    let flat = raw(WorkoutKind::Cycling, "20", "60", "0");

    assert!(descent.parse(ElevationPolicy::Any).is_ok());
    assert_eq!(
        descent.parse(ElevationPolicy::NonNegative),
        Err(ValidationError::ElevationOutOfRange {
            policy: ElevationPolicy::NonNegative
        })
    );

    assert!(flat.parse(ElevationPolicy::NonNegative).is_ok());
    assert_eq!(
        flat.parse(ElevationPolicy::Positive),
        Err(ValidationError::ElevationOutOfRange {
            policy: ElevationPolicy::Positive
        })
    );
}

#[test]
fn test_validation_messages() {
    let err = ValidationError::NotPositive {
        field: Field::Distance,
    };
    assert_eq!(err.to_string(), "Distance must be greater than zero");

    let err = ValidationError::ElevationOutOfRange {
        policy: ElevationPolicy::NonNegative,
    };
    assert_eq!(err.to_string(), "Elevation gain must be zero or more");
}
