//! Unit tests for the workout model and metric derivation.

use chrono::{FixedOffset, TimeZone, Utc};
use trackpin::workouts::{
    derive_metrics, describe, describe_in, Coords, KindInput, ModelError, Workout, WorkoutDetails,
    WorkoutFields, WorkoutKind,
};

fn run_fields(distance_km: f64, duration_min: f64, cadence: f64) -> WorkoutFields {
    WorkoutFields {
        distance_km,
        duration_min,
        input: KindInput::Running { cadence },
    }
}

fn ride_fields(distance_km: f64, duration_min: f64, elevation_gain: f64) -> WorkoutFields {
    WorkoutFields {
        distance_km,
        duration_min,
        input: KindInput::Cycling { elevation_gain },
    }
}

#[test]
fn test_running_pace() {
    let date = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
    let derived = derive_metrics(&run_fields(5.0, 25.0, 150.0), date);

    assert_eq!(
        derived.details,
        WorkoutDetails::Running {
            cadence: 150.0,
            pace: 5.0
        }
    );
    assert_eq!(derived.description, describe(WorkoutKind::Running, date));
}

#[test]
fn test_cycling_speed() {
    let date = Utc.with_ymd_and_hms(2024, 11, 23, 17, 0, 0).unwrap();
    let derived = derive_metrics(&ride_fields(27.0, 95.0, 523.0), date);

    // 27 / (95 / 60) = 17.0526...
    assert_eq!(derived.details.metric(), 17.05);
    assert_eq!(derived.details.kind(), WorkoutKind::Cycling);
    assert_eq!(derived.description, describe(WorkoutKind::Cycling, date));
}

#[test]
fn test_metric_rounds_to_two_decimals() {
    let date = Utc::now();
    let derived = derive_metrics(&run_fields(3.0, 10.0, 170.0), date);

    // 10 / 3 = 3.333...
    assert_eq!(derived.details.metric(), 3.33);
}

#[test]
fn test_describe_single_digit_day() {
    let date = Utc.with_ymd_and_hms(2023, 1, 9, 12, 0, 0).unwrap();
    assert_eq!(
        describe_in(WorkoutKind::Running, date, &Utc),
        "running on January 9"
    );
}

#[test]
fn test_describe_evening_west_of_utc() {
    // 23:30 local on December 31 at UTC-5
    let date = Utc.with_ymd_and_hms(2024, 1, 1, 4, 30, 0).unwrap();
    let offset = FixedOffset::west_opt(5 * 3600).unwrap();

    assert_eq!(
        describe_in(WorkoutKind::Cycling, date, &offset),
        "cycling on December 31"
    );
}

#[test]
fn test_new_workouts_get_distinct_ids() {
    let coords = Coords::new(10.0, 20.0);
    let a = Workout::new(coords, run_fields(5.0, 25.0, 150.0));
    let b = Workout::new(coords, run_fields(5.0, 25.0, 150.0));

    assert_ne!(a.id, b.id);
    assert!(!a.id.as_str().is_empty());
}

#[test]
fn test_update_keeps_identity() {
    let date = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
    let original = Workout::with_date(Coords::new(10.0, 20.0), run_fields(5.0, 25.0, 150.0), date);

    let edited = original.updated(&run_fields(10.0, 25.0, 150.0)).unwrap();

    assert_eq!(edited.id, original.id);
    assert_eq!(edited.coords, original.coords);
    assert_eq!(edited.date, original.date);
    assert_eq!(edited.details.metric(), 2.5);
    assert_eq!(edited.description, original.description);
}

#[test]
fn test_update_rejects_kind_change() {
    let original = Workout::new(Coords::new(0.0, 0.0), run_fields(5.0, 25.0, 150.0));

    let result = original.updated(&ride_fields(20.0, 60.0, 100.0));
    assert_eq!(
        result,
        Err(ModelError::KindMismatch {
            expected: WorkoutKind::Running,
            found: WorkoutKind::Cycling,
        })
    );
}

#[test]
fn test_fields_round_trip_through_workout() {
    let fields = ride_fields(42.5, 120.0, 800.0);
    let workout = Workout::new(Coords::new(46.5, 11.3), fields);

    assert_eq!(workout.fields(), fields);
    assert_eq!(workout.kind(), WorkoutKind::Cycling);
}
