//! Integration tests for the create/edit/delete flow through the controller.

use std::time::{Duration, Instant};

use trackpin::location::ConfiguredLocation;
use trackpin::storage::kv::{KeyValueStore, MemoryKvStore};
use trackpin::storage::persistence::{WorkoutPersistence, DEFAULT_KEY};
use trackpin::ui::controller::{ControllerSettings, SubmitOutcome, TrackerError, WorkoutController};
use trackpin::ui::form::FormMode;
use trackpin::workouts::{
    Coords, ElevationPolicy, Field, ValidationError, WorkoutDetails, WorkoutId, WorkoutKind,
};

use crate::map_mock::RecordingMap;

type TestController = WorkoutController<RecordingMap, MemoryKvStore>;

const HOME: Coords = Coords {
    lat: 51.5,
    lng: -0.12,
};

fn controller_with(kv: MemoryKvStore, settings: ControllerSettings) -> TestController {
    WorkoutController::new(
        RecordingMap::default(),
        WorkoutPersistence::with_default_key(kv),
        settings,
    )
}

fn started() -> TestController {
    let mut controller = controller_with(MemoryKvStore::new(), ControllerSettings::default());
    controller
        .start(&ConfiguredLocation::new(Some(HOME)))
        .unwrap();
    controller
}

fn fill(
    controller: &mut TestController,
    kind: WorkoutKind,
    distance: &str,
    duration: &str,
    variant: &str,
) {
    controller.toggle_kind(kind);
    let raw = &mut controller.form_mut().raw;
    raw.distance = distance.to_string();
    raw.duration = duration.to_string();
    match kind {
        WorkoutKind::Running => raw.cadence = variant.to_string(),
        WorkoutKind::Cycling => raw.elevation = variant.to_string(),
    }
}

fn create(
    controller: &mut TestController,
    coords: Coords,
    kind: WorkoutKind,
    values: (&str, &str, &str),
) -> WorkoutId {
    controller.handle_map_click(coords);
    fill(controller, kind, values.0, values.1, values.2);
    match controller.submit(Instant::now()).unwrap() {
        SubmitOutcome::Created(id) => id,
        other => panic!("expected a new workout, got {:?}", other),
    }
}

fn persisted_ids(controller: &TestController) -> Vec<WorkoutId> {
    controller
        .persistence()
        .load()
        .into_iter()
        .map(|w| w.id)
        .collect()
}

#[test]
fn test_start_centers_map() {
    let controller = started();

    assert!(controller.is_map_ready());
    let (center, zoom, pan) = controller.map().views[0];
    assert_eq!(center, HOME);
    assert_eq!(zoom, 13);
    assert!(!pan.animate);
}

#[test]
fn test_create_running_workout() {
    let mut controller = started();
    let coords = Coords::new(10.0, 20.0);

    let id = create(
        &mut controller,
        coords,
        WorkoutKind::Running,
        ("5", "25", "150"),
    );

    let entry = controller.store().find_by_id(&id).unwrap();
    assert_eq!(entry.workout.coords, coords);
    assert_eq!(
        entry.workout.details,
        WorkoutDetails::Running {
            cadence: 150.0,
            pace: 5.0
        }
    );

    // Marker placed at the click with the description as popup
    let marker = entry.marker.unwrap();
    let pin = &controller.map().pins[0];
    assert_eq!(pin.handle, marker);
    assert_eq!(pin.coords, coords);
    assert_eq!(pin.popup.content, entry.workout.description);

    // Listed, form closed and cleared, snapshot written
    assert_eq!(controller.list().items()[0].id, id);
    assert!(!controller.form().is_visible());
    assert!(controller.form().raw.distance.is_empty());
    assert_eq!(persisted_ids(&controller), vec![id]);
}

#[test]
fn test_invalid_cycling_rejected() {
    let mut controller = started();

    controller.handle_map_click(Coords::new(10.0, 20.0));
    fill(&mut controller, WorkoutKind::Cycling, "0", "60", "100");
    let err = controller.submit(Instant::now()).unwrap_err();

    assert!(matches!(
        err,
        TrackerError::Validation(ValidationError::NotPositive {
            field: Field::Distance
        })
    ));
    assert!(controller.store().is_empty());
    assert!(controller.map().pins.is_empty());
    assert!(controller.form().is_visible());
    assert_eq!(controller.form().raw.distance, "0");
    assert_eq!(
        controller.persistence().kv().get(DEFAULT_KEY).unwrap(),
        None
    );
}

#[test]
fn test_overflowing_pace_rejected() {
    let mut controller = started();

    controller.handle_map_click(Coords::new(10.0, 20.0));
    fill(&mut controller, WorkoutKind::Running, "1e-320", "25", "150");
    let err = controller.submit(Instant::now()).unwrap_err();

    assert!(matches!(
        err,
        TrackerError::Validation(ValidationError::MetricOutOfRange {
            kind: WorkoutKind::Running
        })
    ));
    assert!(controller.store().is_empty());
    assert!(controller.form().is_visible());
    assert_eq!(
        controller.persistence().kv().get(DEFAULT_KEY).unwrap(),
        None
    );
}

#[test]
fn test_accepted_workouts_reload() {
    let mut controller = started();
    let tiny = create(
        &mut controller,
        Coords::new(10.0, 20.0),
        WorkoutKind::Running,
        ("1e-3", "1e-3", "150"),
    );
    let fast = create(
        &mut controller,
        Coords::new(11.0, 21.0),
        WorkoutKind::Cycling,
        ("1e6", "1", "0"),
    );

    assert_eq!(persisted_ids(&controller), vec![tiny, fast]);
}

#[test]
fn test_negative_elevation_follows_policy() {
    let mut controller = started();
    controller.handle_map_click(Coords::new(1.0, 1.0));
    fill(&mut controller, WorkoutKind::Cycling, "20", "60", "-40");
    assert!(controller.submit(Instant::now()).is_err());

    let settings = ControllerSettings {
        elevation_policy: ElevationPolicy::Any,
        ..Default::default()
    };
    let mut lenient = controller_with(MemoryKvStore::new(), settings);
    lenient
        .start(&ConfiguredLocation::new(Some(HOME)))
        .unwrap();
    let id = create(
        &mut lenient,
        Coords::new(1.0, 1.0),
        WorkoutKind::Cycling,
        ("20", "60", "-40"),
    );
    assert_eq!(
        lenient.store().find_by_id(&id).unwrap().workout.details,
        WorkoutDetails::Cycling {
            elevation_gain: -40.0,
            speed: 20.0
        }
    );
}

#[test]
fn test_submit_without_location() {
    let mut controller = started();
    fill(&mut controller, WorkoutKind::Running, "5", "25", "150");

    let err = controller.submit(Instant::now()).unwrap_err();
    assert!(matches!(err, TrackerError::NoLocation));
}

#[test]
fn test_delete_keeps_other_marker() {
    let mut controller = started();
    let first = create(
        &mut controller,
        Coords::new(10.0, 20.0),
        WorkoutKind::Running,
        ("5", "25", "150"),
    );
    let second = create(
        &mut controller,
        Coords::new(11.0, 21.0),
        WorkoutKind::Cycling,
        ("27", "95", "523"),
    );
    let first_marker = controller.store().find_by_id(&first).unwrap().marker.unwrap();

    assert!(controller.delete(&first).unwrap());

    assert_eq!(controller.store().len(), 1);
    assert!(controller.store().find_by_id(&first).is_none());
    assert_eq!(controller.map().removed, vec![first_marker]);

    let remaining = controller.store().find_by_id(&second).unwrap();
    assert!(controller.map().has_pin(remaining.marker.unwrap()));
    assert!(controller.list().get(&first).is_none());
    assert_eq!(persisted_ids(&controller), vec![second]);
}

#[test]
fn test_delete_unknown_id() {
    let mut controller = started();
    assert!(!controller.delete(&WorkoutId::from("missing")).unwrap());
}

#[test]
fn test_edit_recomputes_pace() {
    let mut controller = started();
    let coords = Coords::new(10.0, 20.0);
    let id = create(
        &mut controller,
        coords,
        WorkoutKind::Running,
        ("5", "25", "150"),
    );
    let description = controller.store().find_by_id(&id).unwrap().workout.description.clone();

    controller.begin_edit(&id).unwrap();
    assert_eq!(controller.form().mode(), &FormMode::Edit { id: id.clone() });
    assert_eq!(controller.form().raw.distance, "5");
    assert!(!controller.toggle_kind(WorkoutKind::Cycling));

    controller.form_mut().raw.distance = "10".to_string();
    let outcome = controller.submit(Instant::now()).unwrap();
    assert_eq!(outcome, SubmitOutcome::Updated(id.clone()));

    let workout = &controller.store().find_by_id(&id).unwrap().workout;
    assert_eq!(workout.coords, coords);
    assert_eq!(workout.details.metric(), 2.5);
    assert_eq!(workout.description, description);

    assert_eq!(controller.store().len(), 1);
    assert_eq!(controller.map().pins.len(), 1);
    assert_eq!(controller.form().mode(), &FormMode::Create);
    assert_eq!(controller.list().get(&id).unwrap().details[2].value, "2.50");

    let saved = controller.persistence().load();
    assert_eq!(saved[0].distance_km, 10.0);
}

#[test]
fn test_invalid_edit_keeps_record() {
    let mut controller = started();
    let id = create(
        &mut controller,
        Coords::new(10.0, 20.0),
        WorkoutKind::Running,
        ("5", "25", "150"),
    );

    controller.begin_edit(&id).unwrap();
    controller.form_mut().raw.duration = "-3".to_string();
    assert!(controller.submit(Instant::now()).is_err());

    assert!(controller.form().is_editing());
    assert_eq!(
        controller.store().find_by_id(&id).unwrap().workout.duration_min,
        25.0
    );
}

#[test]
fn test_deleting_edited_workout_ends_edit() {
    let mut controller = started();
    let id = create(
        &mut controller,
        Coords::new(10.0, 20.0),
        WorkoutKind::Running,
        ("5", "25", "150"),
    );

    controller.begin_edit(&id).unwrap();
    controller.delete(&id).unwrap();

    assert_eq!(controller.form().mode(), &FormMode::Create);
}

#[test]
fn test_map_click_abandons_edit() {
    let mut controller = started();
    let id = create(
        &mut controller,
        Coords::new(10.0, 20.0),
        WorkoutKind::Running,
        ("5", "25", "150"),
    );

    controller.begin_edit(&id).unwrap();
    controller.handle_map_click(Coords::new(12.0, 22.0));

    assert_eq!(controller.form().mode(), &FormMode::Create);
    assert_eq!(controller.form().pending_coords(), Some(Coords::new(12.0, 22.0)));
}

#[test]
fn test_form_display_delay_after_submit() {
    let mut controller = started();
    let now = Instant::now();

    controller.handle_map_click(Coords::new(10.0, 20.0));
    fill(&mut controller, WorkoutKind::Running, "5", "25", "150");
    controller.submit(now).unwrap();

    controller.handle_map_click(Coords::new(10.5, 20.5));
    assert!(!controller.form().is_displayed());

    controller.tick(now + Duration::from_millis(1000));
    assert!(controller.form().is_displayed());
}

#[test]
fn test_geolocation_failure() {
    let mut controller = controller_with(MemoryKvStore::new(), ControllerSettings::default());

    let err = controller.start(&ConfiguredLocation::new(None)).unwrap_err();
    assert!(matches!(err, TrackerError::Geolocation(_)));
    assert!(!controller.is_map_ready());
    assert!(controller.map().views.is_empty());

    controller.handle_map_click(Coords::new(10.0, 20.0));
    assert!(!controller.form().is_visible());
}

#[test]
fn test_reload_renders_saved_workouts() {
    let mut first_session = started();
    let a = create(
        &mut first_session,
        Coords::new(10.0, 20.0),
        WorkoutKind::Running,
        ("5", "25", "150"),
    );
    let b = create(
        &mut first_session,
        Coords::new(11.0, 21.0),
        WorkoutKind::Cycling,
        ("27", "95", "523"),
    );
    let snapshot = first_session
        .persistence()
        .kv()
        .get(DEFAULT_KEY)
        .unwrap()
        .unwrap();

    let kv = MemoryKvStore::with_value(DEFAULT_KEY, &snapshot);
    let mut controller = controller_with(kv, ControllerSettings::default());
    controller
        .start(&ConfiguredLocation::new(Some(HOME)))
        .unwrap();

    assert_eq!(controller.store().len(), 2);
    assert_eq!(controller.map().pins.len(), 2);
    assert!(controller.store().entries().iter().all(|e| e.marker.is_some()));
    assert_eq!(controller.list().items()[0].id, b);
    assert_eq!(controller.list().items()[1].id, a);

    // Edits after a reload still recompute
    controller.begin_edit(&a).unwrap();
    controller.form_mut().raw.distance = "10".to_string();
    controller.submit(Instant::now()).unwrap();
    assert_eq!(
        controller.store().find_by_id(&a).unwrap().workout.details.metric(),
        2.5
    );
}

#[test]
fn test_list_shown_without_location() {
    let mut first_session = started();
    create(
        &mut first_session,
        Coords::new(10.0, 20.0),
        WorkoutKind::Running,
        ("5", "25", "150"),
    );
    let snapshot = first_session
        .persistence()
        .kv()
        .get(DEFAULT_KEY)
        .unwrap()
        .unwrap();

    let kv = MemoryKvStore::with_value(DEFAULT_KEY, &snapshot);
    let mut controller = controller_with(kv, ControllerSettings::default());
    assert!(controller.start(&ConfiguredLocation::new(None)).is_err());

    assert_eq!(controller.list().items().len(), 1);
    assert!(controller.map().pins.is_empty());
}

#[test]
fn test_move_to_pans_to_workout() {
    let mut controller = started();
    let coords = Coords::new(10.0, 20.0);
    let id = create(
        &mut controller,
        coords,
        WorkoutKind::Running,
        ("5", "25", "150"),
    );

    assert!(controller.move_to(&id));
    let (center, zoom, pan) = *controller.map().views.last().unwrap();
    assert_eq!(center, coords);
    assert_eq!(zoom, 13);
    assert!(pan.animate);
    assert_eq!(pan.duration_secs, 1.0);

    assert!(!controller.move_to(&WorkoutId::from("missing")));
}

#[test]
fn test_single_open_menu() {
    let mut controller = started();
    let a = create(
        &mut controller,
        Coords::new(10.0, 20.0),
        WorkoutKind::Running,
        ("5", "25", "150"),
    );
    let b = create(
        &mut controller,
        Coords::new(11.0, 21.0),
        WorkoutKind::Running,
        ("3", "20", "160"),
    );

    controller.open_menu(&a);
    controller.open_menu(&b);
    assert_eq!(controller.list().open_menu_id(), Some(&b));

    controller.handle_map_click(Coords::new(0.0, 0.0));
    assert_eq!(controller.list().open_menu_id(), None);
}

#[test]
fn test_reset_all() {
    let mut controller = started();
    for i in 0..3 {
        create(
            &mut controller,
            Coords::new(10.0 + i as f64, 20.0),
            WorkoutKind::Running,
            ("5", "25", "150"),
        );
    }

    controller.reset_all().unwrap();

    assert!(controller.store().is_empty());
    assert!(controller.list().items().is_empty());
    assert!(controller.map().pins.is_empty());
    assert_eq!(controller.map().removed.len(), 3);
    assert_eq!(
        controller.persistence().kv().get(DEFAULT_KEY).unwrap(),
        None
    );
}
