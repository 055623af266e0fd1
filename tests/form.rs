mod common;

use common::{at, base_time};
use workout_map::error::{ValidationError, WorkoutError};
use workout_map::form::{parse_number, parse_spec, FormController, RawWorkoutInput};
use workout_map::types::locale::Locale;
use workout_map::types::workout::{WorkoutKind, WorkoutSpec};

fn input(kind: &str, distance: &str, duration: &str, cadence: &str, elevation: &str) -> RawWorkoutInput {
    RawWorkoutInput {
        kind: kind.to_string(),
        distance: distance.to_string(),
        duration: duration.to_string(),
        cadence: cadence.to_string(),
        elevation: elevation.to_string(),
    }
}

#[test]
fn numbers_are_coerced_like_form_fields() {
    assert_eq!(parse_number(" 12.5 "), 12.5);
    assert_eq!(parse_number(""), 0.0);
    assert_eq!(parse_number("   "), 0.0);
    assert_eq!(parse_number("-3"), -3.0);
    assert!(parse_number("abc").is_nan());
    assert!(!parse_number("inf").is_finite());
}

#[test]
fn running_form_requires_all_three_positive() {
    let spec = parse_spec(&input("running", "5", "25", "170", "")).expect("valid");
    assert_eq!(
        spec,
        WorkoutSpec::Running {
            distance_km: 5.0,
            duration_min: 25.0,
            cadence_steps_per_min: 170.0
        }
    );

    assert_eq!(
        parse_spec(&input("running", "5", "25", "", "")),
        Err(ValidationError::NotPositive("cadence"))
    );
    assert_eq!(
        parse_spec(&input("running", "5", "x", "170", "")),
        Err(ValidationError::NotFinite("duration"))
    );
}

#[test]
fn cycling_form_accepts_zero_or_negative_elevation() {
    assert!(parse_spec(&input("cycling", "20", "60", "", "-5")).is_ok());
    assert!(parse_spec(&input("cycling", "20", "60", "", "")).is_ok());
    assert_eq!(
        parse_spec(&input("cycling", "20", "60", "", "steep")),
        Err(ValidationError::NotFinite("elevation"))
    );
}

#[test]
fn unknown_kind_is_a_validation_error() {
    assert_eq!(
        parse_spec(&input("swimming", "1", "30", "", "")),
        Err(ValidationError::UnknownKind("swimming".to_string()))
    );
}

#[test]
fn controller_tracks_target_and_selected_kind() {
    let mut form = FormController::new(Locale::Ru);
    assert!(!form.is_visible());
    assert_eq!(form.selected_kind(), WorkoutKind::Running);

    form.open_at(at(50.45, 30.52));
    assert!(form.is_visible());
    assert_eq!(form.target(), Some(at(50.45, 30.52)));

    form.select_kind(WorkoutKind::Cycling);
    assert_eq!(form.selected_kind(), WorkoutKind::Cycling);

    form.close();
    assert!(!form.is_visible());
}

#[test]
fn submit_builds_the_requested_variant() {
    let form = FormController::new(Locale::En);
    let workout = form
        .submit_at(&input("cycling", "20", "60", "", "-5"), at(50.45, 30.52), base_time())
        .expect("valid cycling");

    assert_eq!(workout.kind(), WorkoutKind::Cycling);
    assert!((workout.derived_metric() - 20.0 / 60.0 / 60.0).abs() < 1e-12);
    assert!(workout.description().starts_with("Cycling"));
    assert_eq!(workout.created_at(), base_time());
}

#[test]
fn submit_reports_invalid_input() {
    let form = FormController::new(Locale::Ru);
    let err = form
        .submit(&input("running", "5", "0", "170", ""), at(50.45, 30.52))
        .unwrap_err();
    assert_eq!(
        err,
        WorkoutError::InvalidInput(ValidationError::NotPositive("duration"))
    );
}
