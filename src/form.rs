use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, WorkoutError};
use crate::types::locale::Locale;
use crate::types::workout::{Coordinates, Workout, WorkoutKind, WorkoutSpec};

/// Form fields exactly as typed by the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawWorkoutInput {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub distance: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub cadence: String,
    #[serde(default)]
    pub elevation: String,
}

pub struct FormController {
    locale: Locale,
    target: Option<Coordinates>,
    selected_kind: WorkoutKind,
}

impl FormController {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            target: None,
            selected_kind: WorkoutKind::Running,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// A map click remembers where the next workout goes and opens the form.
    pub fn open_at(&mut self, coordinates: Coordinates) {
        self.target = Some(coordinates);
    }

    pub fn close(&mut self) {
        self.target = None;
    }

    pub fn target(&self) -> Option<Coordinates> {
        self.target
    }

    pub fn is_visible(&self) -> bool {
        self.target.is_some()
    }

    pub fn select_kind(&mut self, kind: WorkoutKind) {
        self.selected_kind = kind;
    }

    pub fn selected_kind(&self) -> WorkoutKind {
        self.selected_kind
    }

    pub fn submit(
        &self,
        raw: &RawWorkoutInput,
        coordinates: Coordinates,
    ) -> Result<Workout, WorkoutError> {
        self.submit_at(raw, coordinates, Utc::now())
    }

    pub fn submit_at(
        &self,
        raw: &RawWorkoutInput,
        coordinates: Coordinates,
        now: DateTime<Utc>,
    ) -> Result<Workout, WorkoutError> {
        let spec = parse_spec(raw)?;
        Workout::new(spec, coordinates, now, self.locale)
    }
}

pub fn parse_spec(raw: &RawWorkoutInput) -> Result<WorkoutSpec, ValidationError> {
    let kind = WorkoutKind::from_str(&raw.kind)
        .ok_or_else(|| ValidationError::UnknownKind(raw.kind.clone()))?;

    let distance_km = parse_number(&raw.distance);
    let duration_min = parse_number(&raw.duration);

    let spec = match kind {
        WorkoutKind::Running => WorkoutSpec::Running {
            distance_km,
            duration_min,
            cadence_steps_per_min: parse_number(&raw.cadence),
        },
        WorkoutKind::Cycling => WorkoutSpec::Cycling {
            distance_km,
            duration_min,
            elevation_gain_m: parse_number(&raw.elevation),
        },
    };
    spec.validate()?;
    Ok(spec)
}

/// Numeric coercion of a text field: blank reads as zero, garbage as NaN.
pub fn parse_number(field: &str) -> f64 {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse().unwrap_or(f64::NAN)
}
