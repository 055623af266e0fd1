use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, WorkoutError};
use crate::types::locale::Locale;

const ID_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "running" => Some(WorkoutKind::Running),
            "cycling" => Some(WorkoutKind::Cycling),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "🏃",
            WorkoutKind::Cycling => "🚵‍♂️",
        }
    }
}

/// Latitude/longitude pair, stored on disk as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    lat: f64,
    lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Result<Self, WorkoutError> {
        let valid = lat.is_finite()
            && lng.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lng);
        if !valid {
            return Err(WorkoutError::InvalidCoordinates { lat, lng });
        }
        Ok(Self { lat, lng })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(c: Coordinates) -> Self {
        [c.lat, c.lng]
    }
}

/// Numeric payload of a workout before construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkoutSpec {
    Running {
        distance_km: f64,
        duration_min: f64,
        cadence_steps_per_min: f64,
    },
    Cycling {
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
    },
}

impl WorkoutSpec {
    pub fn kind(&self) -> WorkoutKind {
        match self {
            WorkoutSpec::Running { .. } => WorkoutKind::Running,
            WorkoutSpec::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    /// Every field must be finite. Running needs all three fields positive,
    /// cycling only distance and duration; elevation gain may be zero or negative.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let (fields, positive): ([(&'static str, f64); 3], usize) = match *self {
            WorkoutSpec::Running {
                distance_km,
                duration_min,
                cadence_steps_per_min,
            } => (
                [
                    ("distance", distance_km),
                    ("duration", duration_min),
                    ("cadence", cadence_steps_per_min),
                ],
                3,
            ),
            WorkoutSpec::Cycling {
                distance_km,
                duration_min,
                elevation_gain_m,
            } => (
                [
                    ("distance", distance_km),
                    ("duration", duration_min),
                    ("elevation", elevation_gain_m),
                ],
                2,
            ),
        };

        if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ValidationError::NotFinite(*name));
        }
        if let Some((name, _)) = fields[..positive].iter().find(|(_, v)| *v <= 0.0) {
            return Err(ValidationError::NotPositive(*name));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WorkoutDetails {
    #[serde(rename_all = "camelCase")]
    Running {
        cadence_steps_per_min: f64,
        pace_min_per_km: f64,
    },
    #[serde(rename_all = "camelCase")]
    Cycling {
        elevation_gain_m: f64,
        speed_km_per_h: f64,
    },
}

impl WorkoutDetails {
    fn derive(spec: &WorkoutSpec) -> Self {
        match *spec {
            WorkoutSpec::Running {
                distance_km,
                duration_min,
                cadence_steps_per_min,
            } => WorkoutDetails::Running {
                cadence_steps_per_min,
                pace_min_per_km: duration_min / distance_km,
            },
            // Literal distance / duration / 60; stored records depend on this magnitude.
            WorkoutSpec::Cycling {
                distance_km,
                duration_min,
                elevation_gain_m,
            } => WorkoutDetails::Cycling {
                elevation_gain_m,
                speed_km_per_h: distance_km / duration_min / 60.0,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    id: String,
    created_at: DateTime<Utc>,
    coordinates: Coordinates,
    distance_km: f64,
    duration_min: f64,
    description: String,
    #[serde(flatten)]
    details: WorkoutDetails,
}

impl Workout {
    pub fn new(
        spec: WorkoutSpec,
        coordinates: Coordinates,
        created_at: DateTime<Utc>,
        locale: Locale,
    ) -> Result<Self, WorkoutError> {
        spec.validate()?;

        let (distance_km, duration_min) = match spec {
            WorkoutSpec::Running {
                distance_km,
                duration_min,
                ..
            }
            | WorkoutSpec::Cycling {
                distance_km,
                duration_min,
                ..
            } => (distance_km, duration_min),
        };

        Ok(Self {
            id: id_from_timestamp(created_at),
            created_at,
            coordinates,
            distance_km,
            duration_min,
            description: locale.describe(spec.kind(), created_at),
            details: WorkoutDetails::derive(&spec),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn duration_min(&self) -> f64 {
        self.duration_min
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn details(&self) -> &WorkoutDetails {
        &self.details
    }

    pub fn kind(&self) -> WorkoutKind {
        match self.details {
            WorkoutDetails::Running { .. } => WorkoutKind::Running,
            WorkoutDetails::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    /// Pace for running, speed for cycling.
    pub fn derived_metric(&self) -> f64 {
        match self.details {
            WorkoutDetails::Running {
                pace_min_per_km, ..
            } => pace_min_per_km,
            WorkoutDetails::Cycling { speed_km_per_h, .. } => speed_km_per_h,
        }
    }
}

pub fn create_running(
    coordinates: Coordinates,
    distance_km: f64,
    duration_min: f64,
    cadence_steps_per_min: f64,
) -> Result<Workout, WorkoutError> {
    Workout::new(
        WorkoutSpec::Running {
            distance_km,
            duration_min,
            cadence_steps_per_min,
        },
        coordinates,
        Utc::now(),
        Locale::default(),
    )
}

pub fn create_cycling(
    coordinates: Coordinates,
    distance_km: f64,
    duration_min: f64,
    elevation_gain_m: f64,
) -> Result<Workout, WorkoutError> {
    Workout::new(
        WorkoutSpec::Cycling {
            distance_km,
            duration_min,
            elevation_gain_m,
        },
        coordinates,
        Utc::now(),
        Locale::default(),
    )
}

// Last ten digits of the millisecond timestamp.
fn id_from_timestamp(at: DateTime<Utc>) -> String {
    let millis = at.timestamp_millis().to_string();
    let start = millis.len().saturating_sub(ID_LEN);
    millis[start..].to_string()
}
