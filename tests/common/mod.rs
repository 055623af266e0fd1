#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};
use workout_map::error::PersistenceError;
use workout_map::persistence::{MemoryPersistence, Persistence};
use workout_map::types::locale::Locale;
use workout_map::types::workout::{Coordinates, Workout, WorkoutSpec};

/// In-memory persistence that remembers every key it was asked to save.
#[derive(Default)]
pub struct CountingPersistence {
    inner: MemoryPersistence,
    saves: Mutex<Vec<String>>,
}

impl CountingPersistence {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn saves_of(&self, key: &str) -> usize {
        self.saves
            .lock()
            .expect("saves lock")
            .iter()
            .filter(|k| k.as_str() == key)
            .count()
    }

    pub fn total_saves(&self) -> usize {
        self.saves.lock().expect("saves lock").len()
    }
}

impl Persistence for CountingPersistence {
    fn load(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        self.inner.load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.saves.lock().expect("saves lock").push(key.to_string());
        self.inner.save(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        self.inner.remove(key)
    }
}

/// In-memory persistence whose saves can be made to fail per key.
#[derive(Default)]
pub struct FailingPersistence {
    inner: MemoryPersistence,
    failing: Mutex<Vec<String>>,
}

impl FailingPersistence {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_saves_of(&self, key: &str) {
        self.failing.lock().expect("failing lock").push(key.to_string());
    }
}

impl Persistence for FailingPersistence {
    fn load(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        self.inner.load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        if self.failing.lock().expect("failing lock").iter().any(|k| k == key) {
            return Err(io::Error::new(io::ErrorKind::Other, "disk full").into());
        }
        self.inner.save(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        self.inner.remove(key)
    }
}

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub fn at(lat: f64, lng: f64) -> Coordinates {
    Coordinates::new(lat, lng).expect("valid coordinates")
}

pub fn running(minutes_after: i64, distance_km: f64, duration_min: f64) -> Workout {
    Workout::new(
        WorkoutSpec::Running {
            distance_km,
            duration_min,
            cadence_steps_per_min: 170.0,
        },
        at(50.45, 30.52),
        base_time() + Duration::minutes(minutes_after),
        Locale::Ru,
    )
    .expect("valid running workout")
}

pub fn cycling(minutes_after: i64, distance_km: f64, duration_min: f64) -> Workout {
    Workout::new(
        WorkoutSpec::Cycling {
            distance_km,
            duration_min,
            elevation_gain_m: 120.0,
        },
        at(50.40, 30.60),
        base_time() + Duration::minutes(minutes_after),
        Locale::Ru,
    )
    .expect("valid cycling workout")
}
