use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::types::workout::WorkoutKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ru,
    En,
}

pub struct Units {
    pub distance: &'static str,
    pub duration: &'static str,
    pub pace: &'static str,
    pub cadence: &'static str,
    pub speed: &'static str,
    pub elevation: &'static str,
}

impl Locale {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ru" | "ru-ru" => Some(Locale::Ru),
            "en" | "en-us" => Some(Locale::En),
            _ => None,
        }
    }

    pub fn kind_label(&self, kind: WorkoutKind) -> &'static str {
        match (self, kind) {
            (Locale::Ru, WorkoutKind::Running) => "Пробежка",
            (Locale::Ru, WorkoutKind::Cycling) => "Велотренировка",
            (Locale::En, WorkoutKind::Running) => "Running",
            (Locale::En, WorkoutKind::Cycling) => "Cycling",
        }
    }

    /// Short calendar date in the local time zone, e.g. `16.10.2026` for `ru`.
    pub fn format_date(&self, at: DateTime<Utc>) -> String {
        let local = at.with_timezone(&Local);
        match self {
            Locale::Ru => local.format("%d.%m.%Y").to_string(),
            Locale::En => local.format("%-m/%-d/%Y").to_string(),
        }
    }

    pub fn describe(&self, kind: WorkoutKind, at: DateTime<Utc>) -> String {
        format!("{} {}", self.kind_label(kind), self.format_date(at))
    }

    pub fn invalid_input_alert(&self) -> &'static str {
        match self {
            Locale::Ru => "Введите положительное число",
            Locale::En => "Enter a positive number",
        }
    }

    pub fn units(&self) -> Units {
        match self {
            Locale::Ru => Units {
                distance: "км",
                duration: "мин",
                pace: "мин/км",
                cadence: "шаг/мин",
                speed: "км/ч",
                elevation: "м",
            },
            Locale::En => Units {
                distance: "km",
                duration: "min",
                pace: "min/km",
                cadence: "spm",
                speed: "km/h",
                elevation: "m",
            },
        }
    }
}
