use serde::{Deserialize, Serialize};

/// Field the workout list is ordered by, always descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortCriterion {
    #[default]
    #[serde(rename = "distance")]
    Distance,
    #[serde(rename = "time")]
    Duration,
}

impl SortCriterion {
    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "distance" => Some(SortCriterion::Distance),
            "time" => Some(SortCriterion::Duration),
            _ => None,
        }
    }

    pub fn as_token(&self) -> &'static str {
        match self {
            SortCriterion::Distance => "distance",
            SortCriterion::Duration => "time",
        }
    }
}
