use std::collections::HashSet;

use serde::Serialize;

use crate::error::PersistenceError;
use crate::store::WorkoutStore;
use crate::types::locale::Locale;
use crate::types::sort::SortCriterion;
use crate::types::workout::{Coordinates, Workout, WorkoutDetails, WorkoutKind};

pub const FOCUS_ZOOM: u8 = 15;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub id: String,
    pub coordinates: Coordinates,
    pub popup: String,
    pub class_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub south_west: Coordinates,
    pub north_east: Coordinates,
}

impl Bounds {
    pub fn around<'a>(points: impl IntoIterator<Item = &'a Coordinates>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (mut south, mut west) = (first.lat(), first.lng());
        let (mut north, mut east) = (south, west);
        for p in iter {
            south = south.min(p.lat());
            north = north.max(p.lat());
            west = west.min(p.lng());
            east = east.max(p.lng());
        }
        Some(Self {
            south_west: [south, west].into(),
            north_east: [north, east].into(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detail {
    pub icon: &'static str,
    pub value: String,
    pub unit: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    pub id: String,
    pub kind: WorkoutKind,
    pub title: String,
    pub distance_km: f64,
    pub duration_min: f64,
    pub details: Vec<Detail>,
}

impl ListItem {
    pub fn from_workout(workout: &Workout, locale: Locale) -> Self {
        let units = locale.units();
        let mut details = vec![
            Detail {
                icon: workout.kind().icon(),
                value: workout.distance_km().to_string(),
                unit: units.distance,
            },
            Detail {
                icon: "⏱",
                value: workout.duration_min().to_string(),
                unit: units.duration,
            },
        ];

        match *workout.details() {
            WorkoutDetails::Running {
                cadence_steps_per_min,
                pace_min_per_km,
            } => {
                details.push(Detail {
                    icon: "📏⏱",
                    value: format!("{:.2}", pace_min_per_km),
                    unit: units.pace,
                });
                details.push(Detail {
                    icon: "👟⏱",
                    value: cadence_steps_per_min.to_string(),
                    unit: units.cadence,
                });
            }
            WorkoutDetails::Cycling {
                elevation_gain_m,
                speed_km_per_h,
            } => {
                details.push(Detail {
                    icon: "📏⏱",
                    value: format!("{:.2}", speed_km_per_h),
                    unit: units.speed,
                });
                details.push(Detail {
                    icon: "🏔",
                    value: elevation_gain_m.to_string(),
                    unit: units.elevation,
                });
            }
        }

        Self {
            id: workout.id().to_string(),
            kind: workout.kind(),
            title: workout.description().to_string(),
            distance_km: workout.distance_km(),
            duration_min: workout.duration_min(),
            details,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Element {
    Form,
    CadenceField,
    ElevationField,
    SortControls,
    ResetControl,
    Footer,
}

pub trait MapPort {
    fn render_marker(&mut self, marker: &Marker);
    fn fit_bounds(&mut self, bounds: &Bounds);
    fn center_view(&mut self, center: Coordinates, zoom: u8, animate: bool);
}

pub trait ListPort {
    fn clear_list(&mut self);
    fn render_list_item(&mut self, item: &ListItem);
    fn toggle_visibility(&mut self, element: Element, visible: bool);
    fn set_active_sort(&mut self, criterion: SortCriterion);
    fn alert(&mut self, message: &str);
    fn reload(&mut self);
}

pub trait ViewPort: MapPort + ListPort {}

impl<T: MapPort + ListPort> ViewPort for T {}

/// Keeps the sidebar list and the map markers in step with a [`WorkoutStore`].
///
/// The list always mirrors store order. Markers are keyed by workout id, drawn
/// once in the order workouts first appear, and are never reordered by sorting.
pub struct ViewSync {
    locale: Locale,
    criterion: SortCriterion,
    marked: HashSet<String>,
    marker_positions: Vec<Coordinates>,
}

impl ViewSync {
    pub fn new(locale: Locale, criterion: SortCriterion) -> Self {
        Self {
            locale,
            criterion,
            marked: HashSet::new(),
            marker_positions: Vec::new(),
        }
    }

    pub fn criterion(&self) -> SortCriterion {
        self.criterion
    }

    pub fn marker_count(&self) -> usize {
        self.marker_positions.len()
    }

    pub fn render(&mut self, store: &WorkoutStore, port: &mut dyn ViewPort) {
        self.render_list(store, port);
        self.sync_markers(store, port);
    }

    pub fn render_list(&self, store: &WorkoutStore, port: &mut dyn ViewPort) {
        port.clear_list();
        for workout in store.iter() {
            port.render_list_item(&ListItem::from_workout(workout, self.locale));
        }

        let has_workouts = !store.is_empty();
        port.toggle_visibility(Element::SortControls, has_workouts);
        port.toggle_visibility(Element::ResetControl, has_workouts);
        port.toggle_visibility(Element::Footer, has_workouts);
        port.set_active_sort(self.criterion);
    }

    pub fn sync_markers(&mut self, store: &WorkoutStore, port: &mut dyn ViewPort) {
        let mut added = 0;
        for workout in store.iter() {
            if !self.marked.insert(workout.id().to_string()) {
                continue;
            }
            let kind = workout.kind();
            port.render_marker(&Marker {
                id: workout.id().to_string(),
                coordinates: workout.coordinates(),
                popup: format!("{} {}", kind.icon(), workout.description()),
                class_name: format!("{}-popup", kind.as_str()),
            });
            self.marker_positions.push(workout.coordinates());
            added += 1;
        }

        if added == 0 {
            return;
        }
        if let Some(bounds) = Bounds::around(&self.marker_positions) {
            port.fit_bounds(&bounds);
        }
        if let [only] = self.marker_positions.as_slice() {
            port.center_view(*only, FOCUS_ZOOM, false);
        }
    }

    /// Switches the sort state, reorders and persists the store, redraws the list.
    pub fn sort(
        &mut self,
        criterion: SortCriterion,
        store: &mut WorkoutStore,
        port: &mut dyn ViewPort,
    ) -> Result<(), PersistenceError> {
        store.sort_by(criterion)?;
        self.criterion = criterion;
        self.render_list(store, port);
        tracing::debug!("List sorted by {}", criterion.as_token());
        Ok(())
    }

    /// Pans to a workout. Unknown ids are ignored.
    pub fn focus_on(&self, id: &str, store: &WorkoutStore, port: &mut dyn ViewPort) -> bool {
        match store.get(id) {
            Some(workout) => {
                port.center_view(workout.coordinates(), FOCUS_ZOOM, true);
                true
            }
            None => {
                tracing::debug!("No workout with id {} to focus", id);
                false
            }
        }
    }

    pub fn reset(&mut self, port: &mut dyn ViewPort) {
        self.marked.clear();
        self.marker_positions.clear();
        port.reload();
    }
}
