use std::sync::Arc;

use crate::error::{AppError, GeolocationUnavailable, PersistenceError, WorkoutError};
use crate::form::{FormController, RawWorkoutInput};
use crate::persistence::Persistence;
use crate::store::WorkoutStore;
use crate::types::locale::Locale;
use crate::types::sort::SortCriterion;
use crate::types::workout::{Coordinates, Workout, WorkoutKind};
use crate::view::{Element, ViewPort, ViewSync, FOCUS_ZOOM};

/// The single application instance: owns the store, the form and the view
/// state, and handles one user event at a time.
pub struct WorkoutApp {
    store: WorkoutStore,
    form: FormController,
    view: ViewSync,
    location: Option<Coordinates>,
    geolocated: bool,
}

impl WorkoutApp {
    pub fn start(
        persistence: Arc<dyn Persistence>,
        locale: Locale,
        port: &mut dyn ViewPort,
    ) -> Result<Self, PersistenceError> {
        let store = WorkoutStore::load(persistence)?;
        let view = ViewSync::new(locale, store.criterion());
        let mut app = Self {
            store,
            form: FormController::new(locale),
            view,
            location: None,
            geolocated: false,
        };
        app.show_form_fields(port);
        port.toggle_visibility(Element::Form, false);
        app.view.render(&app.store, port);
        Ok(app)
    }

    /// One-shot startup position. Failure is logged and never retried, and
    /// reports after the first are ignored.
    pub fn on_geolocation(
        &mut self,
        result: Result<Coordinates, GeolocationUnavailable>,
        port: &mut dyn ViewPort,
    ) {
        if self.geolocated {
            tracing::debug!("Ignoring repeated geolocation report");
            return;
        }
        self.geolocated = true;

        match result {
            Ok(position) => {
                tracing::info!("Map centered at ({}, {})", position.lat(), position.lng());
                self.location = Some(position);
                port.center_view(position, FOCUS_ZOOM, false);
            }
            Err(err) => {
                tracing::warn!("Could not determine your location: {}", err);
            }
        }
    }

    pub fn on_map_click(&mut self, at: Coordinates, port: &mut dyn ViewPort) {
        self.form.open_at(at);
        port.toggle_visibility(Element::Form, true);
    }

    pub fn select_kind(&mut self, kind: WorkoutKind, port: &mut dyn ViewPort) {
        self.form.select_kind(kind);
        self.show_form_fields(port);
    }

    pub fn submit(
        &mut self,
        raw: &RawWorkoutInput,
        port: &mut dyn ViewPort,
    ) -> Result<Workout, AppError> {
        let target = self.form.target().ok_or(WorkoutError::NoLocationSelected)?;

        let workout = match self.form.submit(raw, target) {
            Ok(workout) => workout,
            Err(err) => {
                if matches!(err, WorkoutError::InvalidInput(_)) {
                    port.alert(self.form.locale().invalid_input_alert());
                }
                tracing::info!("Rejected workout submission: {}", err);
                return Err(err.into());
            }
        };

        self.store.add(workout.clone())?;
        self.form.close();
        port.toggle_visibility(Element::Form, false);
        self.view.render(&self.store, port);

        tracing::info!(
            "Added {} workout {} ({} km, {} min)",
            workout.kind().as_str(),
            workout.id(),
            workout.distance_km(),
            workout.duration_min()
        );
        Ok(workout)
    }

    pub fn sort(
        &mut self,
        criterion: SortCriterion,
        port: &mut dyn ViewPort,
    ) -> Result<(), PersistenceError> {
        self.view.sort(criterion, &mut self.store, port)
    }

    pub fn focus(&self, id: &str, port: &mut dyn ViewPort) -> bool {
        self.view.focus_on(id, &self.store, port)
    }

    /// Clears every workout and brings the view back to its startup state.
    pub fn reset(&mut self, port: &mut dyn ViewPort) -> Result<(), PersistenceError> {
        self.store.reset()?;
        self.form.close();
        self.view.reset(port);
        port.toggle_visibility(Element::Form, false);
        self.view.render(&self.store, port);
        if let Some(position) = self.location {
            port.center_view(position, FOCUS_ZOOM, false);
        }
        Ok(())
    }

    pub fn store(&self) -> &WorkoutStore {
        &self.store
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn view(&self) -> &ViewSync {
        &self.view
    }

    pub fn location(&self) -> Option<Coordinates> {
        self.location
    }

    fn show_form_fields(&self, port: &mut dyn ViewPort) {
        let running = self.form.selected_kind() == WorkoutKind::Running;
        port.toggle_visibility(Element::CadenceField, running);
        port.toggle_visibility(Element::ElevationField, !running);
    }
}
