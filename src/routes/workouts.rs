use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::error::{AppError, GeolocationUnavailable};
use crate::form::RawWorkoutInput;
use crate::snapshot::ViewSnapshot;
use crate::state::{AppState, Session};
use crate::types::sort::SortCriterion;
use crate::types::workout::{Coordinates, WorkoutKind};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/view", get(current_view))
        .route("/api/geolocation", post(geolocation))
        .route("/api/map/click", post(map_click))
        .route("/api/form/kind", post(select_kind))
        .route("/api/workouts", post(submit_workout))
        .route("/api/workouts/:id/focus", post(focus_workout))
        .route("/api/sort", post(sort_workouts))
        .route("/api/reset", post(reset))
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GeolocationReport {
    Position { lat: f64, lng: f64 },
    Unavailable { error: String },
}

#[derive(Debug, Deserialize)]
struct KindRequest {
    kind: WorkoutKind,
}

#[derive(Debug, Deserialize)]
struct SortRequest {
    criterion: SortCriterion,
}

async fn current_view(State(state): State<AppState>) -> Json<ViewSnapshot> {
    let session = state.session().lock().await;
    Json(session.view.snapshot(&session.app))
}

async fn geolocation(
    State(state): State<AppState>,
    payload: Result<Json<GeolocationReport>, JsonRejection>,
) -> Result<Json<ViewSnapshot>, AppError> {
    let Json(report) = payload?;
    let result = match report {
        GeolocationReport::Position { lat, lng } => Ok(Coordinates::new(lat, lng)?),
        GeolocationReport::Unavailable { error } => Err(GeolocationUnavailable(error)),
    };

    let mut guard = state.session().lock().await;
    let Session { app, view } = &mut *guard;
    view.begin_event();
    app.on_geolocation(result, view);
    Ok(Json(view.snapshot(app)))
}

async fn map_click(
    State(state): State<AppState>,
    payload: Result<Json<LatLng>, JsonRejection>,
) -> Result<Json<ViewSnapshot>, AppError> {
    let Json(req) = payload?;
    let at = Coordinates::new(req.lat, req.lng)?;

    let mut guard = state.session().lock().await;
    let Session { app, view } = &mut *guard;
    view.begin_event();
    app.on_map_click(at, view);
    Ok(Json(view.snapshot(app)))
}

async fn select_kind(
    State(state): State<AppState>,
    payload: Result<Json<KindRequest>, JsonRejection>,
) -> Result<Json<ViewSnapshot>, AppError> {
    let Json(req) = payload?;
    let mut guard = state.session().lock().await;
    let Session { app, view } = &mut *guard;
    view.begin_event();
    app.select_kind(req.kind, view);
    Ok(Json(view.snapshot(app)))
}

async fn submit_workout(
    State(state): State<AppState>,
    payload: Result<Json<RawWorkoutInput>, JsonRejection>,
) -> Result<Json<ViewSnapshot>, AppError> {
    let Json(raw) = payload?;
    let mut guard = state.session().lock().await;
    let Session { app, view } = &mut *guard;
    view.begin_event();
    app.submit(&raw, view)?;
    Ok(Json(view.snapshot(app)))
}

async fn focus_workout(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<ViewSnapshot> {
    let mut guard = state.session().lock().await;
    let Session { app, view } = &mut *guard;
    view.begin_event();
    app.focus(&id, view);
    Json(view.snapshot(app))
}

async fn sort_workouts(
    State(state): State<AppState>,
    payload: Result<Json<SortRequest>, JsonRejection>,
) -> Result<Json<ViewSnapshot>, AppError> {
    let Json(req) = payload?;
    let mut guard = state.session().lock().await;
    let Session { app, view } = &mut *guard;
    view.begin_event();
    app.sort(req.criterion, view)?;
    Ok(Json(view.snapshot(app)))
}

async fn reset(State(state): State<AppState>) -> Result<Json<ViewSnapshot>, AppError> {
    let mut guard = state.session().lock().await;
    let Session { app, view } = &mut *guard;
    view.begin_event();
    app.reset(view)?;
    tracing::info!("All workouts cleared");
    Ok(Json(view.snapshot(app)))
}
