use serde::Serialize;

use crate::app::WorkoutApp;
use crate::types::sort::SortCriterion;
use crate::types::workout::{Coordinates, WorkoutKind};
use crate::view::{Bounds, Element, ListItem, ListPort, MapPort, Marker};

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapState {
    pub center: Option<Coordinates>,
    pub zoom: Option<u8>,
    pub animate: bool,
    pub bounds: Option<Bounds>,
    pub markers: Vec<Marker>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Visibility {
    pub form: bool,
    pub cadence_field: bool,
    pub elevation_field: bool,
    pub sort_controls: bool,
    pub reset_control: bool,
    pub footer: bool,
}

/// View port that records what the browser should draw.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotView {
    pub map: MapState,
    pub list: Vec<ListItem>,
    pub visibility: Visibility,
    pub active_sort: SortCriterion,
    pub alert: Option<String>,
    pub reload: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    pub visible: bool,
    pub target: Option<Coordinates>,
    pub kind: WorkoutKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct ViewSnapshot {
    #[serde(flatten)]
    pub view: SnapshotView,
    pub form: FormState,
}

impl SnapshotView {
    /// Alerts and reload requests only live for the event that raised them.
    pub fn begin_event(&mut self) {
        self.alert = None;
        self.reload = false;
        self.map.animate = false;
    }

    pub fn snapshot(&self, app: &WorkoutApp) -> ViewSnapshot {
        let form = app.form();
        ViewSnapshot {
            view: self.clone(),
            form: FormState {
                visible: form.is_visible(),
                target: form.target(),
                kind: form.selected_kind(),
            },
        }
    }
}

impl MapPort for SnapshotView {
    fn render_marker(&mut self, marker: &Marker) {
        self.map.markers.push(marker.clone());
    }

    // The latest camera command wins: fitting clears the center and vice versa.
    fn fit_bounds(&mut self, bounds: &Bounds) {
        self.map.bounds = Some(*bounds);
        self.map.center = None;
        self.map.zoom = None;
    }

    fn center_view(&mut self, center: Coordinates, zoom: u8, animate: bool) {
        self.map.bounds = None;
        self.map.center = Some(center);
        self.map.zoom = Some(zoom);
        self.map.animate = animate;
    }
}

impl ListPort for SnapshotView {
    fn clear_list(&mut self) {
        self.list.clear();
    }

    fn render_list_item(&mut self, item: &ListItem) {
        self.list.push(item.clone());
    }

    fn toggle_visibility(&mut self, element: Element, visible: bool) {
        let flag = match element {
            Element::Form => &mut self.visibility.form,
            Element::CadenceField => &mut self.visibility.cadence_field,
            Element::ElevationField => &mut self.visibility.elevation_field,
            Element::SortControls => &mut self.visibility.sort_controls,
            Element::ResetControl => &mut self.visibility.reset_control,
            Element::Footer => &mut self.visibility.footer,
        };
        *flag = visible;
    }

    fn set_active_sort(&mut self, criterion: SortCriterion) {
        self.active_sort = criterion;
    }

    fn alert(&mut self, message: &str) {
        self.alert = Some(message.to_string());
    }

    // A reload starts the page from scratch.
    fn reload(&mut self) {
        self.map = MapState::default();
        self.list.clear();
        self.reload = true;
    }
}
