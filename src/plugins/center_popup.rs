//! Opens the popup of whichever marker sits closest to a fixed anchor point
//! while the map moves.
//!
//! Every `move` event (unless suppressed) pushes a short debounce deadline
//! back. Once the map has been still for the debounce delay, the next poll
//! recomputes:
//!
//! 1. the anchor is the viewport center shifted down by `anchor_offset_y`;
//! 2. the marker group is scanned for the marker projecting closest to it;
//! 3. beyond `tolerance`, popups in the marker group are closed;
//! 4. otherwise the calls group is scanned for markers projecting onto the
//!    same container point, whose popup is opened and whose title and
//!    description are written to the info panel.

use crate::{
    core::{
        config::{CenterPopupConfig, CloseScope},
        geo::Point,
        map::Map,
    },
    input::handler::ListenerId,
    layers::{
        base::Layer,
        group::{LayerGroup, SharedLayerGroup},
        marker::{MarkerData, MarkerKind},
    },
    plugins::base::PluginTrait,
    prelude::{Arc, Mutex},
    runtime::Debouncer,
    traits::{Configurable, MapView},
    ui::panel::{InfoPanel, MemoryPanel},
    MapError, Result,
};
use instant::Instant;
use std::sync::atomic::{AtomicBool, Ordering};

pub const PLUGIN_NAME: &str = "center-popup";

/// State shared between the controller and its `move` listener
#[derive(Debug)]
struct MoveGate {
    suppressed: AtomicBool,
    debounce: Mutex<Debouncer>,
}

impl MoveGate {
    fn on_move(&self, now: Instant) {
        if self.suppressed.load(Ordering::SeqCst) {
            log::trace!("move ignored while suppressed");
            return;
        }
        match self.debounce.lock() {
            Ok(mut debounce) => debounce.schedule(now),
            Err(_) => log::warn!("debounce timer lock poisoned; move event dropped"),
        }
    }

    fn fire_if_due(&self, now: Instant) -> bool {
        self.debounce
            .lock()
            .map(|mut debounce| debounce.fire_if_due(now))
            .unwrap_or(false)
    }
}

/// Clonable writer for the suppression flag
///
/// Gesture code holds one of these and raises it while the user drags or
/// pinches, so recentering does not fight the gesture.
#[derive(Debug, Clone)]
pub struct SuppressionHandle(Arc<MoveGate>);

impl SuppressionHandle {
    pub fn set_suppressed(&self, suppressed: bool) {
        self.0.suppressed.store(suppressed, Ordering::SeqCst);
    }

    pub fn is_suppressed(&self) -> bool {
        self.0.suppressed.load(Ordering::SeqCst)
    }
}

/// The marker found closest to the anchor
#[derive(Debug, Clone, PartialEq)]
pub struct Closest {
    pub id: String,
    pub point: Point,
    pub distance: f64,
}

/// What a recompute did
#[derive(Debug, Clone, PartialEq)]
pub enum Recompute {
    /// No marker within tolerance; lists the marker-group popups that were closed
    OutOfRange {
        closest: Option<Closest>,
        closed: Vec<String>,
    },
    /// A marker within tolerance; lists what happened in the calls group
    InRange {
        closest: Closest,
        matched: Vec<String>,
        opened: Option<String>,
        closed: Option<String>,
    },
}

impl Recompute {
    pub fn closest(&self) -> Option<&Closest> {
        match self {
            Recompute::OutOfRange { closest, .. } => closest.as_ref(),
            Recompute::InRange { closest, .. } => Some(closest),
        }
    }

    pub fn opened(&self) -> Option<&str> {
        match self {
            Recompute::InRange { opened, .. } => opened.as_deref(),
            Recompute::OutOfRange { .. } => None,
        }
    }
}

/// Anchor point for a container of the given size
pub fn anchor_point(size: Point, anchor_offset_y: f64) -> Point {
    Point::new(size.x / 2.0, size.y / 2.0 + anchor_offset_y)
}

/// Finds the marker projecting closest to `anchor`
///
/// Markers without a position are skipped. Ties keep the first marker in
/// iteration order; distances that are not numbers never win.
pub fn find_closest<V>(group: &LayerGroup, view: &V, anchor: Point) -> Option<Closest>
where
    V: MapView + ?Sized,
{
    let mut closest: Option<Closest> = None;
    group.each_layer(|marker| {
        let Some(position) = marker.position() else {
            log::debug!("skipping marker '{}' without coordinates", marker.id());
            return;
        };
        let point = view.lat_lng_to_container_point(&position);
        let distance = point.distance_to(&anchor);
        let min_distance = closest.as_ref().map_or(f64::INFINITY, |c| c.distance);
        if distance < min_distance {
            closest = Some(Closest {
                id: marker.id().to_string(),
                point,
                distance,
            });
        }
    });
    closest
}

pub struct CenterPopupController {
    config: CenterPopupConfig,
    markers: SharedLayerGroup,
    calls: SharedLayerGroup,
    panel: Box<dyn InfoPanel>,
    gate: Arc<MoveGate>,
    listener: Option<ListenerId>,
    current_popup: Option<String>,
    is_popup_open: bool,
    recomputes: u64,
}

impl CenterPopupController {
    pub fn builder() -> CenterPopupBuilder {
        CenterPopupBuilder::new()
    }

    /// Registers the `move` listener on `map`
    pub fn attach(&mut self, map: &mut Map) -> Result<()> {
        if self.listener.is_some() {
            return Err(MapError::Plugin(format!("{PLUGIN_NAME} is already attached")));
        }
        let gate = self.gate.clone();
        self.listener = Some(map.on("move", move |_, now| gate.on_move(now)));
        log::debug!("{PLUGIN_NAME} attached to map");
        Ok(())
    }

    /// Stops reacting to move events and drops any pending recompute
    pub fn detach(&mut self, map: &mut Map) {
        if let Some(listener) = self.listener.take() {
            map.off(listener);
        }
        if let Ok(mut debounce) = self.gate.debounce.lock() {
            debounce.cancel();
        }
    }

    pub fn is_attached(&self) -> bool {
        self.listener.is_some()
    }

    pub fn set_suppressed(&self, suppressed: bool) {
        self.gate.suppressed.store(suppressed, Ordering::SeqCst);
    }

    pub fn is_suppressed(&self) -> bool {
        self.gate.suppressed.load(Ordering::SeqCst)
    }

    pub fn suppression_handle(&self) -> SuppressionHandle {
        SuppressionHandle(self.gate.clone())
    }

    /// Feeds a move event observed at `now`, for hosts dispatching events themselves
    pub fn handle_move(&self, now: Instant) {
        self.gate.on_move(now);
    }

    /// Whether a recompute is waiting for its debounce deadline
    pub fn is_pending(&self) -> bool {
        self.gate
            .debounce
            .lock()
            .map(|debounce| debounce.is_pending())
            .unwrap_or(false)
    }

    /// Runs the recompute if the debounce deadline has passed by `now`
    pub fn poll<V>(&mut self, view: &V, now: Instant) -> Result<Option<Recompute>>
    where
        V: MapView + ?Sized,
    {
        if !self.gate.fire_if_due(now) {
            return Ok(None);
        }
        self.recompute(view).map(Some)
    }

    /// Finds the marker closest to the anchor and toggles popups accordingly
    pub fn recompute<V>(&mut self, view: &V) -> Result<Recompute>
    where
        V: MapView + ?Sized,
    {
        self.recomputes += 1;
        let anchor = anchor_point(view.size(), self.config.anchor_offset_y);

        let closest = {
            let markers = self
                .markers
                .read()
                .map_err(|_| MapError::Layer("marker group lock poisoned".to_string()))?;
            find_closest(&markers, view, anchor)
        };

        let outcome = match closest {
            Some(closest) if closest.distance <= self.config.tolerance => {
                self.toggle_calls(view, closest)?
            }
            closest => {
                let closed = self.close_marker_popups()?;
                Recompute::OutOfRange { closest, closed }
            }
        };

        log::debug!("{PLUGIN_NAME} recompute: {outcome:?}");
        Ok(outcome)
    }

    fn close_marker_popups(&mut self) -> Result<Vec<String>> {
        let scope = self.config.close_scope;
        let mut markers = self
            .markers
            .write()
            .map_err(|_| MapError::Layer("marker group lock poisoned".to_string()))?;

        let mut closed = Vec::new();
        markers.each_layer_mut(|marker| {
            let in_scope = match scope {
                CloseScope::CircleMarkers => marker.kind() == MarkerKind::CircleMarker,
                CloseScope::PointMarkers => marker.kind().is_point_marker(),
            };
            if in_scope {
                if marker.is_popup_open() {
                    closed.push(marker.id().to_string());
                }
                marker.close_popup();
            }
        });
        Ok(closed)
    }

    fn toggle_calls<V>(&mut self, view: &V, closest: Closest) -> Result<Recompute>
    where
        V: MapView + ?Sized,
    {
        let Self {
            ref config,
            ref calls,
            ref mut panel,
            ref mut current_popup,
            ref mut is_popup_open,
            ..
        } = *self;
        let mut calls = calls
            .write()
            .map_err(|_| MapError::Layer("calls group lock poisoned".to_string()))?;

        let mut matched = Vec::new();
        let mut opened = None;
        let mut closed = None;

        calls.each_layer_mut(|layer| {
            if !layer.kind().is_point_marker() {
                return;
            }
            let Some(position) = layer.position() else {
                log::debug!("skipping call marker '{}' without coordinates", layer.id());
                return;
            };
            let point = view.lat_lng_to_container_point(&position);
            let is_current = current_popup.as_deref() == Some(layer.id());

            if point.approx_eq(&closest.point, config.match_epsilon) {
                matched.push(layer.id().to_string());
                if !*is_popup_open && !is_current {
                    layer.open_popup();
                    *is_popup_open = true;
                    *current_popup = Some(layer.id().to_string());
                    opened = Some(layer.id().to_string());
                }
                match layer.data() {
                    Some(data) => write_panel(panel.as_mut(), config, data),
                    None => log::warn!("call marker '{}' has no title/description", layer.id()),
                }
            } else if is_current {
                *is_popup_open = false;
                layer.close_popup();
                closed = Some(layer.id().to_string());
            }
        });

        Ok(Recompute::InRange {
            closest,
            matched,
            opened,
            closed,
        })
    }

    /// Id of the marker whose popup was last opened
    pub fn current_popup(&self) -> Option<&str> {
        self.current_popup.as_deref()
    }

    pub fn is_popup_open(&self) -> bool {
        self.is_popup_open
    }

    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    pub fn markers(&self) -> &SharedLayerGroup {
        &self.markers
    }

    pub fn calls(&self) -> &SharedLayerGroup {
        &self.calls
    }
}

fn write_panel(panel: &mut dyn InfoPanel, config: &CenterPopupConfig, data: &MarkerData) {
    let writes = [
        (config.title_element_id.as_str(), data.marker_title.as_str()),
        (
            config.description_element_id.as_str(),
            data.marker_description.as_str(),
        ),
    ];
    for (element_id, text) in writes {
        if let Err(err) = panel.set_text(element_id, text) {
            log::warn!("info panel not updated: {err}");
        }
    }
}

impl Configurable for CenterPopupController {
    type Config = CenterPopupConfig;

    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn set_config(&mut self, config: Self::Config) -> Result<()> {
        Self::validate_config(&config)?;
        if let Ok(mut debounce) = self.gate.debounce.lock() {
            debounce.set_delay(config.debounce_delay());
        }
        self.config = config;
        Ok(())
    }

    fn validate_config(config: &Self::Config) -> Result<()> {
        config.validate()
    }
}

impl PluginTrait for CenterPopupController {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn on_add(&mut self, map: &mut Map) -> Result<()> {
        self.attach(map)
    }

    fn on_remove(&mut self, map: &mut Map) -> Result<()> {
        self.detach(map);
        Ok(())
    }

    fn update(&mut self, view: &dyn MapView, now: Instant) -> Result<()> {
        self.poll(view, now).map(|_| ())
    }
}

/// Builds a [`CenterPopupController`]; both layer groups are required
#[derive(Default)]
pub struct CenterPopupBuilder {
    config: CenterPopupConfig,
    markers: Option<SharedLayerGroup>,
    calls: Option<SharedLayerGroup>,
    panel: Option<Box<dyn InfoPanel>>,
}

impl CenterPopupBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: CenterPopupConfig) -> Self {
        self.config = config;
        self
    }

    /// Group scanned for the marker closest to the anchor
    pub fn markers(mut self, markers: SharedLayerGroup) -> Self {
        self.markers = Some(markers);
        self
    }

    /// Group whose popups are opened and whose data fills the info panel
    pub fn calls(mut self, calls: SharedLayerGroup) -> Self {
        self.calls = Some(calls);
        self
    }

    pub fn panel(mut self, panel: impl InfoPanel + 'static) -> Self {
        self.panel = Some(Box::new(panel));
        self
    }

    pub fn build(self) -> Result<CenterPopupController> {
        self.config.validate()?;
        let markers = self
            .markers
            .ok_or_else(|| MapError::MissingDependency("marker layer group".to_string()))?;
        let calls = self
            .calls
            .ok_or_else(|| MapError::MissingDependency("calls layer group".to_string()))?;
        let panel = self.panel.unwrap_or_else(|| {
            Box::new(MemoryPanel::with_elements([
                self.config.title_element_id.clone(),
                self.config.description_element_id.clone(),
            ]))
        });

        let gate = MoveGate {
            suppressed: AtomicBool::new(false),
            debounce: Mutex::new(Debouncer::new(self.config.debounce_delay())),
        };

        Ok(CenterPopupController {
            config: self.config,
            markers,
            calls,
            panel,
            gate: Arc::new(gate),
            listener: None,
            current_popup: None,
            is_popup_open: false,
            recomputes: 0,
        })
    }
}
