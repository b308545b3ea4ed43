use crate::{
    core::{
        geo::{LatLng, Point},
        viewport::Viewport,
    },
    input::{EventManager, ListenerId, MapEvent},
    plugins::base::PluginTrait,
    traits::MapView,
    MapError, Result,
};
use instant::Instant;

/// A map: a viewport, the listeners observing it and the plugins it drives
///
/// View changes are queued as [`MapEvent`]s and dispatched by
/// [`Map::process_events`] (or [`Map::update`]), so listeners always run
/// from the map's own event loop.
pub struct Map {
    viewport: Viewport,
    event_manager: EventManager,
    plugins: Vec<Box<dyn PluginTrait>>,
}

impl Map {
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        Self::with_viewport(Viewport::new(center, zoom, size))
    }

    pub fn with_viewport(viewport: Viewport) -> Self {
        Self {
            viewport,
            event_manager: EventManager::new(),
            plugins: Vec::new(),
        }
    }

    /// Moves the view to a new center and zoom
    pub fn set_view(&mut self, center: LatLng, zoom: f64) -> Result<()> {
        if !center.is_valid() {
            return Err(MapError::InvalidCoordinates(format!(
                "{}, {}",
                center.lat, center.lng
            )));
        }

        let old_zoom = self.viewport.zoom;
        self.event_manager.emit(MapEvent::MoveStart {
            center: self.viewport.center,
        });

        self.viewport.set_center(center);
        self.viewport.set_zoom(zoom);
        let zoom_changed = (self.viewport.zoom - old_zoom).abs() > f64::EPSILON;

        if zoom_changed {
            self.event_manager.emit(MapEvent::ZoomStart { zoom: old_zoom });
        }
        self.emit_move();
        if zoom_changed {
            self.event_manager.emit(MapEvent::ZoomEnd {
                zoom: self.viewport.zoom,
            });
        }
        self.event_manager.emit(MapEvent::MoveEnd {
            center: self.viewport.center,
        });
        Ok(())
    }

    /// Pans by a pixel offset; positive x moves the view east
    pub fn pan_by(&mut self, delta: Point) -> Point {
        self.event_manager.emit(MapEvent::MoveStart {
            center: self.viewport.center,
        });
        let applied = self.viewport.pan(delta);
        self.emit_move();
        self.event_manager.emit(MapEvent::MoveEnd {
            center: self.viewport.center,
        });
        applied
    }

    /// Resizes the container; the visible area changes, so a move is emitted too
    pub fn set_size(&mut self, size: Point) {
        self.viewport.set_size(size);
        self.event_manager.emit(MapEvent::Resize { size });
        self.emit_move();
    }

    fn emit_move(&mut self) {
        self.event_manager.emit(MapEvent::Move {
            center: self.viewport.center,
            zoom: self.viewport.zoom,
        });
    }

    /// Registers a listener for an event type (`"move"`, `"moveend"`, ...)
    pub fn on<F>(&mut self, event_type: &str, callback: F) -> ListenerId
    where
        F: Fn(&MapEvent, Instant) + Send + Sync + 'static,
    {
        self.event_manager.on(event_type, callback)
    }

    pub fn off(&mut self, id: ListenerId) -> bool {
        self.event_manager.off(id)
    }

    pub fn listener_count(&self, event_type: &str) -> usize {
        self.event_manager.listener_count(event_type)
    }

    /// Dispatches queued events to their listeners, stamped with the current time
    pub fn process_events(&mut self) -> Vec<MapEvent> {
        self.process_events_at(Instant::now())
    }

    /// Dispatches queued events to their listeners, stamped with `now`
    pub fn process_events_at(&mut self, now: Instant) -> Vec<MapEvent> {
        self.event_manager.process_events(now)
    }

    pub fn add_plugin(&mut self, mut plugin: Box<dyn PluginTrait>) -> Result<()> {
        if self.plugins.iter().any(|p| p.name() == plugin.name()) {
            return Err(MapError::Plugin(format!(
                "plugin '{}' is already installed",
                plugin.name()
            )));
        }
        plugin.on_add(self)?;
        log::debug!("installed plugin '{}'", plugin.name());
        self.plugins.push(plugin);
        Ok(())
    }

    pub fn remove_plugin(&mut self, name: &str) -> Result<Box<dyn PluginTrait>> {
        let index = self
            .plugins
            .iter()
            .position(|p| p.name() == name)
            .ok_or_else(|| MapError::Plugin(format!("no plugin named '{name}'")))?;
        let mut plugin = self.plugins.remove(index);
        plugin.on_remove(self)?;
        Ok(plugin)
    }

    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// One tick of the map loop: dispatch events, then let plugins run due work
    ///
    /// Listeners and plugins both see `now`, so hosts may drive the map
    /// from their own clock.
    pub fn update(&mut self, now: Instant) -> Result<Vec<MapEvent>> {
        let events = self.process_events_at(now);
        for plugin in &mut self.plugins {
            plugin.update(&self.viewport, now)?;
        }
        Ok(events)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn center(&self) -> LatLng {
        self.viewport.center
    }

    pub fn zoom(&self) -> f64 {
        self.viewport.zoom
    }
}

impl MapView for Map {
    fn size(&self) -> Point {
        self.viewport.size
    }

    fn lat_lng_to_container_point(&self, lat_lng: &LatLng) -> Point {
        self.viewport.lat_lng_to_container_point(lat_lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recorded(map: &mut Map, event_type: &str) -> Arc<Mutex<Vec<MapEvent>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        map.on(event_type, move |event, _| sink.lock().unwrap().push(event.clone()));
        seen
    }

    #[test]
    fn test_map_creation() {
        let map = Map::new(LatLng::new(40.7128, -74.0060), 10.0, Point::new(800.0, 600.0));
        assert_eq!(map.center(), LatLng::new(40.7128, -74.0060));
        assert_eq!(map.zoom(), 10.0);
        assert_eq!(map.size(), Point::new(800.0, 600.0));
    }

    #[test]
    fn test_set_view_emits_move_sequence() {
        let mut map = Map::new(LatLng::new(0.0, 0.0), 3.0, Point::new(800.0, 600.0));
        let moves = recorded(&mut map, "move");

        map.set_view(LatLng::new(10.0, 10.0), 5.0).unwrap();
        assert!(moves.lock().unwrap().is_empty());

        let events = map.process_events();
        let kinds: Vec<_> = events.iter().map(|e| e.event_type()).collect();
        assert_eq!(
            kinds,
            vec!["movestart", "zoomstart", "move", "zoomend", "moveend"]
        );
        assert_eq!(moves.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_set_view_rejects_invalid_coordinates() {
        let mut map = Map::new(LatLng::new(0.0, 0.0), 3.0, Point::new(800.0, 600.0));
        assert!(map.set_view(LatLng::new(120.0, 0.0), 3.0).is_err());
        assert!(map.process_events().is_empty());
    }

    #[test]
    fn test_pan_and_resize_emit_move() {
        let mut map = Map::new(LatLng::new(0.0, 0.0), 3.0, Point::new(800.0, 600.0));
        let moves = recorded(&mut map, "move");

        map.pan_by(Point::new(20.0, 0.0));
        map.set_size(Point::new(1024.0, 768.0));
        map.process_events();

        assert_eq!(moves.lock().unwrap().len(), 2);
        assert!(map.center().lng > 0.0);
        assert_eq!(map.size(), Point::new(1024.0, 768.0));
    }

    struct Counter {
        name: String,
        updates: Arc<Mutex<u32>>,
    }

    impl PluginTrait for Counter {
        fn name(&self) -> &str {
            &self.name
        }

        fn update(&mut self, _view: &dyn MapView, _now: Instant) -> Result<()> {
            *self.updates.lock().unwrap() += 1;
            Ok(())
        }
    }

    #[test]
    fn test_plugins_are_polled_on_update() {
        let mut map = Map::new(LatLng::new(0.0, 0.0), 3.0, Point::new(800.0, 600.0));
        let updates = Arc::new(Mutex::new(0));
        let plugin = Counter {
            name: "counter".to_string(),
            updates: updates.clone(),
        };
        map.add_plugin(Box::new(plugin)).unwrap();

        let duplicate = Counter {
            name: "counter".to_string(),
            updates: updates.clone(),
        };
        assert!(map.add_plugin(Box::new(duplicate)).is_err());

        map.update(Instant::now()).unwrap();
        map.update(Instant::now()).unwrap();
        assert_eq!(*updates.lock().unwrap(), 2);
        assert_eq!(map.plugin_names(), vec!["counter"]);

        assert!(map.remove_plugin("counter").is_ok());
        assert!(map.remove_plugin("counter").is_err());
    }
}
