//! Map builder for fluent API configuration

use crate::{
    core::{
        geo::{LatLng, Point},
        map::Map,
        viewport::Viewport,
    },
    plugins::base::PluginTrait,
    MapError, Result,
};

/// Builder for creating and configuring Map instances
pub struct MapBuilder {
    center: LatLng,
    zoom: f64,
    size: Point,
    min_zoom: Option<f64>,
    max_zoom: Option<f64>,
    plugins: Vec<Box<dyn PluginTrait>>,
}

impl MapBuilder {
    /// Create a new MapBuilder with default settings
    pub fn new() -> Self {
        let viewport = Viewport::default();
        Self {
            center: viewport.center,
            zoom: viewport.zoom,
            size: viewport.size,
            min_zoom: None,
            max_zoom: None,
            plugins: Vec::new(),
        }
    }

    /// Set the initial center and zoom level
    pub fn with_center_and_zoom(mut self, center: LatLng, zoom: f64) -> Self {
        self.center = center;
        self.zoom = zoom;
        self
    }

    /// Set the container size in pixels
    pub fn with_size(mut self, size: Point) -> Self {
        self.size = size;
        self
    }

    /// Set zoom level constraints
    pub fn with_zoom_limits(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.min_zoom = Some(min_zoom);
        self.max_zoom = Some(max_zoom);
        self
    }

    /// Install a plugin once the map is built
    pub fn with_plugin(mut self, plugin: impl PluginTrait + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Build the map
    pub fn build(self) -> Result<Map> {
        if !self.center.is_valid() {
            return Err(MapError::InvalidCoordinates(format!(
                "{}, {}",
                self.center.lat, self.center.lng
            )));
        }
        if self.size.x <= 0.0 || self.size.y <= 0.0 {
            return Err(MapError::InvalidConfig(format!(
                "map size must be positive, got {}x{}",
                self.size.x, self.size.y
            )));
        }

        let mut viewport = Viewport::new(self.center, self.zoom, self.size);
        if let (Some(min_zoom), Some(max_zoom)) = (self.min_zoom, self.max_zoom) {
            viewport.set_zoom_limits(min_zoom, max_zoom);
        }

        let mut map = Map::with_viewport(viewport);
        for plugin in self.plugins {
            map.add_plugin(plugin)?;
        }
        Ok(map)
    }
}

impl Default for MapBuilder {
    fn default() -> Self {
        Self::new()
    }
}
