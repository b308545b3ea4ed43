use crate::core::constants::TILE_SIZE;
use crate::core::geo::{LatLng, LatLngBounds, Point, SphericalMercator};
use crate::traits::MapView;
use serde::{Deserialize, Serialize};

const DEFAULT_MAX_ZOOM: f64 = 18.0;

/// The visible part of the map: center, zoom and container size
///
/// Container points are measured from the top-left corner of the map
/// container. They are derived from world pixels through a rounded pixel
/// origin, the way Leaflet lays out its panes, so a marker's container point
/// only moves when the view does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: f64,
    /// Container size in pixels
    pub size: Point,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// World pixel shown at the container's top-left corner
    pixel_origin: Point,
}

impl Viewport {
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        let mut viewport = Self {
            center,
            zoom: zoom.clamp(0.0, DEFAULT_MAX_ZOOM),
            size,
            min_zoom: 0.0,
            max_zoom: DEFAULT_MAX_ZOOM,
            pixel_origin: Point::default(),
        };
        viewport.reset_pixel_origin();
        viewport
    }

    /// Moves the center, clamped to what the projection can show
    pub fn set_center(&mut self, center: LatLng) {
        self.center = LatLng::new(
            center
                .lat
                .clamp(-SphericalMercator::MAX_LATITUDE, SphericalMercator::MAX_LATITUDE),
            center.lng.clamp(-180.0, 180.0),
        );
        self.reset_pixel_origin();
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        self.reset_pixel_origin();
    }

    pub fn set_size(&mut self, size: Point) {
        self.size = size;
        self.reset_pixel_origin();
    }

    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.set_zoom(self.zoom);
    }

    fn scale(&self) -> f64 {
        TILE_SIZE as f64 * 2_f64.powf(self.zoom)
    }

    /// World pixel coordinates of `lat_lng` at the current zoom
    pub fn project(&self, lat_lng: &LatLng) -> Point {
        SphericalMercator::to_pixels(&SphericalMercator::project(lat_lng), self.scale())
    }

    pub fn unproject(&self, pixel: &Point) -> LatLng {
        SphericalMercator::unproject(&SphericalMercator::from_pixels(pixel, self.scale()))
    }

    fn reset_pixel_origin(&mut self) {
        let half = Point::new(self.size.x / 2.0, self.size.y / 2.0);
        let origin = self.project(&self.center) - half;
        self.pixel_origin = Point::new(origin.x.round(), origin.y.round());
    }

    pub fn pixel_origin(&self) -> Point {
        self.pixel_origin
    }

    pub fn lat_lng_to_container_point(&self, lat_lng: &LatLng) -> Point {
        self.project(lat_lng) - self.pixel_origin
    }

    pub fn container_point_to_lat_lng(&self, point: &Point) -> LatLng {
        self.unproject(&(*point + self.pixel_origin))
    }

    /// Shifts the view by `delta` pixels and returns the shift actually applied
    ///
    /// A positive x pans east, so markers move left on screen.
    pub fn pan(&mut self, delta: Point) -> Point {
        let before = self.project(&self.center);
        self.set_center(self.unproject(&(before + delta)));
        self.project(&self.center) - before
    }

    /// The lat/lng rectangle covered by the container
    pub fn bounds(&self) -> LatLngBounds {
        let north_west = self.container_point_to_lat_lng(&Point::default());
        let south_east = self.container_point_to_lat_lng(&self.size);
        LatLngBounds::new(
            LatLng::new(south_east.lat, north_west.lng),
            LatLng::new(north_west.lat, south_east.lng),
        )
    }
}

impl MapView for Viewport {
    fn size(&self) -> Point {
        self.size
    }

    fn lat_lng_to_container_point(&self, lat_lng: &LatLng) -> Point {
        Viewport::lat_lng_to_container_point(self, lat_lng)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(LatLng::default(), 0.0, Point::new(800.0, 600.0))
    }
}
