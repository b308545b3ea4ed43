//! Geographic and screen-space primitives

use serde::{Deserialize, Serialize};
use std::{
    f64::consts::PI,
    fmt,
    ops::{Add, Sub},
};

/// A WGS84 position in degrees
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// True for finite coordinates inside [-90, 90] x [-180, 180]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

/// A position in pixel space (container or world pixels)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance
    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// True when both axes differ by strictly less than `epsilon`
    pub fn approx_eq(&self, other: &Point, epsilon: f64) -> bool {
        (self.x - other.x).abs() < epsilon && (self.y - other.y).abs() < epsilon
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Spherical Web Mercator (EPSG:3857), projecting to meters
pub struct SphericalMercator;

impl SphericalMercator {
    pub const RADIUS: f64 = 6_378_137.0;
    pub const MAX_LATITUDE: f64 = 85.051_128_779_8;

    pub fn project(lat_lng: &LatLng) -> Point {
        let lat = lat_lng
            .lat
            .clamp(-Self::MAX_LATITUDE, Self::MAX_LATITUDE)
            .to_radians();
        let sin = lat.sin();
        Point::new(
            Self::RADIUS * lat_lng.lng.to_radians(),
            Self::RADIUS * ((1.0 + sin) / (1.0 - sin)).ln() / 2.0,
        )
    }

    pub fn unproject(point: &Point) -> LatLng {
        LatLng::new(
            (2.0 * (point.y / Self::RADIUS).exp().atan() - PI / 2.0).to_degrees(),
            (point.x / Self::RADIUS).to_degrees(),
        )
    }

    /// Maps projected meters onto a `[0, scale]` pixel square, y pointing down
    pub fn to_pixels(meters: &Point, scale: f64) -> Point {
        let k = 0.5 / (PI * Self::RADIUS);
        Point::new(
            scale * (k * meters.x + 0.5),
            scale * (-k * meters.y + 0.5),
        )
    }

    pub fn from_pixels(pixels: &Point, scale: f64) -> Point {
        let k = 0.5 / (PI * Self::RADIUS);
        Point::new(
            (pixels.x / scale - 0.5) / k,
            (pixels.y / scale - 0.5) / -k,
        )
    }
}

/// A lat/lng rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    pub fn contains(&self, lat_lng: &LatLng) -> bool {
        (self.south_west.lat..=self.north_east.lat).contains(&lat_lng.lat)
            && (self.south_west.lng..=self.north_east.lng).contains(&lat_lng.lng)
    }

    /// Grows the rectangle to cover `lat_lng`
    pub fn extend(&mut self, lat_lng: &LatLng) {
        self.south_west = LatLng::new(
            self.south_west.lat.min(lat_lng.lat),
            self.south_west.lng.min(lat_lng.lng),
        );
        self.north_east = LatLng::new(
            self.north_east.lat.max(lat_lng.lat),
            self.north_east.lng.max(lat_lng.lng),
        );
    }
}
