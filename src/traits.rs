//! Shared trait abstractions
//!
//! The seams between the controller and whatever hosts it: the map view it
//! projects through, the layers it scans and the configuration it carries.

use crate::{
    core::geo::{LatLng, LatLngBounds, Point},
    layers::base::{LayerProperties, LayerType},
    Result,
};

/// Read access to a map's screen geometry
///
/// This is everything the center-popup logic needs from a map: the
/// container size and a lat/lng to container-point projection.
pub trait MapView {
    /// Container size in pixels
    fn size(&self) -> Point;

    /// Project a geographic coordinate into container pixel space
    fn lat_lng_to_container_point(&self, lat_lng: &LatLng) -> Point;
}

impl<T: MapView + ?Sized> MapView for &T {
    fn size(&self) -> Point {
        (**self).size()
    }

    fn lat_lng_to_container_point(&self, lat_lng: &LatLng) -> Point {
        (**self).lat_lng_to_container_point(lat_lng)
    }
}

/// Trait for configurable components
pub trait Configurable {
    type Config: Clone;

    /// Get the current configuration
    fn config(&self) -> &Self::Config;

    /// Set new configuration
    fn set_config(&mut self, config: Self::Config) -> Result<()>;

    /// Validate configuration
    fn validate_config(config: &Self::Config) -> Result<()> {
        let _ = config;
        Ok(())
    }

    /// Update configuration with a partial change
    fn update_config<F>(&mut self, updater: F) -> Result<()>
    where
        F: FnOnce(&mut Self::Config),
    {
        let mut config = self.config().clone();
        updater(&mut config);
        Self::validate_config(&config)?;
        self.set_config(config)
    }
}

/// Anything that can be held by a layer group
pub trait Layer: Send + Sync {
    fn properties(&self) -> &LayerProperties;

    fn id(&self) -> &str {
        &self.properties().id
    }

    fn layer_type(&self) -> LayerType {
        self.properties().layer_type
    }

    /// Geographic extent, if the layer has one
    fn bounds(&self) -> Option<LatLngBounds> {
        None
    }

    /// JSON description used in trace logs
    fn summary(&self) -> serde_json::Value;
}
