//! # center-popup
//!
//! Keeps an informational popup open for whichever marker sits nearest a
//! fixed on-screen anchor while a map moves.
//!
//! The crate carries a small Leaflet-style map model (viewport projection,
//! move events, marker layer groups) and the [`CenterPopupController`] that
//! listens to it. Hosts either install the controller as a map plugin and
//! drive [`Map::update`] from their frame loop, or feed move events and
//! polls to it directly.

pub mod core;
pub mod input;
pub mod layers;
pub mod plugins;
pub mod prelude;
pub mod runtime;
pub mod traits;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    builder::MapBuilder,
    config::{CenterPopupConfig, CloseScope},
    geo::{LatLng, LatLngBounds, Point},
    map::Map,
    viewport::Viewport,
};

pub use crate::layers::{
    group::{LayerGroup, SharedLayerGroup},
    marker::{Marker, MarkerData, MarkerKind},
};

pub use crate::input::events::MapEvent;

pub use crate::ui::{panel::InfoPanel, panel::MemoryPanel, popup::Popup};

pub use crate::plugins::{
    base::PluginTrait,
    center_popup::{CenterPopupBuilder, CenterPopupController, Recompute, SuppressionHandle},
};

pub use crate::traits::{Configurable, Layer, MapView};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Missing dependency: {0}")]
    MissingDependency(String),

    #[error("Missing element: #{0}")]
    MissingElement(String),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Plugin error: {0}")]
    Plugin(String),
}

/// Error type alias for convenience
pub type Error = MapError;
