pub mod base;
pub mod group;
pub mod macros;
pub mod marker;

pub use base::{Layer, LayerProperties, LayerType};
pub use group::{LayerGroup, SharedLayerGroup};
pub use marker::{Marker, MarkerData, MarkerKind};
