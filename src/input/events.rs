use crate::core::geo::{LatLng, Point};
use serde::{Deserialize, Serialize};

/// Map event types that can be emitted by the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MapEvent {
    /// A pan or zoom is starting
    MoveStart { center: LatLng },
    /// The view is changing; fired for every intermediate step
    Move { center: LatLng, zoom: f64 },
    /// A pan or zoom has finished
    MoveEnd { center: LatLng },
    /// Zoom started
    ZoomStart { zoom: f64 },
    /// Zoom ended
    ZoomEnd { zoom: f64 },
    /// The container was resized
    Resize { size: Point },
}

impl MapEvent {
    /// The listener key this event is dispatched under
    pub fn event_type(&self) -> &'static str {
        match self {
            MapEvent::MoveStart { .. } => "movestart",
            MapEvent::Move { .. } => "move",
            MapEvent::MoveEnd { .. } => "moveend",
            MapEvent::ZoomStart { .. } => "zoomstart",
            MapEvent::ZoomEnd { .. } => "zoomend",
            MapEvent::Resize { .. } => "resize",
        }
    }

    /// Checks if this event reports a change of the visible area
    pub fn is_view_change(&self) -> bool {
        matches!(self, MapEvent::Move { .. } | MapEvent::Resize { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_names() {
        let center = LatLng::new(0.0, 0.0);
        assert_eq!(MapEvent::Move { center, zoom: 3.0 }.event_type(), "move");
        assert_eq!(MapEvent::MoveStart { center }.event_type(), "movestart");
        assert_eq!(MapEvent::MoveEnd { center }.event_type(), "moveend");
        assert_eq!(MapEvent::ZoomEnd { zoom: 3.0 }.event_type(), "zoomend");
    }

    #[test]
    fn test_view_change() {
        assert!(MapEvent::Resize {
            size: Point::new(10.0, 10.0)
        }
        .is_view_change());
        assert!(!MapEvent::ZoomStart { zoom: 1.0 }.is_view_change());
    }
}
