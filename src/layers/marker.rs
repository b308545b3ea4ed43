use crate::{
    core::geo::{LatLng, LatLngBounds},
    layers::base::{Layer, LayerProperties, LayerType},
    ui::popup::Popup,
};
use serde::{Deserialize, Serialize};

/// What a marker is drawn as; fixed when the marker is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    CircleMarker,
    Marker,
    Other,
}

impl MarkerKind {
    /// Circle markers and plain markers both count as point markers
    pub fn is_point_marker(self) -> bool {
        matches!(self, MarkerKind::CircleMarker | MarkerKind::Marker)
    }
}

/// Text shown in the info panel for a marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerData {
    #[serde(alias = "title")]
    pub marker_title: String,
    #[serde(alias = "description")]
    pub marker_description: String,
}

impl MarkerData {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            marker_title: title.into(),
            marker_description: description.into(),
        }
    }
}

pub struct Marker {
    properties: LayerProperties,
    kind: MarkerKind,
    position: Option<LatLng>,
    data: Option<MarkerData>,
    popup: Popup,
}

impl Marker {
    pub fn new(id: impl Into<String>, kind: MarkerKind, position: LatLng) -> Self {
        let mut marker = Self::without_position(id, kind);
        marker.position = Some(position);
        marker
    }

    pub fn circle(id: impl Into<String>, position: LatLng) -> Self {
        Self::new(id, MarkerKind::CircleMarker, position)
    }

    pub fn point(id: impl Into<String>, position: LatLng) -> Self {
        Self::new(id, MarkerKind::Marker, position)
    }

    /// A marker whose coordinates are not known (yet)
    pub fn without_position(id: impl Into<String>, kind: MarkerKind) -> Self {
        let properties = LayerProperties::new(id, LayerType::Marker);
        Self {
            properties,
            kind,
            position: None,
            data: None,
            popup: Popup::new(),
        }
    }

    pub fn with_data(mut self, data: MarkerData) -> Self {
        self.popup.content = Some(data.marker_title.clone());
        self.data = Some(data);
        self
    }

    pub fn kind(&self) -> MarkerKind {
        self.kind
    }

    pub fn position(&self) -> Option<LatLng> {
        self.position
    }

    pub fn data(&self) -> Option<&MarkerData> {
        self.data.as_ref()
    }

    pub fn set_data(&mut self, data: Option<MarkerData>) {
        self.popup.content = data.as_ref().map(|data| data.marker_title.clone());
        self.data = data;
    }

    pub fn popup(&self) -> &Popup {
        &self.popup
    }

    pub fn open_popup(&mut self) {
        self.popup.show();
    }

    pub fn close_popup(&mut self) {
        self.popup.hide();
    }

    pub fn is_popup_open(&self) -> bool {
        self.popup.is_visible()
    }
}

impl std::fmt::Debug for Marker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Marker")
            .field("id", &self.properties.id)
            .field("kind", &self.kind)
            .field("position", &self.position)
            .field("popup_open", &self.popup.is_visible())
            .finish()
    }
}

impl Layer for Marker {
    crate::impl_layer_properties!(properties);

    fn summary(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.properties.id,
            "kind": self.kind,
            "position": self.position,
            "data": self.data,
        })
    }

    fn bounds(&self) -> Option<LatLngBounds> {
        self.position
            .map(|position| LatLngBounds::new(position, position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_marker_kinds() {
        assert!(MarkerKind::CircleMarker.is_point_marker());
        assert!(MarkerKind::Marker.is_point_marker());
        assert!(!MarkerKind::Other.is_point_marker());
    }

    #[test]
    fn test_marker_popup_toggle() {
        let mut marker = Marker::circle("a", LatLng::new(1.0, 2.0))
            .with_data(MarkerData::new("Title", "Description"));
        assert_eq!(marker.id(), "a");
        assert_eq!(marker.kind(), MarkerKind::CircleMarker);
        assert!(!marker.is_popup_open());

        marker.open_popup();
        assert!(marker.is_popup_open());
        marker.close_popup();
        assert!(!marker.is_popup_open());
        assert_eq!(marker.popup().content.as_deref(), Some("Title"));
    }

    #[test]
    fn test_marker_without_position_has_no_bounds() {
        let marker = Marker::without_position("ghost", MarkerKind::Marker);
        assert!(marker.position().is_none());
        assert!(marker.bounds().is_none());
        assert!(marker.data().is_none());
    }

    #[test]
    fn test_marker_data_accepts_both_field_spellings() {
        let camel: MarkerData =
            serde_json::from_str(r#"{"markerTitle": "T", "markerDescription": "D"}"#).unwrap();
        let short: MarkerData =
            serde_json::from_str(r#"{"title": "T", "description": "D"}"#).unwrap();
        assert_eq!(camel, short);
        assert_eq!(camel, MarkerData::new("T", "D"));
    }

    #[test]
    fn test_summary_json() {
        let mut marker = Marker::point("p", LatLng::new(3.0, 4.0));
        let summary = marker.summary();
        assert_eq!(summary["id"], "p");
        assert_eq!(summary["kind"], "marker");
        assert_eq!(summary["position"]["lat"], 3.0);
        assert!(summary["data"].is_null());

        marker.set_data(Some(MarkerData::new("T", "D")));
        assert_eq!(marker.popup().content.as_deref(), Some("T"));
        assert_eq!(marker.summary()["data"]["markerTitle"], "T");
    }
}
