use crate::{
    core::geo::LatLngBounds,
    layers::{
        base::{Layer, LayerProperties, LayerType},
        marker::Marker,
    },
    prelude::{Arc, HashMap, RwLock},
    MapError, Result,
};

/// A layer group shared between the host application and the controller
pub type SharedLayerGroup = Arc<RwLock<LayerGroup>>;

/// An ordered collection of markers
///
/// Iteration follows insertion order; that order decides ties when several
/// markers sit at the same distance from the anchor.
pub struct LayerGroup {
    properties: LayerProperties,
    /// All markers indexed by ID
    markers: HashMap<String, Marker>,
    /// Marker IDs in insertion order
    order: Vec<String>,
}

impl LayerGroup {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            properties: LayerProperties::new(id, LayerType::Group),
            markers: HashMap::default(),
            order: Vec::new(),
        }
    }

    /// Wraps the group for sharing with a controller
    pub fn shared(self) -> SharedLayerGroup {
        Arc::new(RwLock::new(self))
    }

    /// Adds a marker; re-adding an existing ID replaces it in place
    pub fn add_layer(&mut self, marker: Marker) {
        log::trace!("group '{}' <- {}", self.properties.id, marker.summary());
        let id = marker.id().to_string();
        if self.markers.insert(id.clone(), marker).is_none() {
            self.order.push(id);
        }
    }

    pub fn with_layer(mut self, marker: Marker) -> Self {
        self.add_layer(marker);
        self
    }

    /// Removes a marker from the group
    pub fn remove_layer(&mut self, id: &str) -> Result<Marker> {
        let marker = self
            .markers
            .remove(id)
            .ok_or_else(|| MapError::Layer(format!("no layer '{id}' in group '{}'", self.id())))?;
        self.order.retain(|existing| existing != id);
        Ok(marker)
    }

    pub fn get(&self, id: &str) -> Option<&Marker> {
        self.markers.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Marker> {
        self.markers.get_mut(id)
    }

    /// Applies a function to each marker in insertion order
    pub fn each_layer<F>(&self, mut f: F)
    where
        F: FnMut(&Marker),
    {
        for id in &self.order {
            if let Some(marker) = self.markers.get(id) {
                f(marker);
            }
        }
    }

    /// Applies a function to each marker mutably in insertion order
    pub fn each_layer_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Marker),
    {
        for id in &self.order {
            if let Some(marker) = self.markers.get_mut(id) {
                f(marker);
            }
        }
    }

    /// IDs of markers whose popup is currently open
    pub fn open_popups(&self) -> Vec<String> {
        let mut open = Vec::new();
        self.each_layer(|marker| {
            if marker.is_popup_open() {
                open.push(marker.id().to_string());
            }
        });
        open
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

impl Layer for LayerGroup {
    crate::impl_layer_properties!(properties);

    fn summary(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.properties.id,
            "layers": self.order,
        })
    }

    fn bounds(&self) -> Option<LatLngBounds> {
        let mut bounds: Option<LatLngBounds> = None;
        self.each_layer(|marker| {
            if let Some(position) = marker.position() {
                match bounds.as_mut() {
                    Some(bounds) => bounds.extend(&position),
                    None => bounds = Some(LatLngBounds::new(position, position)),
                }
            }
        });
        bounds
    }
}
