//! Text targets for the info panel next to the map
//!
//! The controller writes the matched marker's title and description into two
//! elements identified by id. Where those elements live is up to the host:
//! an in-process [`MemoryPanel`], or the page DOM through [`DomPanel`] when
//! built with the `wasm` feature.

use crate::{
    prelude::{Arc, HashMap, Mutex},
    MapError, Result,
};

pub trait InfoPanel {
    /// Replace the text content of the element with the given id
    ///
    /// Fails with [`MapError::MissingElement`] when no such element exists.
    fn set_text(&mut self, element_id: &str, text: &str) -> Result<()>;
}

/// In-process panel; clones share the same elements
#[derive(Debug, Clone, Default)]
pub struct MemoryPanel {
    elements: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryPanel {
    /// A panel with the given (empty) elements
    pub fn with_elements<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let elements = ids
            .into_iter()
            .map(|id| (id.into(), String::new()))
            .collect::<HashMap<_, _>>();
        Self {
            elements: Arc::new(Mutex::new(elements)),
        }
    }

    /// Current text of an element, if it exists
    pub fn text(&self, element_id: &str) -> Option<String> {
        self.elements
            .lock()
            .ok()
            .and_then(|elements| elements.get(element_id).cloned())
    }
}

impl InfoPanel for MemoryPanel {
    fn set_text(&mut self, element_id: &str, text: &str) -> Result<()> {
        let mut elements = self
            .elements
            .lock()
            .map_err(|_| MapError::Layer("info panel lock poisoned".to_string()))?;
        let element = elements
            .get_mut(element_id)
            .ok_or_else(|| MapError::MissingElement(element_id.to_string()))?;
        element.clear();
        element.push_str(text);
        Ok(())
    }
}

/// Panel backed by the page document
#[cfg(feature = "wasm")]
pub struct DomPanel {
    document: web_sys::Document,
}

#[cfg(feature = "wasm")]
impl DomPanel {
    /// Binds to the current window's document
    pub fn from_window() -> Result<Self> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| MapError::MissingDependency("window.document".to_string()))?;
        Ok(Self { document })
    }

    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }
}

#[cfg(feature = "wasm")]
impl InfoPanel for DomPanel {
    fn set_text(&mut self, element_id: &str, text: &str) -> Result<()> {
        let element = self
            .document
            .get_element_by_id(element_id)
            .ok_or_else(|| MapError::MissingElement(element_id.to_string()))?;
        element.set_text_content(Some(text));
        Ok(())
    }
}
