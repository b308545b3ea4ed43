//! Prelude module for common center-popup types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use center_popup::prelude::*;`

pub use crate::core::{
    builder::MapBuilder,
    config::{CenterPopupConfig, CloseScope},
    geo::{LatLng, LatLngBounds, Point},
    map::Map,
    viewport::Viewport,
};

pub use crate::layers::{
    base::Layer,
    group::{LayerGroup, SharedLayerGroup},
    marker::{Marker, MarkerData, MarkerKind},
};

pub use crate::input::{
    events::MapEvent,
    handler::{EventManager, ListenerId},
};

pub use crate::plugins::{
    base::PluginTrait,
    center_popup::{CenterPopupBuilder, CenterPopupController, Recompute, SuppressionHandle},
};

pub use crate::runtime::Debouncer;

pub use crate::traits::{Configurable, MapView};

pub use crate::ui::{InfoPanel, MemoryPanel, Popup};

pub use crate::{Error as MapError, Result};

pub use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, RwLock},
    time::Duration,
};

pub use instant::Instant;

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
