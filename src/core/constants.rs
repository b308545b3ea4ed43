//! Engine-wide defaults; most mirror Leaflet or the center-popup behaviour.

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Delay between the last `move` event and the recompute it triggers.
pub const DEFAULT_DEBOUNCE_DELAY_MS: u64 = 5;

/// Maximum pixel distance between the anchor and the nearest marker
/// for popup logic to activate.
pub const DEFAULT_CENTER_POPUP_TOLERANCE: f64 = 100.0;

/// Vertical shift of the anchor below the true viewport center (UI chrome).
pub const DEFAULT_ANCHOR_OFFSET_Y: f64 = 50.0;

/// Per-axis tolerance when matching two projected container points.
pub const DEFAULT_MATCH_EPSILON: f64 = 1e-6;

/// Element receiving the matched marker's title.
pub const TITLE_ELEMENT_ID: &str = "title-text";

/// Element receiving the matched marker's description.
pub const DESCRIPTION_ELEMENT_ID: &str = "description-text";
