pub mod panel;
pub mod popup;

#[cfg(feature = "wasm")]
pub use panel::DomPanel;
pub use panel::{InfoPanel, MemoryPanel};

pub use popup::Popup;
