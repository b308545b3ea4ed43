pub mod base;
pub mod center_popup;

pub use base::PluginTrait;
pub use center_popup::{CenterPopupBuilder, CenterPopupController, Recompute, SuppressionHandle};
