use crate::{core::map::Map, traits::MapView, Result};
use instant::Instant;

/// Behaviour installed into a [`Map`]
///
/// `on_add` is the place to register event listeners; `update` runs once per
/// map tick, after queued events were dispatched.
pub trait PluginTrait {
    fn name(&self) -> &str;
    fn on_add(&mut self, _map: &mut Map) -> Result<()> {
        Ok(())
    }
    fn on_remove(&mut self, _map: &mut Map) -> Result<()> {
        Ok(())
    }
    fn update(&mut self, _view: &dyn MapView, _now: Instant) -> Result<()> {
        Ok(())
    }
}
