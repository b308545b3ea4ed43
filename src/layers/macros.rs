//! Boilerplate for layer implementations

/// Implements the [`Layer`](crate::traits::Layer) accessors for a type that
/// keeps its [`LayerProperties`](crate::layers::base::LayerProperties) in a field
///
/// ```ignore
/// impl Layer for MyLayer {
///     center_popup::impl_layer_properties!(properties);
///
///     fn summary(&self) -> serde_json::Value { ... }
/// }
/// ```
#[macro_export]
macro_rules! impl_layer_properties {
    ($field:ident) => {
        fn properties(&self) -> &$crate::layers::base::LayerProperties {
            &self.$field
        }
    };
}
