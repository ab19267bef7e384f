use crate::{
    core::{geo::LatLngBounds, map::Map},
    tiles::source::TileSource,
    Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerType {
    Tile,
    Custom,
}

impl std::fmt::Display for LayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerType::Tile => write!(f, "tile"),
            LayerType::Custom => write!(f, "custom"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LayerProperties {
    pub id: String,
    pub name: String,
    pub layer_type: LayerType,
    pub z_index: i32,
    pub opacity: f32,
    pub visible: bool,
}

impl LayerProperties {
    pub fn new(id: String, name: String, layer_type: LayerType) -> Self {
        Self {
            id,
            name,
            layer_type,
            z_index: 0,
            opacity: 1.0,
            visible: true,
        }
    }
}

impl Default for LayerProperties {
    fn default() -> Self {
        Self::new(
            "default".to_string(),
            "Default Layer".to_string(),
            LayerType::Custom,
        )
    }
}

/// Operations every map layer exposes to the host map
pub trait LayerTrait: Send + Sync {
    /// Get layer ID
    fn id(&self) -> &str;

    /// Get layer name
    fn name(&self) -> &str;

    /// Get layer type
    fn layer_type(&self) -> LayerType;

    /// Check if layer is visible
    fn is_visible(&self) -> bool;

    /// Set layer visibility
    fn set_visible(&mut self, visible: bool);

    /// Get layer opacity (0.0 to 1.0)
    fn opacity(&self) -> f32;

    /// Set layer opacity
    fn set_opacity(&mut self, opacity: f32);

    /// Get layer z-index for ordering
    fn z_index(&self) -> i32;

    /// Set layer z-index
    fn set_z_index(&mut self, z_index: i32);

    /// Called by the map right before the layer joins it
    fn on_add(&mut self, _map: &Map) -> Result<()> {
        Ok(())
    }

    /// Called by the map right after the layer left it
    fn on_remove(&mut self, _map: &Map) -> Result<()> {
        Ok(())
    }

    /// Get layer bounds if applicable
    fn bounds(&self) -> Option<LatLngBounds> {
        None
    }

    /// Attribution text shown by the map for this layer
    fn attribution(&self) -> Option<&str> {
        None
    }

    /// Serialized layer options
    fn options(&self) -> serde_json::Value {
        serde_json::Value::Null
    }

    /// Tile URL resolution hook, for layers that draw tiles
    fn as_tile_source(&self) -> Option<&dyn TileSource> {
        None
    }

    fn as_any(&self) -> &dyn std::any::Any;

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PlainLayer {
        properties: LayerProperties,
    }

    impl LayerTrait for PlainLayer {
        crate::impl_layer_trait!(PlainLayer, properties);
    }

    #[test]
    fn test_layer_properties() {
        let props = LayerProperties::new("test".to_string(), "Test Layer".to_string(), LayerType::Tile);

        assert_eq!(props.id, "test");
        assert_eq!(props.name, "Test Layer");
        assert_eq!(props.layer_type, LayerType::Tile);
        assert_eq!(props.z_index, 0);
        assert_eq!(props.opacity, 1.0);
        assert!(props.visible);
    }

    #[test]
    fn test_layer_defaults() {
        let mut layer = PlainLayer {
            properties: LayerProperties::default(),
        };

        assert_eq!(layer.id(), "default");
        assert!(layer.as_tile_source().is_none());
        assert!(layer.attribution().is_none());

        layer.set_opacity(1.5);
        assert_eq!(layer.opacity(), 1.0);

        layer.set_visible(false);
        assert!(!layer.is_visible());
    }

    #[test]
    fn test_layer_type_display() {
        assert_eq!(LayerType::Tile.to_string(), "tile");
        assert_eq!(LayerType::Custom.to_string(), "custom");
    }
}
