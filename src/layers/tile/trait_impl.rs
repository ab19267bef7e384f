//! LayerTrait implementation for TileLayer

use super::TileLayer;
use crate::{
    core::{geo::LatLngBounds, map::Map},
    layers::base::LayerTrait,
    Result,
};

impl LayerTrait for TileLayer {
    crate::impl_layer_trait!(TileLayer, properties);

    fn on_add(&mut self, map: &Map) -> Result<()> {
        self.attach(map);
        Ok(())
    }

    fn on_remove(&mut self, _map: &Map) -> Result<()> {
        self.detach();
        Ok(())
    }

    fn bounds(&self) -> Option<LatLngBounds> {
        self.options.bounds.clone()
    }

    fn attribution(&self) -> Option<&str> {
        self.options.attribution.as_deref()
    }

    fn options(&self) -> serde_json::Value {
        serde_json::to_value(&self.options).unwrap_or(serde_json::Value::Null)
    }
}
