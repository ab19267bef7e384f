use crate::{
    core::{crs::Crs, geo::TileCoord},
    layers::{base::LayerTrait, manager::LayerManager},
    tiles::TileSource,
    Result,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapOptions {
    pub crs: Crs,
    pub attribution_control: bool,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            crs: Crs::Epsg3857,
            attribution_control: true,
        }
    }
}

/// Host map: owns the layers and drives their attach/detach lifecycle
pub struct Map {
    options: MapOptions,
    layer_manager: LayerManager,
}

impl Map {
    pub fn new(options: MapOptions) -> Self {
        Self {
            options,
            layer_manager: LayerManager::new(),
        }
    }

    pub fn with_crs(mut self, crs: Crs) -> Self {
        self.options.crs = crs;
        self
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    pub fn crs(&self) -> Crs {
        self.options.crs
    }

    /// Attaches a layer: runs its `on_add` hook, then stores it. A layer
    /// already stored under the same id is detached and dropped.
    pub fn add_layer(&mut self, mut layer: Box<dyn LayerTrait>) -> Result<()> {
        layer.on_add(self)?;

        #[cfg(feature = "debug")]
        log::debug!("Added layer '{}' ({})", layer.id(), layer.layer_type());

        if let Some(mut replaced) = self.layer_manager.add_layer(layer) {
            replaced.on_remove(self)?;

            #[cfg(feature = "debug")]
            log::debug!("Replaced layer '{}'", replaced.id());
        }
        Ok(())
    }

    /// Detaches a layer and runs its `on_remove` hook
    pub fn remove_layer(&mut self, layer_id: &str) -> Result<Option<Box<dyn LayerTrait>>> {
        let Some(mut layer) = self.layer_manager.remove_layer(layer_id) else {
            return Ok(None);
        };
        layer.on_remove(self)?;

        #[cfg(feature = "debug")]
        log::debug!("Removed layer '{}'", layer_id);

        Ok(Some(layer))
    }

    pub fn get_layer(&self, layer_id: &str) -> Option<&dyn LayerTrait> {
        self.layer_manager.get_layer(layer_id)
    }

    pub fn has_layer(&self, layer_id: &str) -> bool {
        self.layer_manager.get_layer(layer_id).is_some()
    }

    pub fn layers(&self) -> Vec<&dyn LayerTrait> {
        self.layer_manager.layers()
    }

    /// Asks a tile layer for the request URL of one tile.
    /// Returns `Ok(None)` if the layer does not exist or draws no tiles.
    pub fn tile_url(&self, layer_id: &str, coord: TileCoord) -> Result<Option<String>> {
        match self
            .layer_manager
            .get_layer(layer_id)
            .and_then(|layer| layer.as_tile_source())
        {
            Some(source) => source.url(coord).map(Some),
            None => Ok(None),
        }
    }

    /// Attributions of all visible layers, in render order
    pub fn attributions(&self) -> Vec<String> {
        if !self.options.attribution_control {
            return Vec::new();
        }
        self.layer_manager
            .layers()
            .into_iter()
            .filter(|layer| layer.is_visible())
            .filter_map(|layer| layer.attribution().map(str::to_string))
            .collect()
    }
}

impl Default for Map {
    fn default() -> Self {
        Self::new(MapOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::base::{LayerProperties, LayerType};
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    struct CountingLayer {
        properties: LayerProperties,
        removals: Arc<AtomicUsize>,
    }

    impl CountingLayer {
        fn boxed(id: &str, removals: &Arc<AtomicUsize>) -> Box<dyn LayerTrait> {
            Box::new(Self {
                properties: LayerProperties::new(id.to_string(), id.to_string(), LayerType::Custom),
                removals: Arc::clone(removals),
            })
        }
    }

    impl LayerTrait for CountingLayer {
        crate::impl_layer_trait!(CountingLayer, properties);

        fn on_remove(&mut self, _map: &Map) -> Result<()> {
            self.removals.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_map_defaults() {
        let map = Map::default();
        assert_eq!(map.crs(), Crs::Epsg3857);
        assert!(map.layers().is_empty());
        assert!(map.attributions().is_empty());
    }

    #[test]
    fn test_same_id_detaches_replaced_layer() {
        let removals = Arc::new(AtomicUsize::new(0));
        let mut map = Map::default();

        map.add_layer(CountingLayer::boxed("a", &removals)).unwrap();
        map.add_layer(CountingLayer::boxed("b", &removals)).unwrap();
        assert_eq!(removals.load(Ordering::SeqCst), 0);

        map.add_layer(CountingLayer::boxed("a", &removals)).unwrap();
        assert_eq!(removals.load(Ordering::SeqCst), 1);
        assert_eq!(map.layers().len(), 2);
    }

    #[test]
    fn test_unknown_layer_has_no_tile_url() {
        let mut map = Map::default();
        assert!(map.tile_url("missing", TileCoord::new(0, 0, 0)).unwrap().is_none());
        assert!(map.remove_layer("missing").unwrap().is_none());
        assert!(!map.has_layer("missing"));
    }
}
