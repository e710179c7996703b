use feed::{GeometryLayer, LayerRole};

/// Owns the loaded geometry layers. Contents are only ever replaced wholesale; the
/// generation counter is the explicit "geometry set changed" signal consumers poll to
/// decide when to rebuild derived state like the route index.
pub struct GeometryStore {
    layers: Vec<GeometryLayer>,
    generation: u64,
}

impl GeometryStore {
    pub fn new() -> Self {
        Self {
            layers: Vec::new(),
            generation: 0,
        }
    }

    pub fn set_layers(&mut self, layers: Vec<GeometryLayer>) {
        self.layers = layers;
        self.generation += 1;
    }

    pub fn layers(&self) -> &[GeometryLayer] {
        &self.layers
    }

    pub fn route_line_layers(&self) -> impl Iterator<Item = &GeometryLayer> {
        self.layers
            .iter()
            .filter(|layer| layer.role == LayerRole::RouteLines)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Default for GeometryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replacing_layers_bumps_the_generation() {
        let mut store = GeometryStore::new();
        assert_eq!(store.generation(), 0);

        store.set_layers(vec![GeometryLayer {
            name: "routes".to_string(),
            role: LayerRole::RouteLines,
            features: Vec::new(),
        }]);
        assert_eq!(store.generation(), 1);
        assert_eq!(store.layers().len(), 1);

        store.set_layers(Vec::new());
        assert_eq!(store.generation(), 2);
        assert!(store.layers().is_empty());
    }
}
