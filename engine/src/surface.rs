use std::collections::{BTreeMap, BTreeSet};

use geo_types::LineString;

/// Fixed visual style for a rendered path.
#[derive(Clone, Debug, PartialEq)]
pub struct PathStyle {
    pub color: String,
    pub weight: f64,
    pub opacity: f64,
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            color: "#3388ff".to_string(),
            weight: 4.0,
            opacity: 0.8,
        }
    }
}

/// The seam to the external map renderer. The engine only ever creates named path
/// objects, rewrites their coordinates in place, removes them, and toggles static
/// layers; everything visual beyond that belongs to the implementation.
pub trait RenderSurface {
    type Handle;

    fn add_path(&mut self, name: &str, points: &LineString<f64>, style: &PathStyle)
        -> Self::Handle;
    fn update_path(&mut self, handle: &Self::Handle, points: &LineString<f64>);
    fn remove_path(&mut self, handle: Self::Handle);

    fn add_layer(&mut self, name: &str);
    fn remove_layer(&mut self, name: &str);
}

/// An in-memory surface that just records what it was told. Backs the headless binary
/// and the tests.
#[derive(Default)]
pub struct RecordingSurface {
    next_id: usize,
    pub paths: BTreeMap<usize, RecordedPath>,
    pub layers: BTreeSet<String>,
    pub adds: usize,
    pub updates: usize,
    pub removes: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecordedPath {
    pub name: String,
    pub points: LineString<f64>,
    pub style: PathStyle,
}

impl RenderSurface for RecordingSurface {
    type Handle = usize;

    fn add_path(&mut self, name: &str, points: &LineString<f64>, style: &PathStyle) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        self.paths.insert(
            id,
            RecordedPath {
                name: name.to_string(),
                points: points.clone(),
                style: style.clone(),
            },
        );
        self.adds += 1;
        id
    }

    fn update_path(&mut self, handle: &usize, points: &LineString<f64>) {
        if let Some(path) = self.paths.get_mut(handle) {
            path.points = points.clone();
        }
        self.updates += 1;
    }

    fn remove_path(&mut self, handle: usize) {
        self.paths.remove(&handle);
        self.removes += 1;
    }

    fn add_layer(&mut self, name: &str) {
        self.layers.insert(name.to_string());
    }

    fn remove_layer(&mut self, name: &str) {
        self.layers.remove(name);
    }
}
