use anyhow::Result;
use geojson::GeoJson;
use serde_json::{Map, Value};

/// What a named geometry layer is for, guessed from its name. Only route lines feed the
/// route index; the other roles are just rendered as static layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerRole {
    RouteLines,
    ServiceArea,
    PointsOfInterest,
}

impl LayerRole {
    /// Name-based heuristic. GIS exports name their polygon and stop layers distinctively;
    /// anything unrecognized is treated as route lines.
    pub fn from_name(name: &str) -> Self {
        let name = name.to_lowercase();
        for keyword in ["area", "zone", "boundary", "region"] {
            if name.contains(keyword) {
                return Self::ServiceArea;
            }
        }
        for keyword in ["stop", "station", "poi", "landmark", "point"] {
            if name.contains(keyword) {
                return Self::PointsOfInterest;
            }
        }
        Self::RouteLines
    }
}

/// One feature of a layer: its raw properties and its geometry.
#[derive(Clone, Debug)]
pub struct LayerFeature {
    pub properties: Map<String, Value>,
    pub geometry: geo_types::Geometry<f64>,
}

/// A named collection of geometries, immutable once loaded.
#[derive(Clone, Debug)]
pub struct GeometryLayer {
    pub name: String,
    pub role: LayerRole,
    pub features: Vec<LayerFeature>,
}

/// Parses one named GeoJSON layer. Features with missing or unconvertible geometry are
/// individually skipped; an unparseable document fails the whole load.
pub fn load<R: std::io::Read>(name: &str, reader: R) -> Result<GeometryLayer> {
    let gj: GeoJson = serde_json::from_reader(reader)?;
    let collection = match gj {
        GeoJson::FeatureCollection(fc) => fc,
        _ => bail!("Layer {name} isn't a FeatureCollection"),
    };

    let mut features = Vec::new();
    for feature in collection.features {
        let geometry = match feature.geometry {
            Some(g) => g,
            None => {
                warn!("Layer {name} has a feature without geometry; skipping it");
                continue;
            }
        };
        let geometry = match geo_types::Geometry::<f64>::try_from(geometry.value) {
            Ok(g) => g,
            Err(err) => {
                warn!("Layer {name} has an unconvertible geometry ({err}); skipping it");
                continue;
            }
        };
        features.push(LayerFeature {
            properties: feature.properties.unwrap_or_default(),
            geometry,
        });
    }

    Ok(GeometryLayer {
        name: name.to_string(),
        role: LayerRole::from_name(name),
        features,
    })
}
