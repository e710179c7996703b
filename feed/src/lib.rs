#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

pub mod layers;
pub mod trips;

pub use layers::{GeometryLayer, LayerFeature, LayerRole};
pub use trips::{RouteID, StopTimeEvent, TripID, TripSchedule};
