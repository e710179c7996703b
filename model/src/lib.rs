#[macro_use]
extern crate log;

mod path;
mod route_index;
mod store;

pub use path::RoutePath;
pub use route_index::{RouteIndex, ROUTE_ID_FIELDS};
pub use store::GeometryStore;
