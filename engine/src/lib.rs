#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod clock;
mod reconcile;
mod resolve;
mod surface;

use std::collections::BTreeMap;

use anyhow::Result;

use feed::{GeometryLayer, TripSchedule};
use model::{GeometryStore, RouteIndex};

pub use clock::{PlaybackClock, BASE_RATE};
pub use reconcile::{ActiveTrip, LiveLayer};
pub use resolve::{resolve, TripPosition};
pub use surface::{PathStyle, RecordedPath, RecordingSurface, RenderSurface};

/// The repeatable advance-and-render task. One step is a whole frame, completed
/// synchronously: rebuild the route index if the geometry set changed, tick the clock,
/// resolve every trip, reconcile the rendered objects. Cancellation means not calling
/// step again, never interrupting one.
pub struct FrameLoop<S: RenderSurface> {
    clock: PlaybackClock,
    schedules: Vec<TripSchedule>,
    store: GeometryStore,
    index: RouteIndex,
    index_generation: u64,
    live: LiveLayer<S::Handle>,
    announced_layers: Vec<String>,
}

pub struct FrameStats {
    /// Trips rendered this frame
    pub active: usize,
    /// Trips excluded this frame: no matched route, outside their window, or degenerate
    /// geometry
    pub away: usize,
    /// The clock value this frame rendered
    pub time: f64,
}

impl<S: RenderSurface> FrameLoop<S> {
    /// The clock window is derived once from the whole feed.
    pub fn new(schedules: Vec<TripSchedule>) -> Result<Self> {
        let (min, max) = feed::trips::time_bounds(&schedules)
            .ok_or_else(|| anyhow!("The feed has no usable timestamps"))?;
        info!(
            "Loaded {} trips spanning [{min}, {max}]",
            schedules.len()
        );

        let store = GeometryStore::new();
        let index = RouteIndex::build(&store);
        Ok(Self {
            clock: PlaybackClock::new(min as f64, max as f64),
            schedules,
            index_generation: store.generation(),
            store,
            index,
            live: LiveLayer::new(),
            announced_layers: Vec::new(),
        })
    }

    /// Replaces the geometry set. The index rebuild happens at the start of the next
    /// frame, never mid-frame.
    pub fn set_layers(&mut self, layers: Vec<GeometryLayer>) {
        self.store.set_layers(layers);
    }

    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut PlaybackClock {
        &mut self.clock
    }

    pub fn route_index(&self) -> &RouteIndex {
        &self.index
    }

    pub fn step(&mut self, elapsed_wall_seconds: f64, surface: &mut S) -> FrameStats {
        if self.store.generation() != self.index_generation {
            // Build the replacement off to the side and swap it in whole; the live
            // index is never mutated
            self.index = RouteIndex::build(&self.store);
            self.index_generation = self.store.generation();
            info!("Rebuilt route index: {} identifiers", self.index.len());
            self.sync_layers(surface);
        }

        self.clock.tick(elapsed_wall_seconds);
        let now = self.clock.current_time();

        // Resolve per trip, isolated: no trip's failure stops the rest
        let mut positions = BTreeMap::new();
        let mut away = 0;
        for schedule in &self.schedules {
            let path = match self.index.lookup(schedule.route_id.as_str()) {
                Some(path) => path,
                None => {
                    away += 1;
                    continue;
                }
            };
            let position = match resolve(schedule, path, now) {
                Some(position) => position,
                None => {
                    away += 1;
                    continue;
                }
            };
            let trail = match path.slice_to(position.fraction) {
                Some(trail) => trail,
                None => {
                    away += 1;
                    continue;
                }
            };
            positions.insert(
                schedule.trip_id.clone(),
                ActiveTrip {
                    point: position.point,
                    trail,
                },
            );
        }

        let active = positions.len();
        self.live.reconcile(surface, &positions);
        FrameStats {
            active,
            away,
            time: now,
        }
    }

    fn sync_layers(&mut self, surface: &mut S) {
        for name in self.announced_layers.drain(..) {
            surface.remove_layer(&name);
        }
        for layer in self.store.layers() {
            surface.add_layer(&layer.name);
            self.announced_layers.push(layer.name.clone());
        }
    }
}
