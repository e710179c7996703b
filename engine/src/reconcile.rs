use std::collections::BTreeMap;

use feed::TripID;
use geo_types::{LineString, Point};

use crate::surface::{PathStyle, RenderSurface};

/// A trip that resolved to a position this frame: the interpolated point plus the
/// already-travelled sub-path drawn as its trail.
pub struct ActiveTrip {
    pub point: Point<f64>,
    pub trail: LineString<f64>,
}

struct RenderedTripPath<H> {
    handle: H,
    points: LineString<f64>,
}

/// Keeps the render surface's set of trip paths in sync with the active set, one object
/// per trip id. Existing objects are updated in place, never destroyed and recreated.
pub struct LiveLayer<H> {
    tracked: BTreeMap<TripID, RenderedTripPath<H>>,
    style: PathStyle,
}

impl<H> LiveLayer<H> {
    pub fn new() -> Self {
        Self {
            tracked: BTreeMap::new(),
            style: PathStyle::default(),
        }
    }

    /// One frame of reconciliation: create or update an object per input trip, then
    /// sweep every tracked trip that's absent from the input. Work is bounded by the
    /// active set plus the previously-active set.
    pub fn reconcile<S: RenderSurface<Handle = H>>(
        &mut self,
        surface: &mut S,
        positions: &BTreeMap<TripID, ActiveTrip>,
    ) {
        for (trip_id, active) in positions {
            match self.tracked.get_mut(trip_id) {
                Some(rendered) => {
                    // An unchanged trail doesn't even need the in-place update
                    if rendered.points != active.trail {
                        surface.update_path(&rendered.handle, &active.trail);
                        rendered.points = active.trail.clone();
                    }
                }
                None => {
                    let handle =
                        surface.add_path(&format!("trip {trip_id}"), &active.trail, &self.style);
                    self.tracked.insert(
                        trip_id.clone(),
                        RenderedTripPath {
                            handle,
                            points: active.trail.clone(),
                        },
                    );
                }
            }
        }

        let stale: Vec<TripID> = self
            .tracked
            .keys()
            .filter(|trip_id| !positions.contains_key(*trip_id))
            .cloned()
            .collect();
        for trip_id in stale {
            if let Some(rendered) = self.tracked.remove(&trip_id) {
                surface.remove_path(rendered.handle);
            }
        }
    }

    pub fn tracked_trips(&self) -> usize {
        self.tracked.len()
    }

    pub fn is_tracking(&self, trip_id: &TripID) -> bool {
        self.tracked.contains_key(trip_id)
    }
}

impl<H> Default for LiveLayer<H> {
    fn default() -> Self {
        Self::new()
    }
}
