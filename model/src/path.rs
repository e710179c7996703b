use geo_types::{Coord, Geometry, LineString, Point};

/// The piecewise-linear line a trip follows, with planar arc-length math. Positions along
/// it are expressed as a fraction of the total length in [0, 1].
#[derive(Clone, Debug)]
pub struct RoutePath {
    pts: LineString<f64>,
}

impl RoutePath {
    pub fn new(pts: LineString<f64>) -> Option<Self> {
        if pts.0.len() < 2 {
            return None;
        }
        Some(Self { pts })
    }

    /// Picks the representative line out of a stored geometry: the geometry itself if it's a
    /// line, the first part of a multi-part line, or the first line found in a collection.
    /// Interpolation only ever uses this one line; extra parts and non-line members are
    /// ignored for positioning.
    pub fn from_geometry(geometry: &Geometry<f64>) -> Option<Self> {
        match geometry {
            Geometry::LineString(ls) => Self::new(ls.clone()),
            Geometry::MultiLineString(mls) => mls.0.iter().cloned().find_map(Self::new),
            Geometry::GeometryCollection(gc) => gc.0.iter().find_map(Self::from_geometry),
            _ => None,
        }
    }

    pub fn line_string(&self) -> &LineString<f64> {
        &self.pts
    }

    /// Total planar arc length.
    pub fn length(&self) -> f64 {
        self.pts
            .0
            .windows(2)
            .map(|pair| segment_length(pair[0], pair[1]))
            .sum()
    }

    /// The point at `fraction` of the total length. None for degenerate (zero-length)
    /// paths.
    pub fn point_at(&self, fraction: f64) -> Option<Point<f64>> {
        let total = self.length();
        if !total.is_finite() || total <= 0.0 {
            return None;
        }
        let target = fraction.clamp(0.0, 1.0) * total;

        let mut so_far = 0.0;
        for pair in self.pts.0.windows(2) {
            let len = segment_length(pair[0], pair[1]);
            if so_far + len >= target && len > 0.0 {
                let percent = (target - so_far) / len;
                return Some(Point::new(
                    pair[0].x + percent * (pair[1].x - pair[0].x),
                    pair[0].y + percent * (pair[1].y - pair[0].y),
                ));
            }
            so_far += len;
        }
        // Floating-point slack can leave the target just past the final segment
        self.pts.0.last().map(|pt| Point::new(pt.x, pt.y))
    }

    /// The sub-path from the origin to the point at `fraction`, inclusive of the
    /// interpolated endpoint. None on the same degeneracies as point_at.
    pub fn slice_to(&self, fraction: f64) -> Option<LineString<f64>> {
        let total = self.length();
        if !total.is_finite() || total <= 0.0 {
            return None;
        }
        let target = fraction.clamp(0.0, 1.0) * total;

        let mut result = vec![self.pts.0[0]];
        let mut so_far = 0.0;
        for pair in self.pts.0.windows(2) {
            let len = segment_length(pair[0], pair[1]);
            if so_far + len >= target {
                if len > 0.0 {
                    let percent = (target - so_far) / len;
                    result.push(Coord {
                        x: pair[0].x + percent * (pair[1].x - pair[0].x),
                        y: pair[0].y + percent * (pair[1].y - pair[0].y),
                    });
                } else {
                    result.push(pair[1]);
                }
                return Some(LineString::from(result));
            }
            so_far += len;
            result.push(pair[1]);
        }
        Some(LineString::from(result))
    }
}

fn segment_length(a: Coord<f64>, b: Coord<f64>) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}
