use feed::TripSchedule;
use geo_types::Point;
use model::RoutePath;

/// Where a trip is along its route right now.
pub struct TripPosition {
    pub point: Point<f64>,
    /// Completion ratio in [0, 1], linear across the whole schedule window.
    pub fraction: f64,
}

/// None if the trip isn't active at this clock value: too few timestamped events, the
/// clock outside its window (a hard boundary, not a clamp), no bracketing pair of
/// events, or degenerate geometry. None of these are errors; partial data is expected.
pub fn resolve(schedule: &TripSchedule, path: &RoutePath, clock: f64) -> Option<TripPosition> {
    let times = schedule.timestamps();
    if times.len() < 2 {
        return None;
    }
    let start = times[0] as f64;
    let end = *times.last()? as f64;
    if clock < start || clock > end {
        return None;
    }

    let fraction = if clock == end {
        // The bracketing rule below uses a strict upper bound, so the inclusive end of
        // the window is its own case
        1.0
    } else {
        // The bracketing pair: the latest event at or before the clock, and some later
        // event strictly after it. Out-of-order timestamps can leave either missing.
        let mut prev = None;
        for (i, &t) in times.iter().enumerate() {
            if (t as f64) <= clock {
                prev = Some(i);
            }
        }
        let prev = prev?;
        times.iter().skip(prev + 1).find(|&&t| (t as f64) > clock)?;

        let span = end - start;
        if span <= 0.0 {
            return None;
        }
        (clock - start) / span
    };

    let point = path.point_at(fraction)?;
    Some(TripPosition { point, fraction })
}

#[cfg(test)]
mod tests {
    use super::*;
    use feed::{RouteID, StopTimeEvent, TripID};
    use geo_types::line_string;

    fn schedule(times: &[Option<i64>]) -> TripSchedule {
        TripSchedule {
            trip_id: TripID::new("t1"),
            route_id: RouteID::new("12"),
            events: times
                .iter()
                .enumerate()
                .map(|(i, &t)| StopTimeEvent {
                    stop_sequence: i as u32 + 1,
                    arrival_time: t,
                    departure_time: None,
                })
                .collect(),
        }
    }

    fn two_stop_path() -> RoutePath {
        RoutePath::new(line_string![(x: 0.0, y: 0.0), (x: 0.0, y: 1.0)]).unwrap()
    }

    #[test]
    fn interpolates_halfway_between_two_stops() {
        let schedule = schedule(&[Some(1000), Some(1100)]);
        let position = resolve(&schedule, &two_stop_path(), 1050.0).unwrap();
        assert_eq!(position.fraction, 0.5);
        assert_eq!(position.point, Point::new(0.0, 0.5));
    }

    #[test]
    fn window_boundaries_are_inclusive() {
        let schedule = schedule(&[Some(1000), Some(1100)]);
        let path = two_stop_path();

        let at_start = resolve(&schedule, &path, 1000.0).unwrap();
        assert_eq!(at_start.fraction, 0.0);
        assert_eq!(at_start.point, Point::new(0.0, 0.0));

        let at_end = resolve(&schedule, &path, 1100.0).unwrap();
        assert_eq!(at_end.fraction, 1.0);
        assert_eq!(at_end.point, Point::new(0.0, 1.0));
    }

    #[test]
    fn outside_the_window_is_not_active() {
        let schedule = schedule(&[Some(1000), Some(1100)]);
        let path = two_stop_path();
        assert!(resolve(&schedule, &path, 999.999).is_none());
        assert!(resolve(&schedule, &path, 1100.001).is_none());
    }

    #[test]
    fn needs_at_least_two_usable_events() {
        let path = two_stop_path();
        assert!(resolve(&schedule(&[]), &path, 1000.0).is_none());
        assert!(resolve(&schedule(&[Some(1000)]), &path, 1000.0).is_none());
        // Events without timestamps don't count
        assert!(resolve(&schedule(&[Some(1000), None]), &path, 1000.0).is_none());
        // But they don't break the usable ones around them
        assert!(resolve(&schedule(&[Some(1000), None, Some(1100)]), &path, 1050.0).is_some());
    }

    #[test]
    fn progress_is_linear_over_the_whole_trip_not_per_leg() {
        // Uneven legs: 1000 -> 1010 -> 1100. At clock 1050, halfway through the overall
        // span, the position is the route midpoint regardless of which leg we're on.
        let schedule = schedule(&[Some(1000), Some(1010), Some(1100)]);
        let position = resolve(&schedule, &two_stop_path(), 1050.0).unwrap();
        assert_eq!(position.fraction, 0.5);
        assert_eq!(position.point, Point::new(0.0, 0.5));
    }

    #[test]
    fn interpolation_is_monotonic_in_time() {
        let schedule = schedule(&[Some(1000), Some(1040), Some(1100)]);
        let path = two_stop_path();
        let mut last = -1.0;
        for clock in (1000..=1100).step_by(5) {
            let position = resolve(&schedule, &path, clock as f64).unwrap();
            assert!(position.fraction >= last);
            assert!(position.point.y() >= if last < 0.0 { 0.0 } else { last });
            last = position.fraction;
        }
    }

    #[test]
    fn window_comes_from_feed_order_endpoints() {
        // Feed order is authoritative: the window ends at the *last* event, so a
        // decreasing tail shrinks it
        let schedule = schedule(&[Some(1000), Some(1100), Some(1020)]);
        assert!(resolve(&schedule, &two_stop_path(), 1050.0).is_none());
        assert!(resolve(&schedule, &two_stop_path(), 1010.0).is_some());
    }

    #[test]
    fn degenerate_geometry_is_not_active() {
        let schedule = schedule(&[Some(1000), Some(1100)]);
        let zero_length =
            RoutePath::new(line_string![(x: 2.0, y: 2.0), (x: 2.0, y: 2.0)]).unwrap();
        assert!(resolve(&schedule, &zero_length, 1050.0).is_none());
    }
}
