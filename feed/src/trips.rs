use std::fmt;

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TripID(String);

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RouteID(String);

impl TripID {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl RouteID {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TripID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for RouteID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One waypoint of a trip. Times are epoch seconds.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StopTimeEvent {
    pub stop_sequence: u32,
    pub arrival_time: Option<i64>,
    pub departure_time: Option<i64>,
}

impl StopTimeEvent {
    /// The effective time of this event. An event missing both times is unusable.
    pub fn timestamp(&self) -> Option<i64> {
        self.arrival_time.or(self.departure_time)
    }
}

/// A single scheduled vehicle journey. Immutable for the lifetime of the loaded feed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TripSchedule {
    pub trip_id: TripID,
    pub route_id: RouteID,
    /// Kept in the order the feed gave them (by stop_sequence), never re-sorted.
    pub events: Vec<StopTimeEvent>,
}

impl TripSchedule {
    /// The effective times of all usable events, in feed order.
    pub fn timestamps(&self) -> Vec<i64> {
        self.events.iter().filter_map(|ev| ev.timestamp()).collect()
    }
}

/// Parses a trip feed document. Malformed events and entities are individually skipped; an
/// unparseable document fails the whole load.
pub fn load<R: std::io::Read>(reader: R) -> Result<Vec<TripSchedule>> {
    let doc: Document = serde_json::from_reader(reader)?;

    let mut schedules = Vec::new();
    for rec in doc.trips {
        let (trip_id, route_id) = match (rec.trip_id, rec.route_id) {
            (Some(t), Some(r)) => (TripID(t), RouteID(r)),
            _ => {
                warn!("Skipping a trip entity missing trip_id or route_id");
                continue;
            }
        };

        let mut events = Vec::new();
        for ev in rec.stop_times {
            if ev.arrival_time.is_none() && ev.departure_time.is_none() {
                warn!(
                    "Trip {} stop_sequence {} has neither arrival nor departure; skipping it",
                    trip_id, ev.stop_sequence
                );
                continue;
            }
            events.push(ev);
        }

        schedules.push(TripSchedule {
            trip_id,
            route_id,
            events,
        });
    }
    Ok(schedules)
}

/// The (min, max) across all trips' usable timestamps, or None if nothing is timestamped.
pub fn time_bounds(schedules: &[TripSchedule]) -> Option<(i64, i64)> {
    let mut bounds: Option<(i64, i64)> = None;
    for schedule in schedules {
        for t in schedule.timestamps() {
            bounds = match bounds {
                Some((min, max)) => Some((min.min(t), max.max(t))),
                None => Some((t, t)),
            };
        }
    }
    bounds
}

#[derive(Deserialize)]
struct Document {
    trips: Vec<TripRecord>,
}

#[derive(Deserialize)]
struct TripRecord {
    trip_id: Option<String>,
    route_id: Option<String>,
    #[serde(default)]
    stop_times: Vec<StopTimeEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Result<Vec<TripSchedule>> {
        load(raw.as_bytes())
    }

    #[test]
    fn parses_a_simple_document() {
        let schedules = parse(
            r#"{"trips": [
                {"trip_id": "t1", "route_id": "12", "stop_times": [
                    {"stop_sequence": 1, "arrival_time": 1000, "departure_time": 1005},
                    {"stop_sequence": 2, "arrival_time": 1100}
                ]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(schedules.len(), 1);
        assert_eq!(schedules[0].trip_id, TripID::new("t1"));
        assert_eq!(schedules[0].route_id, RouteID::new("12"));
        assert_eq!(schedules[0].timestamps(), vec![1000, 1100]);
    }

    #[test]
    fn skips_events_missing_both_times() {
        let schedules = parse(
            r#"{"trips": [
                {"trip_id": "t1", "route_id": "r", "stop_times": [
                    {"stop_sequence": 1, "arrival_time": 1000},
                    {"stop_sequence": 2},
                    {"stop_sequence": 3, "departure_time": 1200}
                ]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(schedules[0].events.len(), 2);
        assert_eq!(schedules[0].timestamps(), vec![1000, 1200]);
    }

    #[test]
    fn skips_entities_missing_required_fields() {
        let schedules = parse(
            r#"{"trips": [
                {"route_id": "r", "stop_times": []},
                {"trip_id": "t2", "route_id": "r", "stop_times": []}
            ]}"#,
        )
        .unwrap();
        assert_eq!(schedules.len(), 1);
        assert_eq!(schedules[0].trip_id, TripID::new("t2"));
    }

    #[test]
    fn unparseable_document_fails_the_load() {
        assert!(parse("{\"trips\": 42}").is_err());
        assert!(parse("not json").is_err());
    }

    #[test]
    fn keeps_events_in_feed_order() {
        // The feed's ordering is authoritative, even if it looks wrong.
        let schedules = parse(
            r#"{"trips": [
                {"trip_id": "t1", "route_id": "r", "stop_times": [
                    {"stop_sequence": 2, "arrival_time": 1100},
                    {"stop_sequence": 1, "arrival_time": 1000}
                ]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(schedules[0].timestamps(), vec![1100, 1000]);
    }

    #[test]
    fn derives_time_bounds_across_trips() {
        let schedules = parse(
            r#"{"trips": [
                {"trip_id": "t1", "route_id": "r", "stop_times": [
                    {"stop_sequence": 1, "arrival_time": 500},
                    {"stop_sequence": 2, "arrival_time": 900}
                ]},
                {"trip_id": "t2", "route_id": "r", "stop_times": [
                    {"stop_sequence": 1, "departure_time": 200},
                    {"stop_sequence": 2, "arrival_time": 800}
                ]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(time_bounds(&schedules), Some((200, 900)));
        assert_eq!(time_bounds(&[]), None);
    }
}
