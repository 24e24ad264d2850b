// Client-side time window filtering over flattened flights

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::TimeParseError;
use crate::format::{Endpoint, FlattenedFlight};

/// Wall-clock time as minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub fn new(hour: u16, minute: u16) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(TimeOfDay(hour * 60 + minute))
        } else {
            None
        }
    }

    pub fn minutes(&self) -> u16 {
        self.0
    }

    pub fn of(datetime: &NaiveDateTime) -> Self {
        // hour() < 24 and minute() < 60 always hold
        TimeOfDay((datetime.hour() * 60 + datetime.minute()) as u16)
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || TimeParseError(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(err)?;
        if h.is_empty() || h.len() > 2 || m.len() != 2 {
            return Err(err());
        }
        let hour = h.parse::<u16>().map_err(|_| err())?;
        let minute = m.parse::<u16>().map_err(|_| err())?;
        TimeOfDay::new(hour, minute).ok_or_else(err)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

// Latest acceptable return arrival: strictly before `latest` on `date`, or any earlier day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrivalDeadline {
    pub date: NaiveDate,
    pub latest: TimeOfDay,
}

impl ArrivalDeadline {
    pub fn admits(&self, arrival: &NaiveDateTime) -> bool {
        let date = arrival.date();
        date < self.date || (date == self.date && TimeOfDay::of(arrival) < self.latest)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeConstraint {
    pub min_departure_time: Option<TimeOfDay>,
    pub max_arrival: Option<ArrivalDeadline>,
}

impl TimeConstraint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_departure(mut self, time: TimeOfDay) -> Self {
        self.min_departure_time = Some(time);
        self
    }

    pub fn max_arrival(mut self, latest: TimeOfDay, date: NaiveDate) -> Self {
        self.max_arrival = Some(ArrivalDeadline { date, latest });
        self
    }

    pub fn is_unconstrained(&self) -> bool {
        self.min_departure_time.is_none() && self.max_arrival.is_none()
    }

    pub fn matches(&self, flight: &FlattenedFlight) -> bool {
        self.departure_ok(flight) && self.arrival_ok(flight)
    }

    fn departure_ok(&self, flight: &FlattenedFlight) -> bool {
        let Some(min) = self.min_departure_time else {
            return true;
        };
        let Some(first) = flight.outbound.first_segment() else {
            return true;
        };

        match local_time(&first.departure, &flight.id) {
            Some(departure) => TimeOfDay::of(&departure) >= min,
            None => false,
        }
    }

    fn arrival_ok(&self, flight: &FlattenedFlight) -> bool {
        let Some(deadline) = self.max_arrival else {
            return true;
        };
        // One-way offers have nothing to check
        let Some(last) = flight
            .return_itinerary
            .as_ref()
            .and_then(|itinerary| itinerary.last_segment())
        else {
            return true;
        };

        match local_time(&last.arrival, &flight.id) {
            Some(arrival) => deadline.admits(&arrival),
            None => false,
        }
    }
}

fn local_time(endpoint: &Endpoint, flight_id: &str) -> Option<NaiveDateTime> {
    let parsed = endpoint.local_time();
    if parsed.is_none() {
        debug!(flight_id, time = %endpoint.time, "Dropping flight with unreadable timestamp");
    }
    parsed
}

/// Keeps the flights that satisfy `constraint`, in their original order.
pub fn filter_flights_by_time(
    flights: &[FlattenedFlight],
    constraint: &TimeConstraint,
) -> Vec<FlattenedFlight> {
    flights
        .iter()
        .filter(|flight| constraint.matches(flight))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{Itinerary, Named, Price, Segment};
    use test_case::test_case;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn time(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn endpoint(airport: &str, at: &str) -> Endpoint {
        Endpoint {
            airport: airport.to_string(),
            terminal: None,
            time: at.to_string(),
            city: None,
            country: None,
        }
    }

    fn segment(from: &str, dep: &str, to: &str, arr: &str) -> Segment {
        Segment {
            departure: endpoint(from, dep),
            arrival: endpoint(to, arr),
            airline: Named {
                code: "LY".to_string(),
                name: None,
            },
            flight_number: "351".to_string(),
            aircraft: Named {
                code: "738".to_string(),
                name: None,
            },
            duration: None,
            stops: 0,
        }
    }

    fn flight(id: &str, outbound_departure: &str, return_arrival: Option<&str>) -> FlattenedFlight {
        FlattenedFlight {
            id: id.to_string(),
            price: Price {
                total: "100.00".to_string(),
                currency: "EUR".to_string(),
                base: "80.00".to_string(),
            },
            outbound: Itinerary {
                duration: Some("PT4H35M".to_string()),
                segments: vec![segment("TLV", outbound_departure, "BER", "2025-05-28T23:59:00")],
            },
            return_itinerary: return_arrival.map(|arrival| Itinerary {
                duration: None,
                segments: vec![
                    segment("BER", "2025-06-03T20:00:00", "ATH", "2025-06-03T23:30:00"),
                    segment("ATH", "2025-06-04T01:00:00", "TLV", arrival),
                ],
            }),
            validating_airline: None,
            bookable_seats: None,
            last_ticketing_date: None,
        }
    }

    fn ids(flights: &[FlattenedFlight]) -> Vec<&str> {
        flights.iter().map(|f| f.id.as_str()).collect()
    }

    #[test_case("00:00", Some(0); "#1 midnight")]
    #[test_case("17:00", Some(1020); "#2 afternoon")]
    #[test_case("7:05", Some(425); "#3 single digit hour")]
    #[test_case("23:59", Some(1439); "#4 last minute")]
    #[test_case("24:00", None; "#5 hour out of range")]
    #[test_case("12:60", None; "#6 minute out of range")]
    #[test_case("1200", None; "#7 no separator")]
    #[test_case("12:5", None; "#8 short minutes")]
    #[test_case("ab:cd", None; "#9 not numeric")]
    fn test_time_of_day_parsing(input: &str, minutes: Option<u16>) {
        assert_eq!(input.parse::<TimeOfDay>().ok().map(|t| t.minutes()), minutes);
    }

    #[test]
    fn test_time_of_day_display() {
        assert_eq!(time("7:05").to_string(), "07:05");
    }

    #[test]
    fn test_min_departure_scenario() {
        let flights = vec![
            flight("early", "2025-05-28T15:30:00", None),
            flight("late", "2025-05-28T18:45:00", None),
        ];
        let constraint = TimeConstraint::new().min_departure(time("17:00"));

        assert_eq!(ids(&filter_flights_by_time(&flights, &constraint)), vec!["late"]);
    }

    #[test]
    fn test_min_departure_is_inclusive() {
        let flights = vec![flight("exact", "2025-05-28T17:00:00", None)];
        let constraint = TimeConstraint::new().min_departure(time("17:00"));
        assert_eq!(filter_flights_by_time(&flights, &constraint).len(), 1);
    }

    #[test_case("2025-06-04T09:15:00", false; "#1 after cutoff on target date")]
    #[test_case("2025-06-04T07:50:00", true; "#2 before cutoff on target date")]
    #[test_case("2025-06-03T23:00:00", true; "#3 earlier date")]
    #[test_case("2025-06-04T08:00:00", false; "#4 cutoff is exclusive")]
    #[test_case("2025-06-05T01:00:00", false; "#5 later date")]
    #[test_case("garbage", false; "#6 unreadable timestamp")]
    fn test_max_arrival_scenario(arrival: &str, kept: bool) {
        let flights = vec![flight("f", "2025-05-28T18:45:00", Some(arrival))];
        let constraint = TimeConstraint::new().max_arrival(time("08:00"), date("2025-06-04"));
        assert_eq!(filter_flights_by_time(&flights, &constraint).len() == 1, kept);
    }

    #[test]
    fn test_one_way_flight_passes_arrival_constraint() {
        let flights = vec![flight("one-way", "2025-05-28T18:45:00", None)];
        let constraint = TimeConstraint::new().max_arrival(time("08:00"), date("2025-06-04"));
        assert_eq!(filter_flights_by_time(&flights, &constraint).len(), 1);
    }

    #[test]
    fn test_return_without_segments_passes() {
        let mut f = flight("empty-return", "2025-05-28T18:45:00", None);
        f.return_itinerary = Some(Itinerary::default());
        let constraint = TimeConstraint::new().max_arrival(time("08:00"), date("2025-06-04"));
        assert!(constraint.matches(&f));
    }

    #[test]
    fn test_combined_constraints() {
        let flights = vec![
            flight("a", "2025-05-28T18:45:00", Some("2025-06-04T07:50:00")),
            flight("b", "2025-05-28T15:30:00", Some("2025-06-04T07:50:00")),
            flight("c", "2025-05-28T19:10:00", Some("2025-06-04T09:15:00")),
            flight("d", "2025-05-28T21:00:00", None),
        ];
        let constraint = TimeConstraint::new()
            .min_departure(time("17:00"))
            .max_arrival(time("08:00"), date("2025-06-04"));

        assert_eq!(ids(&filter_flights_by_time(&flights, &constraint)), vec!["a", "d"]);
    }

    #[test]
    fn test_no_constraints_returns_input_unchanged() {
        let flights = vec![
            flight("3", "2025-05-28T06:00:00", Some("2025-06-09T12:00:00")),
            flight("1", "bad", None),
            flight("2", "2025-05-28T18:45:00", None),
        ];
        let constraint = TimeConstraint::default();
        assert!(constraint.is_unconstrained());

        let filtered = filter_flights_by_time(&flights, &constraint);
        assert_eq!(filtered, flights);
        // Same input, same output
        assert_eq!(filter_flights_by_time(&flights, &constraint), filtered);
    }
}
