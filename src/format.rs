// Flattening of raw flight offers into display-ready records

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::vendor::{
    Dictionaries, FlightOffersResponse, RawEndpoint, RawItinerary, RawOffer, RawSegment,
};

pub const NO_FLIGHTS_MESSAGE: &str = "No flights found";

// Vendor timestamps carry airport-local wall time with no offset
const LOCAL_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedFlights {
    pub total_results: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub flights: Vec<FlattenedFlight>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlattenedFlight {
    pub id: String,
    pub price: Price,
    pub outbound: Itinerary,
    #[serde(rename = "return")]
    pub return_itinerary: Option<Itinerary>,
    pub validating_airline: Option<String>,
    pub bookable_seats: Option<u32>,
    pub last_ticketing_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub total: String,
    pub currency: String,
    pub base: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    pub duration: Option<String>,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub departure: Endpoint,
    pub arrival: Endpoint,
    pub airline: Named,
    pub flight_number: String,
    pub aircraft: Named,
    pub duration: Option<String>,
    pub stops: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    pub airport: String,
    pub terminal: Option<String>,
    pub time: String,
    pub city: Option<String>,
    pub country: Option<String>,
}

impl Endpoint {
    pub fn local_time(&self) -> Option<NaiveDateTime> {
        parse_local_time(&self.time)
    }
}

/// A vendor code and its dictionary name, when the dictionary has one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Named {
    pub code: String,
    pub name: Option<String>,
}

impl Itinerary {
    pub fn first_segment(&self) -> Option<&Segment> {
        self.segments.first()
    }

    pub fn last_segment(&self) -> Option<&Segment> {
        self.segments.last()
    }
}

pub fn parse_local_time(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, LOCAL_TIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .ok()
}

pub fn format_flight_details(response: &FlightOffersResponse) -> FormattedFlights {
    if response.data.is_empty() {
        return FormattedFlights {
            total_results: 0,
            message: Some(NO_FLIGHTS_MESSAGE.to_string()),
            flights: Vec::new(),
        };
    }

    let dictionaries = &response.dictionaries;
    let flights: Vec<FlattenedFlight> = response
        .data
        .iter()
        .map(|offer| flatten_offer(offer, dictionaries))
        .collect();

    let total_results = response
        .meta
        .as_ref()
        .and_then(|meta| meta.count)
        .unwrap_or(flights.len());

    FormattedFlights {
        total_results,
        message: None,
        flights,
    }
}

pub fn flatten_offer(offer: &RawOffer, dictionaries: &Dictionaries) -> FlattenedFlight {
    let outbound = offer
        .itineraries
        .first()
        .map(|itinerary| flatten_itinerary(itinerary, dictionaries))
        .unwrap_or_default();
    let return_itinerary = offer
        .itineraries
        .get(1)
        .map(|itinerary| flatten_itinerary(itinerary, dictionaries));

    FlattenedFlight {
        id: offer.id.clone(),
        price: Price {
            total: offer.price.total.clone(),
            currency: offer.price.currency.clone(),
            base: offer.price.base.clone(),
        },
        outbound,
        return_itinerary,
        validating_airline: offer
            .validating_airline_codes
            .first()
            .and_then(|code| dictionaries.carriers.get(code).cloned()),
        bookable_seats: offer.number_of_bookable_seats,
        last_ticketing_date: offer.last_ticketing_date.clone(),
    }
}

fn flatten_itinerary(itinerary: &RawItinerary, dictionaries: &Dictionaries) -> Itinerary {
    Itinerary {
        duration: itinerary.duration.clone(),
        segments: itinerary
            .segments
            .iter()
            .map(|segment| flatten_segment(segment, dictionaries))
            .collect(),
    }
}

fn flatten_segment(segment: &RawSegment, dictionaries: &Dictionaries) -> Segment {
    Segment {
        departure: flatten_endpoint(&segment.departure, dictionaries),
        arrival: flatten_endpoint(&segment.arrival, dictionaries),
        airline: Named {
            code: segment.carrier_code.clone(),
            name: dictionaries.carriers.get(&segment.carrier_code).cloned(),
        },
        flight_number: segment.number.clone(),
        aircraft: Named {
            code: segment.aircraft.code.clone(),
            name: dictionaries.aircraft.get(&segment.aircraft.code).cloned(),
        },
        duration: segment.duration.clone(),
        stops: segment.number_of_stops,
    }
}

fn flatten_endpoint(endpoint: &RawEndpoint, dictionaries: &Dictionaries) -> Endpoint {
    let location = dictionaries.locations.get(&endpoint.iata_code);
    Endpoint {
        airport: endpoint.iata_code.clone(),
        terminal: endpoint.terminal.clone(),
        time: endpoint.at.clone(),
        city: location.and_then(|l| l.city_code.clone()),
        country: location.and_then(|l| l.country_code.clone()),
    }
}

/// "PT4H35M" -> "4h 35m". Anything else comes back untouched.
pub fn humanize_duration(iso: &str) -> String {
    let Some(rest) = iso.strip_prefix("PT") else {
        return iso.to_string();
    };
    if rest.is_empty() {
        return iso.to_string();
    }

    let (hours, rest) = match rest.split_once('H') {
        Some((h, tail)) => match h.parse::<u32>() {
            Ok(h) => (h, tail),
            Err(_) => return iso.to_string(),
        },
        None => (0, rest),
    };

    let minutes = if rest.is_empty() {
        0
    } else {
        match rest.strip_suffix('M').map(str::parse::<u32>) {
            Some(Ok(m)) => m,
            _ => return iso.to_string(),
        }
    };

    format!("{}h {}m", hours, minutes)
}
