// Data structures for the vendor's JSON payloads, kept in the vendor's shape

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// Token endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct OAuthErrorBody {
    pub error: Option<String>,
    pub error_description: Option<String>,
}

// Search endpoint errors
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct VendorErrorBody {
    pub errors: Vec<VendorErrorDetail>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct VendorErrorDetail {
    pub status: Option<u16>,
    pub code: Option<i64>,
    pub title: Option<String>,
    pub detail: Option<String>,
}

impl VendorErrorBody {
    /// Best human-readable text from the first reported error.
    pub fn first_message(&self) -> Option<String> {
        let first = self.errors.first()?;
        first.detail.clone().or_else(|| first.title.clone())
    }
}

// Flight offers search response
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FlightOffersResponse {
    pub data: Vec<RawOffer>,
    pub dictionaries: Dictionaries,
    pub meta: Option<Meta>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Meta {
    pub count: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Dictionaries {
    pub carriers: HashMap<String, String>,
    pub aircraft: HashMap<String, String>,
    pub locations: HashMap<String, LocationEntry>,
    pub currencies: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocationEntry {
    pub city_code: Option<String>,
    pub country_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawOffer {
    pub id: String,
    pub source: Option<String>,
    pub one_way: Option<bool>,
    pub last_ticketing_date: Option<String>,
    pub number_of_bookable_seats: Option<u32>,
    pub itineraries: Vec<RawItinerary>,
    pub price: RawPrice,
    pub validating_airline_codes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawPrice {
    pub currency: String,
    pub total: String,
    pub base: String,
    pub grand_total: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RawItinerary {
    pub duration: Option<String>,
    pub segments: Vec<RawSegment>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawSegment {
    pub id: Option<String>,
    pub departure: RawEndpoint,
    pub arrival: RawEndpoint,
    pub carrier_code: String,
    pub number: String,
    pub aircraft: RawAircraft,
    pub duration: Option<String>,
    pub number_of_stops: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawEndpoint {
    pub iata_code: String,
    pub terminal: Option<String>,
    // Airport-local time, e.g. "2025-05-28T18:45:00"
    pub at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RawAircraft {
    pub code: String,
}

// A trimmed vendor response used by the tests in several modules
#[cfg(test)]
pub const SAMPLE_OFFERS_JSON: &str = r#"{
  "meta": { "count": 2 },
  "data": [
    {
      "type": "flight-offer",
      "id": "1",
      "source": "GDS",
      "oneWay": false,
      "lastTicketingDate": "2025-05-20",
      "numberOfBookableSeats": 4,
      "itineraries": [
        {
          "duration": "PT4H35M",
          "segments": [
            {
              "departure": { "iataCode": "TLV", "terminal": "3", "at": "2025-05-28T18:45:00" },
              "arrival": { "iataCode": "BER", "terminal": "1", "at": "2025-05-28T22:20:00" },
              "carrierCode": "LY",
              "number": "351",
              "aircraft": { "code": "738" },
              "duration": "PT4H35M",
              "id": "1",
              "numberOfStops": 0
            }
          ]
        },
        {
          "duration": "PT7H10M",
          "segments": [
            {
              "departure": { "iataCode": "BER", "terminal": "1", "at": "2025-06-03T23:05:00" },
              "arrival": { "iataCode": "ATH", "at": "2025-06-04T02:50:00" },
              "carrierCode": "A3",
              "number": "821",
              "aircraft": { "code": "32N" },
              "duration": "PT2H45M",
              "id": "2",
              "numberOfStops": 0
            },
            {
              "departure": { "iataCode": "ATH", "at": "2025-06-04T05:10:00" },
              "arrival": { "iataCode": "TLV", "terminal": "3", "at": "2025-06-04T07:50:00" },
              "carrierCode": "A3",
              "number": "928",
              "aircraft": { "code": "XYZ" },
              "duration": "PT1H40M",
              "id": "3",
              "numberOfStops": 0
            }
          ]
        }
      ],
      "price": { "currency": "EUR", "total": "412.36", "base": "298.00", "grandTotal": "412.36" },
      "validatingAirlineCodes": ["A3"]
    },
    {
      "type": "flight-offer",
      "id": "2",
      "oneWay": true,
      "numberOfBookableSeats": 9,
      "itineraries": [
        {
          "duration": "PT4H30M",
          "segments": [
            {
              "departure": { "iataCode": "TLV", "at": "2025-05-28T15:30:00" },
              "arrival": { "iataCode": "BER", "at": "2025-05-28T19:00:00" },
              "carrierCode": "ZZ",
              "number": "100",
              "aircraft": { "code": "320" },
              "numberOfStops": 1
            }
          ]
        }
      ],
      "price": { "currency": "EUR", "total": "189.99", "base": "120.00" },
      "validatingAirlineCodes": ["ZZ"]
    }
  ],
  "dictionaries": {
    "locations": {
      "TLV": { "cityCode": "TLV", "countryCode": "IL" },
      "BER": { "cityCode": "BER", "countryCode": "DE" },
      "ATH": { "cityCode": "ATH", "countryCode": "GR" }
    },
    "aircraft": { "738": "BOEING 737-800", "32N": "AIRBUS A320NEO", "320": "AIRBUS A320" },
    "currencies": { "EUR": "EURO" },
    "carriers": { "LY": "EL AL ISRAEL AIRLINES", "A3": "AEGEAN AIRLINES" }
  }
}"#;
