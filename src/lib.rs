// Client for the Amadeus flight offers search API

pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod format;
pub mod logging;
pub mod request;
pub mod token;
pub mod transport;
pub mod vendor;

// Re-export key types for convenience
pub use client::FlightSearchClient;
pub use config::{ClientConfig, Credentials, Environment};
pub use error::{ApiError, AuthenticationError, ClientError, SearchError, TimeParseError};
pub use filter::{filter_flights_by_time, ArrivalDeadline, TimeConstraint, TimeOfDay};
pub use format::{
    format_flight_details, humanize_duration, FlattenedFlight, FormattedFlights, Itinerary,
    Segment,
};
pub use request::{SearchRequest, TravelClass};
pub use token::{AccessToken, TokenManager, TokenState};
pub use transport::{HttpTransport, RawResponse, Transport, TransportError};
pub use vendor::FlightOffersResponse;
