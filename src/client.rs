// Flight offer search client: token handling, search call, flattening, filtering

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::{status_message, ApiError, ClientError, SearchError};
use crate::filter::{self, TimeConstraint};
use crate::format::{self, FlattenedFlight, FormattedFlights};
use crate::request::SearchRequest;
use crate::token::TokenManager;
use crate::transport::{HttpTransport, Transport};
use crate::vendor::{FlightOffersResponse, VendorErrorBody};

pub struct FlightSearchClient<T: Transport = HttpTransport> {
    config: ClientConfig,
    transport: Arc<T>,
    tokens: TokenManager<T>,
}

impl FlightSearchClient<HttpTransport> {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let transport = HttpTransport::new(config.timeout_ms)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }
}

impl<T: Transport> FlightSearchClient<T> {
    pub fn with_transport(config: ClientConfig, transport: Arc<T>) -> Self {
        let tokens = TokenManager::new(&config, Arc::clone(&transport));
        Self {
            config,
            transport,
            tokens,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn token_manager(&self) -> &TokenManager<T> {
        &self.tokens
    }

    /// Runs one offer search and returns the vendor payload as received.
    pub async fn search_flights(
        &self,
        request: &SearchRequest,
    ) -> Result<FlightOffersResponse, ApiError> {
        request.validate()?;
        let token = self.tokens.ensure_valid_token().await?;

        let query = request.to_query_pairs();
        let url = self.config.flight_offers_url();
        debug!(url = %url, ?query, "Searching flight offers");

        let response = self
            .transport
            .get_with_bearer(&url, &query, &token)
            .await
            .map_err(|e| {
                warn!(error = %e, "Flight search request failed");
                SearchError::Network(e.0)
            })?;

        if !response.is_success() {
            let message = serde_json::from_str::<VendorErrorBody>(&response.body)
                .ok()
                .and_then(|body| body.first_message())
                .unwrap_or_else(|| status_message(response.status));
            warn!(status = response.status, message = %message, "Flight search rejected");
            return Err(SearchError::Rejected {
                status_code: response.status,
                message,
            }
            .into());
        }

        let offers: FlightOffersResponse = serde_json::from_str(&response.body)
            .map_err(|e| SearchError::MalformedResponse(e.to_string()))?;

        info!(
            origin = %request.origin,
            destination = %request.destination,
            offers = offers.data.len(),
            "Flight search completed"
        );
        Ok(offers)
    }

    pub fn format_flight_details(&self, response: &FlightOffersResponse) -> FormattedFlights {
        format::format_flight_details(response)
    }

    pub fn filter_flights_by_time(
        &self,
        flights: &[FlattenedFlight],
        constraint: &TimeConstraint,
    ) -> Vec<FlattenedFlight> {
        filter::filter_flights_by_time(flights, constraint)
    }

    /// Search, flatten and filter in one go. `total_results` still reports
    /// what the vendor found before filtering.
    pub async fn search_and_filter(
        &self,
        request: &SearchRequest,
        constraint: &TimeConstraint,
    ) -> Result<FormattedFlights, ApiError> {
        let raw = self.search_flights(request).await?;
        let mut formatted = self.format_flight_details(&raw);
        if !constraint.is_unconstrained() {
            let before = formatted.flights.len();
            formatted.flights = self.filter_flights_by_time(&formatted.flights, constraint);
            debug!(before, after = formatted.flights.len(), "Applied time constraints");
        }
        Ok(formatted)
    }
}
