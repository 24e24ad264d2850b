// Flight offer search parameters and their query-string form

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

use crate::error::SearchError;

// Vendor cap on seated passengers per search
pub const MAX_SEATED_PASSENGERS: u32 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TravelClass {
    #[default]
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl TravelClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelClass::Economy => "ECONOMY",
            TravelClass::PremiumEconomy => "PREMIUM_ECONOMY",
            TravelClass::Business => "BUSINESS",
            TravelClass::First => "FIRST",
        }
    }
}

impl fmt::Display for TravelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "ECONOMY" => Ok(TravelClass::Economy),
            "PREMIUM_ECONOMY" => Ok(TravelClass::PremiumEconomy),
            "BUSINESS" => Ok(TravelClass::Business),
            "FIRST" => Ok(TravelClass::First),
            other => Err(format!("unknown travel class: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub adults: u32,
    pub children: Option<u32>,
    pub infants: Option<u32>,
    pub travel_class: Option<TravelClass>,
    pub included_airline_codes: Vec<String>,
    pub excluded_airline_codes: Vec<String>,
    pub non_stop: Option<bool>,
    pub currency_code: Option<String>,
    pub max_price: Option<u32>,
    pub max_results: Option<u32>,
}

impl SearchRequest {
    /// One adult, economy, priced in EUR, at most 10 offers.
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        departure_date: NaiveDate,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            departure_date,
            return_date: None,
            adults: 1,
            children: None,
            infants: None,
            travel_class: Some(TravelClass::Economy),
            included_airline_codes: Vec::new(),
            excluded_airline_codes: Vec::new(),
            non_stop: None,
            currency_code: Some("EUR".to_string()),
            max_price: None,
            max_results: Some(10),
        }
    }

    pub fn return_date(mut self, date: NaiveDate) -> Self {
        self.return_date = Some(date);
        self
    }

    pub fn adults(mut self, adults: u32) -> Self {
        self.adults = adults;
        self
    }

    pub fn children(mut self, children: u32) -> Self {
        self.children = Some(children);
        self
    }

    pub fn infants(mut self, infants: u32) -> Self {
        self.infants = Some(infants);
        self
    }

    pub fn travel_class(mut self, class: TravelClass) -> Self {
        self.travel_class = Some(class);
        self
    }

    pub fn include_airlines<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.included_airline_codes = codes.into_iter().map(Into::into).collect();
        self
    }

    pub fn exclude_airlines<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_airline_codes = codes.into_iter().map(Into::into).collect();
        self
    }

    pub fn non_stop(mut self, non_stop: bool) -> Self {
        self.non_stop = Some(non_stop);
        self
    }

    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency_code = Some(currency.into());
        self
    }

    pub fn max_price(mut self, max_price: u32) -> Self {
        self.max_price = Some(max_price);
        self
    }

    pub fn max_results(mut self, max: u32) -> Self {
        self.max_results = Some(max);
        self
    }

    // Checked before any network traffic
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.origin.trim().is_empty() {
            return Err(invalid("origin location code is required"));
        }
        if self.destination.trim().is_empty() {
            return Err(invalid("destination location code is required"));
        }
        if self.adults == 0 {
            return Err(invalid("at least one adult is required"));
        }

        let children = self.children.unwrap_or(0);
        let infants = self.infants.unwrap_or(0);
        if self.adults.saturating_add(children) > MAX_SEATED_PASSENGERS {
            return Err(invalid(&format!(
                "adults and children together may not exceed {}",
                MAX_SEATED_PASSENGERS
            )));
        }
        if infants > self.adults {
            return Err(invalid("each infant must travel with an adult"));
        }

        if let Some(return_date) = self.return_date {
            if return_date < self.departure_date {
                return Err(invalid("return date precedes departure date"));
            }
        }
        if self.max_results == Some(0) {
            return Err(invalid("max results must be at least 1"));
        }

        Ok(())
    }

    /// Query pairs in the vendor's key names. Optional fields appear only
    /// when set; zero child or infant counts are left out.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("originLocationCode", self.origin.clone()),
            ("destinationLocationCode", self.destination.clone()),
            ("departureDate", format_date(self.departure_date)),
            ("adults", self.adults.to_string()),
        ];

        if let Some(date) = self.return_date {
            params.push(("returnDate", format_date(date)));
        }
        if let Some(children) = self.children.filter(|n| *n > 0) {
            params.push(("children", children.to_string()));
        }
        if let Some(infants) = self.infants.filter(|n| *n > 0) {
            params.push(("infants", infants.to_string()));
        }
        if let Some(class) = self.travel_class {
            params.push(("travelClass", class.as_str().to_string()));
        }
        if !self.included_airline_codes.is_empty() {
            params.push(("includedAirlineCodes", self.included_airline_codes.join(",")));
        }
        if !self.excluded_airline_codes.is_empty() {
            params.push(("excludedAirlineCodes", self.excluded_airline_codes.join(",")));
        }
        // false is a real answer and is sent as such
        if let Some(non_stop) = self.non_stop {
            params.push(("nonStop", non_stop.to_string()));
        }
        if let Some(currency) = &self.currency_code {
            params.push(("currencyCode", currency.clone()));
        }
        if let Some(max_price) = self.max_price {
            params.push(("maxPrice", max_price.to_string()));
        }
        if let Some(max) = self.max_results {
            params.push(("max", max.to_string()));
        }

        params
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn invalid(message: &str) -> SearchError {
    SearchError::InvalidRequest(message.to_string())
}
