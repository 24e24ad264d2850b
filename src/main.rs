// flight-search command line entry point

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;

use flight_search_client::{
    humanize_duration, logging, ClientConfig, Credentials, Environment, FlattenedFlight,
    FlightSearchClient, Itinerary, SearchRequest, TimeConstraint, TimeOfDay, TravelClass,
};

#[derive(Parser, Debug)]
#[command(name = "flight-search")]
#[command(author, version, about = "Search flight offers and filter them by time window", long_about = None)]
struct Cli {
    /// API key (client id)
    #[arg(long, env = "AMADEUS_CLIENT_ID", hide_env_values = true)]
    client_id: String,

    /// API secret (client secret)
    #[arg(long, env = "AMADEUS_CLIENT_SECRET", hide_env_values = true)]
    client_secret: String,

    /// Use the vendor's test environment
    #[arg(long, env = "AMADEUS_TEST")]
    test: bool,

    /// Origin IATA code
    #[arg(short, long)]
    origin: String,

    /// Destination IATA code
    #[arg(short, long)]
    destination: String,

    /// Departure date (YYYY-MM-DD)
    #[arg(long)]
    departure: NaiveDate,

    /// Return date (YYYY-MM-DD)
    #[arg(long = "return")]
    return_date: Option<NaiveDate>,

    #[arg(long, default_value_t = 1)]
    adults: u32,

    #[arg(long)]
    children: Option<u32>,

    #[arg(long)]
    infants: Option<u32>,

    /// ECONOMY, PREMIUM_ECONOMY, BUSINESS or FIRST
    #[arg(long, default_value = "ECONOMY")]
    class: TravelClass,

    /// Only these carriers (comma separated)
    #[arg(long, value_delimiter = ',')]
    include_airlines: Vec<String>,

    /// Never these carriers (comma separated)
    #[arg(long, value_delimiter = ',')]
    exclude_airlines: Vec<String>,

    /// Restrict to (true) or explicitly allow (false) connections
    #[arg(long)]
    non_stop: Option<bool>,

    #[arg(long, default_value = "EUR")]
    currency: String,

    #[arg(long)]
    max_price: Option<u32>,

    /// Maximum number of offers to request
    #[arg(long, default_value_t = 10)]
    max: u32,

    /// Earliest outbound departure (HH:MM, local)
    #[arg(long)]
    min_departure: Option<TimeOfDay>,

    /// Latest return arrival (HH:MM, local), exclusive
    #[arg(long, requires = "arrival_date")]
    max_arrival: Option<TimeOfDay>,

    /// Date the return must land by (YYYY-MM-DD)
    #[arg(long, requires = "max_arrival")]
    arrival_date: Option<NaiveDate>,

    /// Print the formatted result as JSON
    #[arg(long)]
    json: bool,

    /// Log level when RUST_LOG is not set
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

impl Cli {
    fn search_request(&self) -> SearchRequest {
        let mut request = SearchRequest::new(&self.origin, &self.destination, self.departure)
            .adults(self.adults)
            .travel_class(self.class)
            .include_airlines(self.include_airlines.clone())
            .exclude_airlines(self.exclude_airlines.clone())
            .currency(&self.currency)
            .max_results(self.max);

        request.return_date = self.return_date;
        request.children = self.children;
        request.infants = self.infants;
        request.non_stop = self.non_stop;
        request.max_price = self.max_price;
        request
    }

    fn time_constraint(&self) -> TimeConstraint {
        let mut constraint = TimeConstraint::new();
        if let Some(min) = self.min_departure {
            constraint = constraint.min_departure(min);
        }
        if let (Some(latest), Some(date)) = (self.max_arrival, self.arrival_date) {
            constraint = constraint.max_arrival(latest, date);
        }
        constraint
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Missing credentials stop here, before any network call
    let cli = Cli::parse();
    logging::initialize_logging(&cli.log_level);

    let credentials = Credentials::new(&cli.client_id, &cli.client_secret)?;
    let config = ClientConfig::new(credentials, Environment::from_test_flag(cli.test));
    let client = FlightSearchClient::new(config)?;

    let request = cli.search_request();
    let constraint = cli.time_constraint();

    let raw = client
        .search_flights(&request)
        .await
        .context("searching flight offers")?;
    let mut formatted = client.format_flight_details(&raw);
    let found = formatted.flights.len();
    formatted.flights = client.filter_flights_by_time(&formatted.flights, &constraint);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&formatted)?);
        return Ok(());
    }

    if let Some(message) = &formatted.message {
        println!("{}", message);
        return Ok(());
    }

    println!("Found {} flights", formatted.total_results);
    if !constraint.is_unconstrained() {
        println!(
            "Flights meeting your time requirements: {} of {}",
            formatted.flights.len(),
            found
        );
    }

    for (index, flight) in formatted.flights.iter().enumerate() {
        print_flight(index + 1, flight);
    }

    Ok(())
}

fn print_flight(number: usize, flight: &FlattenedFlight) {
    println!("\n--- Flight Option {} ---", number);
    println!("Price: {} {}", flight.price.total, flight.price.currency);
    println!(
        "Airline: {}",
        flight.validating_airline.as_deref().unwrap_or("unknown")
    );
    if let Some(seats) = flight.bookable_seats {
        println!("Seats left: {}", seats);
    }

    print_itinerary("Outbound", &flight.outbound);
    if let Some(inbound) = &flight.return_itinerary {
        print_itinerary("Return", inbound);
    }
}

fn print_itinerary(label: &str, itinerary: &Itinerary) {
    match itinerary.duration.as_deref() {
        Some(duration) => println!("\n{} ({}):", label, humanize_duration(duration)),
        None => println!("\n{}:", label),
    }

    for (i, segment) in itinerary.segments.iter().enumerate() {
        println!(
            "  {}. {} {} -> {} {}",
            i + 1,
            segment.departure.airport,
            segment.departure.time,
            segment.arrival.airport,
            segment.arrival.time
        );
        println!(
            "     {} {}{} ({})",
            segment.airline.name.as_deref().unwrap_or(&segment.airline.code),
            segment.airline.code,
            segment.flight_number,
            segment.aircraft.name.as_deref().unwrap_or(&segment.aircraft.code)
        );
    }
}
