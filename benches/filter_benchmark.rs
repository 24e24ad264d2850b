use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use flight_search_client::vendor::{
    Dictionaries, FlightOffersResponse, LocationEntry, Meta, RawAircraft, RawEndpoint,
    RawItinerary, RawOffer, RawPrice, RawSegment,
};
use flight_search_client::{filter_flights_by_time, format_flight_details, TimeConstraint};

fn segment(from: &str, to: &str, departs: String, arrives: String, carrier: &str) -> RawSegment {
    RawSegment {
        id: None,
        departure: RawEndpoint {
            iata_code: from.to_string(),
            terminal: Some("1".to_string()),
            at: departs,
        },
        arrival: RawEndpoint {
            iata_code: to.to_string(),
            terminal: None,
            at: arrives,
        },
        carrier_code: carrier.to_string(),
        number: "100".to_string(),
        aircraft: RawAircraft {
            code: "320".to_string(),
        },
        duration: Some("PT4H30M".to_string()),
        number_of_stops: 0,
    }
}

// Round trips spread across the day so the filters drop a realistic share
fn synthetic_response(offers: usize) -> FlightOffersResponse {
    let carriers = ["LY", "A3", "LH", "W6"];
    let data = (0..offers)
        .map(|i| {
            let dep_hour = i % 24;
            let arr_hour = (i * 7) % 24;
            let carrier = carriers[i % carriers.len()];
            RawOffer {
                id: i.to_string(),
                itineraries: vec![
                    RawItinerary {
                        duration: Some("PT4H30M".to_string()),
                        segments: vec![segment(
                            "TLV",
                            "BER",
                            format!("2025-05-28T{:02}:15:00", dep_hour),
                            format!("2025-05-28T{:02}:45:00", (dep_hour + 4) % 24),
                            carrier,
                        )],
                    },
                    RawItinerary {
                        duration: Some("PT4H30M".to_string()),
                        segments: vec![segment(
                            "BER",
                            "TLV",
                            "2025-06-03T22:00:00".to_string(),
                            format!("2025-06-0{}T{:02}:30:00", 3 + i % 2, arr_hour),
                            carrier,
                        )],
                    },
                ],
                price: RawPrice {
                    currency: "EUR".to_string(),
                    total: format!("{}.00", 150 + i % 300),
                    base: "100.00".to_string(),
                    grand_total: None,
                },
                validating_airline_codes: vec![carrier.to_string()],
                number_of_bookable_seats: Some(9),
                ..Default::default()
            }
        })
        .collect();

    let mut dictionaries = Dictionaries::default();
    for code in carriers {
        dictionaries.carriers.insert(code.to_string(), format!("{} AIRLINES", code));
    }
    for code in ["TLV", "BER"] {
        dictionaries.locations.insert(
            code.to_string(),
            LocationEntry {
                city_code: Some(code.to_string()),
                country_code: None,
            },
        );
    }
    dictionaries.aircraft.insert("320".to_string(), "AIRBUS A320".to_string());

    FlightOffersResponse {
        data,
        dictionaries,
        meta: Some(Meta {
            count: Some(offers),
        }),
    }
}

pub fn filter_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("format_and_filter");

    let constraint = TimeConstraint::new()
        .min_departure("17:00".parse().unwrap())
        .max_arrival(
            "08:00".parse().unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 4).unwrap(),
        );

    for offers in [10usize, 250, 2_500].iter() {
        let response = synthetic_response(*offers);
        group.bench_with_input(BenchmarkId::from_parameter(offers), &response, |b, response| {
            b.iter(|| {
                let formatted = format_flight_details(black_box(response));
                black_box(filter_flights_by_time(&formatted.flights, &constraint))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, filter_benchmark);
criterion_main!(benches);
