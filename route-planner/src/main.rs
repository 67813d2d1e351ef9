use std::process::ExitCode;

use serde::Serialize;
use tracing_subscriber::EnvFilter;

use route_planner::domain::StopId;
use route_planner::planner::{RouteOutcome, RoutePlanner};

/// JSON body printed for a found route, the same shape the surrounding
/// API layer serves.
#[derive(Serialize)]
struct RouteResponse {
    departure: String,
    destination: String,
    stops: Vec<StopId>,
    stop_names: Vec<String>,
    total_minutes: u32,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let [_, dir, departure, destination] = args.as_slice() else {
        eprintln!("Usage: route-planner <timetable-dir> <departure> <destination>");
        return ExitCode::from(2);
    };

    let planner = match RoutePlanner::load_dir(dir) {
        Ok(planner) => planner,
        Err(err) => {
            eprintln!("Failed to load timetable from {dir}: {err}");
            return ExitCode::FAILURE;
        }
    };

    match planner.find_route(departure, destination) {
        RouteOutcome::Found(itinerary) => {
            let response = RouteResponse {
                departure: departure.clone(),
                destination: destination.clone(),
                stop_names: planner.stop_names(&itinerary),
                stops: itinerary.stops,
                total_minutes: itinerary.total_minutes,
            };
            match serde_json::to_string_pretty(&response) {
                Ok(body) => {
                    println!("{body}");
                    ExitCode::SUCCESS
                }
                Err(err) => {
                    eprintln!("Failed to serialize response: {err}");
                    ExitCode::FAILURE
                }
            }
        }
        RouteOutcome::PlaceNotFound { place } => {
            eprintln!("No stop matches '{place}'.");
            ExitCode::FAILURE
        }
        RouteOutcome::NoRoute => {
            eprintln!("No route found from {departure} to {destination}.");
            ExitCode::FAILURE
        }
    }
}
