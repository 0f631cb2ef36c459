use clap::{Parser, Subcommand};
use place_capture::app::controller::report_capture_error;
use place_capture::app::{PlaceFlowController, Screen};
use place_capture::config::{CaptureOptions, ConfigError, MapsConfig};
use place_capture::domain::{Capability, Coordinate, PermissionState};
use place_capture::maps::{AddressLookup, LookupError, StaticMapUrlBuilder};
use place_capture::platform::SimulatedDevice;
use std::process::ExitCode;
use std::rc::Rc;
use thiserror::Error;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Capture places with a photo and a location
#[derive(Parser)]
struct Cli {
    /// Maps API key (falls back to PLACES_MAPS_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,
    #[arg(short, long, action, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the static map preview URL for a coordinate
    Preview {
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        lon: f64,
    },
    /// Look up the street address of a coordinate
    Address {
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        lon: f64,
    },
    /// Run a scripted session against a simulated device
    Demo {
        #[arg(long, action)]
        deny_camera: bool,
        #[arg(long, action)]
        deny_location: bool,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error("Invalid coordinate {0}")]
    InvalidCoordinate(Coordinate),
    #[error("Could not encode places: {0}")]
    Json(#[from] serde_json::Error),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Cli::parse();
    init_tracing(args.verbose);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "command failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run(args: Cli) -> Result<(), CliError> {
    match args.command {
        Command::Preview { lat, lon } => {
            let coordinate = parse_coordinate(lat, lon)?;
            let builder = StaticMapUrlBuilder::new(load_config(args.api_key)?)?;
            println!("{}", builder.preview_url(&coordinate));
        }
        Command::Address { lat, lon } => {
            let coordinate = parse_coordinate(lat, lon)?;
            let lookup = AddressLookup::new(load_config(args.api_key)?);
            println!("{}", lookup.address(&coordinate).await?);
        }
        Command::Demo {
            deny_camera,
            deny_location,
        } => {
            let config = match load_config(args.api_key) {
                Err(ConfigError::MissingApiKey) => MapsConfig::new("demo-key"),
                other => other?,
            };
            run_demo(config, deny_camera, deny_location).await?;
        }
    }
    Ok(())
}

fn parse_coordinate(lat: f64, lon: f64) -> Result<Coordinate, CliError> {
    let coordinate = Coordinate::new(lat, lon);
    if coordinate.is_valid() {
        Ok(coordinate)
    } else {
        Err(CliError::InvalidCoordinate(coordinate))
    }
}

fn load_config(api_key: Option<String>) -> Result<MapsConfig, ConfigError> {
    MapsConfig::from_lookup(|key| {
        if key == MapsConfig::ENV_API_KEY {
            if let Some(api_key) = &api_key {
                return Some(api_key.clone());
            }
        }
        std::env::var(key).ok()
    })
}

async fn run_demo(config: MapsConfig, deny_camera: bool, deny_location: bool) -> Result<(), CliError> {
    let device = Rc::new(SimulatedDevice::new());
    if deny_camera {
        device.set_permission(Capability::Camera, PermissionState::Denied);
    }
    if deny_location {
        device.set_permission(Capability::Location, PermissionState::Denied);
    }

    let mut controller =
        PlaceFlowController::new(Rc::clone(&device), config, CaptureOptions::default())?;

    // First place: photo plus GPS fix
    controller.open_add_place();
    controller.pump();
    controller.set_title("Ferry Building");
    if let Err(err) = controller.take_image().await {
        report_capture_error(&err);
    }
    if let Err(err) = controller.locate_user().await {
        report_capture_error(&err);
    }
    info!(preview = ?controller.location_preview(), "location preview");
    controller.add_place();
    controller.pump();

    // Second place: location picked on the map
    controller.open_add_place();
    controller.pump();
    controller.set_title("Alcatraz view");
    controller.pick_on_map();
    controller.pump();
    if controller.save_map_location().is_err() {
        info!("map save refused until a point is tapped");
    }
    if let Err(err) = controller.tap_map(Coordinate::new(37.8267, -122.4230)) {
        warn!(error = %err, "map tap refused");
    }
    if let Ok(coordinate) = controller.save_map_location() {
        info!(%coordinate, "map location saved");
    }
    controller.pump();
    controller.add_place();
    controller.pump();

    // Coming back to the list re-delivers the last place
    controller.focus(Screen::AddPlace);
    controller.focus(Screen::AllPlaces);

    for alert in device.alerts() {
        eprintln!("[alert] {}: {}", alert.title, alert.message);
    }
    println!("{}", serde_json::to_string_pretty(controller.places().places())?);
    Ok(())
}
