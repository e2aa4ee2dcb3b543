use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use station_selector::{EngineConfig, SelectionEngine, SelectionRequest, SelectionResponse};

/// Recommend the best charging station for a location
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Request JSON ({ "userLocation": ..., "stations": [...] }); stdin when omitted
    request: Option<PathBuf>,

    /// Engine configuration JSON; defaults apply to anything it leaves out
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pretty-print the response
    #[arg(short, long)]
    pretty: bool,
}

fn read_request(path: Option<&PathBuf>) -> Result<SelectionRequest, Box<dyn Error>> {
    let body = match path {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut body = String::new();
            io::stdin().read_to_string(&mut body)?;
            body
        }
    };
    Ok(serde_json::from_str(&body)?)
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig, Box<dyn Error>> {
    match path {
        Some(path) => Ok(EngineConfig::from_json(&fs::read_to_string(path)?)?),
        None => Ok(EngineConfig::default()),
    }
}

fn run(cli: &Cli) -> Result<String, Box<dyn Error>> {
    let config = load_config(cli.config.as_ref())?;
    let engine = SelectionEngine::new(config)?;
    let request = read_request(cli.request.as_ref())?;

    log::info!(
        "selecting among {} stations for ({:.5}, {:.5})",
        request.stations.len(),
        request.user_location.lat,
        request.user_location.lng
    );

    let start_time = std::time::Instant::now();
    let recommendation = engine.select_best_station(&request.user_location, &request.stations)?;
    log::info!("selection finished in {:.2?}", start_time.elapsed());

    let response = SelectionResponse::from_recommendation(
        recommendation,
        &request.user_location,
        &request.stations,
    );
    let body = if cli.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    Ok(body)
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(body) => {
            println!("{}", body);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
