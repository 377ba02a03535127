//! # MatSim CLI
//!
//! Thin command-line front end over `matsim_core`. Reads a JSON
//! `SimulationRequest` (from a file or stdin), runs it against the reference
//! catalog and prints the `SimulationResult` as JSON on stdout.
//!
//! ```text
//! matsim request.json
//! echo '{"material_id":"peek","simulation_type":"thermal"}' | matsim
//! matsim --material steel_316l --type comprehensive --temperature 600
//! matsim --list
//! ```
//!
//! Failures are printed as JSON too (`{"code": ..., "error": {...}}`) with a
//! non-zero exit status. Logs go to stderr; set `RUST_LOG` or pass `--verbose`.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use serde_json::json;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use matsim_core::materials::MaterialCatalog;
use matsim_core::{
    Engine, EngineError, ReferenceCatalog, SimulationConditions, SimulationRequest, SimulationSettings,
    SimulationType,
};

#[derive(Parser, Debug)]
#[command(name = "matsim", version, about = "Predict material properties under operating conditions")]
struct Args {
    /// Request JSON file ("-" or omitted reads stdin)
    request: Option<PathBuf>,

    /// Settings JSON file overriding model constants
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Build the request from a catalog id instead of reading JSON
    #[arg(long, conflicts_with = "request")]
    material: Option<String>,

    /// Simulation type for --material (mechanical, thermal, electrical, chemical, comprehensive)
    #[arg(long = "type", default_value = "comprehensive")]
    simulation_type: String,

    /// Operating temperature for --material (°C)
    #[arg(long, requires = "material")]
    temperature: Option<f64>,

    /// List reference catalog ids and exit
    #[arg(long)]
    list: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Debug-level logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Anything that stops the CLI from producing a result
enum Failure {
    Engine(EngineError),
    Input(String),
}

impl From<EngineError> for Failure {
    fn from(e: EngineError) -> Self {
        Failure::Engine(e)
    }
}

impl Failure {
    fn to_json(&self) -> serde_json::Value {
        match self {
            Failure::Engine(e) => json!({ "code": e.error_code(), "message": e.to_string(), "error": e }),
            Failure::Input(msg) => json!({ "code": "INPUT", "message": msg }),
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr).with_target(false))
        .init();
}

fn read_input(path: Option<&Path>) -> Result<String, Failure> {
    match path {
        Some(p) if p != Path::new("-") => {
            fs::read_to_string(p).map_err(|e| Failure::Input(format!("Cannot read {}: {}", p.display(), e)))
        }
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| Failure::Input(format!("Cannot read stdin: {}", e)))?;
            Ok(buf)
        }
    }
}

fn load_settings(path: Option<&Path>) -> Result<SimulationSettings, Failure> {
    let Some(path) = path else {
        return Ok(SimulationSettings::default());
    };
    let text = fs::read_to_string(path)
        .map_err(|e| Failure::Input(format!("Cannot read {}: {}", path.display(), e)))?;
    serde_json::from_str(&text)
        .map_err(|e| EngineError::invalid_request("settings", e.to_string()).into())
}

fn build_request(args: &Args) -> Result<SimulationRequest, Failure> {
    if let Some(id) = &args.material {
        let simulation_type = SimulationType::from_str_flexible(&args.simulation_type)?;
        let mut request = SimulationRequest::for_material(id.as_str(), simulation_type);
        if let Some(t) = args.temperature {
            request = request.with_conditions(SimulationConditions::at_temperature(t));
        }
        return Ok(request);
    }
    let text = read_input(args.request.as_deref())?;
    serde_json::from_str(&text).map_err(|e| EngineError::invalid_request("request", e.to_string()).into())
}

fn render(value: &impl serde::Serialize, pretty: bool) -> String {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.unwrap_or_else(|e| json!({ "code": "INPUT", "message": e.to_string() }).to_string())
}

fn run(args: &Args) -> Result<String, Failure> {
    let settings = load_settings(args.settings.as_deref())?;
    let engine = Engine::with_settings(ReferenceCatalog, settings)?;

    if args.list {
        return Ok(render(&engine.catalog().material_ids(), args.pretty));
    }

    let request = build_request(args)?;
    debug!(?request, "parsed request");
    let result = engine.simulate(&request)?;
    info!(material = %result.material_id, confidence = result.confidence, "simulation finished");
    Ok(render(&result, args.pretty))
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(failure) => {
            println!("{}", render(&failure.to_json(), args.pretty));
            ExitCode::FAILURE
        }
    }
}
