//! Resolve scanned payloads to serial numbers and optionally look them up.
//!
//! Usage: scan_resolve [--status] [--lookup] [PAYLOAD ...]
//! `--status` prints whether a backend URL is configured and exits.
//! A literal `\n` inside a payload argument is read as a line break. Without
//! payload arguments, stdin is read as a single payload.

use device_scanner_lib::api::ApiClient;
use device_scanner_lib::config::config_status;
use device_scanner_lib::{
    init_logging, Candidate, CodeKind, LookupDispatcher, LookupOutcome, RawScan, ScannerConfig,
};
use std::io::Read;
use std::process::ExitCode;

fn main() -> ExitCode {
    init_logging();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut lookup = false;
    let mut payloads: Vec<String> = Vec::new();
    for arg in std::env::args().skip(1) {
        if arg == "--status" {
            println!("{}", config_status());
            return Ok(());
        } else if arg == "--lookup" {
            lookup = true;
        } else {
            payloads.push(arg.replace("\\n", "\n"));
        }
    }
    if payloads.is_empty() {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        payloads.push(input);
    }

    let client = if lookup {
        let config = ScannerConfig::from_env()?;
        Some((ApiClient::from_config(&config)?, config.min_fallback_len))
    } else {
        None
    };

    for payload in payloads {
        let candidate = Candidate::from_scan(&RawScan::captured_now(payload, CodeKind::Barcode));
        let Some((api, min_len)) = &client else {
            println!("{}", candidate.serial);
            continue;
        };
        let outcome = LookupDispatcher::new(api)
            .with_min_fallback_len(*min_len)
            .dispatch(&candidate)?;
        match &outcome {
            LookupOutcome::Found { .. } => println!("{}", serde_json::to_string_pretty(&outcome)?),
            LookupOutcome::NotFound { attempted } => {
                println!("{}: not found (tried {})", candidate.serial, attempted.join(", "))
            }
        }
    }
    Ok(())
}
