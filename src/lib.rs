pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod scan;
pub mod services;
pub mod session;
pub mod types;

pub use cache::{CandidateSet, Observation};
pub use config::{ScanWindows, ScannerConfig};
pub use error::{Result, ScanError};
pub use services::lookup::{DeviceLookup, LookupDispatcher, LookupOutcome};
pub use session::{LookupTicket, ScannerSession};
pub use types::{Candidate, CodeKind, RawScan};

/// Initialize logging (reads RUST_LOG env var). Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init();
}
