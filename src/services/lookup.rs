//! Device lookup for a resolved candidate, with a brute-force fallback over
//! the payload's whitespace-separated parts.

use crate::api::ApiClient;
use crate::config::DEFAULT_MIN_FALLBACK_LEN;
use crate::error::Result;
use crate::models::Device;
use crate::scan::fallback_tokens;
use crate::types::Candidate;
use serde::Serialize;

pub trait DeviceLookup {
    /// `Ok(None)` means the backend does not know the code.
    fn find_by_code(&self, code: &str) -> Result<Option<Device>>;
}

impl DeviceLookup for ApiClient {
    fn find_by_code(&self, code: &str) -> Result<Option<Device>> {
        self.scan_device(code)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum LookupOutcome {
    Found {
        device: Device,
        matched_code: String,
        via_fallback: bool,
    },
    /// Nothing matched; the user falls back to typing the serial.
    NotFound { attempted: Vec<String> },
}

impl LookupOutcome {
    pub fn device(&self) -> Option<&Device> {
        match self {
            LookupOutcome::Found { device, .. } => Some(device),
            LookupOutcome::NotFound { .. } => None,
        }
    }
}

pub struct LookupDispatcher<'a, L: DeviceLookup + ?Sized> {
    lookup: &'a L,
    min_fallback_len: usize,
}

impl<'a, L: DeviceLookup + ?Sized> LookupDispatcher<'a, L> {
    pub fn new(lookup: &'a L) -> Self {
        Self {
            lookup,
            min_fallback_len: DEFAULT_MIN_FALLBACK_LEN,
        }
    }

    pub fn with_min_fallback_len(mut self, len: usize) -> Self {
        self.min_fallback_len = len;
        self
    }

    /// Try the resolved serial, then every long-enough part of the raw payload.
    /// Network errors end the dispatch immediately.
    pub fn dispatch(&self, candidate: &Candidate) -> Result<LookupOutcome> {
        let mut attempted: Vec<String> = Vec::new();

        if !candidate.serial.is_empty() {
            attempted.push(candidate.serial.clone());
            if let Some(device) = self.lookup.find_by_code(&candidate.serial)? {
                return Ok(LookupOutcome::Found {
                    device,
                    matched_code: candidate.serial.clone(),
                    via_fallback: false,
                });
            }
            log::info!("{} not found, trying payload parts", candidate.serial);
        }

        for part in fallback_tokens(&candidate.raw_payload, self.min_fallback_len) {
            if attempted.iter().any(|a| a == part) {
                continue;
            }
            attempted.push(part.to_string());
            if let Some(device) = self.lookup.find_by_code(part)? {
                log::info!("matched device {} via payload part {}", device.device_id, part);
                return Ok(LookupOutcome::Found {
                    device,
                    matched_code: part.to_string(),
                    via_fallback: true,
                });
            }
        }

        log::warn!("no device for any of {:?}", attempted);
        Ok(LookupOutcome::NotFound { attempted })
    }
}
