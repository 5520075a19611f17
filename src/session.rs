//! State of one scanning screen: recent candidates, camera permission and the
//! lookup currently in flight.

use crate::cache::{CandidateSet, Observation};
use crate::config::ScanWindows;
use crate::error::{Result, ScanError};
use crate::services::lookup::LookupOutcome;
use crate::types::{Candidate, RawScan};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraPermission {
    Undetermined,
    Granted,
    Denied,
}

/// Handle for one lookup. Only the most recently issued ticket is accepted
/// back by [`ScannerSession::complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    generation: u64,
    pub candidate: Candidate,
}

impl LookupTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug)]
pub struct ScannerSession {
    candidates: CandidateSet,
    camera: CameraPermission,
    denial_reported: bool,
    generation: u64,
    in_flight: Option<u64>,
}

impl ScannerSession {
    pub fn new(windows: ScanWindows) -> Self {
        Self {
            candidates: CandidateSet::new(windows),
            camera: CameraPermission::Undetermined,
            denial_reported: false,
            generation: 0,
            in_flight: None,
        }
    }

    pub fn camera_permission(&self) -> CameraPermission {
        self.camera
    }

    pub fn camera_enabled(&self) -> bool {
        self.camera != CameraPermission::Denied
    }

    /// Record the permission answer. A denial is returned as an error the
    /// first time only; later denials are silent.
    pub fn set_camera_permission(&mut self, granted: bool) -> Option<ScanError> {
        if granted {
            self.camera = CameraPermission::Granted;
            return None;
        }
        self.camera = CameraPermission::Denied;
        self.candidates.clear();
        if self.denial_reported {
            None
        } else {
            self.denial_reported = true;
            log::warn!("camera permission denied, manual entry only");
            Some(ScanError::CameraPermissionDenied)
        }
    }

    pub fn candidates(&self) -> Vec<Candidate> {
        self.candidates.distinct()
    }

    pub fn is_lookup_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Feed one decode event. Scans are ignored while the camera is denied
    /// or a lookup is running.
    pub fn observe(&mut self, scan: &RawScan) -> Observation {
        if !self.camera_enabled() || self.in_flight.is_some() {
            return Observation::Ignored;
        }
        self.candidates.observe(scan)
    }

    /// Auto-select a lone candidate once the settle delay has passed.
    pub fn poll(&mut self, now_ms: i64) -> Option<LookupTicket> {
        if self.in_flight.is_some() {
            return None;
        }
        let candidate = self.candidates.settled(now_ms)?;
        self.candidates.clear();
        Some(self.issue(candidate))
    }

    /// User picked one of the presented candidates.
    pub fn select(&mut self, serial: &str) -> Option<LookupTicket> {
        let candidate = self.candidates.select(serial)?;
        Some(self.issue(candidate))
    }

    /// Serial typed by hand; replaces anything pending.
    pub fn submit_manual(&mut self, text: &str, now_ms: i64) -> Option<LookupTicket> {
        let candidate = Candidate::manual(text, now_ms);
        if candidate.serial.is_empty() {
            return None;
        }
        self.candidates.clear();
        Some(self.issue(candidate))
    }

    /// Screen dismissed or scanner reset: drop candidates and orphan any
    /// in-flight lookup.
    pub fn reset(&mut self) {
        self.candidates.clear();
        self.generation += 1;
        self.in_flight = None;
    }

    /// Hand back a lookup result. Returns `None` when the ticket is stale.
    pub fn complete(
        &mut self,
        ticket: &LookupTicket,
        result: Result<LookupOutcome>,
    ) -> Option<Result<LookupOutcome>> {
        if self.in_flight != Some(ticket.generation) {
            log::info!(
                "dropping stale lookup result for {} (generation {})",
                ticket.candidate.serial,
                ticket.generation
            );
            return None;
        }
        self.in_flight = None;
        Some(result)
    }

    fn issue(&mut self, candidate: Candidate) -> LookupTicket {
        self.generation += 1;
        self.in_flight = Some(self.generation);
        log::debug!("lookup #{} for {}", self.generation, candidate.serial);
        LookupTicket {
            generation: self.generation,
            candidate,
        }
    }
}
