//! Recent scans of one capture session, deduplicated by resolved serial.

use crate::config::ScanWindows;
use crate::types::{Candidate, RawScan};

/// What a new scan did to the candidate set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    /// Payload resolved to nothing; not recorded.
    Empty,
    /// Not recorded: the caller has paused scanning.
    Ignored,
    /// Same serial already seen inside the dedup window.
    Duplicate,
    /// Exactly one distinct candidate is pending.
    Single(Candidate),
    /// More than one distinct candidate; the user has to pick.
    Ambiguous(Vec<Candidate>),
}

#[derive(Debug, Clone)]
pub struct CandidateSet {
    windows: ScanWindows,
    entries: Vec<Candidate>,
}

impl CandidateSet {
    pub fn new(windows: ScanWindows) -> Self {
        Self {
            windows: windows.normalized(),
            entries: Vec::new(),
        }
    }

    pub fn windows(&self) -> ScanWindows {
        self.windows
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn observe(&mut self, scan: &RawScan) -> Observation {
        let candidate = Candidate::from_scan(scan);
        if candidate.serial.is_empty() {
            return Observation::Empty;
        }
        let now = scan.captured_at_ms;

        self.prune(now);

        let dedup_ms = self.windows.dedup_ms;
        let repeat = self
            .entries
            .iter()
            .any(|e| e.serial == candidate.serial && now - e.captured_at_ms <= dedup_ms);
        if repeat {
            log::debug!("duplicate detection of {} suppressed", candidate.serial);
            return Observation::Duplicate;
        }

        self.entries.push(candidate);
        let mut distinct = self.distinct();
        if distinct.len() > 1 {
            log::info!("{} distinct codes in view, asking user to choose", distinct.len());
            Observation::Ambiguous(distinct)
        } else {
            // Just pushed, so exactly one.
            Observation::Single(distinct.remove(0))
        }
    }

    /// Drop entries captured more than the prune window before `now_ms`.
    pub fn prune(&mut self, now_ms: i64) {
        let prune_ms = self.windows.prune_ms;
        self.entries.retain(|e| now_ms - e.captured_at_ms <= prune_ms);
    }

    /// One candidate per serial, in detection order.
    pub fn distinct(&self) -> Vec<Candidate> {
        let mut out: Vec<Candidate> = Vec::new();
        for entry in &self.entries {
            if !out.iter().any(|c| c.serial == entry.serial) {
                out.push(entry.clone());
            }
        }
        out
    }

    /// The lone candidate once the settle delay has passed since the last
    /// accepted scan. Does not clear the set.
    pub fn settled(&self, now_ms: i64) -> Option<Candidate> {
        let last = self.entries.iter().map(|e| e.captured_at_ms).max()?;
        if now_ms - last < self.windows.settle_ms {
            return None;
        }
        let mut distinct = self.distinct();
        if distinct.len() == 1 {
            distinct.pop()
        } else {
            None
        }
    }

    /// Take the candidate with the given serial and clear the set.
    pub fn select(&mut self, serial: &str) -> Option<Candidate> {
        let chosen = self.distinct().into_iter().find(|c| c.serial == serial)?;
        self.clear();
        Some(chosen)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
