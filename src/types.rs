use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeKind {
    Qr,
    Barcode,
}

impl CodeKind {
    /// Map the camera's symbology name ("qr", "ean13", "code128", ...) to a code kind.
    pub fn from_symbology(symbology: &str) -> Self {
        if symbology.trim().eq_ignore_ascii_case("qr") {
            CodeKind::Qr
        } else {
            CodeKind::Barcode
        }
    }
}

/// One decode event from the camera.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawScan {
    pub payload: String,
    pub code_kind: CodeKind,
    pub captured_at_ms: i64,
}

impl RawScan {
    pub fn new(payload: impl Into<String>, code_kind: CodeKind, captured_at_ms: i64) -> Self {
        Self {
            payload: payload.into(),
            code_kind,
            captured_at_ms,
        }
    }

    /// Stamp a decode event with the current wall-clock time.
    pub fn captured_now(payload: impl Into<String>, code_kind: CodeKind) -> Self {
        Self::new(payload, code_kind, chrono::Utc::now().timestamp_millis())
    }
}

/// A resolved serial together with the payload it was read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub serial: String,
    pub raw_payload: String,
    pub code_kind: CodeKind,
    pub captured_at_ms: i64,
}

impl Candidate {
    pub fn from_scan(scan: &RawScan) -> Self {
        Self {
            serial: crate::scan::resolve_serial(&scan.payload),
            raw_payload: scan.payload.clone(),
            code_kind: scan.code_kind,
            captured_at_ms: scan.captured_at_ms,
        }
    }

    /// Typed-in serial: used verbatim (trimmed), no line heuristics.
    pub fn manual(text: &str, captured_at_ms: i64) -> Self {
        let serial = text.trim().to_string();
        Self {
            raw_payload: serial.clone(),
            serial,
            code_kind: CodeKind::Barcode,
            captured_at_ms,
        }
    }
}
