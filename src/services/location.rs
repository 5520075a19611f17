//! Address prefill from the device location service. Failures only mean the
//! address field starts empty.

use crate::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Reverse-geocoded address parts as reported by the platform geocoder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalAddress {
    pub street: Option<String>,
    pub street_number: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
}

impl PostalAddress {
    /// "<street> <number>, <postal code> <city>", skipping missing parts.
    pub fn to_line(&self) -> Option<String> {
        fn join(a: &Option<String>, b: &Option<String>) -> String {
            [a, b]
                .iter()
                .filter_map(|p| p.as_deref())
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        }
        let parts: Vec<String> = [
            join(&self.street, &self.street_number),
            join(&self.postal_code, &self.city),
        ]
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

pub trait LocationService {
    fn current_position(&self) -> Result<Coordinates>;
    fn reverse_geocode(&self, at: Coordinates) -> Result<Option<PostalAddress>>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AddressPrefill {
    pub coordinates: Option<Coordinates>,
    pub address: Option<String>,
}

pub fn prefill_address(service: &dyn LocationService) -> AddressPrefill {
    let coordinates = match service.current_position() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("location unavailable, skipping address prefill: {}", e);
            return AddressPrefill::default();
        }
    };
    let address = match service.reverse_geocode(coordinates) {
        Ok(found) => found.and_then(|a| a.to_line()),
        Err(e) => {
            log::warn!("reverse geocoding failed: {}", e);
            None
        }
    };
    AddressPrefill {
        coordinates: Some(coordinates),
        address,
    }
}
