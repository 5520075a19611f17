use crate::error::{Result, ScanError};
use crate::services::location::AddressPrefill;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderKind {
    #[default]
    #[serde(rename = "instalacja")]
    Installation,
    #[serde(rename = "wymiana")]
    Replacement,
    #[serde(rename = "awaria")]
    Failure,
    #[serde(rename = "uszkodzony")]
    Damaged,
}

/// Body of `POST /api/installations`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstallationDraft {
    pub device_id: String,
    #[serde(rename = "adres_klienta")]
    pub customer_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(rename = "rodzaj_zlecenia")]
    pub order_kind: OrderKind,
}

impl InstallationDraft {
    pub fn new(device_id: impl Into<String>, order_kind: OrderKind) -> Self {
        Self {
            device_id: device_id.into(),
            customer_address: String::new(),
            latitude: None,
            longitude: None,
            order_kind,
        }
    }

    /// Fill coordinates and, if still empty, the address from a location prefill.
    pub fn apply_prefill(&mut self, prefill: &AddressPrefill) {
        if let Some(coords) = prefill.coordinates {
            self.latitude = Some(coords.latitude);
            self.longitude = Some(coords.longitude);
        }
        if self.customer_address.trim().is_empty() {
            if let Some(address) = &prefill.address {
                self.customer_address = address.clone();
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.device_id.trim().is_empty() {
            return Err(ScanError::Validation("Device is required.".to_string()));
        }
        if self.customer_address.trim().is_empty() {
            return Err(ScanError::Validation("Customer address is required.".to_string()));
        }
        Ok(())
    }
}

/// Installation record echoed back by the backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Installation {
    pub installation_id: String,
    pub device_id: String,
    pub user_id: String,
    #[serde(rename = "adres_klienta", alias = "adres", default)]
    pub customer_address: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(rename = "rodzaj_zlecenia", default)]
    pub order_kind: OrderKind,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::location::Coordinates;
    use serde_json::json;

    #[test]
    fn draft_serializes_backend_field_names() {
        let mut draft = InstallationDraft::new("dev_1", OrderKind::Replacement);
        draft.customer_address = "ul. Testowa 123, 25-001 Kielce".to_string();
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            value,
            json!({
                "device_id": "dev_1",
                "adres_klienta": "ul. Testowa 123, 25-001 Kielce",
                "rodzaj_zlecenia": "wymiana"
            })
        );
    }

    #[test]
    fn draft_without_address_is_rejected() {
        let draft = InstallationDraft::new("dev_1", OrderKind::Installation);
        assert!(matches!(draft.validate(), Err(ScanError::Validation(_))));
    }

    #[test]
    fn prefill_does_not_overwrite_typed_address() {
        let mut draft = InstallationDraft::new("dev_1", OrderKind::Installation);
        draft.customer_address = "typed".to_string();
        draft.apply_prefill(&AddressPrefill {
            coordinates: Some(Coordinates {
                latitude: 50.8661,
                longitude: 20.6286,
            }),
            address: Some("geocoded".to_string()),
        });
        assert_eq!(draft.customer_address, "typed");
        assert_eq!(draft.latitude, Some(50.8661));
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn parses_installation_with_legacy_address_field() {
        let inst: Installation = serde_json::from_value(json!({
            "installation_id": "inst_1",
            "device_id": "dev_1",
            "user_id": "user_1",
            "nazwa_urzadzenia": "ONT",
            "adres": "Kielce",
            "rodzaj_zlecenia": "awaria"
        }))
        .unwrap();
        assert_eq!(inst.customer_address.as_deref(), Some("Kielce"));
        assert_eq!(inst.order_kind, OrderKind::Failure);
    }
}
