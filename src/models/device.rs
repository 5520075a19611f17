use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceStatus {
    #[serde(rename = "dostepny")]
    Available,
    #[serde(rename = "przypisany")]
    Assigned,
    #[serde(rename = "zainstalowany")]
    Installed,
    #[serde(other)]
    Unknown,
}

impl DeviceStatus {
    pub fn as_query(&self) -> Option<&'static str> {
        match self {
            DeviceStatus::Available => Some("dostepny"),
            DeviceStatus::Assigned => Some("przypisany"),
            DeviceStatus::Installed => Some("zainstalowany"),
            DeviceStatus::Unknown => None,
        }
    }
}

/// Device record as returned by `/api/devices`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub device_id: String,
    #[serde(rename = "nazwa")]
    pub name: String,
    #[serde(rename = "numer_seryjny")]
    pub serial_number: String,
    #[serde(rename = "kod_kreskowy", default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(rename = "kod_qr", default, skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,
    #[serde(rename = "przypisany_do", default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    pub status: DeviceStatus,
}

#[derive(Debug, Clone, Default)]
pub struct DeviceFilter {
    pub status: Option<DeviceStatus>,
    pub assigned_to: Option<String>,
}

impl DeviceFilter {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status.and_then(|s| s.as_query()) {
            pairs.push(("status", status.to_string()));
        }
        if let Some(user) = self.assigned_to.as_deref().filter(|u| !u.is_empty()) {
            pairs.push(("assigned_to", user.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_backend_device() {
        let device: Device = serde_json::from_value(json!({
            "device_id": "dev_0a1b2c3d4e5f",
            "nazwa": "ONT Huawei HG8245",
            "numer_seryjny": "SN48575443",
            "kod_kreskowy": "BC1234",
            "kod_qr": null,
            "przypisany_do": "user_1",
            "status": "przypisany",
            "created_at": "2025-03-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(device.name, "ONT Huawei HG8245");
        assert_eq!(device.serial_number, "SN48575443");
        assert_eq!(device.qr_code, None);
        assert_eq!(device.status, DeviceStatus::Assigned);
    }

    #[test]
    fn unknown_status_is_preserved_as_unknown() {
        let device: Device = serde_json::from_value(json!({
            "device_id": "d",
            "nazwa": "x",
            "numer_seryjny": "y",
            "status": "w_serwisie"
        }))
        .unwrap();
        assert_eq!(device.status, DeviceStatus::Unknown);
    }

    #[test]
    fn filter_builds_query_pairs() {
        let filter = DeviceFilter {
            status: Some(DeviceStatus::Available),
            assigned_to: Some(String::new()),
        };
        assert_eq!(filter.query_pairs(), vec![("status", "dostepny".to_string())]);
    }
}
