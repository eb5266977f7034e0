//! MobileAPI.dev client
//!
//! Listing endpoints return complete device records, so every [`PhoneRef`]
//! produced here is preloaded and `fetch_details` never hits the network.
//!
//! - `GET /devices/latest/?limit=`
//! - `GET /devices/?manufacturer=&limit=`
//! - `GET /devices/search/?name=&limit=`
//!
//! Authentication: `Authorization: Token <key>`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{build_http_client, check_status, trim_base_url, PhoneRef, PhoneSource, RawPhone, SourceKind};
use crate::error::SourceError;

/// Device record
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MobileApiDevice {
    pub id: Option<i64>,
    pub name: String,
    pub manufacturer_name: String,
    /// ISO date ("2024-01-24") or free text
    pub release_date: Option<String>,
    pub ram: Option<String>,
    pub storage: Option<String>,
    pub main_camera: Option<String>,
    pub selfie_camera: Option<String>,
    pub battery_capacity: Option<String>,
    pub screen_size: Option<String>,
    pub screen_resolution: Option<String>,
    pub chipset: Option<String>,
    pub os: Option<String>,
    pub dimensions: Option<String>,
    pub weight: Option<String>,
    pub build: Option<String>,
    pub price: Option<String>,
    pub image_url: Option<String>,
    pub images: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct DeviceList {
    #[serde(default)]
    devices: Vec<MobileApiDevice>,
}

pub struct MobileApiClient {
    http_client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl MobileApiClient {
    pub fn new(api_key: impl Into<String>, base_url: &str) -> Result<Self, SourceError> {
        let api_key = api_key.into();
        if !mpc_common::config::is_valid_key(&api_key) {
            return Err(SourceError::NotConfigured("MobileAPI key is empty".to_string()));
        }
        Ok(Self {
            http_client: build_http_client()?,
            api_key,
            base_url: trim_base_url(base_url),
        })
    }

    async fn list_devices(
        &self,
        path: &str,
        query: &[(&str, String)],
        what: &str,
    ) -> Result<Vec<MobileApiDevice>, SourceError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "Querying MobileAPI");

        let response = self
            .http_client
            .get(&url)
            .query(query)
            .header("Authorization", format!("Token {}", self.api_key))
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let response = check_status(response, what).await?;
        let list: DeviceList = response
            .json()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))?;
        Ok(list.devices)
    }
}

fn devices_to_refs(devices: Vec<MobileApiDevice>, limit: usize) -> Vec<PhoneRef> {
    devices
        .into_iter()
        .take(limit)
        .map(|device| PhoneRef {
            brand: device.manufacturer_name.clone(),
            name: device.name.clone(),
            preloaded: Some(RawPhone::MobileApi(device)),
        })
        .collect()
}

#[async_trait]
impl PhoneSource for MobileApiClient {
    fn kind(&self) -> SourceKind {
        SourceKind::MobileApi
    }

    async fn list_latest(&self, limit: usize) -> Result<Vec<PhoneRef>, SourceError> {
        let devices = self
            .list_devices("/devices/latest/", &[("limit", limit.to_string())], "latest devices")
            .await?;
        Ok(devices_to_refs(devices, limit))
    }

    async fn list_by_brand(&self, brand: &str, limit: usize) -> Result<Vec<PhoneRef>, SourceError> {
        let devices = self
            .list_devices(
                "/devices/",
                &[
                    ("manufacturer", brand.trim().to_string()),
                    ("limit", limit.to_string()),
                ],
                &format!("devices for brand {}", brand),
            )
            .await?;
        if devices.is_empty() {
            return Err(SourceError::NotFound(format!("Brand '{}' not found", brand.trim())));
        }
        Ok(devices_to_refs(devices, limit))
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<PhoneRef>, SourceError> {
        let devices = self
            .list_devices(
                "/devices/search/",
                &[("name", query.to_string()), ("limit", limit.to_string())],
                &format!("search '{}'", query),
            )
            .await?;
        Ok(devices_to_refs(devices, limit))
    }

    async fn fetch_details(&self, phone: &PhoneRef) -> Result<RawPhone, SourceError> {
        phone
            .preloaded
            .clone()
            .ok_or_else(|| SourceError::NotFound(phone.display_name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_deserializes_sparse_record() {
        let device: MobileApiDevice = serde_json::from_str(
            r#"{"id": 7, "name": "Pixel 8", "manufacturer_name": "Google", "ram": "8 GB"}"#,
        )
        .unwrap();
        assert_eq!(device.manufacturer_name, "Google");
        assert_eq!(device.ram.as_deref(), Some("8 GB"));
        assert!(device.images.is_empty());
    }

    #[test]
    fn test_refs_are_preloaded_and_limited() {
        let devices = vec![
            MobileApiDevice {
                name: "Pixel 8".to_string(),
                manufacturer_name: "Google".to_string(),
                ..Default::default()
            },
            MobileApiDevice {
                name: "Pixel 8 Pro".to_string(),
                manufacturer_name: "Google".to_string(),
                ..Default::default()
            },
        ];
        let refs = devices_to_refs(devices, 1);
        assert_eq!(refs.len(), 1);
        assert!(matches!(refs[0].preloaded, Some(RawPhone::MobileApi(_))));
    }
}
