//! RapidAPI mobile phone specs client (GSMArena-style data)
//!
//! Endpoints (relative to the configured base URL):
//! - `GET /all-brands`
//! - `GET /get-models-by-brandname/{brand}`
//! - `GET /get-specifications-by-brandname-modelname/{brand}/{model}`
//! - `GET /search?query=`
//! - `GET /latest`
//!
//! Every request carries `X-RapidAPI-Key` and `X-RapidAPI-Host`.

use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{build_http_client, check_status, trim_base_url, PhoneRef, PhoneSource, RawPhone, SourceKind};
use crate::error::SourceError;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GsmBrand {
    #[serde(default)]
    pub brand_id: Option<i64>,
    pub brand_value: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GsmModel {
    #[serde(default)]
    pub model_id: Option<i64>,
    pub model_value: String,
}

/// Listing entry returned by `/search` and `/latest`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GsmListing {
    pub brand_value: String,
    pub model_value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct GsmSpecPair {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct GsmSpecCategory {
    pub category: String,
    #[serde(default)]
    pub specifications: Vec<GsmSpecPair>,
}

/// Full phone record
///
/// Values may contain HTML fragments (`<br>`, entities); the transformer
/// cleans them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GsmPhoneDetails {
    pub brand: String,
    pub name: String,
    pub img: Option<String>,
    pub images: Vec<String>,
    /// e.g. "Released 2024, January 24" or "Exp. release 2025, March"
    pub released: Option<String>,
    pub price: Option<String>,
    pub quick_spec: Vec<GsmSpecPair>,
    pub detail_spec: Vec<GsmSpecCategory>,
}

pub struct RapidApiClient {
    http_client: reqwest::Client,
    api_key: String,
    host: String,
    base_url: String,
}

impl RapidApiClient {
    pub fn new(
        api_key: impl Into<String>,
        host: impl Into<String>,
        base_url: &str,
    ) -> Result<Self, SourceError> {
        let api_key = api_key.into();
        if !mpc_common::config::is_valid_key(&api_key) {
            return Err(SourceError::NotConfigured("RapidAPI key is empty".to_string()));
        }
        Ok(Self {
            http_client: build_http_client()?,
            api_key,
            host: host.into(),
            base_url: trim_base_url(base_url),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, SourceError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| SourceError::NotConfigured(format!("Invalid RapidAPI base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| SourceError::NotConfigured("RapidAPI base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
        what: &str,
    ) -> Result<T, SourceError> {
        debug!(url = %url, "Querying RapidAPI");

        let response = self
            .http_client
            .get(url)
            .query(query)
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", &self.host)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let response = check_status(response, what).await?;
        response
            .json()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))
    }

    pub async fn list_brands(&self) -> Result<Vec<GsmBrand>, SourceError> {
        let url = self.endpoint(&["all-brands"])?;
        self.get_json(url, &[], "brand list").await
    }

    pub async fn list_models(&self, brand: &str) -> Result<Vec<GsmModel>, SourceError> {
        let url = self.endpoint(&["get-models-by-brandname", brand])?;
        self.get_json(url, &[], &format!("models for brand {}", brand))
            .await
    }

    pub async fn phone_details(&self, brand: &str, model: &str) -> Result<GsmPhoneDetails, SourceError> {
        let url = self.endpoint(&["get-specifications-by-brandname-modelname", brand, model])?;
        let mut details: GsmPhoneDetails = self
            .get_json(url, &[], &format!("{} {}", brand, model))
            .await?;
        if details.brand.trim().is_empty() {
            details.brand = brand.to_string();
        }
        if details.name.trim().is_empty() {
            details.name = model.to_string();
        }
        Ok(details)
    }
}

fn listings_to_refs(listings: Vec<GsmListing>, limit: usize) -> Vec<PhoneRef> {
    listings
        .into_iter()
        .take(limit)
        .map(|l| PhoneRef::new(l.brand_value, l.model_value))
        .collect()
}

#[async_trait]
impl PhoneSource for RapidApiClient {
    fn kind(&self) -> SourceKind {
        SourceKind::RapidApi
    }

    async fn list_latest(&self, limit: usize) -> Result<Vec<PhoneRef>, SourceError> {
        let url = self.endpoint(&["latest"])?;
        let listings: Vec<GsmListing> = self.get_json(url, &[], "latest phones").await?;
        Ok(listings_to_refs(listings, limit))
    }

    async fn list_by_brand(&self, brand: &str, limit: usize) -> Result<Vec<PhoneRef>, SourceError> {
        let brands = self.list_brands().await?;
        let wanted = brand.trim();
        let matched = brands
            .into_iter()
            .find(|b| b.brand_value.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SourceError::NotFound(format!("Brand '{}' not found", wanted)))?;

        let models = self.list_models(&matched.brand_value).await?;
        Ok(models
            .into_iter()
            .take(limit)
            .map(|m| PhoneRef::new(matched.brand_value.clone(), m.model_value))
            .collect())
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<PhoneRef>, SourceError> {
        let url = self.endpoint(&["search"])?;
        let listings: Vec<GsmListing> = self
            .get_json(url, &[("query", query)], &format!("search '{}'", query))
            .await?;
        Ok(listings_to_refs(listings, limit))
    }

    async fn fetch_details(&self, phone: &PhoneRef) -> Result<RawPhone, SourceError> {
        if let Some(raw) = &phone.preloaded {
            return Ok(raw.clone());
        }
        let details = self.phone_details(&phone.brand, &phone.name).await?;
        Ok(RawPhone::Gsm(details))
    }
}
