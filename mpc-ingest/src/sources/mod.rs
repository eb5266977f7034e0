//! Third-party phone data sources
//!
//! Each vendor is wrapped behind [`PhoneSource`] so the import orchestrator
//! can run the same listing → details → transform loop against any of them.

pub mod mobileapi;
pub mod rapidapi;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::SourceError;
pub use mobileapi::{MobileApiClient, MobileApiDevice};
pub use rapidapi::{GsmPhoneDetails, RapidApiClient};

const USER_AGENT: &str = "mpc/0.1.0 (mobile price compare importer)";
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Which upstream vendor an import runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    RapidApi,
    MobileApi,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::RapidApi => "rapidapi",
            SourceKind::MobileApi => "mobileapi",
        }
    }
}

impl std::str::FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rapidapi" | "gsm" => Ok(SourceKind::RapidApi),
            "mobileapi" | "mobileapi.dev" => Ok(SourceKind::MobileApi),
            other => Err(format!("Unknown import source: {}", other)),
        }
    }
}

/// Vendor record as fetched, before transformation
#[derive(Debug, Clone)]
pub enum RawPhone {
    Gsm(GsmPhoneDetails),
    MobileApi(MobileApiDevice),
}

/// Listing entry pointing at one upstream phone
///
/// Vendors that return full records in listings set `preloaded` so no
/// second request is needed.
#[derive(Debug, Clone)]
pub struct PhoneRef {
    pub brand: String,
    pub name: String,
    pub preloaded: Option<RawPhone>,
}

impl PhoneRef {
    pub fn new(brand: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            brand: brand.into(),
            name: name.into(),
            preloaded: None,
        }
    }

    pub fn display_name(&self) -> String {
        if self.brand.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.brand, self.name)
        }
    }
}

/// Upstream phone catalog
#[async_trait]
pub trait PhoneSource: Send + Sync {
    fn kind(&self) -> SourceKind;

    /// Most recently announced phones
    async fn list_latest(&self, limit: usize) -> Result<Vec<PhoneRef>, SourceError>;

    /// Phones of one brand (brand matched case-insensitively)
    async fn list_by_brand(&self, brand: &str, limit: usize) -> Result<Vec<PhoneRef>, SourceError>;

    /// Free-text search
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<PhoneRef>, SourceError>;

    /// Full record for one listing entry
    async fn fetch_details(&self, phone: &PhoneRef) -> Result<RawPhone, SourceError>;
}

pub(crate) fn build_http_client() -> Result<reqwest::Client, SourceError> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(|e| SourceError::Network(e.to_string()))
}

/// Map a non-success response into `SourceError`
pub(crate) async fn check_status(
    response: reqwest::Response,
    what: &str,
) -> Result<reqwest::Response, SourceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(SourceError::NotFound(what.to_string()));
    }
    let body = response.text().await.unwrap_or_default();
    Err(SourceError::Api {
        status: status.as_u16(),
        body,
    })
}

pub(crate) fn trim_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}
