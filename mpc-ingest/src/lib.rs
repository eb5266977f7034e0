//! mpc-ingest: third-party phone data import
//!
//! Pipeline: source adapter → transformer → import orchestrator → storage.
//!
//! - [`sources`]: HTTP clients for the RapidAPI GSMArena-style API and MobileAPI.dev
//! - [`transform`]: pure mapping of vendor JSON into `NewMobile`/`NewBrand`
//! - [`pricing`], [`images`]: static heuristics used by the transformers
//! - [`import_service`]: sequential, throttled upsert-by-slug

pub mod error;
pub mod images;
pub mod import_service;
pub mod pricing;
pub mod sources;
pub mod transform;

pub use error::{ImportError, SourceError, TransformError};
pub use import_service::{ImportOptions, ImportResult, ImportService};
pub use sources::{PhoneRef, PhoneSource, RawPhone, SourceKind};
