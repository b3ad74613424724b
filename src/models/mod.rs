//! # API Models
//!
//! This module defines the data structures exchanged with the browser
//! and with the upstream ADS API.
//!
//! ## Organization
//!
//! - `requests.rs` - Incoming form bodies
//! - `upstream.rs` - JSON documents returned by the ADS API
//!
//! ## Serialization
//!
//! All models use Serde. Upstream documents are deserialized
//! leniently: every optional field carries `#[serde(default)]` so a
//! record missing a field still renders.

pub mod requests;
pub mod upstream;

pub use requests::*;
pub use upstream::*;
