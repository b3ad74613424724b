//! # Web Module
//!
//! This module defines the HTML-facing HTTP endpoints.
//!
//! ## Endpoint Overview
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Search form |
//! | POST | `/` | Run a search, render results |
//! | GET | `/abs/{bibcode}` | Abstract view (citing records) |
//! | GET | `/export/{bibcode}` | BibTeX export |
//! | GET | `/health` | Health check |
//!
//! Every page handler refreshes the visitor's anonymous token first;
//! bibcode routes validate the code length before anything else and
//! redirect to `/` on a malformed code.

pub mod handlers;
pub mod routes;

pub use routes::configure_routes;
