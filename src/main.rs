//! # totext Backend Service
//!
//! This is the main entry point for the totext web front end: a small
//! server-rendered search interface over the ADS bibliographic API.
//! It provides:
//!
//! - A search page forwarding queries to the remote search service
//! - An abstract view for one bibcode (citing records)
//! - A BibTeX export view
//! - Anonymous token management with per-visitor sessions
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      WEB FRONT END                        │
//! │                                                           │
//! │  ┌───────────────┐   ┌─────────────────────────────────┐ │
//! │  │   HTML pages  │   │        Session (cookie)          │ │
//! │  │   (Actix)     │   │  • bootstrap token + expiry      │ │
//! │  │               │   │  • upstream cookie jar           │ │
//! │  │  /            │   └─────────────────────────────────┘ │
//! │  │  /abs/{code}  │                  │                    │
//! │  │  /export/...  │                  │                    │
//! │  └───────┬───────┘                  │                    │
//! │          │        ┌─────────────────┴──────────────────┐ │
//! │          └───────▶│             AdsClient              │ │
//! │                   │  bootstrap / search / export       │ │
//! │                   └─────────────────┬──────────────────┘ │
//! └─────────────────────────────────────┼────────────────────┘
//!                                       ▼
//!                                  ADS API (remote)
//! ```
//!
//! ## Quick Start
//!
//! 1. Copy `.env.example` to `.env` and configure (all optional)
//! 2. Start the server: `cargo run`
//!
//! ## Environment Variables
//!
//! See `src/config/mod.rs` for the full list.

use std::sync::Arc;

use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::Key;
use actix_web::{middleware, web, App, HttpServer};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod ads;
mod api;
mod config;
mod error;
mod models;
mod services;
mod templates;
mod utils;

use ads::AdsClient;
use config::AppConfig;

/// Application state shared across all handlers.
pub struct AppState {
    /// Application configuration.
    pub config: AppConfig,

    /// Client for the remote ADS API.
    pub ads: AdsClient,
}

/// Main entry point for the web front end.
///
/// This function:
/// 1. Initializes logging
/// 2. Loads configuration from environment
/// 3. Builds the ADS client
/// 4. Launches the HTTP server with session middleware
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // =========================================
    // STEP 1: Initialize Logging
    // =========================================
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("🚀 Starting totext web front end");

    // =========================================
    // STEP 2: Load Configuration
    // =========================================
    dotenvy::dotenv().ok(); // It's okay if .env doesn't exist

    let config = AppConfig::from_env().expect("Failed to load configuration");

    info!("📋 Configuration loaded");
    info!("   ADS API: {}", config.ads_api_url);
    info!("   Timeout: {}s", config.api_timeout);

    // =========================================
    // STEP 3: Initialize ADS Client
    // =========================================
    let ads = AdsClient::new(&config).expect("Failed to create ADS client");

    info!("🔭 ADS client initialized");

    // =========================================
    // STEP 4: Session Key
    // =========================================
    // A generated key invalidates sessions on restart; set
    // SESSION_SECRET to keep them.
    let session_key = match &config.session_secret {
        Some(secret) => Key::from(secret.as_bytes()),
        None => {
            info!("🔑 SESSION_SECRET not set, generating a volatile key");
            Key::generate()
        }
    };

    // =========================================
    // STEP 5: Start HTTP Server
    // =========================================
    let server_host = config.server_host.clone();
    let server_port = config.server_port;

    let app_state = Arc::new(AppState { config, ads });

    info!("🌐 Starting HTTP server on {}:{}", server_host, server_port);

    HttpServer::new(move || {
        App::new()
            // Attach shared application state
            .app_data(web::Data::new(app_state.clone()))
            // Add logging middleware
            .wrap(middleware::Logger::default())
            // Per-visitor signed cookie session
            .wrap(
                SessionMiddleware::builder(
                    CookieSessionStore::default(),
                    session_key.clone(),
                )
                .cookie_name("totext-session".to_string())
                .cookie_secure(false)
                .build(),
            )
            // Configure routes
            .configure(api::configure_routes)
    })
    .bind(format!("{}:{}", server_host, server_port))?
    .run()
    .await
}
