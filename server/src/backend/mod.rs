//! # Backend Module
//!
//! Everything behind the HTTP surface of the Ijtema manager.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST API, handlers, DTO mappers)
//!     ↓
//! Domain Layer (rules, services)
//!     ↓
//! Storage Layer (CSV/YAML record store)
//! ```
//!
//! [`initialize_backend`] wires the services over one storage connection and
//! [`create_router`] exposes them under `/api`.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::backend::config::AppConfig;
use crate::backend::domain::{
    AcademicService, Clock, ContributionService, DashboardService, EventSettingsService,
    ExportService, ParticipantService, RegionService,
};
use crate::backend::io::rest::{
    academic_apis, contribution_apis, dashboard_apis, event_settings_apis, export_apis,
    participant_apis, region_apis,
};
use crate::backend::storage::csv::CsvConnection;

/// Services shared by every request handler
#[derive(Clone)]
pub struct AppState {
    pub participant_service: ParticipantService<CsvConnection>,
    pub region_service: RegionService<CsvConnection>,
    pub academic_service: AcademicService<CsvConnection>,
    pub contribution_service: ContributionService<CsvConnection>,
    pub dashboard_service: DashboardService<CsvConnection>,
    pub event_settings_service: EventSettingsService<CsvConnection>,
    pub export_service: ExportService<CsvConnection>,
}

/// Initialize the backend over the configured data directory
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up data directory {}", config.data_dir.display());
    let connection = CsvConnection::new(&config.data_dir)
        .with_context(|| format!("Failed to open data directory {}", config.data_dir.display()))?;

    initialize_with_connection(connection, Clock::System).await
}

/// Wire every service over one connection
pub async fn initialize_with_connection(connection: CsvConnection, clock: Clock) -> Result<AppState> {
    let exports_directory = connection.exports_directory();
    let connection = Arc::new(connection);

    info!("Setting up domain model");
    let event_settings_service = EventSettingsService::load(connection.clone(), clock).await?;
    let participant_service = ParticipantService::new(connection.clone(), clock);
    let region_service = RegionService::new(connection.clone());
    let academic_service = AcademicService::new(connection.clone(), clock);
    let contribution_service = ContributionService::new(connection.clone(), clock);
    let dashboard_service =
        DashboardService::new(connection.clone(), event_settings_service.clone(), clock);
    let export_service = ExportService::new(
        participant_service.clone(),
        academic_service.clone(),
        contribution_service.clone(),
        event_settings_service.clone(),
        exports_directory,
        clock,
    );

    info!("Setting up application state");
    Ok(AppState {
        participant_service,
        region_service,
        academic_service,
        contribution_service,
        dashboard_service,
        event_settings_service,
        export_service,
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, allowed_origin: &str) -> Result<Router> {
    let origin: HeaderValue = allowed_origin
        .parse()
        .with_context(|| format!("Invalid allowed origin: {}", allowed_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/participants",
            get(participant_apis::list_participants).post(participant_apis::register_participant),
        )
        .route(
            "/participants/:id",
            get(participant_apis::get_participant)
                .put(participant_apis::update_participant)
                .delete(participant_apis::delete_participant),
        )
        .route(
            "/participants/:id/academics",
            get(participant_apis::get_participant_academics),
        )
        .route(
            "/regions",
            get(region_apis::list_regions).post(region_apis::create_region),
        )
        .route(
            "/regions/:id",
            put(region_apis::update_region).delete(region_apis::delete_region),
        )
        .route("/majlis", post(region_apis::create_majlis))
        .route(
            "/majlis/:id",
            put(region_apis::update_majlis).delete(region_apis::delete_majlis),
        )
        .route(
            "/academics",
            get(academic_apis::list_academic_records).post(academic_apis::create_academic_record),
        )
        .route("/academics/stats", get(academic_apis::get_academic_statistics))
        .route(
            "/academics/:id",
            put(academic_apis::update_academic_record).delete(academic_apis::delete_academic_record),
        )
        .route(
            "/contributions",
            get(contribution_apis::list_contributions).post(contribution_apis::create_contribution),
        )
        .route(
            "/contributions/summary",
            get(contribution_apis::get_contribution_summary),
        )
        .route(
            "/contributions/:id",
            put(contribution_apis::update_contribution)
                .delete(contribution_apis::delete_contribution),
        )
        .route("/dashboard", get(dashboard_apis::get_dashboard))
        .route(
            "/settings/event",
            get(event_settings_apis::get_event_settings)
                .put(event_settings_apis::save_event_settings)
                .delete(event_settings_apis::delete_event_settings),
        )
        .nest("/export", export_apis::router());

    Ok(Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state))
}
