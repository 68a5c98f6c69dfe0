//! # Domain Module
//!
//! Business rules for the Ijtema event: participant registration and
//! classification, the region hierarchy, monthly academic records,
//! contributions, event settings, the dashboard and report exports.
//!
//! Pure rules live in their own modules ([`classifier`], [`academic_report`],
//! [`contribution_totals`], [`codes`], [`event_progress`], [`filters`]) and
//! are composed by the services, which are generic over a storage
//! [`Connection`](crate::backend::storage::Connection).

pub mod academic_report;
pub mod academic_service;
pub mod classifier;
pub mod clock;
pub mod codes;
pub mod commands;
pub mod contribution_service;
pub mod contribution_totals;
pub mod dashboard_service;
pub mod errors;
pub mod event_progress;
pub mod event_settings_service;
pub mod export_service;
pub mod filters;
pub mod models;
pub mod participant_service;
pub mod region_service;

pub use academic_service::AcademicService;
pub use clock::Clock;
pub use contribution_service::ContributionService;
pub use dashboard_service::DashboardService;
pub use errors::DomainError;
pub use event_settings_service::EventSettingsService;
pub use export_service::{CsvDocumentSink, DocumentSink, ExportService};
pub use participant_service::ParticipantService;
pub use region_service::RegionService;
