//! # REST API Interface Layer
//!
//! HTTP endpoints over the domain services. Handlers translate DTOs from
//! the `shared` crate into domain commands through the [`mappers`], call
//! one service, and turn failures into JSON error bodies with
//! [`error::error_response`].

pub mod academic_apis;
pub mod contribution_apis;
pub mod dashboard_apis;
pub mod error;
pub mod event_settings_apis;
pub mod export_apis;
pub mod mappers;
pub mod participant_apis;
pub mod region_apis;
