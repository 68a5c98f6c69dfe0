//! # IO Module
//!
//! Interface layer between HTTP clients and the domain services.

pub mod rest;
