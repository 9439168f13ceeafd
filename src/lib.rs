//! theatredb - A terminal client for theatre organization records.
//!
//! This crate provides a fragment-routed terminal front end over a DynamoDB
//! table of theatre organizations, with credential resolution, fail-soft
//! record access and a TUI interface.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing routing, services, use cases and DTOs.
pub mod application;
/// Domain layer containing entities, navigation, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing UI components and event handling.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "theatredb";
