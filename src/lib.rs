//! EventFlow Lead Console Library
//!
//! This library provides the client-side core for the EventFlow
//! event-planning backend: a typed gateway client, an immutable dashboard
//! snapshot store, a pure stats aggregator and plain-text view rendering.
//!
//! # Modules
//!
//! - `config`: Configuration management.
//! - `dashboard`: Refresh policy, manual actions and panel rendering.
//! - `errors`: Error handling types.
//! - `gateway_client`: Backend REST API client.
//! - `models`: Core data models and phone normalization.
//! - `stats`: Lead aggregation.
//! - `store`: Dashboard snapshot store.
//! - `view`: Console view selection.

pub mod config;
pub mod dashboard;
pub mod errors;
pub mod gateway_client;
pub mod models;
pub mod stats;
pub mod store;
pub mod view;
