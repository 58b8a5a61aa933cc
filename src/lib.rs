//! # Climate Query Service
//!
//! Read-only HTTP API over a relational climate observation dataset.
//!
//! This crate exposes precipitation and temperature readings per weather
//! station through a small set of fixed query shapes: a route listing, a
//! year-of-precipitation map, a station list, a year-of-temperature map,
//! and min/max/avg temperature aggregates over a date range. Every route
//! translates one HTTP request into one read query against the storage
//! backend and serializes the result as JSON.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Shared data types for query results
//! - [`models`]: Calendar helpers for the lexically ordered ISO date column
//! - [`db`]: Repository pattern over the observation store, with a Diesel
//!   SQLite backend and an in-memory backend for tests and development
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! The service performs no writes for its entire runtime; the dataset is
//! pre-populated before startup.

pub mod api;


pub mod db;
pub mod models;

#[cfg(feature = "http-server")]
pub mod http;
