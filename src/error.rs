// VoltCity Testdata - Error types
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Error types for the generator.
//!
//! Configuration problems fail fast, before any generation starts.
//! I/O problems during export propagate to the caller and are never
//! retried. Defect injection is intentional data shape, not an error
//! path, and has no variant here.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for generator operations.
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Main error type for generator operations.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Invalid run configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Sink write failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Telemetry document serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Report row serialization failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors detected while validating a [`RunConfig`](crate::RunConfig).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// An entity count that must be positive is zero.
    #[error("Count for {entity} must be positive")]
    ZeroCount {
        /// Entity collection the count applies to.
        entity: &'static str,
    },

    /// More regions requested than the fixed catalog provides.
    #[error("Requested {requested} regions but the catalog has {available}")]
    RegionCatalogExhausted {
        /// Number of regions requested.
        requested: usize,
        /// Number of catalog entries available.
        available: usize,
    },

    /// A date range whose end precedes its start.
    #[error("Inverted date range: {start} > {end}")]
    InvertedDateRange {
        /// Range start.
        start: NaiveDate,
        /// Range end.
        end: NaiveDate,
    },

    /// A defect rate outside the [0, 1] probability interval.
    #[error("Defect rate {rate} for {kind} is outside [0, 1]")]
    InvalidRate {
        /// Defect kind the rate applies to.
        kind: &'static str,
        /// Offending rate.
        rate: f64,
    },
}
