// VoltCity Testdata - Synthetic dataset generator
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! # VoltCity Testdata
//!
//! Referentially consistent synthetic dataset generator for the
//! VoltCity utility-billing platform.
//!
//! A single seeded pass builds the full relational dataset (regions,
//! buildings, meters, clients, contracts, tariffs, invoices, payments,
//! temperature readings), then three exporters emit it as SQL insert
//! statements, daily JSON consumption telemetry, and monthly CSV
//! environmental reports. A parameterized fraction of records carries
//! data-quality defects (missing values, duplicates, stray whitespace,
//! malformed dates, incoherent magnitudes), which makes the artifacts
//! useful as fixtures for data-cleaning and ETL pipelines.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use voltcity_testdata::{GenerationPipeline, RelationalExporter, RunConfig};
//!
//! let config = RunConfig::new().with_seed(42).with_buildings(10);
//! let dataset = GenerationPipeline::new(config).unwrap().run();
//!
//! RelationalExporter::new(&dataset)
//!     .write_to_path("insert_data.sql")
//!     .unwrap();
//! ```
//!
//! ## Guarantees
//!
//! - Every foreign key references a record generated earlier in the
//!   pipeline; defect injection never touches ids or foreign keys.
//! - A fixed seed and configuration reproduce every artifact
//!   byte-for-byte.
//! - Defect injection never fails; its rates are independent per call.

pub mod catalog;
pub mod config;
pub mod dataset;
pub mod defects;
pub mod entities;
pub mod error;
pub mod export;
pub mod factory;
pub mod pipeline;

// Re-exports for convenience
pub use config::{DefectRates, RunConfig};
pub use dataset::RelationalDataset;
pub use defects::DefectPolicy;
pub use error::{ConfigError, GeneratorError, Result};
pub use export::{RelationalExporter, ReportExporter, TelemetryExporter};
pub use pipeline::GenerationPipeline;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
