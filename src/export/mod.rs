// VoltCity Testdata - Exporters
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Output artifact exporters.
//!
//! Each exporter consumes a read-only view of the completed
//! [`RelationalDataset`](crate::RelationalDataset) and produces one
//! independent artifact family:
//!
//! - [`relational`]: grouped SQL insert statements
//! - [`telemetry`]: per-day, per-energy-type JSON consumption files
//! - [`report`]: monthly CSV environmental reports
//!
//! Exporters never feed back into the pipeline. The telemetry and
//! report exporters own their random stream, seeded from the run
//! configuration, so the three artifacts are reproducible independently
//! of each other.

pub mod relational;
pub mod report;
pub mod telemetry;

pub use relational::RelationalExporter;
pub use report::{ReportExporter, ReportRow};
pub use telemetry::{BuildingTelemetry, HourlyReading, TelemetryExporter};
