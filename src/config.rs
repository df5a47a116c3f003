// VoltCity Testdata - Run configuration
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Run configuration for a generation pass.
//!
//! A [`RunConfig`] is declared once and treated as an immutable input by
//! the pipeline and every exporter. Defaults reproduce the reference
//! production dataset (8 regions, 50 buildings, 200 clients, 180
//! contracts, 13 months of data).

use crate::catalog;
use crate::error::ConfigError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Independent probability per data-quality defect kind.
///
/// Every rate is an independent per-call draw; a single value can carry
/// more than one defect when several draws fire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DefectRates {
    /// Value replaced by a null/empty marker.
    pub missing: f64,
    /// Fraction of a collection re-appended as duplicate rows.
    pub duplicate: f64,
    /// String wrapped in stray leading/trailing spaces.
    pub whitespace: f64,
    /// Date rendered in a non-canonical format.
    pub bad_date_format: f64,
    /// Numeric sign flip or magnitude blow-up, doubled `@` in emails.
    pub incoherent: f64,
}

impl Default for DefectRates {
    fn default() -> Self {
        Self {
            missing: 0.02,
            duplicate: 0.01,
            whitespace: 0.03,
            bad_date_format: 0.02,
            incoherent: 0.02,
        }
    }
}

impl DefectRates {
    /// All rates zero; produces a perfectly clean dataset.
    pub fn none() -> Self {
        Self {
            missing: 0.0,
            duplicate: 0.0,
            whitespace: 0.0,
            bad_date_format: 0.0,
            incoherent: 0.0,
        }
    }

    /// Iterate over `(kind, rate)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> {
        [
            ("missing", self.missing),
            ("duplicate", self.duplicate),
            ("whitespace", self.whitespace),
            ("bad_date_format", self.bad_date_format),
            ("incoherent", self.incoherent),
        ]
        .into_iter()
    }
}

/// Generation run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Random seed; a fixed seed reproduces the dataset bit-for-bit.
    pub seed: u64,
    /// Number of regions taken from the catalog.
    pub regions: usize,
    /// Number of buildings.
    pub buildings: usize,
    /// Number of clients.
    pub clients: usize,
    /// Number of contracts.
    pub contracts: usize,
    /// Hard cap on invoices generated per contract.
    pub max_invoices_per_contract: usize,
    /// First day of the data window (temperatures, reports, telemetry).
    pub start_date: NaiveDate,
    /// Last day of the data window, inclusive.
    pub end_date: NaiveDate,
    /// Effective end for open-ended contracts when billing.
    pub billing_horizon: NaiveDate,
    /// First day covered by tariff periods.
    pub tariff_start: NaiveDate,
    /// Tariff periods stop once they reach this day.
    pub tariff_end: NaiveDate,
    /// Data-quality defect rates.
    pub defects: DefectRates,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            regions: 8,
            buildings: 50,
            clients: 200,
            contracts: 180,
            max_invoices_per_contract: 12, // ~1 year of invoices
            start_date: date(2024, 1, 1),
            end_date: date(2025, 1, 31),
            billing_horizon: date(2025, 1, 31),
            tariff_start: date(2022, 1, 1),
            tariff_end: date(2025, 1, 1),
            defects: DefectRates::default(),
        }
    }
}

impl RunConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of regions.
    pub fn with_regions(mut self, n: usize) -> Self {
        self.regions = n;
        self
    }

    /// Set the number of buildings.
    pub fn with_buildings(mut self, n: usize) -> Self {
        self.buildings = n;
        self
    }

    /// Set the number of clients.
    pub fn with_clients(mut self, n: usize) -> Self {
        self.clients = n;
        self
    }

    /// Set the number of contracts.
    pub fn with_contracts(mut self, n: usize) -> Self {
        self.contracts = n;
        self
    }

    /// Set the per-contract invoice cap.
    pub fn with_max_invoices(mut self, n: usize) -> Self {
        self.max_invoices_per_contract = n;
        self
    }

    /// Set the data window.
    pub fn with_window(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// Set the defect rates.
    pub fn with_defects(mut self, defects: DefectRates) -> Self {
        self.defects = defects;
        self
    }

    /// Validate the configuration. Called by the pipeline before any
    /// generation starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (entity, count) in [
            ("regions", self.regions),
            ("buildings", self.buildings),
            ("clients", self.clients),
            ("contracts", self.contracts),
            ("max_invoices_per_contract", self.max_invoices_per_contract),
        ] {
            if count == 0 {
                return Err(ConfigError::ZeroCount { entity });
            }
        }

        let available = catalog::REGIONS.len();
        if self.regions > available {
            return Err(ConfigError::RegionCatalogExhausted {
                requested: self.regions,
                available,
            });
        }

        for (start, end) in [
            (self.start_date, self.end_date),
            (self.tariff_start, self.tariff_end),
        ] {
            if start > end {
                return Err(ConfigError::InvertedDateRange { start, end });
            }
        }

        for (kind, rate) in self.defects.iter() {
            if !(0.0..=1.0).contains(&rate) {
                return Err(ConfigError::InvalidRate { kind, rate });
            }
        }

        Ok(())
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    // Literals above are all valid calendar dates.
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}
